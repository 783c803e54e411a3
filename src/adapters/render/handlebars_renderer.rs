//! Handlebars adapter. Implements TemplateRenderer.
//!
//! Non-strict: a missing or null merge field renders as empty text. Output is not
//! HTML-escaped because templates are operator-authored and bodies are HTML already.

use crate::domain::{DomainError, MergeFields};
use crate::ports::TemplateRenderer;
use chrono::DateTime;
use chrono::format::{Item, StrftimeItems};
use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
    no_escape,
};

/// Default output format of the `date` helper, e.g. "Tuesday, May 7 at 7:00 PM".
const DEFAULT_DATE_FORMAT: &str = "%A, %B %-d at %-I:%M %p";

pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry.register_escape_fn(no_escape);
        registry.register_helper("date", Box::new(date_helper));
        Self { registry }
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template: &str, fields: &MergeFields<'_>) -> Result<String, DomainError> {
        self.registry
            .render_template(template, fields)
            .map_err(|e| DomainError::Render(e.to_string()))
    }
}

/// `{{date Schedule.next_start "%b %-d"}}`: format an RFC 3339 timestamp. Renders nothing
/// for a missing or unparseable value; an invalid format string is a render error.
fn date_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let Some(raw) = h.param(0).and_then(|p| p.value().as_str()) else {
        return Ok(());
    };
    let format = h
        .param(1)
        .and_then(|p| p.value().as_str())
        .unwrap_or(DEFAULT_DATE_FORMAT);
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(RenderErrorReason::Other(format!("invalid date format '{}'", format)).into());
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        out.write(&ts.format(format).to_string())?;
    }
    Ok(())
}
