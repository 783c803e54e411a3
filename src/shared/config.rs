//! Application configuration. Job parameters, store paths, SMTP credentials.

use serde::Deserialize;

/// Default JSON catalog with the group forest and email templates.
pub const DEFAULT_CATALOG_PATH: &str = "./data/catalog.json";

/// Default JSONL log of archived sends.
pub const DEFAULT_ARCHIVE_PATH: &str = "./data/communications.jsonl";

/// Parameters of one reminder run, as supplied by the hosting scheduler.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Container group whose direct children are the meeting groups. Blank = job does nothing.
    #[serde(default)]
    pub root_group_id: Option<String>,

    /// Days ahead of now a next occurrence must fall within.
    /// NOTE: running the job more than once inside this window re-sends the reminders.
    #[serde(default)]
    pub look_ahead_days: u32,

    /// Email template. Blank = job does nothing.
    #[serde(default)]
    pub template_id: Option<String>,

    /// Keep a record of each send in the communication archive.
    #[serde(default)]
    pub archive_sends: bool,

    /// Consider schedules attached to group locations, not only the group's own schedule.
    #[serde(default = "default_true")]
    pub include_location_schedules: bool,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            root_group_id: None,
            look_ahead_days: 0,
            template_id: None,
            archive_sends: false,
            include_location_schedules: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl JobConfig {
    /// Root group id, if set and not blank.
    pub fn root_group_id(&self) -> Option<&str> {
        non_blank(self.root_group_id.as_deref())
    }

    /// Template id, if set and not blank.
    pub fn template_id(&self) -> Option<&str> {
        non_blank(self.template_id.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub job: JobConfig,

    /// Path of the JSON catalog. Read from GROUP_REMINDER_CATALOG_PATH.
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Path of the communication archive (JSONL). Read from GROUP_REMINDER_ARCHIVE_PATH.
    #[serde(default)]
    pub archive_path: Option<String>,

    /// Public base URL handed to templates. Read from GROUP_REMINDER_BASE_URL.
    #[serde(default)]
    pub base_url: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // SMTP Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// SMTP relay host. When unset, messages are only logged (dry run).
    #[serde(default)]
    pub smtp_host: Option<String>,

    #[serde(default)]
    pub smtp_port: Option<u16>,

    #[serde(default)]
    pub smtp_username: Option<String>,

    #[serde(default)]
    pub smtp_password: Option<String>,

    /// Per-message SMTP timeout in seconds (default 30).
    #[serde(default)]
    pub smtp_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Load from `.env`, GROUP_REMINDER_* environment variables and, optionally, the file
    /// named by GROUP_REMINDER_CONFIG. Job fields use a double underscore, e.g.
    /// GROUP_REMINDER_JOB__ROOT_GROUP_ID.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("GROUP_REMINDER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(
            config::Environment::with_prefix("GROUP_REMINDER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        c.build()?.try_deserialize()
    }

    pub fn catalog_path_or_default(&self) -> String {
        self.catalog_path
            .clone()
            .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string())
    }

    pub fn archive_path_or_default(&self) -> String {
        self.archive_path
            .clone()
            .unwrap_or_else(|| DEFAULT_ARCHIVE_PATH.to_string())
    }

    /// Returns SMTP port. Defaults to 587 (submission, STARTTLS).
    pub fn smtp_port_or_default(&self) -> u16 {
        self.smtp_port.unwrap_or(587)
    }

    /// Returns SMTP timeout in seconds. Defaults to 30.
    pub fn smtp_timeout_secs_or_default(&self) -> u64 {
        self.smtp_timeout_secs.unwrap_or(30)
    }

    /// Returns true if an SMTP relay is configured.
    pub fn is_smtp_configured(&self) -> bool {
        self.smtp_host
            .as_deref()
            .is_some_and(|h| !h.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_defaults() {
        let job: JobConfig = serde_json::from_str("{}").unwrap();
        assert!(job.include_location_schedules);
        assert!(!job.archive_sends);
        assert_eq!(job.look_ahead_days, 0);
        assert!(job.root_group_id().is_none());
    }

    #[test]
    fn test_blank_ids_are_treated_as_missing() {
        let job = JobConfig {
            root_group_id: Some("  ".to_string()),
            template_id: Some(" tmpl ".to_string()),
            ..Default::default()
        };
        assert_eq!(job.root_group_id(), None);
        assert_eq!(job.template_id(), Some("tmpl"));
    }
}
