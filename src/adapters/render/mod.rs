//! Template rendering adapters. Implement TemplateRenderer.

pub mod handlebars_renderer;

pub use handlebars_renderer::HandlebarsRenderer;
