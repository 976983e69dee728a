//! HTML template system for the site shell.
//!
//! A lightweight interpolation engine rather than a full template language:
//!
//! - `{{ name }}` inserts the variable HTML-escaped (safe in text and in
//!   quoted attributes).
//! - `{{{ name }}}` inserts the variable as-is, for pre-rendered markup.
//! - A trailing `?` (`{{ name? }}`, `{{{ name? }}}`) makes the variable
//!   optional; a missing optional variable renders as nothing.

use std::{borrow::Cow, collections::HashMap};

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Escape text for use in HTML text or a quoted attribute value.
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Create context with initial variables.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a variable only when a value is present.
    #[must_use]
    pub fn with_opt(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A named template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut out = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let tag = &rest[start..];

            let (raw, open, close) = if tag.starts_with("{{{") {
                (true, 3, "}}}")
            } else {
                (false, 2, "}}")
            };
            let end = tag[open..].find(close).ok_or_else(|| {
                TemplateError::InvalidSyntax(format!("unclosed {} in {}", &tag[..open], self.name))
            })?;

            let var_name = tag[open..open + end].trim();
            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped.trim_end(), true),
                None => (var_name, false),
            };
            if var_name.is_empty() {
                return Err(TemplateError::InvalidSyntax(format!(
                    "empty placeholder in {}",
                    self.name
                )));
            }

            match context.get(var_name) {
                Some(value) if raw => out.push_str(value),
                Some(value) => out.push_str(&escape(value)),
                None if optional => {}
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            }

            rest = &tag[open + end + close.len()..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with default templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    /// Register default built-in templates.
    fn register_defaults(&mut self) {
        self.register(Template::new("document", DEFAULT_DOCUMENT_TEMPLATE));
        self.register(Template::new("metadata", DEFAULT_METADATA_TEMPLATE));
        self.register(Template::new("header", DEFAULT_HEADER_TEMPLATE));
        self.register(Template::new("nav_item", DEFAULT_NAV_ITEM_TEMPLATE));
        self.register(Template::new("footer", DEFAULT_FOOTER_TEMPLATE));
        self.register(Template::new("service_item", DEFAULT_SERVICE_ITEM_TEMPLATE));
        self.register(Template::new("preview_toolbar", DEFAULT_PREVIEW_TOOLBAR_TEMPLATE));
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Full HTML document wrapping the shell regions.
pub const DEFAULT_DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
{{{ metadata }}}
</head>
<body class="overflow-x-hidden antialiased">
{{{ header }}}
{{{ content }}}
{{{ preview_toolbar? }}}
{{{ footer }}}
</body>
</html>
"#;

/// Canonical link and social preview tags.
pub const DEFAULT_METADATA_TEMPLATE: &str = r#"    <link rel="canonical" href="{{ canonical_url }}">
    <meta property="og:url" content="{{ canonical_url }}">
    <meta property="og:image" content="{{ og_image_url }}">"#;

/// Site header with title and navigation.
pub const DEFAULT_HEADER_TEMPLATE: &str = r#"<header class="px-4 py-4 md:px-6 md:py-6 lg:py-8">
    <div class="mx-auto w-full max-w-6xl">
        <div class="flex flex-wrap items-baseline justify-between gap-x-6 gap-y-3 leading-none">
            <a href="/" class="text-xl font-semibold tracking-tight">{{ site_title }}</a>
            <nav>
                <ul class="flex flex-wrap gap-6 md:gap-10">{{{ nav_items? }}}</ul>
            </nav>
        </div>
    </div>
</header>"#;

/// One navigation entry.
pub const DEFAULT_NAV_ITEM_TEMPLATE: &str = r#"
                    <li data-key="{{ key }}" class="font-semibold tracking-tight text-slate-800">{{{ link }}}</li>"#;

/// Site footer with contact block, services and subscribe form.
pub const DEFAULT_FOOTER_TEMPLATE: &str = r#"<div class="footer">
    <div class="background-darkgrey">
        <div class="container-content py-[35px]">
            <div class="content">
                <div class="content-left">
                    <p>{{{ contact_lines? }}}</p>
                </div>
                <div class="content-center">
                    <h3>Our Services</h3>
                    <ul class="link-service">{{{ services? }}}</ul>
                </div>
                <div class="content-right">
                    <h3>{{ subscribe_name? }}</h3>
                    <input type="text" name="email" placeholder="{{ subscribe_placeholder? }}" class="input-email">
                    <button type="button" class="block btn-primary mt-[15px]">{{ subscribe_button_name? }}</button>
                </div>
            </div>
        </div>
    </div>
    <div class="copy">Copyright &copy; {{ year }} {{ copyright_holder }} All Rights Reserved</div>
</div>"#;

/// One footer service entry.
pub const DEFAULT_SERVICE_ITEM_TEMPLATE: &str = r#"
                        <li data-key="{{ key }}">{{{ link }}}</li>"#;

/// Content preview toolbar loader.
pub const DEFAULT_PREVIEW_TOOLBAR_TEMPLATE: &str = r#"<script async defer src="https://static.cdn.prismic.io/prismic.js?new=true&amp;repo={{ repository }}"></script>"#;
