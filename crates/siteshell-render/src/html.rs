//! Markup for the shell regions.
//!
//! Pure functions from typed documents to HTML fragments. Fetching lives in
//! [`crate::shell`]; nothing here touches the network.

use siteshell_core::{FooterDoc, LinkField, NavigationDoc, SiteSettings};

use crate::template::{Result, TemplateContext, TemplateRegistry, escape};

/// Static head metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Absolute canonical URL.
    pub canonical_url: String,
    /// Absolute social preview image URL.
    pub og_image_url: String,
}

/// Footer values that come from configuration rather than the footer document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Copyright<'a> {
    pub year: i32,
    pub holder: &'a str,
}

/// Render the header: the site title linked home, then the navigation list.
pub fn header_html(
    templates: &TemplateRegistry,
    settings: &SiteSettings,
    navigation: &NavigationDoc,
) -> Result<String> {
    let nav_items = navigation
        .links
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let label = item.label.as_text();
            let ctx = TemplateContext::new()
                .with_var("key", list_key(index, &label))
                .with_var("link", link_html(&item.link, &label));
            templates.render("nav_item", &ctx)
        })
        .collect::<Result<String>>()?;

    let ctx = TemplateContext::new()
        .with_var("site_title", settings.site_title.as_text())
        .with_var("nav_items", nav_items);
    templates.render("header", &ctx)
}

/// Render the footer: contact block, services list and subscribe form.
pub fn footer_html(
    templates: &TemplateRegistry,
    footer: &FooterDoc,
    copyright: &Copyright<'_>,
) -> Result<String> {
    let contact_lines = footer
        .contact_lines()
        .into_iter()
        .map(|line| escape(line).into_owned())
        .collect::<Vec<_>>()
        .join("<br>\n                        ");

    let services = footer
        .our_services
        .iter()
        .enumerate()
        .map(|(index, service)| {
            let name = service.service_name.as_deref().unwrap_or_default();
            let ctx = TemplateContext::new()
                .with_var("key", list_key(index, &service.label.as_text()))
                .with_var("link", link_html(&service.service_link, name));
            templates.render("service_item", &ctx)
        })
        .collect::<Result<String>>()?;

    let ctx = TemplateContext::new()
        .with_var("contact_lines", contact_lines)
        .with_var("services", services)
        .with_opt("subscribe_name", footer.subscribe_name.as_deref())
        .with_opt(
            "subscribe_placeholder",
            footer.subscribe_placeholder.as_deref(),
        )
        .with_opt(
            "subscribe_button_name",
            footer.subscribe_button_name.as_deref(),
        )
        .with_var("year", copyright.year.to_string())
        .with_var("copyright_holder", copyright.holder);
    templates.render("footer", &ctx)
}

/// Render the canonical link and social preview tags.
pub fn metadata_html(templates: &TemplateRegistry, metadata: &Metadata) -> Result<String> {
    let ctx = TemplateContext::new()
        .with_var("canonical_url", &metadata.canonical_url)
        .with_var("og_image_url", &metadata.og_image_url);
    templates.render("metadata", &ctx)
}

/// Render a link field around an already-plain label.
///
/// Without a URL the label is emitted bare. External URLs get
/// `rel="noreferrer"` and `_blank` targets get `rel="noopener"`.
pub fn link_html(link: &LinkField, label: &str) -> String {
    let label = escape(label);
    let Some(href) = link.href() else {
        return label.into_owned();
    };

    let mut attrs = format!(r#"href="{}""#, escape(href));
    if let Some(target) = link.target() {
        attrs.push_str(&format!(r#" target="{}""#, escape(target)));
    }

    let mut rel = Vec::new();
    if link.target() == Some("_blank") {
        rel.push("noopener");
    }
    if !is_internal_url(href) {
        rel.push("noreferrer");
    }
    if !rel.is_empty() {
        attrs.push_str(&format!(r#" rel="{}""#, rel.join(" ")));
    }

    format!("<a {attrs}>{label}</a>")
}

/// Site-relative paths and fragments stay on the site.
fn is_internal_url(href: &str) -> bool {
    href.starts_with('#') || (href.starts_with('/') && !href.starts_with("//"))
}

/// Stable key for a list item: its position plus a slug of its label, so
/// duplicate labels still yield distinct keys.
pub fn list_key(index: usize, label: &str) -> String {
    let slug = slug_from_str(label);
    if slug.is_empty() {
        index.to_string()
    } else {
        format!("{index}-{slug}")
    }
}

/// Generate a URL-safe slug from a string.
fn slug_from_str(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
