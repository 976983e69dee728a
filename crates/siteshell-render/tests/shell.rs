//! End-to-end tests for the site shell over an in-memory repository.

use std::sync::Arc;

use serde_json::{Value, json};
use siteshell_cms::{CmsError, MemoryRepository};
use siteshell_core::{
    Config,
    config::{CmsConfig, ServerConfig, SiteConfig},
};
use siteshell_render::{PageContent, RenderError, SiteShell};

fn test_config() -> Config {
    Config {
        site: SiteConfig {
            base_url: "https://thaipfa.com".to_string(),
            canonical_path: "/".to_string(),
            og_image: "/og-image.png".to_string(),
            language: "en".to_string(),
            copyright_holder: "Thai Professional Finance Academy (ThaiPFA)".to_string(),
            copyright_year: Some(2024),
        },
        cms: CmsConfig {
            repository: "thaipfa".to_string(),
            endpoint: None,
            access_token: None,
            lang: None,
            timeout_secs: 10,
            master_ref_ttl_secs: 0,
            preview_toolbar: false,
        },
        server: ServerConfig::default(),
    }
}

fn rich(text: &str) -> Value {
    json!([{ "type": "heading1", "text": text, "spans": [] }])
}

fn scenario_repository() -> MemoryRepository {
    MemoryRepository::new()
        .with_document("settings", json!({ "siteTitle": rich("ThaiPFA") }))
        .with_document(
            "navigation",
            json!({
                "links": [{
                    "label": rich("Courses"),
                    "link": { "link_type": "Web", "url": "/courses" }
                }]
            }),
        )
        .with_document(
            "footer",
            json!({ "contact_title": "Contact", "our_services": [] }),
        )
}

fn shell(repository: MemoryRepository) -> SiteShell {
    SiteShell::new(Arc::new(repository), Arc::new(test_config()))
}

fn nav_section(html: &str) -> &str {
    let start = html.find("<nav>").expect("nav start");
    let end = html.find("</nav>").expect("nav end");
    &html[start..end]
}

fn services_section(html: &str) -> &str {
    let start = html.find(r#"<ul class="link-service">"#).expect("services start");
    let end = start + html[start..].find("</ul>").expect("services end");
    &html[start..end]
}

#[tokio::test]
async fn test_scenario_header() {
    let header = shell(scenario_repository()).render_header().await.unwrap();

    assert_eq!(header.site_title, "ThaiPFA");
    assert_eq!(header.html.matches("ThaiPFA").count(), 1);
    assert!(
        header
            .html
            .contains(r#"href="/" class="text-xl font-semibold tracking-tight">ThaiPFA</a>"#)
    );

    let nav = nav_section(&header.html);
    assert_eq!(nav.matches("<li").count(), 1);
    assert!(nav.contains(r#"<a href="/courses">Courses</a>"#));
}

#[tokio::test]
async fn test_scenario_footer() {
    let footer = shell(scenario_repository()).render_footer().await.unwrap();

    assert!(footer.contains(r#"<div class="content-left">"#));
    assert!(footer.contains("<p>Contact</p>"));
    assert_eq!(services_section(&footer).matches("<li").count(), 0);
    assert!(footer.contains("Copyright &copy; 2024"));
}

#[tokio::test]
async fn test_navigation_without_links_renders_empty_list() {
    let repo = scenario_repository().with_document("navigation", json!({}));
    let header = shell(repo).render_header().await.unwrap();

    assert_eq!(nav_section(&header.html).matches("<li").count(), 0);
}

#[tokio::test]
async fn test_navigation_preserves_count_and_order() {
    let labels = ["Home", "Courses", "Events", "Articles", "About", "Contact"];
    let links: Vec<Value> = labels
        .iter()
        .map(|label| {
            json!({
                "label": rich(label),
                "link": { "link_type": "Web", "url": format!("/{}", label.to_lowercase()) }
            })
        })
        .collect();
    let repo = scenario_repository().with_document("navigation", json!({ "links": links }));

    let header = shell(repo).render_header().await.unwrap();
    let nav = nav_section(&header.html);
    assert_eq!(nav.matches("<li").count(), labels.len());

    let positions: Vec<usize> = labels
        .iter()
        .map(|label| nav.find(&format!(">{label}</a>")).expect("label rendered"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_services_link_to_url_with_target_in_order() {
    let repo = scenario_repository().with_document(
        "footer",
        json!({
            "contact_title": "Contact",
            "our_services": [
                { "label": rich("Planning"), "service_name": "Financial Planning",
                  "service_link": { "link_type": "Web", "url": "https://thaipfa.com/planning", "target": "_blank" } },
                { "label": rich("Courses"), "service_name": "CFP Courses",
                  "service_link": { "link_type": "Web", "url": "https://thaipfa.com/courses", "target": "_self" } },
                { "label": rich("Courses"), "service_name": "Exam Prep",
                  "service_link": { "link_type": "Web", "url": "https://thaipfa.com/exam" } }
            ]
        }),
    );

    let footer = shell(repo).render_footer().await.unwrap();
    let services = services_section(&footer);

    assert_eq!(services.matches("<li").count(), 3);
    let planning = services
        .find(r#"href="https://thaipfa.com/planning" target="_blank""#)
        .unwrap();
    let courses = services
        .find(r#"href="https://thaipfa.com/courses" target="_self""#)
        .unwrap();
    let exam = services
        .find(r#"href="https://thaipfa.com/exam" rel="noreferrer">Exam Prep"#)
        .unwrap();
    assert!(planning < courses && courses < exam);
    assert!(services.contains(r#"data-key="1-courses""#));
    assert!(services.contains(r#"data-key="2-courses""#));
}

#[tokio::test]
async fn test_full_page_document() {
    let page = PageContent::new("<main><h1>Welcome</h1></main>");
    let html = shell(scenario_repository()).render_page(&page).await.unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<html lang="en">"#));
    assert!(html.contains("<title>ThaiPFA</title>"));
    assert!(html.contains(r#"<link rel="canonical" href="https://thaipfa.com/">"#));
    assert!(html.contains(
        r#"<meta property="og:image" content="https://thaipfa.com/og-image.png">"#
    ));
    assert!(!html.contains("prismic.js"));

    let header = html.find("<header").unwrap();
    let content = html.find("<main><h1>Welcome</h1></main>").unwrap();
    let footer = html.find(r#"<div class="footer">"#).unwrap();
    assert!(header < content && content < footer);
}

#[tokio::test]
async fn test_page_title_and_preview_toolbar() {
    let mut config = test_config();
    config.cms.preview_toolbar = true;
    let shell = SiteShell::new(Arc::new(scenario_repository()), Arc::new(config));

    let page = PageContent::new("<p>Courses</p>").with_title("Courses | ThaiPFA");
    let html = shell.render_page(&page).await.unwrap();

    assert!(html.contains("<title>Courses | ThaiPFA</title>"));
    assert!(html.contains(
        r#"<script async defer src="https://static.cdn.prismic.io/prismic.js?new=true&amp;repo=thaipfa"></script>"#
    ));
}

#[tokio::test]
async fn test_settings_fetch_error_aborts_page() {
    let repo = scenario_repository().with_failure("settings", "connection reset");
    let err = shell(repo)
        .render_page(&PageContent::new("<p>body</p>"))
        .await
        .unwrap_err();

    assert!(matches!(err, RenderError::Content(CmsError::Fetch { .. })));
}

#[tokio::test]
async fn test_footer_fetch_error_aborts_page() {
    let repo = scenario_repository().with_failure("footer", "timeout");
    let result = shell(repo).render_page(&PageContent::new("<p>body</p>")).await;

    assert!(matches!(
        result,
        Err(RenderError::Content(CmsError::Fetch { .. }))
    ));
}

#[tokio::test]
async fn test_missing_singleton_is_not_found() {
    let repo =
        MemoryRepository::new().with_document("settings", json!({ "siteTitle": rich("ThaiPFA") }));
    let err = shell(repo).render_header().await.unwrap_err();

    assert!(matches!(
        err,
        RenderError::Content(CmsError::NotFound(ref t)) if t == "navigation"
    ));
}

#[tokio::test]
async fn test_malformed_services_abort_footer() {
    let repo =
        scenario_repository().with_document("footer", json!({ "our_services": "none" }));
    let err = shell(repo).render_footer().await.unwrap_err();

    assert!(matches!(err, RenderError::Content(CmsError::Malformed { .. })));
}

#[test]
fn test_metadata_is_static() {
    let metadata = shell(MemoryRepository::new()).render_metadata();

    assert_eq!(metadata.canonical_url, "https://thaipfa.com/");
    assert_eq!(metadata.og_image_url, "https://thaipfa.com/og-image.png");
}
