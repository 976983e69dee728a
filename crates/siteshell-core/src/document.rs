//! Typed singleton documents.
//!
//! Documents are decoded once, at the fetch boundary, into these structs.
//! Optional collections default to empty and optional text fields to `None`,
//! so the renderer never has to probe loosely typed JSON.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

use crate::{
    error::{CoreError, Result},
    richtext::RichText,
};

/// A document type with exactly one instance per repository.
pub trait Singleton: DeserializeOwned {
    /// Fixed identifier the document is addressed by.
    const TYPE: &'static str;

    /// Decode the `data` payload of a fetched document.
    fn decode(data: serde_json::Value) -> Result<Self> {
        serde_json::from_value(data).map_err(|e| CoreError::document(Self::TYPE, e.to_string()))
    }
}

/// Site-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Title shown in the header and as the fallback page title.
    #[serde(rename = "siteTitle", default)]
    pub site_title: RichText,
}

impl Singleton for SiteSettings {
    const TYPE: &'static str = "settings";
}

/// Header navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationDoc {
    /// Links in display order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub links: Vec<NavigationLink>,
}

impl Singleton for NavigationDoc {
    const TYPE: &'static str = "navigation";
}

/// One header navigation entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLink {
    #[serde(default)]
    pub label: RichText,
    #[serde(default)]
    pub link: LinkField,
}

/// Footer content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterDoc {
    #[serde(default)]
    pub contact_title: Option<String>,
    #[serde(default)]
    pub company_name_eng: Option<String>,
    #[serde(default)]
    pub company_name_thai: Option<String>,
    #[serde(default)]
    pub company_address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub fax: Option<String>,
    #[serde(default)]
    pub subscribe_name: Option<String>,
    #[serde(default)]
    pub subscribe_placeholder: Option<String>,
    #[serde(default)]
    pub subscribe_button_name: Option<String>,

    /// Services in display order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub our_services: Vec<ServiceItem>,
}

impl FooterDoc {
    /// Contact block lines in display order, skipping empty fields.
    pub fn contact_lines(&self) -> Vec<&str> {
        [
            &self.contact_title,
            &self.company_name_eng,
            &self.company_name_thai,
            &self.company_address,
            &self.email,
            &self.telephone,
            &self.fax,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .filter(|line| !line.trim().is_empty())
        .collect()
    }
}

impl Singleton for FooterDoc {
    const TYPE: &'static str = "footer";
}

/// One entry of the footer services list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceItem {
    #[serde(default)]
    pub label: RichText,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub service_link: LinkField,
}

/// A link field. Covers web, document and media links alike; only the
/// resolved URL and the target matter for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkField {
    #[serde(default)]
    pub link_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

impl LinkField {
    /// Web link to `url`.
    pub fn web(url: impl Into<String>) -> Self {
        Self {
            link_type: Some("Web".to_string()),
            url: Some(url.into()),
            target: None,
        }
    }

    /// Set the link target.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// URL to link to, if the field resolves to one.
    pub fn href(&self) -> Option<&str> {
        if self.link_type.as_deref() == Some("Any") {
            return None;
        }
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// Link target, if any.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref().filter(|target| !target.is_empty())
    }
}

/// Treat an explicit `null` like a missing list.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_settings() {
        let settings = SiteSettings::decode(json!({
            "siteTitle": [{ "type": "heading1", "text": "ThaiPFA", "spans": [] }]
        }))
        .unwrap();
        assert_eq!(settings.site_title.as_text(), "ThaiPFA");
    }

    #[test]
    fn test_navigation_links_keep_order() {
        let nav = NavigationDoc::decode(json!({
            "links": [
                { "label": [{ "type": "paragraph", "text": "Courses" }], "link": { "link_type": "Web", "url": "/courses" } },
                { "label": [{ "type": "paragraph", "text": "About" }], "link": { "link_type": "Web", "url": "/about" } }
            ]
        }))
        .unwrap();

        let labels: Vec<_> = nav.links.iter().map(|l| l.label.as_text()).collect();
        assert_eq!(labels, vec!["Courses", "About"]);
        assert_eq!(nav.links[0].link.href(), Some("/courses"));
    }

    #[test]
    fn test_missing_or_null_lists_are_empty() {
        assert!(NavigationDoc::decode(json!({})).unwrap().links.is_empty());
        assert!(
            NavigationDoc::decode(json!({ "links": null }))
                .unwrap()
                .links
                .is_empty()
        );
        assert!(
            FooterDoc::decode(json!({ "contact_title": "Contact" }))
                .unwrap()
                .our_services
                .is_empty()
        );
    }

    #[test]
    fn test_wrong_list_shape_is_malformed() {
        let err = FooterDoc::decode(json!({ "our_services": { "label": [] } })).unwrap_err();
        assert!(matches!(err, CoreError::Document { ref document, .. } if document == "footer"));
    }

    #[test]
    fn test_footer_services() {
        let footer = FooterDoc::decode(json!({
            "our_services": [{
                "label": [{ "type": "paragraph", "text": "Planning" }],
                "service_name": "Financial Planning",
                "service_link": { "link_type": "Web", "url": "https://thaipfa.com/plan", "target": "_blank" }
            }]
        }))
        .unwrap();

        let service = &footer.our_services[0];
        assert_eq!(service.service_name.as_deref(), Some("Financial Planning"));
        assert_eq!(service.service_link.href(), Some("https://thaipfa.com/plan"));
        assert_eq!(service.service_link.target(), Some("_blank"));
    }

    #[test]
    fn test_contact_lines_skip_empty_fields() {
        let footer = FooterDoc {
            contact_title: Some("Contact".to_string()),
            email: Some("hello@thaipfa.com".to_string()),
            fax: Some("   ".to_string()),
            ..FooterDoc::default()
        };
        assert_eq!(footer.contact_lines(), vec!["Contact", "hello@thaipfa.com"]);
    }

    #[test]
    fn test_empty_link_has_no_href() {
        let link: LinkField = serde_json::from_value(json!({ "link_type": "Any" })).unwrap();
        assert_eq!(link.href(), None);
        assert_eq!(LinkField::default().href(), None);
        assert_eq!(LinkField::web("").href(), None);
    }
}
