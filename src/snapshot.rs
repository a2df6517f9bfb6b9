// Settings snapshot type.
// A flat bag of display configuration served by the platform's singleton settings resource.

use serde::{Deserialize, Serialize};

/// Site-wide display settings as currently known.
///
/// Every field is independently optional: the API may return any subset, and a
/// partial update serializes only the fields it carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_images: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

impl SettingsSnapshot {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_any_subset_of_fields() {
        let snapshot: SettingsSnapshot =
            serde_json::from_str(r#"{"logo": "a.png", "hero_images": ["1.jpg", "2.jpg"]}"#)
                .unwrap();

        assert_eq!(snapshot.logo.as_deref(), Some("a.png"));
        assert_eq!(
            snapshot.hero_images,
            Some(vec!["1.jpg".to_string(), "2.jpg".to_string()])
        );
        assert!(snapshot.site_name.is_none());
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn serializes_only_set_fields() {
        let snapshot = SettingsSnapshot {
            phone: Some("+1-555-0100".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 1);
        assert_eq!(object["phone"], "+1-555-0100");
    }

    #[test]
    fn empty_object_is_the_default_snapshot() {
        let snapshot: SettingsSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
    }
}
