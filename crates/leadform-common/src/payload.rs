use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::FormSnapshot;

/// Page and browser metadata captured alongside a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub url: String,
    pub pathname: String,
    pub hostname: String,
    /// `None` when the page was opened directly (serialized as `null`).
    pub referrer: Option<String>,
    pub title: String,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
    pub user_agent: String,
    pub language: String,
    /// `WIDTHxHEIGHT`
    pub screen_resolution: String,
    /// `WIDTHxHEIGHT`
    pub viewport: String,
}

/// Attribution data read from the page at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSnapshot {
    /// Allow-listed UTM keys with non-empty values.
    pub utm: BTreeMap<String, String>,
    /// Every query-string pair on the page URL.
    pub url_params: BTreeMap<String, String>,
    pub page: PageData,
}

/// Fixed literals identifying this integration to the receiving system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadMetadata {
    pub form_id: String,
    pub form_version: String,
    pub source: String,
}

/// The JSON document posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundPayload {
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
    pub form: FormSnapshot,
    pub tracking: TrackingSnapshot,
    pub metadata: PayloadMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn page() -> PageData {
        PageData {
            url: "https://lp.example.com/?utm_source=ig".into(),
            pathname: "/".into(),
            hostname: "lp.example.com".into(),
            referrer: None,
            title: "Fast Friday".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap(),
            user_agent: "test-agent".into(),
            language: "pt-BR".into(),
            screen_resolution: "1920x1080".into(),
            viewport: "1280x720".into(),
        }
    }

    #[test]
    fn test_page_data_serializes_browser_field_names() {
        let json = serde_json::to_value(page()).unwrap();
        assert_eq!(json["userAgent"], "test-agent");
        assert_eq!(json["screenResolution"], "1920x1080");
        assert_eq!(json["timestamp"], "2026-10-19T09:00:00.000Z");
        assert!(json["referrer"].is_null());
    }

    #[test]
    fn test_outbound_payload_shape() {
        let payload = OutboundPayload {
            timestamp: Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 1).unwrap(),
            form: FormSnapshot {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                phone: "+55 (11) 98765-4321".into(),
                phone_raw: "5511987654321".into(),
                accepted_policy: true,
            },
            tracking: TrackingSnapshot {
                utm: BTreeMap::from([("utm_source".to_string(), "ig".to_string())]),
                url_params: BTreeMap::from([("utm_source".to_string(), "ig".to_string())]),
                page: page(),
            },
            metadata: PayloadMetadata {
                form_id: "fast-friday-whatsapp-group".into(),
                form_version: "1.0".into(),
                source: "landing-page".into(),
            },
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["timestamp"], "2026-10-19T09:00:01.000Z");
        assert_eq!(json["tracking"]["urlParams"]["utm_source"], "ig");
        assert_eq!(json["tracking"]["utm"]["utm_source"], "ig");
        assert_eq!(json["metadata"]["formId"], "fast-friday-whatsapp-group");
        assert_eq!(json["metadata"]["formVersion"], "1.0");

        let back: OutboundPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back, payload);
    }
}
