//! Page and attribution capture.
//!
//! The landing page hands over its ambient state as a [`PageContext`]; a
//! [`TrackingDataSource`] turns that into a fresh [`TrackingSnapshot`] each time a
//! submission asks for one.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::Utc;
use reqwest::Url;

use leadform_common::{PageData, TrackingSnapshot};

use crate::errors::TrackingError;

/// Query-string keys copied into the `utm` section of the payload.
pub const UTM_KEYS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
];

/// Anything that can capture tracking data on demand.
pub trait TrackingDataSource {
    fn capture(&self) -> TrackingSnapshot;
}

/// Width and height in CSS pixels, written `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = TrackingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TrackingError::InvalidDimensions {
            value: s.to_string(),
        };
        let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        Ok(Self {
            width: width.trim().parse().map_err(|_| invalid())?,
            height: height.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Ambient browser state at the moment of capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub url: String,
    pub referrer: Option<String>,
    pub title: String,
    pub user_agent: String,
    pub language: String,
    pub screen: Dimensions,
    pub viewport: Dimensions,
}

/// Tracking source backed by a fixed page context.
#[derive(Debug, Clone)]
pub struct PageTrackingSource {
    url: Url,
    context: PageContext,
}

impl PageTrackingSource {
    pub fn new(context: PageContext) -> Result<Self, TrackingError> {
        let url = Url::parse(&context.url).map_err(|e| TrackingError::InvalidPageUrl {
            url: context.url.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { url, context })
    }

    fn page_data(&self) -> PageData {
        PageData {
            url: self.url.to_string(),
            pathname: self.url.path().to_string(),
            hostname: self.url.host_str().unwrap_or_default().to_string(),
            referrer: self
                .context
                .referrer
                .clone()
                .filter(|referrer| !referrer.is_empty()),
            title: self.context.title.clone(),
            timestamp: Utc::now(),
            user_agent: self.context.user_agent.clone(),
            language: self.context.language.clone(),
            screen_resolution: self.context.screen.to_string(),
            viewport: self.context.viewport.to_string(),
        }
    }
}

impl TrackingDataSource for PageTrackingSource {
    fn capture(&self) -> TrackingSnapshot {
        let url_params = url_params(&self.url);
        TrackingSnapshot {
            utm: utm_params(&url_params),
            url_params,
            page: self.page_data(),
        }
    }
}

/// Every decoded query pair on `url`; a repeated key keeps its last value.
pub fn url_params(url: &Url) -> BTreeMap<String, String> {
    url.query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// The allow-listed UTM keys present in `params` with a non-empty value.
pub fn utm_params(params: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    UTM_KEYS
        .iter()
        .filter_map(|&key| {
            params
                .get(key)
                .filter(|value| !value.is_empty())
                .map(|value| (key.to_string(), value.clone()))
        })
        .collect()
}
