//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Google Forms response endpoint; `{FORM_ID}` is substituted at load time.
pub const GOOGLE_FORM_URL_TEMPLATE: &str =
    "https://docs.google.com/forms/d/e/{FORM_ID}/formResponse";

/// Page path reported in analytics and attribution when none is configured.
pub const DEFAULT_PAGE_PATH: &str = "/book-demo";

/// Lead form configuration.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Ingestion endpoint receiving the multipart POST.
    pub endpoint: String,
    /// Path of the libSQL file holding the draft.
    pub db_path: PathBuf,
    /// Page path for analytics events and attribution.
    pub page_path: String,
    /// Minimum time between mount and submit before a submission is accepted.
    pub min_dwell: Duration,
    /// Landing URL the visitor arrived on (source of `utm_*` parameters).
    pub landing_url: Option<String>,
    /// Referrer reported with the submission.
    pub referrer: Option<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: GOOGLE_FORM_URL_TEMPLATE.to_string(),
            db_path: PathBuf::from("./data/lead-form.db"),
            page_path: DEFAULT_PAGE_PATH.to_string(),
            min_dwell: Duration::from_secs(10),
            landing_url: None,
            referrer: None,
        }
    }
}

impl FormConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// `LEAD_FORM_ENDPOINT` wins over `LEAD_FORM_GOOGLE_FORM_ID`. The
    /// resulting endpoint must be an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let endpoint = match std::env::var("LEAD_FORM_ENDPOINT") {
            Ok(url) => url,
            Err(_) => match std::env::var("LEAD_FORM_GOOGLE_FORM_ID") {
                Ok(id) => GOOGLE_FORM_URL_TEMPLATE.replace("{FORM_ID}", id.trim()),
                Err(_) => defaults.endpoint,
            },
        };
        validate_endpoint(&endpoint)?;

        let db_path = std::env::var("LEAD_FORM_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let page_path =
            std::env::var("LEAD_FORM_PAGE_PATH").unwrap_or(defaults.page_path);

        let min_dwell = std::env::var("LEAD_FORM_MIN_DWELL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.min_dwell);

        let landing_url = std::env::var("LEAD_FORM_LANDING_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let referrer = std::env::var("LEAD_FORM_REFERRER")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(Self {
            endpoint,
            db_path,
            page_path,
            min_dwell,
            landing_url,
            referrer,
        })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(endpoint).map_err(|e| ConfigError::InvalidValue {
        key: "endpoint".into(),
        message: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidValue {
            key: "endpoint".into(),
            message: format!("unsupported scheme {other}"),
        }),
    }
}
