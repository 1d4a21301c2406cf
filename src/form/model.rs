//! Lead submission data model.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PAGE_PATH;

/// Declares a closed set of option values backed by stable snake_case keys.
macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $key:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Option values in display order.
            pub const OPTIONS: &'static [&'static str] = &[$($key),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok(Self::$variant),)+
                    other => Err(format!("unknown {} value: {other}", stringify!($name))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

option_enum! {
    /// What kind of business the lead runs.
    BusinessType {
        Restaurant => "restaurant",
        Retail => "retail",
        Ecommerce => "ecommerce",
        Services => "services",
        Other => "other",
    }
}

option_enum! {
    /// Where the business sells.
    SalesChannel {
        Online => "online",
        InStore => "in_store",
        Marketplace => "marketplace",
        SocialMedia => "social_media",
        DeliveryApps => "delivery_apps",
        Wholesale => "wholesale",
    }
}

option_enum! {
    /// When the lead expects to adopt AI tooling.
    AiTimeline {
        Immediately => "immediately",
        WithinThreeMonths => "within_3_months",
        WithinSixMonths => "within_6_months",
        Exploring => "exploring",
    }
}

/// UTM campaign parameters captured from the landing URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utm {
    pub source: String,
    pub medium: String,
    pub campaign: String,
    pub content: String,
    pub term: String,
}

impl Utm {
    /// Extract `utm_*` query parameters from a landing URL.
    ///
    /// Unparseable URLs yield empty parameters.
    pub fn from_landing_url(url: &str) -> Self {
        let mut utm = Self::default();
        let Ok(parsed) = reqwest::Url::parse(url) else {
            return utm;
        };
        for (key, value) in parsed.query_pairs() {
            let slot = match key.as_ref() {
                "utm_source" => &mut utm.source,
                "utm_medium" => &mut utm.medium,
                "utm_campaign" => &mut utm.campaign,
                "utm_content" => &mut utm.content,
                "utm_term" => &mut utm.term,
                _ => continue,
            };
            *slot = value.into_owned();
        }
        utm
    }
}

/// Where the lead came from and when it was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub utm: Utm,
    pub referrer: String,
    pub page_path: String,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Default for Attribution {
    fn default() -> Self {
        Self {
            utm: Utm::default(),
            referrer: String::new(),
            page_path: DEFAULT_PAGE_PATH.to_string(),
            submitted_at: None,
        }
    }
}

/// A finalized lead, built once at submission time from validated values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub business_name: String,
    pub business_email: String,
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_platforms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_details: Option<String>,
    pub business_type: BusinessType,
    pub core_category: String,
    pub sales_channels: Vec<SalesChannel>,
    pub avg_daily_orders: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_ticket_size: Option<String>,
    pub ai_timeline: AiTimeline,
    pub attribution: Attribution,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_keys_parse_back() {
        for key in SalesChannel::OPTIONS {
            let channel: SalesChannel = key.parse().unwrap();
            assert_eq!(channel.as_str(), *key);
        }
        for key in BusinessType::OPTIONS {
            assert_eq!(key.parse::<BusinessType>().unwrap().to_string(), *key);
        }
        assert!("in-store".parse::<SalesChannel>().is_err());
    }

    #[test]
    fn option_serde_uses_keys() {
        let json = serde_json::to_string(&AiTimeline::WithinThreeMonths).unwrap();
        assert_eq!(json, "\"within_3_months\"");
        let channel: SalesChannel = serde_json::from_str("\"in_store\"").unwrap();
        assert_eq!(channel, SalesChannel::InStore);
    }

    #[test]
    fn utm_from_landing_url() {
        let utm = Utm::from_landing_url(
            "https://example.com/book-demo?utm_source=google&utm_medium=cpc&utm_campaign=spring%20promo&x=1",
        );
        assert_eq!(utm.source, "google");
        assert_eq!(utm.medium, "cpc");
        assert_eq!(utm.campaign, "spring promo");
        assert!(utm.content.is_empty());
        assert!(utm.term.is_empty());
    }

    #[test]
    fn utm_from_garbage_is_empty() {
        assert_eq!(Utm::from_landing_url("::not a url"), Utm::default());
    }

    #[test]
    fn default_attribution_uses_book_demo_path() {
        let attribution = Attribution::default();
        assert_eq!(attribution.page_path, "/book-demo");
        assert!(attribution.submitted_at.is_none());
    }
}
