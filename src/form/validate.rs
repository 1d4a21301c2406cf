//! Field validators — pure predicates applied on blur, advance and submit.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::fields::{FieldKind, FieldName, FieldSpec, FormValues};

pub const MSG_REQUIRED: &str = "This field is required";

/// Email domains that hand out throwaway inboxes.
pub const DISPOSABLE_DOMAINS: &[&str] = &[
    "tempmail.com",
    "throwaway.email",
    "guerrillamail.com",
    "mailinator.com",
    "10minutemail.com",
    "trashmail.com",
    "temp-mail.org",
    "fakeinbox.com",
];

pub const MIN_DETAIL_WORDS: usize = 10;
pub const MAX_DETAIL_WORDS: usize = 300;
pub const MAX_DAILY_ORDERS: i64 = 10_000;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name pattern compiles"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// A failed validation: which field, and the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FieldName,
    pub message: String,
}

impl FieldError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate one field against the current form values.
pub fn validate_field(spec: &FieldSpec, values: &FormValues) -> Result<(), FieldError> {
    match spec.kind {
        FieldKind::Text => validate_text(spec, values.text(spec.name)),
        FieldKind::SingleChoice(_) => {
            validate_group(spec, values.choice(spec.name).is_some())
        }
        FieldKind::MultiChoice(_) => {
            validate_group(spec, !values.selected(spec.name).is_empty())
        }
    }
}

/// Validate a free-text value. Leading/trailing whitespace is ignored.
pub fn validate_text(spec: &FieldSpec, raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();
    let field = spec.name;

    if value.is_empty() {
        return if spec.required {
            Err(FieldError::new(field, MSG_REQUIRED))
        } else {
            Ok(())
        };
    }

    let message = match field {
        FieldName::Name => check_name(value),
        FieldName::BusinessName => check_business_name(value),
        FieldName::BusinessEmail => check_email(value),
        FieldName::Website => check_url(value),
        FieldName::Facebook => check_platform_url(value, "facebook.com", "Facebook"),
        FieldName::Instagram => check_platform_url(value, "instagram.com", "Instagram"),
        FieldName::BusinessDetails => check_word_count(value),
        FieldName::AvgDailyOrders => check_daily_orders(value),
        _ => None,
    };

    match message {
        Some(message) => Err(FieldError::new(field, message)),
        None => Ok(()),
    }
}

/// Validate a radio/checkbox group given whether anything is selected.
pub fn validate_group(spec: &FieldSpec, any_selected: bool) -> Result<(), FieldError> {
    // The sales channel group is required regardless of its markup.
    let required = spec.required || spec.name == FieldName::SalesChannels;
    if !required || any_selected {
        return Ok(());
    }
    let message = match spec.name {
        FieldName::SalesChannels => "Please select at least one sales channel",
        FieldName::BusinessType => "Please select a business type",
        FieldName::AiTimeline => "Please select a timeline",
        _ => MSG_REQUIRED,
    };
    Err(FieldError::new(spec.name, message))
}

fn check_name(value: &str) -> Option<String> {
    if !NAME_PATTERN.is_match(value) {
        return Some("Name should contain only letters and spaces".into());
    }
    if !(2..=60).contains(&input_length(value)) {
        return Some("Name must be between 2 and 60 characters".into());
    }
    None
}

/// Length as a browser input counts it, in UTF-16 code units.
fn input_length(value: &str) -> usize {
    value.encode_utf16().count()
}

fn check_business_name(value: &str) -> Option<String> {
    if !(2..=80).contains(&input_length(value)) {
        return Some("Business name must be between 2 and 80 characters".into());
    }
    None
}

fn check_email(value: &str) -> Option<String> {
    if !EMAIL_PATTERN.is_match(value) {
        return Some("Please enter a valid email address".into());
    }
    let domain = value
        .split_once('@')
        .map(|(_, domain)| domain.to_ascii_lowercase())
        .unwrap_or_default();
    if DISPOSABLE_DOMAINS.contains(&domain.as_str()) {
        return Some("Please use a business email address".into());
    }
    None
}

fn check_url(value: &str) -> Option<String> {
    if value.starts_with("http://") || value.starts_with("https://") {
        None
    } else {
        Some("URL must start with http:// or https://".into())
    }
}

fn check_platform_url(value: &str, domain: &str, platform: &str) -> Option<String> {
    check_url(value).or_else(|| {
        (!value.contains(domain)).then(|| format!("Please enter a valid {platform} URL"))
    })
}

fn check_word_count(value: &str) -> Option<String> {
    let words = word_count(value);
    if words < MIN_DETAIL_WORDS {
        Some(format!("Please provide at least {MIN_DETAIL_WORDS} words"))
    } else if words > MAX_DETAIL_WORDS {
        Some(format!("Please keep it under {MAX_DETAIL_WORDS} words"))
    } else {
        None
    }
}

fn check_daily_orders(value: &str) -> Option<String> {
    match parse_daily_orders(value) {
        Some(_) => None,
        None => Some("Please enter a number between 0 and 10,000".into()),
    }
}

/// Parse an average-daily-orders answer: an integer in `0..=10_000`.
///
/// Signed input is accepted as long as the value lands in range, so `-0`
/// is zero.
pub fn parse_daily_orders(value: &str) -> Option<u32> {
    let n = value.trim().parse::<i64>().ok()?;
    if !(0..=MAX_DAILY_ORDERS).contains(&n) {
        return None;
    }
    u32::try_from(n).ok()
}

/// Whitespace-delimited word count; empty tokens are not counted.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Live word-count hint shown under the business description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCountHint {
    pub count: usize,
    pub label: String,
    pub out_of_range: bool,
}

impl WordCountHint {
    pub fn for_text(text: &str) -> Self {
        let count = word_count(text);
        if count == 0 {
            return Self {
                count,
                label: "0 words (optional)".into(),
                out_of_range: false,
            };
        }
        Self {
            count,
            label: format!(
                "{count} words (min {MIN_DETAIL_WORDS}, max {MAX_DETAIL_WORDS} if provided)"
            ),
            out_of_range: !(MIN_DETAIL_WORDS..=MAX_DETAIL_WORDS).contains(&count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(field: FieldName, value: &str) -> Result<(), FieldError> {
        validate_text(field.spec(), value)
    }

    fn message(result: Result<(), FieldError>) -> String {
        result.unwrap_err().message
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn required_fields_reject_blank() {
        for field in [
            FieldName::Name,
            FieldName::BusinessName,
            FieldName::BusinessEmail,
            FieldName::Website,
            FieldName::CoreCategory,
            FieldName::AvgDailyOrders,
        ] {
            assert_eq!(message(text(field, "   \t")), MSG_REQUIRED, "{field}");
        }
    }

    #[test]
    fn optional_fields_accept_blank() {
        for field in [
            FieldName::Facebook,
            FieldName::Instagram,
            FieldName::OtherPlatforms,
            FieldName::BusinessDetails,
            FieldName::AvgTicketSize,
        ] {
            assert!(text(field, "  ").is_ok(), "{field}");
        }
    }

    #[test]
    fn name_rules() {
        assert!(text(FieldName::Name, "Ada Lovelace").is_ok());
        assert!(text(FieldName::Name, "  Al  ").is_ok());
        assert_eq!(
            message(text(FieldName::Name, "R2D2")),
            "Name should contain only letters and spaces"
        );
        assert_eq!(
            message(text(FieldName::Name, "A")),
            "Name must be between 2 and 60 characters"
        );
        assert!(text(FieldName::Name, &"a".repeat(60)).is_ok());
        assert!(text(FieldName::Name, &"a".repeat(61)).is_err());
    }

    #[test]
    fn business_name_length() {
        assert!(text(FieldName::BusinessName, "Acme & Sons").is_ok());
        assert!(text(FieldName::BusinessName, "X").is_err());
        assert!(text(FieldName::BusinessName, &"x".repeat(80)).is_ok());
        assert!(text(FieldName::BusinessName, &"x".repeat(81)).is_err());
    }

    #[test]
    fn business_name_counts_utf16_units() {
        // One astral character is two units, as a browser input measures it.
        assert!(text(FieldName::BusinessName, "🍕").is_ok());
        assert!(text(FieldName::BusinessName, &"🍕".repeat(40)).is_ok());
        assert!(text(FieldName::BusinessName, &"🍕".repeat(41)).is_err());
    }

    #[test]
    fn email_rules() {
        assert!(text(FieldName::BusinessEmail, "a@company.com").is_ok());
        assert_eq!(
            message(text(FieldName::BusinessEmail, "a@mailinator.com")),
            "Please use a business email address"
        );
        assert!(text(FieldName::BusinessEmail, "a@Mailinator.com").is_err());
        assert_eq!(
            message(text(FieldName::BusinessEmail, "not-an-email")),
            "Please enter a valid email address"
        );
        assert!(text(FieldName::BusinessEmail, "a@b").is_err());
        assert!(text(FieldName::BusinessEmail, "a b@c.com").is_err());
    }

    #[test]
    fn every_disposable_domain_is_blocked() {
        for domain in DISPOSABLE_DOMAINS {
            let email = format!("owner@{domain}");
            assert!(text(FieldName::BusinessEmail, &email).is_err(), "{email}");
        }
    }

    #[test]
    fn url_rules() {
        assert!(text(FieldName::Website, "https://acme.test").is_ok());
        assert!(text(FieldName::Website, "http://acme.test").is_ok());
        assert_eq!(
            message(text(FieldName::Website, "acme.test")),
            "URL must start with http:// or https://"
        );
        assert!(text(FieldName::Facebook, "https://facebook.com/acme").is_ok());
        assert_eq!(
            message(text(FieldName::Facebook, "https://fb.me/acme")),
            "Please enter a valid Facebook URL"
        );
        assert_eq!(
            message(text(FieldName::Facebook, "facebook.com/acme")),
            "URL must start with http:// or https://"
        );
        assert!(text(FieldName::Instagram, "https://www.instagram.com/acme").is_ok());
        assert_eq!(
            message(text(FieldName::Instagram, "https://facebook.com/acme")),
            "Please enter a valid Instagram URL"
        );
    }

    #[test]
    fn word_count_bounds() {
        assert!(text(FieldName::BusinessDetails, &words(10)).is_ok());
        assert!(text(FieldName::BusinessDetails, &words(300)).is_ok());
        assert_eq!(
            message(text(FieldName::BusinessDetails, &words(9))),
            "Please provide at least 10 words"
        );
        assert_eq!(
            message(text(FieldName::BusinessDetails, &words(301))),
            "Please keep it under 300 words"
        );
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        assert_eq!(word_count("  one   two\n\tthree  "), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn daily_orders_bounds() {
        assert!(text(FieldName::AvgDailyOrders, "0").is_ok());
        assert!(text(FieldName::AvgDailyOrders, "10000").is_ok());
        for bad in ["10001", "-1", "lots", "12.5", "1e3"] {
            assert_eq!(
                message(text(FieldName::AvgDailyOrders, bad)),
                "Please enter a number between 0 and 10,000",
                "{bad}"
            );
        }
    }

    #[test]
    fn negative_zero_orders_parse_as_zero() {
        assert!(text(FieldName::AvgDailyOrders, "-0").is_ok());
        assert_eq!(parse_daily_orders("-0"), Some(0));
        assert_eq!(parse_daily_orders(" -00 "), Some(0));
        assert_eq!(parse_daily_orders("10000"), Some(10_000));
        assert_eq!(parse_daily_orders("-1"), None);
        assert_eq!(parse_daily_orders("10001"), None);
    }

    #[test]
    fn group_messages() {
        assert_eq!(
            message(validate_group(FieldName::SalesChannels.spec(), false)),
            "Please select at least one sales channel"
        );
        assert_eq!(
            message(validate_group(FieldName::BusinessType.spec(), false)),
            "Please select a business type"
        );
        assert_eq!(
            message(validate_group(FieldName::AiTimeline.spec(), false)),
            "Please select a timeline"
        );
        assert!(validate_group(FieldName::SalesChannels.spec(), true).is_ok());
    }

    #[test]
    fn validate_field_dispatches_on_kind() {
        let mut values = FormValues::default();
        let spec = FieldName::SalesChannels.spec();
        assert!(validate_field(spec, &values).is_err());
        values.set_checked(FieldName::SalesChannels, "online", true).unwrap();
        assert!(validate_field(spec, &values).is_ok());

        let spec = FieldName::BusinessType.spec();
        assert!(validate_field(spec, &values).is_err());
        values.select(FieldName::BusinessType, Some("retail")).unwrap();
        assert!(validate_field(spec, &values).is_ok());
    }

    #[test]
    fn word_count_hint_labels() {
        let empty = WordCountHint::for_text("   ");
        assert_eq!(empty.label, "0 words (optional)");
        assert!(!empty.out_of_range);

        let short = WordCountHint::for_text("just a few words");
        assert_eq!(short.count, 4);
        assert_eq!(short.label, "4 words (min 10, max 300 if provided)");
        assert!(short.out_of_range);

        let ok = WordCountHint::for_text(&words(12));
        assert!(!ok.out_of_range);
    }
}
