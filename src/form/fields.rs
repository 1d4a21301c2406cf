//! Every form control, the step it lives on, its kind and requiredness.
//!
//! The registry is a static table evaluated once; grouped controls are
//! typed here (single vs multi choice) instead of being looked up by name
//! whenever they are validated or restored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::model::{AiTimeline, BusinessType, SalesChannel};
use super::state::FormStep;
use crate::error::FormError;

/// Name of the hidden bot-trap input. Never validated, persisted or submitted.
pub const HONEYPOT_FIELD: &str = "website_url";

/// Every user-facing field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Name,
    BusinessName,
    BusinessEmail,
    Website,
    Facebook,
    Instagram,
    OtherPlatforms,
    BusinessDetails,
    BusinessType,
    CoreCategory,
    SalesChannels,
    AvgDailyOrders,
    AvgTicketSize,
    AiTimeline,
}

impl FieldName {
    /// Stable key used for persistence, analytics and the terminal front-end.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::BusinessName => "business_name",
            Self::BusinessEmail => "business_email",
            Self::Website => "website",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::OtherPlatforms => "other_platforms",
            Self::BusinessDetails => "business_details",
            Self::BusinessType => "business_type",
            Self::CoreCategory => "core_category",
            Self::SalesChannels => "sales_channels",
            Self::AvgDailyOrders => "avg_daily_orders",
            Self::AvgTicketSize => "avg_ticket_size",
            Self::AiTimeline => "ai_timeline",
        }
    }

    pub fn from_key(key: &str) -> Option<FieldName> {
        FIELDS.iter().map(|spec| spec.name).find(|name| name.key() == key)
    }

    /// Registry entry for this field.
    pub fn spec(&self) -> &'static FieldSpec {
        FIELDS
            .iter()
            .find(|spec| spec.name == *self)
            .unwrap_or_else(|| unreachable!("every FieldName has a registry entry"))
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// How a field is entered and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-text input (including url, email and numeric inputs).
    Text,
    /// Radio group: zero or one of `options`.
    SingleChoice(&'static [&'static str]),
    /// Checkbox group: any subset of `options`, kept in option order.
    MultiChoice(&'static [&'static str]),
}

impl FieldKind {
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::Text => &[],
            Self::SingleChoice(options) | Self::MultiChoice(options) => options,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::SingleChoice(_) => "single-choice",
            Self::MultiChoice(_) => "multi-choice",
        }
    }
}

/// Registry entry for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: FieldName,
    pub step: FormStep,
    pub kind: FieldKind,
    pub required: bool,
}

const fn entry(name: FieldName, step: FormStep, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        step,
        kind,
        required,
    }
}

/// All fields in form order.
pub static FIELDS: &[FieldSpec] = &[
    entry(FieldName::Name, FormStep::Contact, FieldKind::Text, true),
    entry(FieldName::BusinessName, FormStep::Contact, FieldKind::Text, true),
    entry(FieldName::BusinessEmail, FormStep::Contact, FieldKind::Text, true),
    entry(FieldName::Website, FormStep::Presence, FieldKind::Text, true),
    entry(FieldName::Facebook, FormStep::Presence, FieldKind::Text, false),
    entry(FieldName::Instagram, FormStep::Presence, FieldKind::Text, false),
    entry(FieldName::OtherPlatforms, FormStep::Presence, FieldKind::Text, false),
    entry(FieldName::BusinessDetails, FormStep::Presence, FieldKind::Text, false),
    entry(
        FieldName::BusinessType,
        FormStep::Business,
        FieldKind::SingleChoice(BusinessType::OPTIONS),
        true,
    ),
    entry(FieldName::CoreCategory, FormStep::Business, FieldKind::Text, true),
    entry(
        FieldName::SalesChannels,
        FormStep::Business,
        FieldKind::MultiChoice(SalesChannel::OPTIONS),
        true,
    ),
    entry(FieldName::AvgDailyOrders, FormStep::Operations, FieldKind::Text, true),
    entry(FieldName::AvgTicketSize, FormStep::Operations, FieldKind::Text, false),
    entry(
        FieldName::AiTimeline,
        FormStep::Operations,
        FieldKind::SingleChoice(AiTimeline::OPTIONS),
        true,
    ),
];

/// Fields shown on a given step, in form order.
pub fn fields_for_step(step: FormStep) -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(move |spec| spec.step == step)
}

/// Current value of one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Choice(Option<String>),
    Multi(Vec<String>),
}

impl FieldValue {
    fn empty_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => Self::Text(String::new()),
            FieldKind::SingleChoice(_) => Self::Choice(None),
            FieldKind::MultiChoice(_) => Self::Multi(Vec::new()),
        }
    }
}

/// Values of every registered field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    values: HashMap<FieldName, FieldValue>,
}

impl Default for FormValues {
    fn default() -> Self {
        let values = FIELDS
            .iter()
            .map(|spec| (spec.name, FieldValue::empty_for(spec.kind)))
            .collect();
        Self { values }
    }
}

impl FormValues {
    pub fn get(&self, field: FieldName) -> &FieldValue {
        self.values
            .get(&field)
            .unwrap_or_else(|| unreachable!("FormValues holds every registered field"))
    }

    /// Text value of a text field; empty for choice fields.
    pub fn text(&self, field: FieldName) -> &str {
        match self.get(field) {
            FieldValue::Text(value) => value,
            _ => "",
        }
    }

    /// Selected option of a single-choice field.
    pub fn choice(&self, field: FieldName) -> Option<&str> {
        match self.get(field) {
            FieldValue::Choice(value) => value.as_deref(),
            _ => None,
        }
    }

    /// Checked options of a multi-choice field, in option order.
    pub fn selected(&self, field: FieldName) -> &[String] {
        match self.get(field) {
            FieldValue::Multi(values) => values,
            _ => &[],
        }
    }

    pub fn set_text(&mut self, field: FieldName, value: impl Into<String>) -> Result<(), FormError> {
        match self.values.get_mut(&field) {
            Some(FieldValue::Text(slot)) => {
                *slot = value.into();
                Ok(())
            }
            _ => Err(wrong_kind(field, "text")),
        }
    }

    /// Select an option of a single-choice field, or clear it with `None`.
    pub fn select(&mut self, field: FieldName, option: Option<&str>) -> Result<(), FormError> {
        let kind = field.spec().kind;
        let FieldKind::SingleChoice(options) = kind else {
            return Err(wrong_kind(field, "single-choice"));
        };
        let value = match option {
            Some(option) => Some(known_option(field, options, option)?),
            None => None,
        };
        self.values.insert(field, FieldValue::Choice(value));
        Ok(())
    }

    /// Check or uncheck one option of a multi-choice field.
    pub fn set_checked(&mut self, field: FieldName, option: &str, checked: bool) -> Result<(), FormError> {
        let FieldKind::MultiChoice(options) = field.spec().kind else {
            return Err(wrong_kind(field, "multi-choice"));
        };
        let option = known_option(field, options, option)?;
        let mut current: Vec<String> = self.selected(field).to_vec();
        current.retain(|o| *o != option);
        if checked {
            current.push(option);
        }
        // Keep checkbox (declaration) order regardless of click order.
        let ordered = options
            .iter()
            .filter(|o| current.iter().any(|c| c == *o))
            .map(|o| o.to_string())
            .collect();
        self.values.insert(field, FieldValue::Multi(ordered));
        Ok(())
    }

    /// Replace the whole selection of a multi-choice field.
    ///
    /// Unknown options are rejected before anything changes.
    pub fn set_selected<S: AsRef<str>>(&mut self, field: FieldName, selected: &[S]) -> Result<(), FormError> {
        let FieldKind::MultiChoice(options) = field.spec().kind else {
            return Err(wrong_kind(field, "multi-choice"));
        };
        for option in selected {
            known_option(field, options, option.as_ref())?;
        }
        let ordered = options
            .iter()
            .filter(|o| selected.iter().any(|s| s.as_ref() == **o))
            .map(|o| o.to_string())
            .collect();
        self.values.insert(field, FieldValue::Multi(ordered));
        Ok(())
    }
}

fn known_option(field: FieldName, options: &[&str], option: &str) -> Result<String, FormError> {
    options
        .iter()
        .find(|o| **o == option)
        .map(|o| o.to_string())
        .ok_or_else(|| FormError::UnknownOption {
            field: field.key().to_string(),
            option: option.to_string(),
        })
}

fn wrong_kind(field: FieldName, expected: &'static str) -> FormError {
    FormError::WrongKind {
        field: field.key().to_string(),
        expected,
    }
}
