//! Provider entry table — maps lead fields onto opaque form entry ids.

use serde::Serialize;

use crate::form::fields::FieldName;
use crate::form::model::LeadSubmission;

/// Google Forms entry ids for each lead field.
const GOOGLE_FORM_ENTRIES: &[(FieldName, &str)] = &[
    (FieldName::Name, "entry.631000131"),
    (FieldName::BusinessName, "entry.1981656635"),
    (FieldName::BusinessEmail, "entry.1146736747"),
    (FieldName::Website, "entry.1783536233"),
    (FieldName::Facebook, "entry.823750113"),
    (FieldName::Instagram, "entry.1172185507"),
    (FieldName::OtherPlatforms, "entry.692704042"),
    (FieldName::BusinessDetails, "entry.1219352153"),
    (FieldName::BusinessType, "entry.117546879"),
    (FieldName::CoreCategory, "entry.1354342209"),
    (FieldName::SalesChannels, "entry.1495825747"),
    (FieldName::AvgDailyOrders, "entry.397747529"),
    (FieldName::AvgTicketSize, "entry.1258084637"),
    (FieldName::AiTimeline, "entry.103247370"),
];

/// Attribution values that can optionally be forwarded with a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributionField {
    UtmSource,
    UtmMedium,
    UtmCampaign,
    UtmContent,
    UtmTerm,
    Referrer,
    PagePath,
    SubmittedAt,
}

/// Internal field → provider key table.
#[derive(Debug, Clone)]
pub struct EntryMap {
    fields: Vec<(FieldName, String)>,
    attribution: Vec<(AttributionField, String)>,
}

impl Default for EntryMap {
    fn default() -> Self {
        Self::google_forms()
    }
}

impl EntryMap {
    /// The production Google Forms table. Attribution is not forwarded.
    pub fn google_forms() -> Self {
        Self {
            fields: GOOGLE_FORM_ENTRIES
                .iter()
                .map(|(field, key)| (*field, key.to_string()))
                .collect(),
            attribution: Vec::new(),
        }
    }

    /// Override the provider key for one field.
    pub fn with_entry(mut self, field: FieldName, key: impl Into<String>) -> Self {
        let key = key.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = key,
            None => self.fields.push((field, key)),
        }
        self
    }

    /// Forward an attribution value under `key`.
    pub fn with_attribution(mut self, field: AttributionField, key: impl Into<String>) -> Self {
        self.attribution.retain(|(f, _)| *f != field);
        self.attribution.push((field, key.into()));
        self
    }

    pub fn key(&self, field: FieldName) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, key)| key.as_str())
    }

    /// Flatten a lead into provider key/value pairs.
    ///
    /// Required fields are always present; optional ones only when
    /// non-empty. Each selected sales channel becomes its own entry.
    pub fn encode(&self, lead: &LeadSubmission) -> EntryPayload {
        let mut payload = EntryPayload::default();

        let orders = lead.avg_daily_orders.to_string();
        let required: [(FieldName, &str); 8] = [
            (FieldName::Name, lead.name.as_str()),
            (FieldName::BusinessName, lead.business_name.as_str()),
            (FieldName::BusinessEmail, lead.business_email.as_str()),
            (FieldName::Website, lead.website.as_str()),
            (FieldName::BusinessType, lead.business_type.as_str()),
            (FieldName::CoreCategory, lead.core_category.as_str()),
            (FieldName::AvgDailyOrders, orders.as_str()),
            (FieldName::AiTimeline, lead.ai_timeline.as_str()),
        ];
        for (field, value) in required {
            if let Some(key) = self.key(field) {
                payload.push(key, value);
            }
        }

        let optional = [
            (FieldName::Facebook, lead.facebook.as_deref()),
            (FieldName::Instagram, lead.instagram.as_deref()),
            (FieldName::OtherPlatforms, lead.other_platforms.as_deref()),
            (FieldName::BusinessDetails, lead.business_details.as_deref()),
            (FieldName::AvgTicketSize, lead.avg_ticket_size.as_deref()),
        ];
        for (field, value) in optional {
            if let (Some(key), Some(value)) = (self.key(field), value) {
                if !value.is_empty() {
                    payload.push(key, value);
                }
            }
        }

        if let Some(key) = self.key(FieldName::SalesChannels) {
            for channel in &lead.sales_channels {
                payload.push(key, channel.as_str());
            }
        }

        let attribution = &lead.attribution;
        for (field, key) in &self.attribution {
            let value = match field {
                AttributionField::UtmSource => attribution.utm.source.clone(),
                AttributionField::UtmMedium => attribution.utm.medium.clone(),
                AttributionField::UtmCampaign => attribution.utm.campaign.clone(),
                AttributionField::UtmContent => attribution.utm.content.clone(),
                AttributionField::UtmTerm => attribution.utm.term.clone(),
                AttributionField::Referrer => attribution.referrer.clone(),
                AttributionField::PagePath => attribution.page_path.clone(),
                AttributionField::SubmittedAt => attribution
                    .submitted_at
                    .map(|at| at.to_rfc3339())
                    .unwrap_or_default(),
            };
            if !value.is_empty() {
                payload.push(key, &value);
            }
        }

        payload
    }
}

/// Ordered key/value pairs; keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryPayload {
    pairs: Vec<(String, String)>,
}

impl EntryPayload {
    pub fn push(&mut self, key: &str, value: &str) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Every value sent under `key`, in order.
    pub fn values_for(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as multipart form data, one text part per pair.
    pub fn to_multipart(&self) -> reqwest::multipart::Form {
        self.pairs
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, (key, value)| {
                form.text(key.clone(), value.clone())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::model::{AiTimeline, Attribution, BusinessType, SalesChannel, Utm};

    fn lead() -> LeadSubmission {
        LeadSubmission {
            name: "Ada Lovelace".into(),
            business_name: "Analytical Engines".into(),
            business_email: "ada@engines.test".into(),
            website: "https://engines.test".into(),
            facebook: None,
            instagram: Some("https://instagram.com/engines".into()),
            other_platforms: Some(String::new()),
            business_details: None,
            business_type: BusinessType::Retail,
            core_category: "Hardware".into(),
            sales_channels: vec![SalesChannel::Online, SalesChannel::InStore],
            avg_daily_orders: 42,
            avg_ticket_size: Some("$25".into()),
            ai_timeline: AiTimeline::WithinThreeMonths,
            attribution: Attribution {
                utm: Utm {
                    source: "google".into(),
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    #[test]
    fn required_fields_are_mapped() {
        let payload = EntryMap::google_forms().encode(&lead());
        assert_eq!(payload.values_for("entry.631000131"), ["Ada Lovelace"]);
        assert_eq!(payload.values_for("entry.117546879"), ["retail"]);
        assert_eq!(payload.values_for("entry.397747529"), ["42"]);
        assert_eq!(payload.values_for("entry.103247370"), ["within_3_months"]);
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let payload = EntryMap::google_forms().encode(&lead());
        assert!(payload.values_for("entry.823750113").is_empty());
        assert!(payload.values_for("entry.692704042").is_empty());
        assert!(payload.values_for("entry.1219352153").is_empty());
        assert_eq!(payload.values_for("entry.1172185507"), ["https://instagram.com/engines"]);
        assert_eq!(payload.values_for("entry.1258084637"), ["$25"]);
    }

    #[test]
    fn sales_channels_repeat_per_selection() {
        let payload = EntryMap::google_forms().encode(&lead());
        assert_eq!(payload.values_for("entry.1495825747"), ["online", "in_store"]);
        // 8 required + 2 optional + 2 channels
        assert_eq!(payload.len(), 12);
    }

    #[test]
    fn attribution_is_opt_in() {
        let payload = EntryMap::google_forms().encode(&lead());
        assert!(payload.pairs().iter().all(|(k, _)| k.starts_with("entry.")));

        let map = EntryMap::google_forms()
            .with_attribution(AttributionField::UtmSource, "entry.9001")
            .with_attribution(AttributionField::UtmMedium, "entry.9002");
        let payload = map.encode(&lead());
        assert_eq!(payload.values_for("entry.9001"), ["google"]);
        // Empty attribution values are skipped like optional fields.
        assert!(payload.values_for("entry.9002").is_empty());
    }

    #[test]
    fn entry_override_replaces_key() {
        let map = EntryMap::google_forms().with_entry(FieldName::Name, "entry.1");
        assert_eq!(map.key(FieldName::Name), Some("entry.1"));
        let payload = map.encode(&lead());
        assert_eq!(payload.values_for("entry.1"), ["Ada Lovelace"]);
        assert!(payload.values_for("entry.631000131").is_empty());
    }
}
