//! FormSession — owns the step, field values and view for one visitor, and
//! drives validation, draft persistence and submission.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::fields::{FIELDS, FieldKind, FieldName, FieldSpec, FormValues, HONEYPOT_FIELD, fields_for_step};
use super::model::{AiTimeline, Attribution, BusinessType, LeadSubmission, SalesChannel, Utm};
use super::state::FormStep;
use super::validate::{FieldError, WordCountHint, parse_daily_orders, validate_field};
use super::view::FormView;
use crate::config::FormConfig;
use crate::error::FormError;
use crate::notify::{AnalyticsEvent, AnalyticsSink, Announcer, Notifier, ToastKind};
use crate::store::{DraftStore, RestoreOutcome, draft};
use crate::submit::{EntryMap, FormIngest};

pub const MSG_FIX_BEFORE_PROCEEDING: &str = "Please fix the errors before proceeding";
pub const MSG_FIX_BEFORE_SUBMITTING: &str = "Please fix the errors before submitting";
pub const MSG_TOO_FAST: &str = "Please take your time to fill out the form";
pub const MSG_SUBMIT_FAILED: &str = "Could not submit. Please try again.";
pub const MSG_SUBMITTED: &str = "Form submitted successfully! Thank you.";

/// Collaborators a session talks to.
#[derive(Clone)]
pub struct SessionDeps {
    pub store: Arc<dyn DraftStore>,
    pub ingest: Arc<dyn FormIngest>,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub announcer: Arc<dyn Announcer>,
    pub notifier: Arc<dyn Notifier>,
}

/// What `handle_submit` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The honeypot was filled; silently dropped.
    Bot,
    /// Submitted sooner than the minimum dwell time.
    TooFast,
    /// At least one field failed validation.
    Invalid,
    /// Delivered; the success view is showing.
    Submitted,
    /// This session already delivered a lead.
    AlreadySubmitted,
    /// The request did not go through; the form can be submitted again.
    Failed,
}

/// One visitor's pass through the form.
pub struct FormSession {
    id: Uuid,
    deps: SessionDeps,
    entries: EntryMap,
    page_path: String,
    min_dwell: Duration,
    started_at: DateTime<Utc>,
    step: FormStep,
    values: FormValues,
    honeypot: String,
    attribution: Attribution,
    view: FormView,
    restored: RestoreOutcome,
    submitted: bool,
}

impl FormSession {
    /// Start a session: restore any saved draft, capture attribution and
    /// show step 1.
    pub async fn mount(deps: SessionDeps, config: &FormConfig) -> Self {
        let mut values = FormValues::default();
        let restored = draft::restore_draft(deps.store.as_ref(), &mut values).await;

        let attribution = Attribution {
            utm: config
                .landing_url
                .as_deref()
                .map(Utm::from_landing_url)
                .unwrap_or_default(),
            referrer: config.referrer.clone().unwrap_or_default(),
            page_path: config.page_path.clone(),
            submitted_at: None,
        };

        let session = Self {
            id: Uuid::new_v4(),
            deps,
            entries: EntryMap::default(),
            page_path: config.page_path.clone(),
            min_dwell: config.min_dwell,
            started_at: Utc::now(),
            step: FormStep::Contact,
            values,
            honeypot: String::new(),
            attribution,
            view: FormView::new(FormStep::Contact),
            restored,
            submitted: false,
        };

        session
            .deps
            .analytics
            .push(AnalyticsEvent::step_view(session.step.number(), &session.page_path));
        info!(session_id = %session.id, restored = ?session.restored, "Form session mounted");
        session
    }

    /// Use a different provider entry table.
    pub fn with_entries(mut self, entries: EntryMap) -> Self {
        self.entries = entries;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn current_step(&self) -> FormStep {
        self.step
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn attribution(&self) -> &Attribution {
        &self.attribution
    }

    /// How the saved draft was handled on mount.
    pub fn restore_outcome(&self) -> &RestoreOutcome {
        &self.restored
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn word_count_hint(&self) -> WordCountHint {
        WordCountHint::for_text(self.values.text(FieldName::BusinessDetails))
    }

    // ── Input ───────────────────────────────────────────────────────────

    pub async fn set_text(&mut self, field: FieldName, value: impl Into<String>) -> Result<(), FormError> {
        self.values.set_text(field, value)?;
        self.changed(field).await;
        Ok(())
    }

    pub async fn select(&mut self, field: FieldName, option: Option<&str>) -> Result<(), FormError> {
        self.values.select(field, option)?;
        self.changed(field).await;
        Ok(())
    }

    pub async fn set_checked(&mut self, field: FieldName, option: &str, checked: bool) -> Result<(), FormError> {
        self.values.set_checked(field, option, checked)?;
        self.changed(field).await;
        Ok(())
    }

    /// Set a field from its raw input by key.
    ///
    /// Choice fields take an option key (empty clears a single choice);
    /// multi-choice fields take a comma-separated list.
    pub async fn set_input(&mut self, key: &str, raw: &str) -> Result<(), FormError> {
        if key == HONEYPOT_FIELD {
            self.fill_honeypot(raw);
            return Ok(());
        }
        let field: FieldName = key.parse()?;
        match field.spec().kind {
            FieldKind::Text => self.values.set_text(field, raw)?,
            FieldKind::SingleChoice(_) => {
                let option = raw.trim();
                self.values
                    .select(field, (!option.is_empty()).then_some(option))?
            }
            FieldKind::MultiChoice(_) => {
                let selected: Vec<&str> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect();
                self.values.set_selected(field, selected.as_slice())?
            }
        }
        self.changed(field).await;
        Ok(())
    }

    /// Fill the hidden bot-trap input. Not persisted.
    pub fn fill_honeypot(&mut self, value: &str) {
        self.honeypot = value.to_string();
    }

    async fn changed(&mut self, field: FieldName) {
        self.view.clear_error(field);
        self.autosave().await;
    }

    async fn autosave(&self) {
        if let Err(e) = draft::save_draft(self.deps.store.as_ref(), &self.values).await {
            warn!(session_id = %self.id, error = %e, "Failed to save form draft");
        }
    }

    // ── Validation ──────────────────────────────────────────────────────

    /// Validate one field as it loses focus.
    pub fn blur(&mut self, field: FieldName) -> bool {
        self.check(field.spec())
    }

    /// Validate every field of `step`. All fields are checked so every
    /// error is shown at once.
    pub fn validate_step(&mut self, step: FormStep) -> bool {
        let mut valid = true;
        for spec in fields_for_step(step) {
            valid &= self.check(spec);
        }
        valid
    }

    /// Validate every field of every step.
    pub fn validate_all(&mut self) -> bool {
        let mut valid = true;
        for spec in FIELDS {
            valid &= self.check(spec);
        }
        valid
    }

    fn check(&mut self, spec: &FieldSpec) -> bool {
        match validate_field(spec, &self.values) {
            Ok(()) => {
                self.view.clear_error(spec.name);
                true
            }
            Err(FieldError { field, message }) => {
                debug!(session_id = %self.id, field = %field, message = %message, "Field failed validation");
                self.deps.analytics.push(AnalyticsEvent::validation_error(
                    self.step.number(),
                    field.key(),
                    &message,
                ));
                self.view.mark_invalid(field, message);
                false
            }
        }
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Move to the next step if the current one validates.
    ///
    /// Returns whether the step changed. On the last step this only
    /// validates.
    pub fn advance(&mut self) -> bool {
        if !self.validate_step(self.step) {
            self.deps.announcer.announce(MSG_FIX_BEFORE_PROCEEDING);
            return false;
        }
        let Some(next) = self.step.next() else {
            return false;
        };
        self.deps
            .analytics
            .push(AnalyticsEvent::step_next(self.step.number(), next.number()));
        self.go_to(next);
        true
    }

    /// Move to the previous step. Never validates.
    pub fn retreat(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.go_to(prev);
                true
            }
            None => false,
        }
    }

    fn go_to(&mut self, step: FormStep) {
        debug_assert!(self.step.can_transition_to(step), "{} -> {step}", self.step);
        debug!(session_id = %self.id, from = %self.step, to = %step, "Step transition");
        self.step = step;
        self.view.show_step(step);
        self.deps.announcer.announce(&self.view.step_label());
        self.deps
            .analytics
            .push(AnalyticsEvent::step_view(step.number(), &self.page_path));
    }

    // ── Submission ──────────────────────────────────────────────────────

    /// Build the typed lead from the current values.
    ///
    /// Expects values that already passed validation; anything that still
    /// does not convert is reported as [`FormError::Incomplete`].
    pub fn finalize(&self, submitted_at: DateTime<Utc>) -> Result<LeadSubmission, FormError> {
        let values = &self.values;
        let text = |field: FieldName| values.text(field).trim().to_string();
        let optional = |field: FieldName| Some(text(field)).filter(|s| !s.is_empty());
        let choice = |field: FieldName| {
            values
                .choice(field)
                .ok_or_else(|| FormError::Incomplete(format!("{field} has no selection")))
        };

        let business_type = choice(FieldName::BusinessType)?
            .parse::<BusinessType>()
            .map_err(FormError::Incomplete)?;
        let ai_timeline = choice(FieldName::AiTimeline)?
            .parse::<AiTimeline>()
            .map_err(FormError::Incomplete)?;
        let sales_channels = values
            .selected(FieldName::SalesChannels)
            .iter()
            .map(|s| s.parse::<SalesChannel>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(FormError::Incomplete)?;
        let avg_daily_orders = parse_daily_orders(values.text(FieldName::AvgDailyOrders))
            .ok_or_else(|| FormError::Incomplete("avg_daily_orders out of range".into()))?;

        Ok(LeadSubmission {
            name: text(FieldName::Name),
            business_name: text(FieldName::BusinessName),
            business_email: text(FieldName::BusinessEmail),
            website: text(FieldName::Website),
            facebook: optional(FieldName::Facebook),
            instagram: optional(FieldName::Instagram),
            other_platforms: optional(FieldName::OtherPlatforms),
            business_details: optional(FieldName::BusinessDetails),
            business_type,
            core_category: text(FieldName::CoreCategory),
            sales_channels,
            avg_daily_orders,
            avg_ticket_size: optional(FieldName::AvgTicketSize),
            ai_timeline,
            attribution: Attribution {
                submitted_at: Some(submitted_at),
                ..self.attribution.clone()
            },
        })
    }

    /// Run the submit guards, then deliver the lead.
    pub async fn handle_submit(&mut self) -> SubmitOutcome {
        if self.submitted {
            return SubmitOutcome::AlreadySubmitted;
        }

        if !self.honeypot.is_empty() {
            warn!(session_id = %self.id, "Bot detected, dropping submission");
            return SubmitOutcome::Bot;
        }

        let now = Utc::now();
        let elapsed = (now - self.started_at).to_std().unwrap_or_default();
        if elapsed < self.min_dwell {
            debug!(session_id = %self.id, elapsed_ms = elapsed.as_millis() as u64, "Submission too fast");
            self.deps.notifier.toast(MSG_TOO_FAST, ToastKind::Error);
            return SubmitOutcome::TooFast;
        }

        if !self.validate_all() {
            self.deps.announcer.announce(MSG_FIX_BEFORE_SUBMITTING);
            return SubmitOutcome::Invalid;
        }

        let lead = match self.finalize(now) {
            Ok(lead) => lead,
            Err(e) => {
                error!(session_id = %self.id, error = %e, "Validated form did not finalize");
                self.deps.notifier.toast(MSG_SUBMIT_FAILED, ToastKind::Error);
                return SubmitOutcome::Failed;
            }
        };
        let payload = self.entries.encode(&lead);

        let result = {
            let _loading = self.view.begin_loading();
            self.deps.ingest.submit(&payload).await
        };

        match result {
            Ok(()) => {
                self.submitted = true;
                self.view.show_success();
                self.deps
                    .analytics
                    .push(AnalyticsEvent::submitted(lead.business_type.as_str()));
                if let Err(e) = draft::clear_draft(self.deps.store.as_ref()).await {
                    warn!(session_id = %self.id, error = %e, "Failed to clear form draft");
                }
                self.deps.announcer.announce(MSG_SUBMITTED);
                info!(
                    session_id = %self.id,
                    business_type = %lead.business_type,
                    entries = payload.len(),
                    "Lead submitted"
                );
                SubmitOutcome::Submitted
            }
            Err(e) => {
                error!(session_id = %self.id, error = %e, "Form submission failed");
                self.deps.notifier.toast(MSG_SUBMIT_FAILED, ToastKind::Error);
                SubmitOutcome::Failed
            }
        }
    }
}
