//! Rendered form state: what a page (or terminal) shows for the session.

use std::collections::BTreeMap;

use serde::Serialize;

use super::fields::FieldName;
use super::state::{FormStep, TOTAL_STEPS};

/// Everything the presentation layer needs to draw the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    /// The visible step panel.
    pub active_step: FormStep,
    /// Progress bar width in percent.
    pub progress_percent: f32,
    /// Text of the "step N" counter.
    pub step_counter: String,
    pub back_visible: bool,
    pub next_visible: bool,
    pub submit_visible: bool,
    /// False while a submission is in flight.
    pub submit_enabled: bool,
    pub submit_loading: bool,
    pub form_visible: bool,
    pub success_visible: bool,
    /// Invalid fields and the message shown in their error target.
    pub errors: BTreeMap<FieldName, String>,
}

impl FormView {
    pub fn new(step: FormStep) -> Self {
        let mut view = Self {
            active_step: step,
            progress_percent: 0.0,
            step_counter: String::new(),
            back_visible: false,
            next_visible: false,
            submit_visible: false,
            submit_enabled: true,
            submit_loading: false,
            form_visible: true,
            success_visible: false,
            errors: BTreeMap::new(),
        };
        view.show_step(step);
        view
    }

    /// Switch the visible panel and the controls that depend on it.
    pub fn show_step(&mut self, step: FormStep) {
        self.active_step = step;
        self.progress_percent = step.progress_percent();
        self.step_counter = step.number().to_string();
        self.back_visible = !step.is_first();
        self.next_visible = !step.is_last();
        self.submit_visible = step.is_last();
    }

    /// Disable the submit control and show its spinner, or restore it.
    pub fn set_loading(&mut self, loading: bool) {
        self.submit_enabled = !loading;
        self.submit_loading = loading;
    }

    /// Enter the loading state until the returned guard is dropped.
    ///
    /// The submit control comes back even when the in-flight request is
    /// abandoned, e.g. a caller timing out the submit future.
    pub fn begin_loading(&mut self) -> LoadingGuard<'_> {
        self.set_loading(true);
        LoadingGuard { view: self }
    }

    /// Replace the form with the success message.
    pub fn show_success(&mut self) {
        self.progress_percent = 100.0;
        self.form_visible = false;
        self.success_visible = true;
    }

    pub fn mark_invalid(&mut self, field: FieldName, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear_error(&mut self, field: FieldName) {
        self.errors.remove(&field);
    }

    pub fn is_invalid(&self, field: FieldName) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn error_for(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// "Step N of 4", as announced to screen readers.
    pub fn step_label(&self) -> String {
        format!("Step {} of {TOTAL_STEPS}", self.active_step.number())
    }
}

/// Restores the submit control when dropped. See [`FormView::begin_loading`].
pub struct LoadingGuard<'a> {
    view: &'a mut FormView,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.view.set_loading(false);
    }
}
