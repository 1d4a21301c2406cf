//! Which screen of the form is active, and the legal moves between them.

use serde::{Deserialize, Serialize};

/// Number of steps in the form.
pub const TOTAL_STEPS: u8 = 4;

/// The steps of the lead form.
///
/// Progresses linearly: Contact → Presence → Business → Operations, and
/// back one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStep {
    Contact,
    Presence,
    Business,
    Operations,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::Contact,
        FormStep::Presence,
        FormStep::Business,
        FormStep::Operations,
    ];

    /// 1-based step number.
    pub fn number(&self) -> u8 {
        match self {
            Self::Contact => 1,
            Self::Presence => 2,
            Self::Business => 3,
            Self::Operations => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<FormStep> {
        match n {
            1 => Some(Self::Contact),
            2 => Some(Self::Presence),
            3 => Some(Self::Business),
            4 => Some(Self::Operations),
            _ => None,
        }
    }

    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: FormStep) -> bool {
        let (from, to) = (self.number(), target.number());
        from + 1 == to || to + 1 == from
    }

    pub fn next(&self) -> Option<FormStep> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(&self) -> Option<FormStep> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn is_first(&self) -> bool {
        matches!(self, Self::Contact)
    }

    pub fn is_last(&self) -> bool {
        matches!(self, Self::Operations)
    }

    /// Progress bar width for this step, in percent.
    pub fn progress_percent(&self) -> f32 {
        f32::from(self.number()) / f32::from(TOTAL_STEPS) * 100.0
    }
}

impl Default for FormStep {
    fn default() -> Self {
        Self::Contact
    }
}

impl std::fmt::Display for FormStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Contact => "contact",
            Self::Presence => "presence",
            Self::Business => "business",
            Self::Operations => "operations",
        };
        write!(f, "{s}")
    }
}
