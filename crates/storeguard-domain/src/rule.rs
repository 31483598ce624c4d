//! The rule capability and its return value.

use crate::model::ProjectItem;
use storeguard_types::Location;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationState {
    Passed,
    Failed,
}

/// Result of one rule evaluation.
///
/// `failure_data` is present if and only if the state is [`ValidationState::Failed`];
/// the constructors are the only way to build one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleReturn {
    validation_state: ValidationState,
    failure: Option<Failure>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Failure {
    code: &'static str,
    data: String,
    location: Option<Location>,
}

impl RuleReturn {
    pub fn passed() -> Self {
        Self {
            validation_state: ValidationState::Passed,
            failure: None,
        }
    }

    /// A failure with a stable finding `code` and a user-facing message.
    pub fn failed(code: &'static str, failure_data: impl Into<String>) -> Self {
        Self {
            validation_state: ValidationState::Failed,
            failure: Some(Failure {
                code,
                data: failure_data.into(),
                location: None,
            }),
        }
    }

    /// Attach the location the failure points at. No-op on a passed return.
    pub fn at(mut self, location: Option<Location>) -> Self {
        if let Some(f) = self.failure.as_mut() {
            f.location = location;
        }
        self
    }

    pub fn validation_state(&self) -> ValidationState {
        self.validation_state
    }

    pub fn is_passed(&self) -> bool {
        self.validation_state == ValidationState::Passed
    }

    pub fn failure_data(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.data.as_str())
    }

    pub fn failure_code(&self) -> Option<&'static str> {
        self.failure.as_ref().map(|f| f.code)
    }

    pub fn location(&self) -> Option<&Location> {
        self.failure.as_ref().and_then(|f| f.location.as_ref())
    }
}

/// A single pre-submission check.
///
/// Rules are stateless; `evaluate` is a pure function of the item it is given.
pub trait Rule: Send + Sync {
    /// Stable key, also used as the finding `check_id`.
    fn key(&self) -> &'static str;

    /// Environment variable that enables, disables or re-levels the rule.
    fn env_name(&self) -> &'static str;

    fn friendly_name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Documentation link attached to findings.
    fn documentation_url(&self) -> Option<&'static str> {
        None
    }

    fn evaluate(&self, item: &dyn ProjectItem) -> RuleReturn;
}
