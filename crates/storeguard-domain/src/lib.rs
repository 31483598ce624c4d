//! Pure rule evaluation (no IO).
//!
//! Input: a project model (or any [`model::ProjectItem`]) constructed elsewhere.
//! Output: per-rule results + findings + verdict + summary data.

#![forbid(unsafe_code)]

pub mod model;
pub mod policy;
pub mod report;
pub mod rule;
pub mod rules;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::evaluate;
pub use rule::{Rule, RuleReturn, ValidationState};
