//! Reference model for model-based testing.
//!
//! The model is a simplified registry that captures the SPECIFICATION of
//! the enrollment system without the shared-ownership machinery: plain
//! vectors, dense indices, explicit holder counters. It serves as the
//! oracle against which the real implementation is verified.
//!
//! # Design Principles
//!
//! - Simplicity: the model should be obviously correct
//! - Specification not implementation: captures WHAT, not HOW
//! - Deterministic: same operations produce same outcomes

mod operation;
mod registry;

pub use operation::{
    Operation, OperationOutcome, OutcomeError, course_name, date_name, room_name, student_name,
};
pub use registry::{ModelCapacities, ModelRegistry, ObservableState};
