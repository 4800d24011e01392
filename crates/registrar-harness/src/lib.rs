//! Testing harness for the course-enrollment registry.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation for model-based
//! testing. Operations are applied to both the model and the real
//! registry, and their outcomes and observable states are compared. The
//! [`RealRegistry`] wrapper drives the real implementation through the
//! model's operation vocabulary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
mod real;

pub use model::{
    ModelCapacities, ModelRegistry, ObservableState, Operation, OperationOutcome, OutcomeError,
    course_name, date_name, room_name, student_name,
};
pub use real::RealRegistry;
