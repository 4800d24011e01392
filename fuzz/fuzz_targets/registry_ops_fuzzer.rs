//! Fuzz target for registry operation sequences
//!
//! Prevent ownership-lifecycle corruption under arbitrary operation
//! interleavings
//!
//! # Strategy
//!
//! - Operation sequences: arbitrary creates, links, offerings, enrolls
//! - Selector abuse: out-of-range and aliased entity selectors
//! - Capacity pressure: tight limits so every list overflows quickly
//! - Teardown: clear() after every sequence
//!
//! # Invariants
//!
//! - Outcomes match the reference model on every operation
//! - Holder counts equal the model's explicit reference counters
//! - A refused enrollment changes nothing observable
//! - NEVER panic, whatever the sequence
//! - clear() finalizes every entity unless a prerequisite cycle was
//!   constructed; students always finalize (nothing can cycle them)

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use registrar_harness::{ModelCapacities, ModelRegistry, Operation, OperationOutcome, RealRegistry};

/// Fuzz input: an operation sequence applied to both registries.
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    ops: Vec<Operation>,
}

fuzz_target!(|input: FuzzInput| {
    let capacities = ModelCapacities::small();
    let mut model = ModelRegistry::new(capacities);
    let mut real = RealRegistry::new(capacities);

    for op in &input.ops {
        let before = real.observable_state();

        let model_outcome = model.apply(op);
        let real_outcome = real.apply(op);
        assert_eq!(model_outcome, real_outcome, "outcome divergence on {op:?}");

        if model_outcome == OperationOutcome::Refused {
            assert_eq!(
                real.observable_state(),
                before,
                "refused enrollment mutated state: {op:?}"
            );
        }

        // Holder counts on the real side must equal the model's explicit
        // reference counters after every step.
        assert_eq!(model.observable_state(), real.observable_state());
    }

    let cyclic = model.has_prereq_cycle();
    real.clear();

    assert_eq!(real.live_students(), 0, "students survived teardown");
    if !cyclic {
        assert_eq!(real.live_courses(), 0, "courses survived teardown without a cycle");
    }
});
