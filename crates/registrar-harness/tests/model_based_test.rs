//! Model-based property tests.
//!
//! These tests generate random operation sequences and verify that the
//! real registry behaves identically to the reference model.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!    ModelRegistry   RealRegistry     Compare
//!    (reference)     (registrar)      Outcomes + State
//! ```

use proptest::prelude::*;
use registrar_harness::{
    ModelCapacities, ModelRegistry, Operation, OperationOutcome, OutcomeError, RealRegistry,
};

/// Strategy for generating operations. Selectors stay `u8`; both sides
/// map them onto live entities modulo count.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => any::<u8>().prop_map(|name_seed| Operation::CreateCourse { name_seed }),
        2 => any::<u8>().prop_map(|name_seed| Operation::CreateStudent { name_seed }),
        3 => (any::<u8>(), any::<u8>())
            .prop_map(|(course, prereq)| Operation::AddPrerequisite { course, prereq }),
        3 => (any::<u8>(), any::<u8>())
            .prop_map(|(student, course)| Operation::AddCourseToStudent { student, course }),
        2 => (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(course, room_seed, date_seed)| {
            Operation::CreateOffering { course, room_seed, date_seed }
        }),
        4 => (any::<u8>(), any::<u8>())
            .prop_map(|(offering, student)| Operation::Enroll { offering, student }),
    ]
}

proptest! {
    /// The core model-based test: per-operation outcome equivalence and
    /// final observable-state equality over random sequences.
    #[test]
    fn prop_model_matches_real(ops in prop::collection::vec(operation_strategy(), 0..60)) {
        let capacities = ModelCapacities::small();
        let mut model = ModelRegistry::new(capacities);
        let mut real = RealRegistry::new(capacities);

        for (i, op) in ops.iter().enumerate() {
            let model_outcome = model.apply(op);
            let real_outcome = real.apply(op);

            prop_assert_eq!(
                model_outcome, real_outcome,
                "Divergence at operation {}: {:?}", i, op
            );
        }

        prop_assert_eq!(model.observable_state(), real.observable_state());
    }

    /// Holder counts on the real side always equal the model's explicit
    /// reference counters, after every single operation.
    #[test]
    fn prop_holder_counts_track_model(ops in prop::collection::vec(operation_strategy(), 0..40)) {
        let capacities = ModelCapacities::small();
        let mut model = ModelRegistry::new(capacities);
        let mut real = RealRegistry::new(capacities);

        for op in &ops {
            let _ = model.apply(op);
            let _ = real.apply(op);

            let model_state = model.observable_state();
            let real_state = real.observable_state();
            prop_assert_eq!(&model_state.courses, &real_state.courses);
            prop_assert_eq!(&model_state.students, &real_state.students);
        }
    }

    /// A student is admitted exactly when they have taken every
    /// prerequisite of the offered course.
    #[test]
    fn prop_enroll_requires_all_prerequisites(total in 1usize..4, taken in 0usize..4) {
        let taken = taken.min(total);
        let mut registry = registrar_core::Registry::default();

        let prereqs: Vec<_> = (0..total)
            .map(|i| {
                registry
                    .create_course(&format!("P{i}"), "", 4)
                    .expect("within capacity")
            })
            .collect();
        let course = registry
            .create_course_with_prereqs("ADV", "", 8, &prereqs)
            .expect("within capacity");
        let offering = registry.create_offering(course, "A1", "d").expect("within capacity");
        let student = registry
            .create_student_with_courses("s", "0", 20, &prereqs[..taken])
            .expect("within capacity");

        let outcome = registry.enroll(offering, student).expect("live handles");
        prop_assert_eq!(outcome.is_admitted(), taken == total);
    }

    /// Creating one entity past capacity fails identically on both sides
    /// and leaves the count at capacity.
    #[test]
    fn prop_creation_beyond_capacity_fails(seeds in prop::collection::vec(any::<u8>(), 9..20)) {
        let capacities = ModelCapacities::small();
        let mut model = ModelRegistry::new(capacities);
        let mut real = RealRegistry::new(capacities);

        for (i, &seed) in seeds.iter().enumerate() {
            let op = Operation::CreateCourse { name_seed: seed };
            let expected = if i < capacities.max_courses {
                OperationOutcome::Ok
            } else {
                OperationOutcome::Error(OutcomeError::CatalogFull)
            };
            prop_assert_eq!(model.apply(&op), expected);
            prop_assert_eq!(real.apply(&op), expected);
        }

        let state = real.observable_state();
        prop_assert_eq!(state.courses.len(), capacities.max_courses);
    }
}

mod smoke_tests {
    use super::*;

    /// Deterministic walk through every operation kind.
    #[test]
    fn model_and_real_agree_on_a_scripted_sequence() {
        let capacities = ModelCapacities::small();
        let mut model = ModelRegistry::new(capacities);
        let mut real = RealRegistry::new(capacities);

        let ops = [
            Operation::CreateCourse { name_seed: 1 },
            Operation::CreateCourse { name_seed: 2 },
            Operation::CreateStudent { name_seed: 7 },
            Operation::AddPrerequisite { course: 1, prereq: 0 },
            Operation::CreateOffering { course: 1, room_seed: 0, date_seed: 0 },
            // Missing prerequisite: refused on both sides.
            Operation::Enroll { offering: 0, student: 0 },
            Operation::AddCourseToStudent { student: 0, course: 0 },
            // Now satisfied: admitted on both sides.
            Operation::Enroll { offering: 0, student: 0 },
        ];

        let mut outcomes = Vec::new();
        for op in &ops {
            let model_outcome = model.apply(op);
            let real_outcome = real.apply(op);
            assert_eq!(model_outcome, real_outcome, "diverged on {op:?}");
            outcomes.push(model_outcome);
        }

        assert_eq!(outcomes[5], OperationOutcome::Refused);
        assert_eq!(outcomes[7], OperationOutcome::Admitted);
        assert_eq!(model.observable_state(), real.observable_state());
    }

    /// Selector operations against an empty registry report the missing
    /// pool rather than panicking.
    #[test]
    fn selectors_on_empty_registry_are_reported() {
        let capacities = ModelCapacities::small();
        let mut model = ModelRegistry::new(capacities);
        let mut real = RealRegistry::new(capacities);

        let op = Operation::Enroll { offering: 3, student: 3 };
        assert_eq!(model.apply(&op), OperationOutcome::Error(OutcomeError::NoOfferings));
        assert_eq!(real.apply(&op), OperationOutcome::Error(OutcomeError::NoOfferings));

        let op = Operation::AddPrerequisite { course: 0, prereq: 0 };
        assert_eq!(model.apply(&op), OperationOutcome::Error(OutcomeError::NoCourses));
        assert_eq!(real.apply(&op), OperationOutcome::Error(OutcomeError::NoCourses));
    }
}
