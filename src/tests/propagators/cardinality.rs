#![cfg(test)]
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::test_helper::TestSolver;
use crate::instance::Comparison;
use crate::propagators::CardinalityPropagator;

#[test]
fn exact_count_reached_excludes_the_rest() {
    let mut solver = TestSolver::default();

    let bits = (0..3)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();
    solver.set_value(bits[1], 1);

    let propagator = solver
        .new_propagator(CardinalityPropagator::new(
            bits.clone(),
            Comparison::Equal,
            1,
        ))
        .expect("no empty domain");

    solver.assert_bounds(bits[0], 0, 0);
    solver.assert_bounds(bits[2], 0, 0);
    assert_eq!(Satisfaction::Satisfied, solver.check(propagator));
}

#[test]
fn lower_bound_with_no_slack_places_every_candidate() {
    let mut solver = TestSolver::default();

    let bits = (0..3)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();
    solver.set_value(bits[2], 0);

    let _ = solver
        .new_propagator(CardinalityPropagator::new(
            bits.clone(),
            Comparison::AtLeast,
            2,
        ))
        .expect("no empty domain");

    solver.assert_bounds(bits[0], 1, 1);
    solver.assert_bounds(bits[1], 1, 1);
}

#[test]
fn lower_bound_with_slack_does_nothing() {
    let mut solver = TestSolver::default();

    let bits = (0..4)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();

    let propagator = solver
        .new_propagator(CardinalityPropagator::new(
            bits.clone(),
            Comparison::AtLeast,
            3,
        ))
        .expect("no empty domain");

    for &bit in bits.iter() {
        solver.assert_bounds(bit, 0, 1);
    }
    assert_eq!(Satisfaction::Undetermined, solver.check(propagator));
}

#[test]
fn exceeded_upper_bound_is_detected_at_the_root() {
    let mut solver = TestSolver::default();

    let a = solver.new_variable(1, 1);
    let b = solver.new_variable(1, 1);
    let c = solver.new_variable(0, 1);

    let result = solver.new_propagator(CardinalityPropagator::new(
        [a, b, c].into(),
        Comparison::AtMost,
        1,
    ));

    assert!(result.is_err());
}

#[test]
fn too_few_candidates_fail_during_search() {
    let mut solver = TestSolver::default();

    let bits = (0..3)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();

    let propagator = solver
        .new_propagator(CardinalityPropagator::new(
            bits.clone(),
            Comparison::AtLeast,
            2,
        ))
        .expect("no empty domain");

    solver.set_value(bits[0], 0);
    solver.set_value(bits[1], 0);

    assert!(solver.propagate(propagator).is_err());
}
