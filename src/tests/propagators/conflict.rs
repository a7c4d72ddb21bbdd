#![cfg(test)]
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::test_helper::TestSolver;
use crate::propagators::ConflictPropagator;

#[test]
fn placed_component_evicts_the_conflicting_ones() {
    let mut solver = TestSolver::default();

    let bit = solver.new_variable(0, 1);
    let others = (0..3)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();

    let propagator = solver
        .new_propagator(ConflictPropagator::new(bit, others.clone()))
        .expect("no empty domain");
    assert_eq!(Satisfaction::Undetermined, solver.check(propagator));

    solver.set_value(bit, 1);
    solver.propagate(propagator).expect("no empty domain");

    for &other in others.iter() {
        solver.assert_bounds(other, 0, 0);
    }
    assert_eq!(Satisfaction::Satisfied, solver.check(propagator));
}

#[test]
fn placed_conflicting_component_evicts_the_component() {
    let mut solver = TestSolver::default();

    let bit = solver.new_variable(0, 1);
    let a = solver.new_variable(0, 1);
    let b = solver.new_variable(0, 1);
    solver.set_value(b, 1);

    let _ = solver
        .new_propagator(ConflictPropagator::new(bit, [a, b].into()))
        .expect("no empty domain");

    solver.assert_bounds(bit, 0, 0);
    solver.assert_bounds(a, 0, 1);
}

#[test]
fn sharing_a_slot_is_detected_at_the_root() {
    let mut solver = TestSolver::default();

    let bit = solver.new_variable(1, 1);
    let other = solver.new_variable(1, 1);

    let result = solver.new_propagator(ConflictPropagator::new(bit, [other].into()));

    assert!(result.is_err());
}
