#![cfg(test)]
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::test_helper::TestSolver;
use crate::propagators::CapacityPropagator;

#[test]
fn types_which_cannot_host_the_placed_load_are_removed() {
    let mut solver = TestSolver::default();

    let a = solver.new_variable(0, 1);
    let b = solver.new_variable(0, 1);
    let slot_type = solver.new_variable(0, 2);
    solver.set_value(a, 1);

    let _ = solver
        .new_propagator(CapacityPropagator::new(
            slot_type,
            [a, b].into(),
            [3, 2].into(),
            [0, 4, 8].into(),
        ))
        .expect("no empty domain");

    solver.assert_domain(slot_type, vec![1, 2]);
    solver.assert_bounds(b, 0, 1);
}

#[test]
fn components_which_no_longer_fit_are_excluded() {
    let mut solver = TestSolver::default();

    let a = solver.new_variable(0, 1);
    let b = solver.new_variable(0, 1);
    let slot_type = solver.new_variable(0, 2);
    solver.set_value(a, 1);
    solver.set_value(slot_type, 1);

    let _ = solver
        .new_propagator(CapacityPropagator::new(
            slot_type,
            [a, b].into(),
            [3, 2].into(),
            [0, 4, 8].into(),
        ))
        .expect("no empty domain");

    solver.assert_bounds(b, 0, 0);
}

#[test]
fn overloaded_slot_is_detected_at_the_root() {
    let mut solver = TestSolver::default();

    let a = solver.new_variable(1, 1);
    let b = solver.new_variable(1, 1);
    let slot_type = solver.new_variable(0, 1);

    let result = solver.new_propagator(CapacityPropagator::new(
        slot_type,
        [a, b].into(),
        [3, 2].into(),
        [0, 4, 8].into(),
    ));

    assert!(result.is_err());
}

#[test]
fn largest_type_fixed_with_room_for_everything_is_satisfied() {
    let mut solver = TestSolver::default();

    let a = solver.new_variable(0, 1);
    let b = solver.new_variable(0, 1);
    let slot_type = solver.new_variable(2, 2);

    let propagator = solver
        .new_propagator(CapacityPropagator::new(
            slot_type,
            [a, b].into(),
            [3, 2].into(),
            [0, 4, 8].into(),
        ))
        .expect("no empty domain");

    assert_eq!(Satisfaction::Satisfied, solver.check(propagator));
    solver.assert_bounds(a, 0, 1);
    solver.assert_bounds(b, 0, 1);
}
