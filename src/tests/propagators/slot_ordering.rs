#![cfg(test)]
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::test_helper::TestSolver;
use crate::propagators::SlotOrderingPropagator;

#[test]
fn unused_slot_frees_every_later_slot() {
    let mut solver = TestSolver::default();

    let occupancy = (0..4)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();
    solver.set_value(occupancy[1], 0);

    let _ = solver
        .new_propagator(SlotOrderingPropagator::new(occupancy.clone()))
        .expect("no empty domain");

    solver.assert_bounds(occupancy[0], 0, 1);
    solver.assert_bounds(occupancy[2], 0, 0);
    solver.assert_bounds(occupancy[3], 0, 0);
}

#[test]
fn used_slot_uses_every_earlier_slot() {
    let mut solver = TestSolver::default();

    let occupancy = (0..4)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();
    solver.set_value(occupancy[2], 1);

    let propagator = solver
        .new_propagator(SlotOrderingPropagator::new(occupancy.clone()))
        .expect("no empty domain");

    solver.assert_bounds(occupancy[0], 1, 1);
    solver.assert_bounds(occupancy[1], 1, 1);
    solver.assert_bounds(occupancy[3], 0, 1);
    // Whatever the last slot does, the order holds.
    assert_eq!(Satisfaction::Satisfied, solver.check(propagator));
}

#[test]
fn gap_in_the_used_slots_is_inconsistent() {
    let mut solver = TestSolver::default();

    let first = solver.new_variable(0, 0);
    let second = solver.new_variable(0, 1);
    let third = solver.new_variable(1, 1);

    let result = solver.new_propagator(SlotOrderingPropagator::new([first, second, third].into()));

    assert!(result.is_err());
}
