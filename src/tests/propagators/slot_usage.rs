#![cfg(test)]
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::test_helper::TestSolver;
use crate::propagators::SlotUsagePropagator;

#[test]
fn placed_component_forces_an_offer() {
    let mut solver = TestSolver::default();

    let a = solver.new_variable(0, 1);
    let b = solver.new_variable(0, 1);
    let slot_type = solver.new_variable(0, 3);
    solver.set_value(a, 1);

    let _ = solver
        .new_propagator(SlotUsagePropagator::type_consistency(
            [a, b].into(),
            slot_type,
        ))
        .expect("no empty domain");

    solver.assert_bounds(slot_type, 1, 3);
    solver.assert_bounds(b, 0, 1);
}

#[test]
fn unused_slot_hosts_nothing() {
    let mut solver = TestSolver::default();

    let bits = (0..3)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();
    let slot_type = solver.new_variable(0, 0);

    let _ = solver
        .new_propagator(SlotUsagePropagator::type_consistency(
            bits.clone(),
            slot_type,
        ))
        .expect("no empty domain");

    for &bit in bits.iter() {
        solver.assert_bounds(bit, 0, 0);
    }
}

#[test]
fn occupied_slot_with_one_candidate_receives_it() {
    let mut solver = TestSolver::default();

    let a = solver.new_variable(0, 1);
    let b = solver.new_variable(0, 1);
    let occupancy = solver.new_variable(1, 1);
    solver.set_value(b, 0);

    let _ = solver
        .new_propagator(SlotUsagePropagator::occupancy([a, b].into(), occupancy))
        .expect("no empty domain");

    solver.assert_bounds(a, 1, 1);
}

#[test]
fn slot_without_candidates_is_unoccupied() {
    let mut solver = TestSolver::default();

    let a = solver.new_variable(0, 0);
    let b = solver.new_variable(0, 0);
    let occupancy = solver.new_variable(0, 1);

    let propagator = solver
        .new_propagator(SlotUsagePropagator::occupancy([a, b].into(), occupancy))
        .expect("no empty domain");

    solver.assert_bounds(occupancy, 0, 0);
    assert_eq!(Satisfaction::Satisfied, solver.check(propagator));
}

#[test]
fn placed_component_on_unused_slot_is_detected_at_the_root() {
    let mut solver = TestSolver::default();

    let a = solver.new_variable(1, 1);
    let occupancy = solver.new_variable(0, 0);

    let result = solver.new_propagator(SlotUsagePropagator::occupancy([a].into(), occupancy));

    assert!(result.is_err());
}

#[test]
fn both_flavours_watch_the_indicator() {
    let mut solver = TestSolver::default();

    let a = solver.new_variable(0, 1);
    let slot_type = solver.new_variable(0, 2);

    let _ = solver
        .new_propagator(SlotUsagePropagator::type_consistency([a].into(), slot_type))
        .expect("no empty domain");

    assert!(solver.is_watching(a));
    assert!(solver.is_watching(slot_type));
}
