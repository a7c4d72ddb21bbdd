#![cfg(test)]
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::test_helper::TestSolver;
use crate::engine::variables::DomainId;
use crate::propagators::LinkingPropagator;

/// Two offers: type 1 with capacity 4 for 10, type 2 with capacity 8 for 5.
fn setup(solver: &mut TestSolver) -> (DomainId, DomainId, DomainId, DomainId) {
    let slot_type = solver.new_variable(0, 2);
    let occupancy = solver.new_variable(0, 1);
    let capacity = solver.new_sparse_variable(&[0, 4, 8]);
    let price = solver.new_sparse_variable(&[0, 10, 5]);

    (slot_type, occupancy, capacity, price)
}

fn linking(
    slot_type: DomainId,
    occupancy: DomainId,
    capacity: DomainId,
    price: DomainId,
) -> LinkingPropagator {
    LinkingPropagator::new(
        slot_type,
        occupancy,
        [capacity, price].into(),
        [[0, 4, 8].into(), [0, 10, 5].into()].into(),
    )
}

#[test]
fn removed_price_removes_the_offer_and_its_capacity() {
    let mut solver = TestSolver::default();
    let (slot_type, occupancy, capacity, price) = setup(&mut solver);
    let _ = solver.remove(price, 10);

    let _ = solver
        .new_propagator(linking(slot_type, occupancy, capacity, price))
        .expect("no empty domain");

    solver.assert_domain(slot_type, vec![0, 2]);
    solver.assert_domain(capacity, vec![0, 8]);
    solver.assert_bounds(occupancy, 0, 1);
}

#[test]
fn occupied_slot_has_an_offer() {
    let mut solver = TestSolver::default();
    let (slot_type, occupancy, capacity, price) = setup(&mut solver);
    solver.set_value(occupancy, 1);

    let _ = solver
        .new_propagator(linking(slot_type, occupancy, capacity, price))
        .expect("no empty domain");

    solver.assert_domain(slot_type, vec![1, 2]);
    solver.assert_domain(capacity, vec![4, 8]);
    solver.assert_domain(price, vec![5, 10]);
}

#[test]
fn unused_slot_has_empty_fields() {
    let mut solver = TestSolver::default();
    let (slot_type, occupancy, capacity, price) = setup(&mut solver);
    solver.set_value(slot_type, 0);

    let propagator = solver
        .new_propagator(linking(slot_type, occupancy, capacity, price))
        .expect("no empty domain");

    solver.assert_bounds(occupancy, 0, 0);
    solver.assert_bounds(capacity, 0, 0);
    solver.assert_bounds(price, 0, 0);
    assert_eq!(Satisfaction::Satisfied, solver.check(propagator));
}

#[test]
fn fields_without_a_common_offer_are_inconsistent() {
    let mut solver = TestSolver::default();
    let (slot_type, occupancy, capacity, price) = setup(&mut solver);
    solver.set_value(capacity, 4);
    solver.set_value(price, 5);

    let result = solver.new_propagator(linking(slot_type, occupancy, capacity, price));

    assert!(result.is_err());
}
