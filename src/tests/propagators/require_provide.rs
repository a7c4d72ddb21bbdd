#![cfg(test)]
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::test_helper::TestSolver;
use crate::propagators::RequireProvidePropagator;

#[test]
fn without_providers_nothing_is_consumed() {
    let mut solver = TestSolver::default();

    let consumers = (0..3)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();
    let providers = (0..2)
        .map(|_| solver.new_variable(0, 0))
        .collect::<Box<_>>();

    let _ = solver
        .new_propagator(RequireProvidePropagator::new(
            consumers.clone(),
            1,
            providers,
            10,
        ))
        .expect("no empty domain");

    for &consumer in consumers.iter() {
        solver.assert_bounds(consumer, 0, 0);
    }
}

#[test]
fn tight_demand_fixes_both_sides() {
    let mut solver = TestSolver::default();

    let consumers = (0..3)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();
    let providers = (0..2)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();
    solver.set_value(consumers[0], 1);
    solver.set_value(consumers[1], 1);

    let _ = solver
        .new_propagator(RequireProvidePropagator::new(
            consumers.clone(),
            1,
            providers.clone(),
            1,
        ))
        .expect("no empty domain");

    solver.assert_bounds(consumers[2], 0, 0);
    solver.assert_bounds(providers[0], 1, 1);
    solver.assert_bounds(providers[1], 1, 1);
}

#[test]
fn one_provider_serves_up_to_its_ratio() {
    let mut solver = TestSolver::default();

    let consumers = (0..3)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();
    let provider = solver.new_variable(1, 1);

    let propagator = solver
        .new_propagator(RequireProvidePropagator::new(
            consumers.clone(),
            1,
            [provider].into(),
            10,
        ))
        .expect("no empty domain");

    for &consumer in consumers.iter() {
        solver.assert_bounds(consumer, 0, 1);
    }
    assert_eq!(Satisfaction::Satisfied, solver.check(propagator));
}

#[test]
fn excess_demand_is_detected_at_the_root() {
    let mut solver = TestSolver::default();

    let consumers = (0..3)
        .map(|_| solver.new_variable(1, 1))
        .collect::<Box<_>>();
    let provider = solver.new_variable(0, 1);

    let result = solver.new_propagator(RequireProvidePropagator::new(
        consumers,
        1,
        [provider].into(),
        2,
    ));

    assert!(result.is_err());
}
