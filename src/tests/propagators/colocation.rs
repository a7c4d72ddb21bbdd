#![cfg(test)]
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::test_helper::TestSolver;
use crate::propagators::ColocationPropagator;

#[test]
fn placed_primary_brings_the_dependent_and_excludes_the_other_primary() {
    let mut solver = TestSolver::default();

    let dependent = solver.new_variable(0, 1);
    let apache = solver.new_variable(0, 1);
    let nginx = solver.new_variable(0, 1);
    solver.set_value(apache, 1);

    let propagator = solver
        .new_propagator(ColocationPropagator::new(dependent, [apache, nginx].into()))
        .expect("no empty domain");

    solver.assert_bounds(dependent, 1, 1);
    solver.assert_bounds(nginx, 0, 0);
    assert_eq!(Satisfaction::Satisfied, solver.check(propagator));
}

#[test]
fn absent_dependent_excludes_every_primary() {
    let mut solver = TestSolver::default();

    let dependent = solver.new_variable(0, 0);
    let primaries = (0..2)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();

    let _ = solver
        .new_propagator(ColocationPropagator::new(dependent, primaries.clone()))
        .expect("no empty domain");

    for &primary in primaries.iter() {
        solver.assert_bounds(primary, 0, 0);
    }
}

#[test]
fn present_dependent_needs_the_remaining_primary() {
    let mut solver = TestSolver::default();

    let dependent = solver.new_variable(1, 1);
    let apache = solver.new_variable(0, 0);
    let nginx = solver.new_variable(0, 1);

    let _ = solver
        .new_propagator(ColocationPropagator::new(dependent, [apache, nginx].into()))
        .expect("no empty domain");

    solver.assert_bounds(nginx, 1, 1);
}

#[test]
fn dependent_without_primary_is_detected_at_the_root() {
    let mut solver = TestSolver::default();

    let dependent = solver.new_variable(1, 1);
    let primary = solver.new_variable(0, 0);

    let result = solver.new_propagator(ColocationPropagator::new(dependent, [primary].into()));

    assert!(result.is_err());
}
