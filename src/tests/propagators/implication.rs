#![cfg(test)]
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::test_helper::TestSolver;
use crate::propagators::ImplicationPropagator;

#[test]
fn deployed_antecedent_places_the_last_consequent() {
    let mut solver = TestSolver::default();

    let antecedents = (0..2)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();
    let consequents = (0..2)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();
    solver.set_value(antecedents[0], 1);
    solver.set_value(consequents[1], 0);

    let propagator = solver
        .new_propagator(ImplicationPropagator::new(
            antecedents,
            consequents.clone(),
            1,
        ))
        .expect("no empty domain");

    solver.assert_bounds(consequents[0], 1, 1);
    assert_eq!(Satisfaction::Satisfied, solver.check(propagator));
}

#[test]
fn absent_consequent_excludes_the_antecedent() {
    let mut solver = TestSolver::default();

    let antecedents = (0..2)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();
    let consequents = (0..2)
        .map(|_| solver.new_variable(0, 0))
        .collect::<Box<_>>();

    let _ = solver
        .new_propagator(ImplicationPropagator::new(
            antecedents.clone(),
            consequents,
            1,
        ))
        .expect("no empty domain");

    for &antecedent in antecedents.iter() {
        solver.assert_bounds(antecedent, 0, 0);
    }
}

#[test]
fn required_count_above_one_is_enforced() {
    let mut solver = TestSolver::default();

    let antecedent = solver.new_variable(1, 1);
    let consequents = (0..2)
        .map(|_| solver.new_variable(0, 1))
        .collect::<Box<_>>();

    let _ = solver
        .new_propagator(ImplicationPropagator::new(
            [antecedent].into(),
            consequents.clone(),
            2,
        ))
        .expect("no empty domain");

    solver.assert_bounds(consequents[0], 1, 1);
    solver.assert_bounds(consequents[1], 1, 1);
}

#[test]
fn unmet_implication_is_detected_at_the_root() {
    let mut solver = TestSolver::default();

    let antecedent = solver.new_variable(1, 1);
    let consequent = solver.new_variable(0, 0);

    let result = solver.new_propagator(ImplicationPropagator::new(
        [antecedent].into(),
        [consequent].into(),
        1,
    ));

    assert!(result.is_err());
}
