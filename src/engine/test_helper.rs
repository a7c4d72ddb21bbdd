#![cfg(any(test, doc))]
//! This module exposes helpers that aid testing of CP propagators. The [`TestSolver`] allows
//! setting up specific scenarios under which to test the various operations of a propagator.
use std::fmt::Debug;
use std::fmt::Formatter;

use enumset::EnumSet;

use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::IntDomainEvent;
use crate::engine::cp::WatchListCP;
use crate::engine::variables::DomainId;

/// A container for CP variables, which can be used to test propagators.
#[derive(Default, Debug)]
pub(crate) struct TestSolver {
    pub(crate) assignments: Assignments,
    pub(crate) watch_list: WatchListCP,
    next_id: u32,

    propagators: Vec<BoxedPropagator>,
}

struct BoxedPropagator(Box<dyn Propagator>);

impl Debug for BoxedPropagator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "test_helper::Propagator({})", self.0.name())
    }
}

#[allow(unused, reason = "not every helper is used by every test")]
impl TestSolver {
    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        self.assignments.grow(lb, ub)
    }

    pub(crate) fn new_sparse_variable(&mut self, values: &[i32]) -> DomainId {
        assert!(
            !values.is_empty(),
            "cannot create a variable with an empty domain"
        );

        self.assignments.grow_sparse(values.iter().copied())
    }

    /// Initialise `propagator` and run it once.
    pub(crate) fn new_propagator(
        &mut self,
        propagator: impl Propagator + 'static,
    ) -> Result<PropagatorId, Inconsistency> {
        let id = PropagatorId(self.next_id);
        self.next_id += 1;

        let mut propagator: Box<dyn Propagator> = Box::new(propagator);

        propagator.initialise_at_root(&mut PropagatorInitialisationContext::new(
            &mut self.watch_list,
            id,
            &self.assignments,
        ))?;

        self.propagators.push(BoxedPropagator(propagator));

        self.propagate(id)?;

        Ok(id)
    }

    pub(crate) fn propagate(&mut self, propagator: PropagatorId) -> PropagationStatusCP {
        let context = PropagationContextMut::new(&mut self.assignments);
        let status = self.propagators[propagator].0.propagate(context);
        self.assignments.clear_domain_events();

        status
    }

    /// Run `propagator` until it no longer changes any domain.
    pub(crate) fn propagate_until_fixed_point(
        &mut self,
        propagator: PropagatorId,
    ) -> PropagationStatusCP {
        loop {
            let num_trail_entries_before = self.assignments.num_trail_entries();
            self.propagate(propagator)?;

            if self.assignments.num_trail_entries() == num_trail_entries_before {
                return Ok(());
            }
        }
    }

    pub(crate) fn check(&self, propagator: PropagatorId) -> Satisfaction {
        self.propagators[propagator]
            .0
            .check(PropagationContext::new(&self.assignments))
    }

    /// Whether any propagator is woken up by some change to `var`.
    pub(crate) fn is_watching(&self, var: DomainId) -> bool {
        EnumSet::<IntDomainEvent>::all().iter().any(|event| {
            self.watch_list
                .get_affected_propagators(event, var)
                .next()
                .is_some()
        })
    }

    pub(crate) fn set_value(&mut self, var: DomainId, value: i32) {
        let result = self.assignments.make_assignment(var, value);
        assert!(
            result.is_ok(),
            "{value} is not in the domain of {var}, generally the propagator should not be notified of this change!"
        );
    }

    pub(crate) fn remove(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.assignments.remove_value(var, value)
    }

    pub(crate) fn increase_lower_bound(&mut self, var: DomainId, value: i32) {
        let result = self.assignments.tighten_lower_bound(var, value);
        assert!(result.is_ok(), "The provided value to `increase_lower_bound` caused an empty domain, generally the propagator should not be notified of this change!");
    }

    pub(crate) fn decrease_upper_bound(&mut self, var: DomainId, value: i32) {
        let result = self.assignments.tighten_upper_bound(var, value);
        assert!(result.is_ok(), "The provided value to `decrease_upper_bound` caused an empty domain, generally the propagator should not be notified of this change!");
    }

    pub(crate) fn contains(&self, var: DomainId, value: i32) -> bool {
        self.assignments.contains(var, value)
    }

    pub(crate) fn lower_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_lower_bound(var)
    }

    pub(crate) fn upper_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_upper_bound(var)
    }

    pub(crate) fn assert_bounds(&self, var: DomainId, lb: i32, ub: i32) {
        let actual_lb = self.lower_bound(var);
        let actual_ub = self.upper_bound(var);

        assert_eq!(
            (lb, ub), (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}]"
        );
    }

    pub(crate) fn assert_domain(&self, var: DomainId, domain: Vec<i32>) {
        let actual = self.assignments.get_domain_iter(var).collect::<Vec<_>>();
        let mut expected = domain;
        expected.sort_unstable();

        assert_eq!(
            expected, actual,
            "The expected domain {expected:?} did not match the actual domain {actual:?}"
        );
    }
}
