//! Depth-first branch-and-bound over the placement model.
//!
//! The search is a small state machine. After every decision the store is propagated to a fixed
//! point; complete assignments are offered to the incumbent, and partial ones are bounded by the
//! summed lower bounds of the slot prices before the next decision is taken.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use log::debug;
use rand::rngs::SmallRng;

use crate::basic_types::CumulativeMovingAverage;
use crate::branching::Brancher;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::cp::Assignments;
use crate::engine::cp::Checkpoint;
use crate::engine::cp::PropagationEngine;
use crate::engine::cp::PropagatorStore;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::VariableLayout;
use crate::instance::ProblemInstance;
use crate::results::extraction::extract_solution;
use crate::results::PlacementSolution;
use crate::statistics::log_statistic;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;

/// Keeps the best placement found so far.
pub(crate) trait Incumbent {
    /// The cost of the incumbent, [`None`] if no placement has been found yet.
    fn best_cost(&self) -> Option<u64>;

    /// Replace the incumbent by `solution` if it is strictly cheaper. Returns whether it was
    /// replaced.
    fn improve(&mut self, solution: PlacementSolution) -> bool;
}

/// The incumbent of a single search.
#[derive(Debug, Default)]
pub(crate) struct LocalIncumbent {
    solution: Option<PlacementSolution>,
}

impl LocalIncumbent {
    pub(crate) fn into_solution(self) -> Option<PlacementSolution> {
        self.solution
    }
}

impl Incumbent for LocalIncumbent {
    fn best_cost(&self) -> Option<u64> {
        self.solution.as_ref().map(PlacementSolution::total_cost)
    }

    fn improve(&mut self, solution: PlacementSolution) -> bool {
        if self
            .best_cost()
            .is_some_and(|best| best <= solution.total_cost())
        {
            return false;
        }

        self.solution = Some(solution);
        true
    }
}

/// An incumbent shared between the workers of a parallel search.
///
/// The cost is readable without locking; the lock is only taken when a worker believes it has an
/// improvement.
#[derive(Debug)]
pub(crate) struct SharedIncumbent {
    /// `u64::MAX` while there is no incumbent.
    best_cost: AtomicU64,
    solution: Mutex<Option<PlacementSolution>>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        SharedIncumbent {
            best_cost: AtomicU64::new(u64::MAX),
            solution: Mutex::new(None),
        }
    }
}

impl SharedIncumbent {
    pub(crate) fn into_solution(self) -> Option<PlacementSolution> {
        self.solution
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Incumbent for &SharedIncumbent {
    fn best_cost(&self) -> Option<u64> {
        match self.best_cost.load(Ordering::Acquire) {
            u64::MAX => None,
            cost => Some(cost),
        }
    }

    fn improve(&mut self, solution: PlacementSolution) -> bool {
        let cost = solution.total_cost();
        if cost >= self.best_cost.load(Ordering::Acquire) {
            return false;
        }

        let mut incumbent = self
            .solution
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Another worker may have improved in the meantime.
        if cost >= self.best_cost.load(Ordering::Acquire) {
            return false;
        }

        *incumbent = Some(solution);
        self.best_cost.store(cost, Ordering::Release);
        true
    }
}

/// Statistics of the search process.
#[derive(Default, Debug, Copy, Clone)]
pub(crate) struct Counters {
    pub(crate) num_decisions: u64,
    pub(crate) num_conflicts: u64,
    pub(crate) num_propagations: u64,
    pub(crate) num_solutions: u64,
    pub(crate) num_bound_prunings: u64,
    pub(crate) time_spent_in_solver: u64,
    pub(crate) average_backtrack_amount: CumulativeMovingAverage,
}

impl Counters {
    pub(crate) fn combine(&mut self, other: &Counters) {
        self.num_decisions += other.num_decisions;
        self.num_conflicts += other.num_conflicts;
        self.num_propagations += other.num_propagations;
        self.num_solutions += other.num_solutions;
        self.num_bound_prunings += other.num_bound_prunings;
        self.average_backtrack_amount
            .combine(&other.average_backtrack_amount);
    }

    pub(crate) fn log_statistics(&self) {
        if !should_log_statistics() {
            return;
        }

        log_statistic("numberOfDecisions", self.num_decisions);
        log_statistic("numberOfConflicts", self.num_conflicts);
        log_statistic("numberOfPropagations", self.num_propagations);
        log_statistic("numberOfSolutions", self.num_solutions);
        log_statistic("numberOfBoundPrunings", self.num_bound_prunings);
        log_statistic("timeSpentInSolverInMilliseconds", self.time_spent_in_solver);
        log_statistic(
            "averageBacktrackAmount",
            self.average_backtrack_amount.value(),
        );
        log_statistic_postfix();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchState {
    Branching,
    Propagating,
    Bounding,
    Backtracking,
    Exhausted,
    TimedOut,
}

/// How a call to [`BranchAndBound::run`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SearchOutcome {
    /// Every branch below the starting store was explored or pruned.
    Exhausted,
    /// The termination condition tripped before the tree was exhausted.
    TimedOut,
}

/// One depth-first search over a private copy of the store.
pub(crate) struct BranchAndBound<'a> {
    instance: &'a ProblemInstance,
    layout: &'a VariableLayout,
    propagators: &'a PropagatorStore,
    assignments: Assignments,
    engine: PropagationEngine,
    /// The open decisions, each with the checkpoint taken right before it was applied.
    decisions: Vec<(Checkpoint, Decision)>,
    random_generator: &'a mut SmallRng,
    counters: Counters,
}

impl<'a> BranchAndBound<'a> {
    /// Prepare a search starting from `assignments`. Every propagator is scheduled for the first
    /// propagation.
    pub(crate) fn new(
        instance: &'a ProblemInstance,
        layout: &'a VariableLayout,
        propagators: &'a PropagatorStore,
        assignments: Assignments,
        random_generator: &'a mut SmallRng,
    ) -> Self {
        let mut engine = PropagationEngine::default();
        engine.enqueue_all(propagators);

        BranchAndBound {
            instance,
            layout,
            propagators,
            assignments,
            engine,
            decisions: vec![],
            random_generator,
            counters: Counters::default(),
        }
    }

    pub(crate) fn counters(&self) -> Counters {
        let mut counters = self.counters;
        counters.num_propagations = self.engine.num_propagator_calls();
        counters
    }

    /// Explore the tree below the starting store, reporting every improving placement to
    /// `incumbent`.
    pub(crate) fn run(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        incumbent: &mut impl Incumbent,
    ) -> SearchOutcome {
        let mut state = SearchState::Propagating;

        loop {
            state = match state {
                SearchState::Branching => self.branch(brancher, termination),
                SearchState::Propagating => self.propagate(brancher, incumbent),
                SearchState::Bounding => self.bound(incumbent),
                SearchState::Backtracking => self.backtrack(),
                SearchState::Exhausted => return SearchOutcome::Exhausted,
                SearchState::TimedOut => return SearchOutcome::TimedOut,
            };
        }
    }

    fn branch(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
    ) -> SearchState {
        if termination.should_stop() {
            return SearchState::TimedOut;
        }

        let Some(decision) = brancher.next_decision(&mut SelectionContext::new(
            &self.assignments,
            self.random_generator,
        )) else {
            panic!(
                "the brancher made no decision while {} of {} variables are unfixed",
                self.assignments
                    .get_domains()
                    .filter(|&domain| !self.assignments.is_fixed(domain))
                    .count(),
                self.assignments.num_domains()
            );
        };

        self.counters.num_decisions += 1;
        termination.decision_has_been_made();

        let checkpoint = self.assignments.snapshot();
        self.decisions.push((checkpoint, decision));

        match self
            .assignments
            .make_assignment(decision.variable, decision.value)
        {
            Ok(()) => SearchState::Propagating,
            Err(_) => {
                self.counters.num_conflicts += 1;
                SearchState::Backtracking
            }
        }
    }

    fn propagate(
        &mut self,
        brancher: &mut impl Brancher,
        incumbent: &mut impl Incumbent,
    ) -> SearchState {
        if self
            .engine
            .propagate(self.propagators, &mut self.assignments)
            .is_err()
        {
            self.counters.num_conflicts += 1;
            return SearchState::Backtracking;
        }

        if !self.assignments.is_fully_assigned() {
            return SearchState::Bounding;
        }

        let cost = self
            .layout
            .prices()
            .iter()
            .map(|&price| self.assignments.get_lower_bound(price) as u64)
            .sum::<u64>();

        if incumbent.best_cost().map_or(true, |best| cost < best) {
            let solution =
                extract_solution(self.instance, self.layout, self.propagators, &self.assignments);

            if incumbent.improve(solution) {
                self.counters.num_solutions += 1;
                debug!(
                    "New incumbent with cost {cost} at depth {}",
                    self.decisions.len()
                );
                brancher.on_solution();
            }
        }

        SearchState::Backtracking
    }

    fn bound(&mut self, incumbent: &impl Incumbent) -> SearchState {
        let Some(best) = incumbent.best_cost() else {
            return SearchState::Branching;
        };
        let best = best as i64;

        let lower_bound = self
            .layout
            .prices()
            .iter()
            .map(|&price| i64::from(self.assignments.get_lower_bound(price)))
            .sum::<i64>();

        if lower_bound >= best {
            self.counters.num_bound_prunings += 1;
            return SearchState::Backtracking;
        }

        // Every slot may use at most the slack left by the cheapest completion of the others.
        let trail_length = self.assignments.num_trail_entries();
        for &price in self.layout.prices() {
            let own_lower_bound = i64::from(self.assignments.get_lower_bound(price));
            let limit = best - 1 - (lower_bound - own_lower_bound);

            if limit < i64::from(self.assignments.get_upper_bound(price))
                && self
                    .assignments
                    .tighten_upper_bound(price, limit as i32)
                    .is_err()
            {
                self.counters.num_bound_prunings += 1;
                return SearchState::Backtracking;
            }
        }

        if self.assignments.num_trail_entries() != trail_length {
            SearchState::Propagating
        } else {
            SearchState::Branching
        }
    }

    fn backtrack(&mut self) -> SearchState {
        self.engine.clear();

        let mut num_popped = 0;
        while let Some((checkpoint, decision)) = self.decisions.pop() {
            num_popped += 1;
            self.assignments.restore(checkpoint);

            // The refutation lives at the level of the parent decision.
            if self
                .assignments
                .remove_value(decision.variable, decision.value)
                .is_ok()
            {
                self.counters.average_backtrack_amount.add_term(num_popped);
                return SearchState::Propagating;
            }
        }

        SearchState::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::instance::ComponentId;
    use crate::results::SlotDetails;

    fn solution_with_cost(total_cost: u64) -> PlacementSolution {
        PlacementSolution {
            placed: vec![vec![true]],
            slots: vec![SlotDetails {
                offer: None,
                resources: vec![],
                price: 0,
            }],
            total_cost,
        }
    }

    #[test]
    fn local_incumbent_only_accepts_strict_improvements() {
        let mut incumbent = LocalIncumbent::default();
        assert_eq!(None, incumbent.best_cost());

        assert!(incumbent.improve(solution_with_cost(10)));
        assert!(!incumbent.improve(solution_with_cost(10)));
        assert!(!incumbent.improve(solution_with_cost(12)));
        assert!(incumbent.improve(solution_with_cost(7)));

        assert_eq!(Some(7), incumbent.best_cost());
    }

    #[test]
    fn shared_incumbent_is_visible_through_every_reference() {
        let shared = SharedIncumbent::default();
        let mut first = &shared;
        let mut second = &shared;

        assert!(first.improve(solution_with_cost(20)));
        assert_eq!(Some(20), second.best_cost());
        assert!(!second.improve(solution_with_cost(25)));
        assert!(second.improve(solution_with_cost(15)));

        let solution = shared.into_solution().expect("an incumbent was recorded");
        assert_eq!(15, solution.total_cost());
        assert!(solution.is_placed(ComponentId::new(0), 0));
    }

    #[test]
    fn empty_store_is_exhausted_immediately() {
        let instance = ProblemInstance::default();
        let mut assignments = Assignments::default();
        let layout = VariableLayout::create_from_instance(&instance, &mut assignments);
        let propagators = PropagatorStore::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let mut search =
            BranchAndBound::new(&instance, &layout, &propagators, assignments, &mut rng);
        let mut incumbent = LocalIncumbent::default();

        struct NoDecisions;
        impl Brancher for NoDecisions {
            fn next_decision(&mut self, _: &mut SelectionContext) -> Option<Decision> {
                None
            }
        }

        let outcome = search.run(
            &mut NoDecisions,
            &mut crate::engine::termination::Indefinite,
            &mut incumbent,
        );

        assert_eq!(SearchOutcome::Exhausted, outcome);
        assert_eq!(Some(0), incumbent.best_cost());
    }
}
