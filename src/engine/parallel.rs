//! Branch-and-bound over a pool of worker threads.
//!
//! The top of the search tree is expanded breadth-first into independent subproblems, each
//! described by the decisions and refutations leading to it. Workers take subproblems from a
//! shared queue and search them with a private copy of the root store, pruning against an
//! incumbent shared by the whole pool. The termination condition of the caller is shared as well:
//! every worker polls it before branching and reports each decision to it.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Instant;

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use log::debug;
use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::placement_solver::conclude;
use super::search::BranchAndBound;
use super::search::Counters;
use super::search::SearchOutcome;
use super::search::SharedIncumbent;
use super::PlacementSolver;
use super::SolverOptions;
use crate::branching::Brancher;
use crate::branching::PlacementBrancher;
use crate::branching::SelectionContext;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::PropagationEngine;
use crate::engine::termination::StopFlag;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::DomainId;
use crate::instance::InstanceError;
use crate::instance::ProblemInstance;
use crate::results::OptimisationResult;

/// A single step on the path from the root to a subproblem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Step {
    variable: DomainId,
    value: i32,
    /// `variable == value` when set, `variable != value` otherwise.
    equal: bool,
}

type Subproblem = Vec<Step>;

#[derive(Debug, Default)]
struct WorkerReport {
    counters: Counters,
    num_subproblems: usize,
    interrupted: bool,
}

/// Finds a cost-minimal placement using [`SolverOptions::num_workers`] threads.
///
/// The model is built exactly as for the [`PlacementSolver`]; only the search differs. The result
/// is reported [`OptimisationResult::Optimal`] only if every subproblem was searched to
/// completion.
#[derive(Debug)]
pub struct ParallelPlacementSolver {
    solver: PlacementSolver,
}

impl ParallelPlacementSolver {
    pub fn new(
        instance: ProblemInstance,
        options: SolverOptions,
    ) -> Result<ParallelPlacementSolver, InstanceError> {
        if options.num_workers == 0 {
            warn!("A parallel search needs at least one worker, using one");
        }

        Ok(ParallelPlacementSolver {
            solver: PlacementSolver::new(instance, options)?,
        })
    }

    pub fn default_brancher(&self) -> PlacementBrancher {
        self.solver.default_brancher()
    }

    pub fn log_statistics(&self) {
        self.solver.log_statistics();
    }

    /// The number of decisions made by all workers together.
    pub fn num_decisions(&self) -> u64 {
        self.solver.num_decisions()
    }

    /// Search for a placement of minimal cost. Every worker uses its own clone of `brancher`.
    ///
    /// `termination` is shared by the workers: each of them polls it before a decision and
    /// reports every decision it makes, so a [`DecisionBudget`] bounds the decisions of the whole
    /// pool. Once it trips, every worker stops.
    ///
    /// [`DecisionBudget`]: crate::engine::termination::DecisionBudget
    pub fn optimise<B: Brancher + Clone + Send, T: TerminationCondition + Send>(
        &mut self,
        brancher: &B,
        termination: &mut T,
    ) -> OptimisationResult {
        if self.solver.infeasible_at_root {
            return OptimisationResult::Unsatisfiable;
        }

        let started_at = Instant::now();
        let num_workers = self.solver.options.num_workers.max(1);
        let target = num_workers * self.solver.options.subproblems_per_worker.max(1);

        let subproblems = self.split(&mut brancher.clone(), target);
        debug!(
            "Split the search into {} subproblems for {num_workers} workers",
            subproblems.len()
        );

        let incumbent = SharedIncumbent::default();
        let stop = StopFlag::default();
        let (work_sender, work_receiver) = crossbeam_channel::unbounded::<Subproblem>();
        let (report_sender, report_receiver) = crossbeam_channel::unbounded::<WorkerReport>();

        for subproblem in subproblems {
            // The receiver is alive, so sending cannot fail.
            let _ = work_sender.send(subproblem);
        }
        drop(work_sender);

        if termination.should_stop() {
            stop.raise();
        }

        let solver = &self.solver;
        let shared_termination = Mutex::new(termination);
        let mut reports = Vec::with_capacity(num_workers);

        std::thread::scope(|scope| {
            for worker_index in 0..num_workers {
                let worker = Worker {
                    solver,
                    incumbent: &incumbent,
                    termination: SharedTermination {
                        inner: &shared_termination,
                        stop: stop.clone(),
                    },
                    work: work_receiver.clone(),
                    reports: report_sender.clone(),
                    seed: solver.options.random_seed + worker_index as u64,
                };
                let brancher = brancher.clone();

                let _ = scope.spawn(move || worker.run(brancher));
            }
            drop(report_sender);

            reports.extend(report_receiver.iter());
        });

        let mut interrupted = !work_receiver.is_empty();
        for report in &reports {
            interrupted |= report.interrupted;
            self.solver.counters.combine(&report.counters);
            debug!(
                "A worker searched {} subproblems{}",
                report.num_subproblems,
                if report.interrupted {
                    " before being interrupted"
                } else {
                    ""
                }
            );
        }
        self.solver.counters.time_spent_in_solver += started_at.elapsed().as_millis() as u64;

        conclude(interrupted, incumbent.into_solution())
    }

    /// Expand the root breadth-first until there are at least `target` open subproblems. Each
    /// expansion creates a child with the decision of `brancher` and one with its refutation;
    /// children which fail at propagation are dropped.
    fn split(&self, brancher: &mut impl Brancher, target: usize) -> Vec<Subproblem> {
        let mut random_generator = SmallRng::seed_from_u64(self.solver.options.random_seed);
        let mut open = VecDeque::from([Subproblem::new()]);
        let mut settled = vec![];

        while open.len() + settled.len() < target {
            let Some(subproblem) = open.pop_front() else {
                break;
            };

            let Some(assignments) = self.propagate_subproblem(&subproblem) else {
                continue;
            };

            let decision = brancher.next_decision(&mut SelectionContext::new(
                &assignments,
                &mut random_generator,
            ));

            match decision {
                Some(decision) => {
                    for equal in [true, false] {
                        let mut child = subproblem.clone();
                        child.push(Step {
                            variable: decision.variable,
                            value: decision.value,
                            equal,
                        });
                        open.push_back(child);
                    }
                }
                // Fully assigned, leave it to a worker to record it.
                None => settled.push(subproblem),
            }
        }

        open.into_iter().chain(settled).collect()
    }

    /// The root store with the steps of `subproblem` applied and propagated, or [`None`] if
    /// that fails.
    fn propagate_subproblem(&self, subproblem: &[Step]) -> Option<Assignments> {
        let mut assignments = self.solver.root.clone();
        apply_steps(&mut assignments, subproblem).ok()?;

        let mut engine = PropagationEngine::default();
        engine.enqueue_all(&self.solver.propagators);
        engine
            .propagate(&self.solver.propagators, &mut assignments)
            .ok()?;

        Some(assignments)
    }
}

fn apply_steps(assignments: &mut Assignments, steps: &[Step]) -> Result<(), EmptyDomain> {
    for step in steps {
        if step.equal {
            assignments.make_assignment(step.variable, step.value)?;
        } else {
            assignments.remove_value(step.variable, step.value)?;
        }
    }

    Ok(())
}

/// The view of a worker on the termination condition of the caller. The first worker which sees
/// the condition trip raises `stop`, after which no worker takes the lock again.
struct SharedTermination<'a, 'b, T> {
    inner: &'a Mutex<&'b mut T>,
    stop: StopFlag,
}

impl<T: TerminationCondition> TerminationCondition for SharedTermination<'_, '_, T> {
    fn should_stop(&mut self) -> bool {
        if self.stop.is_raised() {
            return true;
        }

        // A poisoned lock means another worker panicked; stop as well.
        let should_stop = self
            .inner
            .lock()
            .map_or(true, |mut termination| termination.should_stop());

        if should_stop {
            debug!("Termination condition tripped, stopping the workers");
            self.stop.raise();
        }

        should_stop
    }

    fn decision_has_been_made(&mut self) {
        if let Ok(mut termination) = self.inner.lock() {
            termination.decision_has_been_made();
        }
    }
}

struct Worker<'a, 'b, T> {
    solver: &'a PlacementSolver,
    incumbent: &'a SharedIncumbent,
    termination: SharedTermination<'a, 'b, T>,
    work: Receiver<Subproblem>,
    reports: Sender<WorkerReport>,
    seed: u64,
}

impl<T: TerminationCondition> Worker<'_, '_, T> {
    fn run(mut self, mut brancher: impl Brancher) {
        let mut random_generator = SmallRng::seed_from_u64(self.seed);
        let mut report = WorkerReport::default();

        while !self.termination.stop.is_raised() {
            let Ok(subproblem) = self.work.recv() else {
                break;
            };
            report.num_subproblems += 1;

            let mut assignments = self.solver.root.clone();
            if apply_steps(&mut assignments, &subproblem).is_err() {
                continue;
            }

            let mut search = BranchAndBound::new(
                &self.solver.instance,
                &self.solver.layout,
                &self.solver.propagators,
                assignments,
                &mut random_generator,
            );
            let mut incumbent = self.incumbent;
            let outcome = search.run(&mut brancher, &mut self.termination, &mut incumbent);
            report.counters.combine(&search.counters());

            if outcome == SearchOutcome::TimedOut {
                report.interrupted = true;
                break;
            }
        }

        // The coordinator only stops listening once every worker has reported.
        let _ = self.reports.send(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::termination::Indefinite;
    use crate::instance::topology::general_purpose_offers;
    use crate::instance::topology::secure_web_container;

    fn solver(num_workers: usize) -> ParallelPlacementSolver {
        let options = SolverOptions {
            num_workers,
            subproblems_per_worker: 4,
            ..SolverOptions::default()
        };

        ParallelPlacementSolver::new(secure_web_container(5, general_purpose_offers()), options)
            .expect("valid instance")
    }

    #[test]
    fn split_creates_distinct_subproblems() {
        let solver = solver(2);
        let mut brancher = solver.default_brancher();

        let subproblems = solver.split(&mut brancher, 8);

        assert!(subproblems.len() >= 8);
        assert!(subproblems.iter().all(|subproblem| !subproblem.is_empty()));
        for (idx, subproblem) in subproblems.iter().enumerate() {
            assert!(!subproblems[idx + 1..].contains(subproblem));
        }
    }

    #[test]
    fn single_worker_proves_optimality() {
        let mut solver = solver(1);
        let brancher = solver.default_brancher();

        let result = solver.optimise(&brancher, &mut Indefinite);

        let OptimisationResult::Optimal(solution) = result else {
            panic!("expected an optimal result, got {result:?}");
        };
        assert_eq!(1680, solution.total_cost());
    }

    #[test]
    fn raised_stop_flag_prevents_an_optimality_claim() {
        let mut solver = solver(2);
        let brancher = solver.default_brancher();
        let mut stop = StopFlag::default();
        stop.raise();

        let result = solver.optimise(&brancher, &mut stop);

        assert!(!matches!(result, OptimisationResult::Optimal(_)));
    }
}
