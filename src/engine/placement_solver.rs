use std::num::NonZeroUsize;
use std::time::Instant;

use log::info;
use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::search::BranchAndBound;
use super::search::Counters;
use super::search::LocalIncumbent;
use super::search::SearchOutcome;
use crate::branching::variable_selection::TieBreaking;
use crate::branching::Brancher;
use crate::branching::PlacementBrancher;
use crate::engine::cp::Assignments;
use crate::engine::cp::PropagatorStore;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::VariableLayout;
use crate::instance::InstanceError;
use crate::instance::ProblemInstance;
use crate::model::add_constraints;
use crate::model::Constraint;
use crate::print_placement_assert_warning_message;
use crate::results::OptimisationResult;
use crate::results::PlacementSolution;

/// Options which influence the model and the search of a [`PlacementSolver`].
#[derive(Clone, Copy, Debug)]
pub struct SolverOptions {
    /// Post the constraint which forces the used slots to form a prefix of the pool.
    pub symmetry_breaking: bool,
    /// Break ties between equally constrained slots randomly instead of by slot index.
    pub random_tie_breaking: bool,
    /// The seed of the random generator used for tie-breaking.
    pub random_seed: u64,
    /// The number of worker threads of a
    /// [`ParallelPlacementSolver`](crate::engine::ParallelPlacementSolver).
    pub num_workers: usize,
    /// How many subproblems the parallel search aims to create per worker.
    pub subproblems_per_worker: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            symmetry_breaking: true,
            random_tie_breaking: false,
            random_seed: 42,
            num_workers: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            subproblems_per_worker: 8,
        }
    }
}

impl SolverOptions {
    pub(crate) fn tie_breaking(&self) -> TieBreaking {
        if self.random_tie_breaking {
            TieBreaking::Random
        } else {
            TieBreaking::InputOrder
        }
    }
}

/// Finds a cost-minimal placement for a [`ProblemInstance`].
///
/// Creating the solver validates the instance, creates the variables of the model and posts every
/// constraint, propagating each one at the root. [`PlacementSolver::optimise`] then runs a
/// sequential branch-and-bound search.
///
/// # Example
/// ```
/// # use vm_placement::engine::PlacementSolver;
/// # use vm_placement::engine::SolverOptions;
/// # use vm_placement::engine::termination::Indefinite;
/// # use vm_placement::instance::topology::general_purpose_offers;
/// # use vm_placement::instance::topology::secure_web_container;
/// # use vm_placement::results::OptimisationResult;
/// let instance = secure_web_container(5, general_purpose_offers());
/// let mut solver = PlacementSolver::new(instance, SolverOptions::default())
///     .expect("the instance is valid");
///
/// let mut brancher = solver.default_brancher();
/// let result = solver.optimise(&mut brancher, &mut Indefinite);
///
/// let OptimisationResult::Optimal(solution) = result else {
///     panic!("the search space is small enough to be exhausted");
/// };
/// assert_eq!(1680, solution.total_cost());
/// ```
#[derive(Debug)]
pub struct PlacementSolver {
    pub(crate) instance: ProblemInstance,
    pub(crate) layout: VariableLayout,
    /// The store after every constraint was posted.
    pub(crate) root: Assignments,
    pub(crate) propagators: PropagatorStore,
    pub(crate) options: SolverOptions,
    /// Set when posting a constraint already failed at the root.
    pub(crate) infeasible_at_root: bool,
    pub(crate) counters: Counters,
}

impl PlacementSolver {
    pub fn new(
        instance: ProblemInstance,
        options: SolverOptions,
    ) -> Result<PlacementSolver, InstanceError> {
        print_placement_assert_warning_message!();

        instance.validate()?;

        let mut root = Assignments::default();
        let layout = VariableLayout::create_from_instance(&instance, &mut root);

        let constraints = Constraint::from_instance(&instance, options.symmetry_breaking);
        let mut propagators = PropagatorStore::default();
        let infeasible_at_root =
            add_constraints(&constraints, &instance, &layout, &root, &mut propagators).is_err();

        if infeasible_at_root {
            info!("The model is infeasible at the root");
        }

        Ok(PlacementSolver {
            instance,
            layout,
            root,
            propagators,
            options,
            infeasible_at_root,
            counters: Counters::default(),
        })
    }

    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    pub fn layout(&self) -> &VariableLayout {
        &self.layout
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// The number of propagators posted for the model.
    pub fn num_propagators(&self) -> usize {
        self.propagators.num_propagators()
    }

    /// The search strategy described by [`PlacementBrancher`], configured by the solver options.
    pub fn default_brancher(&self) -> PlacementBrancher {
        PlacementBrancher::new(&self.instance, &self.layout, self.options.tie_breaking())
    }

    /// Search for a placement of minimal cost.
    ///
    /// The result is [`OptimisationResult::Optimal`] only when the whole search space was
    /// explored. When `termination` trips first, the best placement found so far is returned as
    /// [`OptimisationResult::Satisfiable`], or [`OptimisationResult::Unknown`] if there is none.
    pub fn optimise(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
    ) -> OptimisationResult {
        if self.infeasible_at_root {
            return OptimisationResult::Unsatisfiable;
        }

        let started_at = Instant::now();
        let mut random_generator = SmallRng::seed_from_u64(self.options.random_seed);
        let mut incumbent = LocalIncumbent::default();

        let mut search = BranchAndBound::new(
            &self.instance,
            &self.layout,
            &self.propagators,
            self.root.clone(),
            &mut random_generator,
        );
        let outcome = search.run(brancher, termination, &mut incumbent);

        self.counters.combine(&search.counters());
        self.counters.time_spent_in_solver += started_at.elapsed().as_millis() as u64;

        conclude(outcome == SearchOutcome::TimedOut, incumbent.into_solution())
    }

    pub fn log_statistics(&self) {
        self.counters.log_statistics();
    }

    pub fn num_decisions(&self) -> u64 {
        self.counters.num_decisions
    }

    pub fn num_solutions(&self) -> u64 {
        self.counters.num_solutions
    }
}

/// Turn the outcome of a search into a result. Optimality is only claimed for a search which was
/// not interrupted.
pub(crate) fn conclude(
    interrupted: bool,
    incumbent: Option<PlacementSolution>,
) -> OptimisationResult {
    let result = match (interrupted, incumbent) {
        (false, Some(solution)) => OptimisationResult::Optimal(solution),
        (false, None) => OptimisationResult::Unsatisfiable,
        (true, Some(solution)) => OptimisationResult::Satisfiable(solution),
        (true, None) => OptimisationResult::Unknown,
    };

    match &result {
        OptimisationResult::Optimal(solution) => {
            info!("Found an optimal placement with cost {}", solution.total_cost())
        }
        OptimisationResult::Satisfiable(solution) => info!(
            "Stopped early, the best placement found has cost {}",
            solution.total_cost()
        ),
        OptimisationResult::Unsatisfiable => info!("No placement exists"),
        OptimisationResult::Unknown => warn!("Stopped before any placement was found"),
    }

    result
}
