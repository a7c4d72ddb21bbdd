use log::warn;

use crate::basic_types::ConstraintOperationError;
use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::Assignments;
use crate::engine::cp::PropagatorQueue;
use crate::engine::cp::WatchListCP;
use crate::placement_assert_advanced;

/// The number of priority levels a [`Propagator`] can choose from.
pub(crate) const NUM_PRIORITY_LEVELS: u32 = 2;

/// The propagators of a model together with the variables they watch. Once every propagator is
/// added the store is only read, so it can be shared between search workers.
#[derive(Default)]
pub struct PropagatorStore {
    propagators: Vec<Box<dyn Propagator>>,
    watch_list: WatchListCP,
}

impl std::fmt::Debug for PropagatorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropagatorStore")
            .field(
                "propagators",
                &self
                    .propagators
                    .iter()
                    .map(|propagator| propagator.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl PropagatorStore {
    /// Initialise `propagator` against the root domains in `assignments` and add it to the store.
    pub fn add(
        &mut self,
        mut propagator: Box<dyn Propagator>,
        assignments: &Assignments,
    ) -> Result<PropagatorId, ConstraintOperationError> {
        let propagator_id = PropagatorId(self.propagators.len() as u32);

        let mut context =
            PropagatorInitialisationContext::new(&mut self.watch_list, propagator_id, assignments);
        propagator
            .initialise_at_root(&mut context)
            .map_err(|_| ConstraintOperationError::InfeasiblePropagator)?;

        self.propagators.push(propagator);
        Ok(propagator_id)
    }

    pub fn num_propagators(&self) -> usize {
        self.propagators.len()
    }

    pub fn get(&self, propagator_id: PropagatorId) -> &dyn Propagator {
        self.propagators[propagator_id].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropagatorId, &dyn Propagator)> + '_ {
        self.propagators
            .iter()
            .enumerate()
            .map(|(idx, propagator)| (PropagatorId(idx as u32), propagator.as_ref()))
    }

    pub(crate) fn watch_list(&self) -> &WatchListCP {
        &self.watch_list
    }
}

/// Runs the propagators of a [`PropagatorStore`] until a fixed point or a contradiction is reached.
///
/// Every search worker owns its own engine; the propagators themselves are shared.
#[derive(Clone, Debug)]
pub struct PropagationEngine {
    queue: PropagatorQueue,
    num_propagator_calls: u64,
}

impl Default for PropagationEngine {
    fn default() -> Self {
        PropagationEngine {
            queue: PropagatorQueue::new(NUM_PRIORITY_LEVELS),
            num_propagator_calls: 0,
        }
    }
}

impl PropagationEngine {
    /// Schedule every propagator in the store. Used for the first propagation at the root.
    pub fn enqueue_all(&mut self, store: &PropagatorStore) {
        if store.num_propagators() > 0 && !store.watch_list().is_watching_anything() {
            warn!("No propagator registered any variable, propagation only happens at the root");
        }

        for (propagator_id, propagator) in store.iter() {
            self.queue
                .enqueue_propagator(propagator_id, propagator.priority());
        }
    }

    /// Propagate until no propagator can narrow a domain any further.
    ///
    /// Domain changes made since the last call (e.g. a search decision) wake up the propagators
    /// watching them first. On a contradiction the queue is emptied.
    pub fn propagate(
        &mut self,
        store: &PropagatorStore,
        assignments: &mut Assignments,
    ) -> PropagationStatusCP {
        self.enqueue_watchers(store, assignments);

        while let Some(propagator_id) = self.queue.pop() {
            self.num_propagator_calls += 1;

            let propagator = store.get(propagator_id);
            let status = propagator.propagate(PropagationContextMut::new(assignments));

            if let Err(inconsistency) = status {
                self.queue.clear();
                assignments.clear_domain_events();
                return Err(inconsistency);
            }

            self.enqueue_watchers(store, assignments);
        }

        placement_assert_advanced!(self.queue.is_empty());

        Ok(())
    }

    /// Drop any scheduled work, used when the search backtracks.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn num_propagator_calls(&self) -> u64 {
        self.num_propagator_calls
    }

    fn enqueue_watchers(&mut self, store: &PropagatorStore, assignments: &mut Assignments) {
        for (event, domain) in assignments.drain_domain_events() {
            for propagator_id in store.watch_list().get_affected_propagators(event, domain) {
                self.queue
                    .enqueue_propagator(propagator_id, store.get(propagator_id).priority());
            }
        }
    }
}
