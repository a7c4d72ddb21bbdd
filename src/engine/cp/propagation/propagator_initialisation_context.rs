use super::PropagationContext;
#[cfg(doc)]
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::HasAssignments;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::Assignments;
use crate::engine::cp::DomainEvents;
use crate::engine::cp::WatchListCP;
use crate::engine::variables::DomainId;

/// [`PropagatorInitialisationContext`] is used when [`Propagator`]s are initialised after creation.
///
/// Propagators use it to register to domain changes of variables and to retrieve the root domains
/// of variables.
#[derive(Debug)]
pub struct PropagatorInitialisationContext<'a> {
    watch_list: &'a mut WatchListCP,
    propagator_id: PropagatorId,

    context: PropagationContext<'a>,
}

impl PropagatorInitialisationContext<'_> {
    pub(crate) fn new<'a>(
        watch_list: &'a mut WatchListCP,
        propagator_id: PropagatorId,
        assignments: &'a Assignments,
    ) -> PropagatorInitialisationContext<'a> {
        PropagatorInitialisationContext {
            watch_list,
            propagator_id,
            context: PropagationContext::new(assignments),
        }
    }

    /// Subscribes the propagator to the given [`DomainEvents`] of `var`. The propagator is
    /// enqueued whenever one of these events happens.
    pub fn register(&mut self, var: DomainId, domain_events: DomainEvents) -> DomainId {
        self.watch_list
            .watch(var, self.propagator_id, domain_events.get_int_events());
        var
    }

    pub fn as_readonly(&self) -> PropagationContext<'_> {
        self.context
    }
}

impl HasAssignments for PropagatorInitialisationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.context.assignments()
    }
}
