use enumset::EnumSet;

use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::IntDomainEvent;
use crate::engine::variables::DomainId;

/// For every variable, the propagators to wake up and the events they wake up on.
#[derive(Clone, Debug, Default)]
pub(crate) struct WatchListCP {
    watchers: Vec<Vec<(PropagatorId, EnumSet<IntDomainEvent>)>>,
}

impl WatchListCP {
    pub(crate) fn watch(
        &mut self,
        domain: DomainId,
        propagator: PropagatorId,
        events: EnumSet<IntDomainEvent>,
    ) {
        if self.watchers.len() <= domain.index() {
            self.watchers.resize_with(domain.index() + 1, Vec::new);
        }

        let watchers = &mut self.watchers[domain.index()];
        if let Some((_, existing)) = watchers.iter_mut().find(|(id, _)| *id == propagator) {
            *existing |= events;
        } else {
            watchers.push((propagator, events));
        }
    }

    pub(crate) fn is_watching_anything(&self) -> bool {
        self.watchers.iter().any(|watchers| !watchers.is_empty())
    }

    pub(crate) fn get_affected_propagators(
        &self,
        event: IntDomainEvent,
        domain: DomainId,
    ) -> impl Iterator<Item = PropagatorId> + '_ {
        self.watchers
            .get(domain.index())
            .into_iter()
            .flatten()
            .filter(move |(_, events)| events.contains(event))
            .map(|(propagator, _)| *propagator)
    }
}
