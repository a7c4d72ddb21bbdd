use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::cp::DomainEvents;
use crate::engine::variables::DomainId;

/// Propagator for `occupancy[k] >= occupancy[k + 1]` for every consecutive pair of slots, so that
/// the used slots always form a prefix of the pool.
#[derive(Clone, Debug)]
pub(crate) struct SlotOrderingPropagator {
    occupancy: Box<[DomainId]>,
}

impl SlotOrderingPropagator {
    pub(crate) fn new(occupancy: Box<[DomainId]>) -> Self {
        SlotOrderingPropagator { occupancy }
    }
}

impl Propagator for SlotOrderingPropagator {
    fn name(&self) -> &str {
        "SlotOrdering"
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        for &occupancy in self.occupancy.iter() {
            let _ = context.register(occupancy, DomainEvents::ASSIGN);
        }

        if self.check(context.as_readonly()) == Satisfaction::Violated {
            return Err(Inconsistency::Violated);
        }
        Ok(())
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        // An unused slot forces every later slot to be unused.
        for pair in self.occupancy.windows(2) {
            let upper_bound = context.upper_bound(pair[0]);
            context.set_upper_bound(pair[1], upper_bound)?;
        }

        // A used slot forces every earlier slot to be used.
        for pair in self.occupancy.windows(2).rev() {
            let lower_bound = context.lower_bound(pair[1]);
            context.set_lower_bound(pair[0], lower_bound)?;
        }

        Ok(())
    }

    fn check(&self, context: PropagationContext) -> Satisfaction {
        let mut satisfied = true;
        for pair in self.occupancy.windows(2) {
            if context.upper_bound(pair[0]) < context.lower_bound(pair[1]) {
                return Satisfaction::Violated;
            }
            satisfied &= context.lower_bound(pair[0]) >= context.upper_bound(pair[1]);
        }

        if satisfied {
            Satisfaction::Satisfied
        } else {
            Satisfaction::Undetermined
        }
    }
}
