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

/// Propagator for `bit + other <= 1` for every `other` in `others`, on a single slot.
///
/// The others may share the slot among themselves; only the pairs with `bit` are excluded.
#[derive(Clone, Debug)]
pub(crate) struct ConflictPropagator {
    bit: DomainId,
    others: Box<[DomainId]>,
}

impl ConflictPropagator {
    pub(crate) fn new(bit: DomainId, others: Box<[DomainId]>) -> Self {
        ConflictPropagator { bit, others }
    }
}

impl Propagator for ConflictPropagator {
    fn name(&self) -> &str {
        "Conflict"
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        let _ = context.register(self.bit, DomainEvents::ASSIGN);
        for &other in self.others.iter() {
            let _ = context.register(other, DomainEvents::ASSIGN);
        }

        if self.check(context.as_readonly()) == Satisfaction::Violated {
            return Err(Inconsistency::Violated);
        }
        Ok(())
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if context.is_fixed_to(self.bit, 1) {
            for &other in self.others.iter() {
                context.set_upper_bound(other, 0)?;
            }
        } else if self
            .others
            .iter()
            .any(|&other| context.is_fixed_to(other, 1))
        {
            context.set_upper_bound(self.bit, 0)?;
        }

        Ok(())
    }

    fn check(&self, context: PropagationContext) -> Satisfaction {
        if context.upper_bound(self.bit) == 0
            || self
                .others
                .iter()
                .all(|&other| context.upper_bound(other) == 0)
        {
            Satisfaction::Satisfied
        } else if context.is_fixed_to(self.bit, 1)
            && self
                .others
                .iter()
                .any(|&other| context.is_fixed_to(other, 1))
        {
            Satisfaction::Violated
        } else {
            Satisfaction::Undetermined
        }
    }
}
