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

/// Propagator for `dependent = \sum primaries` on a single slot, with all variables 0/1. The
/// dependent component is present on a slot exactly when one of its primaries is, and at most one
/// primary can be present.
#[derive(Clone, Debug)]
pub(crate) struct ColocationPropagator {
    dependent: DomainId,
    primaries: Box<[DomainId]>,
}

impl ColocationPropagator {
    pub(crate) fn new(dependent: DomainId, primaries: Box<[DomainId]>) -> Self {
        ColocationPropagator {
            dependent,
            primaries,
        }
    }

    fn sum_bounds(&self, context: &impl ReadDomains) -> (i32, i32) {
        self.primaries
            .iter()
            .fold((0, 0), |(lower_bound, upper_bound), &primary| {
                (
                    lower_bound + context.lower_bound(primary),
                    upper_bound + context.upper_bound(primary),
                )
            })
    }
}

impl Propagator for ColocationPropagator {
    fn name(&self) -> &str {
        "Colocation"
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        let _ = context.register(self.dependent, DomainEvents::ASSIGN);
        for &primary in self.primaries.iter() {
            let _ = context.register(primary, DomainEvents::ASSIGN);
        }

        if self.check(context.as_readonly()) == Satisfaction::Violated {
            return Err(Inconsistency::Violated);
        }
        Ok(())
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let (sum_lower_bound, sum_upper_bound) = self.sum_bounds(&context);

        context.set_lower_bound(self.dependent, sum_lower_bound)?;
        context.set_upper_bound(self.dependent, sum_upper_bound)?;

        let dependent_lower_bound = context.lower_bound(self.dependent);
        let dependent_upper_bound = context.upper_bound(self.dependent);

        for &primary in self.primaries.iter() {
            if context.is_fixed(primary) {
                continue;
            }

            let others_lower_bound = sum_lower_bound - context.lower_bound(primary);
            let others_upper_bound = sum_upper_bound - context.upper_bound(primary);

            context.set_lower_bound(primary, dependent_lower_bound - others_upper_bound)?;
            context.set_upper_bound(primary, dependent_upper_bound - others_lower_bound)?;
        }

        Ok(())
    }

    fn check(&self, context: PropagationContext) -> Satisfaction {
        let (sum_lower_bound, sum_upper_bound) = self.sum_bounds(&context);
        let dependent_lower_bound = context.lower_bound(self.dependent);
        let dependent_upper_bound = context.upper_bound(self.dependent);

        if dependent_upper_bound < sum_lower_bound || dependent_lower_bound > sum_upper_bound {
            Satisfaction::Violated
        } else if dependent_lower_bound == dependent_upper_bound
            && sum_lower_bound == sum_upper_bound
        {
            Satisfaction::Satisfied
        } else {
            Satisfaction::Undetermined
        }
    }
}
