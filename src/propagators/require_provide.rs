use super::boolean_count::count_bounds;
use super::boolean_count::fix_unfixed;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::cp::DomainEvents;
use crate::engine::variables::DomainId;

/// Propagator for `consumer_ratio * \sum consumers <= provider_ratio * \sum providers`, where the
/// sums range over the assignment bits of the consumer and provider components.
///
/// Individual bits are only fixed when the counts leave no slack: either every remaining provider
/// is needed, or no further consumer fits.
#[derive(Clone, Debug)]
pub(crate) struct RequireProvidePropagator {
    consumers: Box<[DomainId]>,
    consumer_ratio: i64,
    providers: Box<[DomainId]>,
    provider_ratio: i64,
}

impl RequireProvidePropagator {
    pub(crate) fn new(
        consumers: Box<[DomainId]>,
        consumer_ratio: u32,
        providers: Box<[DomainId]>,
        provider_ratio: u32,
    ) -> Self {
        RequireProvidePropagator {
            consumers,
            consumer_ratio: i64::from(consumer_ratio),
            providers,
            provider_ratio: i64::from(provider_ratio),
        }
    }
}

impl Propagator for RequireProvidePropagator {
    fn name(&self) -> &str {
        "RequireProvide"
    }

    fn priority(&self) -> u32 {
        1
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        for &bit in self.consumers.iter().chain(self.providers.iter()) {
            let _ = context.register(bit, DomainEvents::ASSIGN);
        }

        if self.check(context.as_readonly()) == Satisfaction::Violated {
            return Err(Inconsistency::Violated);
        }
        Ok(())
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let (min_consumers, _) = count_bounds(&context, &self.consumers);
        let (_, max_providers) = count_bounds(&context, &self.providers);

        let demand = self.consumer_ratio * min_consumers;
        let supply = self.provider_ratio * max_providers;
        if demand > supply {
            return Err(Inconsistency::Violated);
        }

        // The number of consumers the largest possible supply can serve.
        let max_serviceable = supply / self.consumer_ratio;
        if max_serviceable == min_consumers {
            fix_unfixed(&mut context, &self.consumers, 0)?;
        }

        // The number of providers needed for the consumers that are certainly deployed.
        let min_needed = (demand + self.provider_ratio - 1) / self.provider_ratio;
        if min_needed == max_providers {
            fix_unfixed(&mut context, &self.providers, 1)?;
        }

        Ok(())
    }

    fn check(&self, context: PropagationContext) -> Satisfaction {
        let (min_consumers, max_consumers) = count_bounds(&context, &self.consumers);
        let (min_providers, max_providers) = count_bounds(&context, &self.providers);

        if self.consumer_ratio * min_consumers > self.provider_ratio * max_providers {
            Satisfaction::Violated
        } else if self.consumer_ratio * max_consumers <= self.provider_ratio * min_providers {
            Satisfaction::Satisfied
        } else {
            Satisfaction::Undetermined
        }
    }
}
