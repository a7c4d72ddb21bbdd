use super::boolean_count::count_bounds;
use super::boolean_count::fix_unfixed;
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

/// Propagator for `indicator > 0 <-> bits[0] + ... + bits[n - 1] >= 1`, where `indicator` is a
/// non-negative variable and `bits` are 0/1 variables.
///
/// It is posted once with the type of a slot as indicator and once with its occupancy flag: a slot
/// hosts a component exactly when it has been given an offer and is marked as in use.
#[derive(Clone, Debug)]
pub(crate) struct SlotUsagePropagator {
    name: &'static str,
    bits: Box<[DomainId]>,
    indicator: DomainId,
}

impl SlotUsagePropagator {
    pub(crate) fn type_consistency(bits: Box<[DomainId]>, slot_type: DomainId) -> Self {
        SlotUsagePropagator {
            name: "TypeConsistency",
            bits,
            indicator: slot_type,
        }
    }

    pub(crate) fn occupancy(bits: Box<[DomainId]>, occupancy: DomainId) -> Self {
        SlotUsagePropagator {
            name: "OccupancyConsistency",
            bits,
            indicator: occupancy,
        }
    }
}

impl Propagator for SlotUsagePropagator {
    fn name(&self) -> &str {
        self.name
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        for &bit in self.bits.iter() {
            let _ = context.register(bit, DomainEvents::ASSIGN);
        }
        let _ = context.register(self.indicator, DomainEvents::BOUNDS);

        if self.check(context.as_readonly()) == Satisfaction::Violated {
            return Err(Inconsistency::Violated);
        }
        Ok(())
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let (ones, possible) = count_bounds(&context, &self.bits);

        if ones >= 1 {
            context.set_lower_bound(self.indicator, 1)?;
        }
        if possible == 0 {
            context.set_upper_bound(self.indicator, 0)?;
        }

        if context.upper_bound(self.indicator) == 0 {
            fix_unfixed(&mut context, &self.bits, 0)?;
        } else if context.lower_bound(self.indicator) >= 1 && ones == 0 && possible == 1 {
            // The last candidate has to be placed here.
            fix_unfixed(&mut context, &self.bits, 1)?;
        }

        Ok(())
    }

    fn check(&self, context: PropagationContext) -> Satisfaction {
        let (ones, possible) = count_bounds(&context, &self.bits);
        let lower_bound = context.lower_bound(self.indicator);
        let upper_bound = context.upper_bound(self.indicator);

        if (ones >= 1 && upper_bound == 0) || (possible == 0 && lower_bound >= 1) {
            Satisfaction::Violated
        } else if (ones >= 1 && lower_bound >= 1) || (possible == 0 && upper_bound == 0) {
            Satisfaction::Satisfied
        } else {
            Satisfaction::Undetermined
        }
    }
}
