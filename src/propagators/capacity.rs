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

/// Propagator for `\sum requirements[i] * bits[i] <= capacities[slot_type]` in one dimension of
/// one slot. `capacities` is indexed by the value of the type variable, so `capacities[0]` is the
/// capacity of an unused slot and is 0.
#[derive(Clone, Debug)]
pub(crate) struct CapacityPropagator {
    slot_type: DomainId,
    bits: Box<[DomainId]>,
    requirements: Box<[u64]>,
    capacities: Box<[u64]>,
}

impl CapacityPropagator {
    pub(crate) fn new(
        slot_type: DomainId,
        bits: Box<[DomainId]>,
        requirements: Box<[u64]>,
        capacities: Box<[u64]>,
    ) -> Self {
        CapacityPropagator {
            slot_type,
            bits,
            requirements,
            capacities,
        }
    }

    fn capacity_of(&self, type_value: i32) -> u64 {
        usize::try_from(type_value)
            .ok()
            .and_then(|idx| self.capacities.get(idx))
            .copied()
            .unwrap_or(0)
    }

    /// The load of the components which are certainly placed and the load if every component which
    /// can still be placed is placed.
    fn load_bounds(&self, context: &impl ReadDomains) -> (u64, u64) {
        self.bits
            .iter()
            .zip(self.requirements.iter())
            .fold((0, 0), |(min_load, max_load), (&bit, &requirement)| {
                let min_load = if context.lower_bound(bit) >= 1 {
                    min_load + requirement
                } else {
                    min_load
                };
                let max_load = if context.upper_bound(bit) >= 1 {
                    max_load + requirement
                } else {
                    max_load
                };
                (min_load, max_load)
            })
    }
}

impl Propagator for CapacityPropagator {
    fn name(&self) -> &str {
        "Capacity"
    }

    fn priority(&self) -> u32 {
        1
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        for &bit in self.bits.iter() {
            let _ = context.register(bit, DomainEvents::ASSIGN);
        }
        let _ = context.register(self.slot_type, DomainEvents::ANY_INT);

        if self.check(context.as_readonly()) == Satisfaction::Violated {
            return Err(Inconsistency::Violated);
        }
        Ok(())
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let (min_load, _) = self.load_bounds(&context);

        let too_small = context
            .iterate_domain(self.slot_type)
            .filter(|&type_value| self.capacity_of(type_value) < min_load)
            .collect::<Vec<_>>();
        for type_value in too_small {
            context.remove(self.slot_type, type_value)?;
        }

        let largest_capacity = context
            .iterate_domain(self.slot_type)
            .map(|type_value| self.capacity_of(type_value))
            .max()
            .unwrap_or(0);

        for (&bit, &requirement) in self.bits.iter().zip(self.requirements.iter()) {
            if !context.is_fixed(bit) && min_load + requirement > largest_capacity {
                context.assign(bit, 0)?;
            }
        }

        Ok(())
    }

    fn check(&self, context: PropagationContext) -> Satisfaction {
        let (min_load, max_load) = self.load_bounds(&context);

        let capacities = context
            .iterate_domain(self.slot_type)
            .map(|type_value| self.capacity_of(type_value));
        let (smallest, largest) = capacities.fold((u64::MAX, 0), |(smallest, largest), capacity| {
            (smallest.min(capacity), largest.max(capacity))
        });

        if min_load > largest {
            Satisfaction::Violated
        } else if max_load <= smallest {
            Satisfaction::Satisfied
        } else {
            Satisfaction::Undetermined
        }
    }
}
