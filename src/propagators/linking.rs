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

/// Links the type of a slot to its occupancy flag and to the fields that mirror the chosen offer:
/// `occupancy = 1 <-> slot_type > 0` and `fields[f] = table[f][slot_type]` for every field.
///
/// The table rows are indexed by type value; row entry 0 is the value of the field for an unused
/// slot.
#[derive(Clone, Debug)]
pub(crate) struct LinkingPropagator {
    slot_type: DomainId,
    occupancy: DomainId,
    fields: Box<[DomainId]>,
    table: Box<[Box<[i32]>]>,
}

impl LinkingPropagator {
    pub(crate) fn new(
        slot_type: DomainId,
        occupancy: DomainId,
        fields: Box<[DomainId]>,
        table: Box<[Box<[i32]>]>,
    ) -> Self {
        LinkingPropagator {
            slot_type,
            occupancy,
            fields,
            table,
        }
    }

    fn field_value(&self, field: usize, type_value: i32) -> Option<i32> {
        usize::try_from(type_value)
            .ok()
            .and_then(|idx| self.table[field].get(idx))
            .copied()
    }

    /// Whether the type value is compatible with the current domain of every field.
    fn is_supported(&self, context: &impl ReadDomains, type_value: i32) -> bool {
        self.fields.iter().enumerate().all(|(field, &var)| {
            self.field_value(field, type_value)
                .is_some_and(|value| context.contains(var, value))
        })
    }

    fn propagate_occupancy(&self, context: &mut PropagationContextMut) -> PropagationStatusCP {
        if context.lower_bound(self.occupancy) >= 1 {
            context.set_lower_bound(self.slot_type, 1)?;
        }
        if context.upper_bound(self.occupancy) == 0 {
            context.set_upper_bound(self.slot_type, 0)?;
        }
        if context.lower_bound(self.slot_type) >= 1 {
            context.set_lower_bound(self.occupancy, 1)?;
        }
        if context.upper_bound(self.slot_type) == 0 {
            context.set_upper_bound(self.occupancy, 0)?;
        }
        Ok(())
    }
}

impl Propagator for LinkingPropagator {
    fn name(&self) -> &str {
        "Linking"
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        let _ = context.register(self.slot_type, DomainEvents::ANY_INT);
        let _ = context.register(self.occupancy, DomainEvents::ASSIGN);
        for &field in self.fields.iter() {
            let _ = context.register(field, DomainEvents::ANY_INT);
        }

        if self.check(context.as_readonly()) == Satisfaction::Violated {
            return Err(Inconsistency::Violated);
        }
        Ok(())
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        self.propagate_occupancy(&mut context)?;

        let unsupported_types = context
            .iterate_domain(self.slot_type)
            .filter(|&type_value| !self.is_supported(&context, type_value))
            .collect::<Vec<_>>();
        for type_value in unsupported_types {
            context.remove(self.slot_type, type_value)?;
        }

        for (field, &var) in self.fields.iter().enumerate() {
            let unsupported_values = context
                .iterate_domain(var)
                .filter(|&value| {
                    !context
                        .iterate_domain(self.slot_type)
                        .any(|type_value| self.field_value(field, type_value) == Some(value))
                })
                .collect::<Vec<_>>();
            for value in unsupported_values {
                context.remove(var, value)?;
            }
        }

        self.propagate_occupancy(&mut context)
    }

    fn check(&self, context: PropagationContext) -> Satisfaction {
        let type_lower_bound = context.lower_bound(self.slot_type);
        let type_upper_bound = context.upper_bound(self.slot_type);
        let occupancy_lower_bound = context.lower_bound(self.occupancy);
        let occupancy_upper_bound = context.upper_bound(self.occupancy);

        if (occupancy_lower_bound >= 1 && type_upper_bound == 0)
            || (occupancy_upper_bound == 0 && type_lower_bound >= 1)
        {
            return Satisfaction::Violated;
        }

        if !context
            .iterate_domain(self.slot_type)
            .any(|type_value| self.is_supported(&context, type_value))
        {
            return Satisfaction::Violated;
        }

        let all_fixed = context.is_fixed(self.slot_type)
            && context.is_fixed(self.occupancy)
            && self.fields.iter().all(|&field| context.is_fixed(field));
        if all_fixed {
            // Fixed and supported means every field holds the value of the chosen type.
            Satisfaction::Satisfied
        } else {
            Satisfaction::Undetermined
        }
    }
}
