//! The constraint catalogue of the placement model.
//!
//! [`Constraint::from_instance`] turns a [`ProblemInstance`] into the list of constraints which
//! together describe every accepted placement; [`add_constraints`] posts them as propagators over
//! the variables of a [`VariableLayout`].

use log::debug;

use crate::basic_types::ConstraintOperationError;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::Assignments;
use crate::engine::cp::PropagatorStore;
use crate::engine::variables::DomainId;
use crate::engine::variables::VariableLayout;
use crate::instance::Comparison;
use crate::instance::ComponentId;
use crate::instance::PlacementRule;
use crate::instance::ProblemInstance;
use crate::propagators::CapacityPropagator;
use crate::propagators::CardinalityPropagator;
use crate::propagators::ColocationPropagator;
use crate::propagators::ConflictPropagator;
use crate::propagators::ImplicationPropagator;
use crate::propagators::LinkingPropagator;
use crate::propagators::RequireProvidePropagator;
use crate::propagators::SlotOrderingPropagator;
use crate::propagators::SlotUsagePropagator;

/// The constraints which make up the placement model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// A slot hosts a component if and only if it has a type.
    TypeConsistency { slot: usize },
    /// A slot hosts a component if and only if it is marked as occupied.
    OccupancyConsistency { slot: usize },
    /// The components on a slot fit within the capacity of its type in one dimension.
    Capacity { slot: usize, dimension: usize },
    /// The occupancy flag and derived fields of a slot follow its type.
    Linking { slot: usize },
    Cardinality {
        components: Vec<ComponentId>,
        comparison: Comparison,
        bound: u32,
    },
    /// `component` does not share `slot` with any of `conflicting`.
    Conflict {
        slot: usize,
        component: ComponentId,
        conflicting: Vec<ComponentId>,
    },
    RequireProvide {
        consumer: ComponentId,
        consumer_ratio: u32,
        provider: ComponentId,
        provider_ratio: u32,
    },
    Implication {
        antecedent: ComponentId,
        consequent: ComponentId,
        required: u32,
    },
    /// `dependent` is on `slot` exactly as often as the primaries together.
    Colocation {
        slot: usize,
        dependent: ComponentId,
        primaries: Vec<ComponentId>,
    },
    /// Slots are used in order of their index.
    SlotOrdering,
}

impl Constraint {
    /// All constraints of the model for `instance`.
    pub fn from_instance(instance: &ProblemInstance, symmetry_breaking: bool) -> Vec<Constraint> {
        let mut constraints = vec![];

        for slot in 0..instance.num_slots() {
            constraints.push(Constraint::TypeConsistency { slot });
            constraints.push(Constraint::OccupancyConsistency { slot });
            constraints.push(Constraint::Linking { slot });
            for dimension in 0..instance.num_dimensions() {
                constraints.push(Constraint::Capacity { slot, dimension });
            }
        }

        for rule in instance.rules() {
            match rule {
                PlacementRule::Cardinality {
                    components,
                    comparison,
                    bound,
                } => constraints.push(Constraint::Cardinality {
                    components: components.clone(),
                    comparison: *comparison,
                    bound: *bound,
                }),
                PlacementRule::Conflict {
                    component,
                    conflicting,
                } => constraints.extend((0..instance.num_slots()).map(|slot| {
                    Constraint::Conflict {
                        slot,
                        component: *component,
                        conflicting: conflicting.clone(),
                    }
                })),
                PlacementRule::RequireProvide {
                    consumer,
                    consumer_ratio,
                    provider,
                    provider_ratio,
                } => constraints.push(Constraint::RequireProvide {
                    consumer: *consumer,
                    consumer_ratio: *consumer_ratio,
                    provider: *provider,
                    provider_ratio: *provider_ratio,
                }),
                PlacementRule::Implication {
                    antecedent,
                    consequent,
                    required,
                } => constraints.push(Constraint::Implication {
                    antecedent: *antecedent,
                    consequent: *consequent,
                    required: *required,
                }),
                PlacementRule::Colocation {
                    dependent,
                    primaries,
                } => constraints.extend((0..instance.num_slots()).map(|slot| {
                    Constraint::Colocation {
                        slot,
                        dependent: *dependent,
                        primaries: primaries.clone(),
                    }
                })),
            }
        }

        if symmetry_breaking && instance.num_slots() > 1 {
            constraints.push(Constraint::SlotOrdering);
        }

        constraints
    }

    /// Create the propagator which enforces this constraint over the variables in `layout`.
    pub(crate) fn to_propagator(
        &self,
        instance: &ProblemInstance,
        layout: &VariableLayout,
    ) -> Box<dyn Propagator> {
        let deployments = |components: &[ComponentId]| -> Box<[DomainId]> {
            components
                .iter()
                .flat_map(|&component| layout.component_assignments(component))
                .copied()
                .collect()
        };

        match self {
            Constraint::TypeConsistency { slot } => {
                Box::new(SlotUsagePropagator::type_consistency(
                    layout.slot_assignments(*slot).into(),
                    layout.slot_type(*slot),
                ))
            }
            Constraint::OccupancyConsistency { slot } => Box::new(SlotUsagePropagator::occupancy(
                layout.slot_assignments(*slot).into(),
                layout.occupancy(*slot),
            )),
            Constraint::Capacity { slot, dimension } => {
                let requirements = instance
                    .component_ids()
                    .map(|component| u64::from(instance.requirement(component, *dimension)))
                    .collect();
                let capacities = std::iter::once(0)
                    .chain(
                        instance
                            .offer_ids()
                            .map(|offer| u64::from(instance.capacity(offer, *dimension))),
                    )
                    .collect();

                Box::new(CapacityPropagator::new(
                    layout.slot_type(*slot),
                    layout.slot_assignments(*slot).into(),
                    requirements,
                    capacities,
                ))
            }
            Constraint::Linking { slot } => {
                let mut fields = (0..instance.num_dimensions())
                    .map(|dimension| layout.resource(*slot, dimension))
                    .collect::<Vec<_>>();
                fields.push(layout.price(*slot));

                let mut table = (0..instance.num_dimensions())
                    .map(|dimension| {
                        std::iter::once(0)
                            .chain(
                                instance
                                    .offer_ids()
                                    .map(|offer| instance.capacity(offer, dimension) as i32),
                            )
                            .collect::<Box<[i32]>>()
                    })
                    .collect::<Vec<_>>();
                table.push(
                    std::iter::once(0)
                        .chain(
                            instance
                                .offer_ids()
                                .map(|offer| instance.offer(offer).price as i32),
                        )
                        .collect(),
                );

                Box::new(LinkingPropagator::new(
                    layout.slot_type(*slot),
                    layout.occupancy(*slot),
                    fields.into(),
                    table.into(),
                ))
            }
            Constraint::Cardinality {
                components,
                comparison,
                bound,
            } => Box::new(CardinalityPropagator::new(
                deployments(components),
                *comparison,
                *bound,
            )),
            Constraint::Conflict {
                slot,
                component,
                conflicting,
            } => Box::new(ConflictPropagator::new(
                layout.assignment(*component, *slot),
                conflicting
                    .iter()
                    .map(|&other| layout.assignment(other, *slot))
                    .collect(),
            )),
            Constraint::RequireProvide {
                consumer,
                consumer_ratio,
                provider,
                provider_ratio,
            } => Box::new(RequireProvidePropagator::new(
                deployments(&[*consumer]),
                *consumer_ratio,
                deployments(&[*provider]),
                *provider_ratio,
            )),
            Constraint::Implication {
                antecedent,
                consequent,
                required,
            } => Box::new(ImplicationPropagator::new(
                deployments(&[*antecedent]),
                deployments(&[*consequent]),
                *required,
            )),
            Constraint::Colocation {
                slot,
                dependent,
                primaries,
            } => Box::new(ColocationPropagator::new(
                layout.assignment(*dependent, *slot),
                primaries
                    .iter()
                    .map(|&primary| layout.assignment(primary, *slot))
                    .collect(),
            )),
            Constraint::SlotOrdering => Box::new(SlotOrderingPropagator::new(
                layout.all_occupancy().into(),
            )),
        }
    }
}

/// Post every constraint as a propagator to `store`. Fails as soon as one of them is infeasible at
/// the root.
pub fn add_constraints(
    constraints: &[Constraint],
    instance: &ProblemInstance,
    layout: &VariableLayout,
    assignments: &Assignments,
    store: &mut PropagatorStore,
) -> Result<(), ConstraintOperationError> {
    for constraint in constraints {
        let propagator = constraint.to_propagator(instance, layout);
        let _ = store.add(propagator, assignments).map_err(|error| {
            debug!("Constraint {constraint:?} is infeasible at the root");
            error
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::topology::general_purpose_offers;
    use crate::instance::topology::secure_web_container;

    #[test]
    fn catalogue_covers_every_slot_and_rule() {
        let instance = secure_web_container(4, general_purpose_offers());
        let constraints = Constraint::from_instance(&instance, true);

        let count = |predicate: fn(&Constraint) -> bool| {
            constraints.iter().filter(|c| predicate(c)).count()
        };

        assert_eq!(4, count(|c| matches!(c, Constraint::TypeConsistency { .. })));
        assert_eq!(4 * 3, count(|c| matches!(c, Constraint::Capacity { .. })));
        // Three conflict rules, each posted on every slot.
        assert_eq!(3 * 4, count(|c| matches!(c, Constraint::Conflict { .. })));
        assert_eq!(4, count(|c| matches!(c, Constraint::Colocation { .. })));
        assert_eq!(1, count(|c| matches!(c, Constraint::SlotOrdering)));
    }

    #[test]
    fn symmetry_breaking_can_be_disabled() {
        let instance = secure_web_container(4, general_purpose_offers());
        let constraints = Constraint::from_instance(&instance, false);

        assert!(!constraints.contains(&Constraint::SlotOrdering));
    }

    #[test]
    fn constraints_post_at_the_root() {
        let instance = secure_web_container(5, general_purpose_offers());
        let mut assignments = Assignments::default();
        let layout = VariableLayout::create_from_instance(&instance, &mut assignments);
        let mut store = PropagatorStore::default();

        let constraints = Constraint::from_instance(&instance, true);
        add_constraints(&constraints, &instance, &layout, &assignments, &mut store)
            .expect("no constraint is violated at the root");

        assert_eq!(constraints.len(), store.num_propagators());
    }
}
