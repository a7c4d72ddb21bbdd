//! Turning a fully assigned store into a [`PlacementSolution`], and checking a placement against
//! its instance.

use thiserror::Error;

use super::PlacementSolution;
use super::SlotDetails;
use crate::basic_types::Solution;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::cp::Assignments;
use crate::engine::cp::PropagatorStore;
use crate::engine::variables::VariableLayout;
use crate::instance::ComponentId;
use crate::instance::OfferId;
use crate::instance::PlacementRule;
use crate::instance::ProblemInstance;

/// A way in which a placement fails to describe an accepted solution of its instance.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyViolation {
    #[error("the placement does not have the shape of the instance")]
    ShapeMismatch,
    #[error("slot {slot} refers to an offer which is not in the catalogue")]
    UnknownOffer { slot: usize },
    #[error("slot {slot} hosts components if and only if it is unused")]
    SlotUsage { slot: usize },
    #[error("the fields of slot {slot} do not match its offer")]
    FieldMismatch { slot: usize },
    #[error("slot {slot} needs {load} in dimension {dimension} but only has {capacity}")]
    CapacityExceeded {
        slot: usize,
        dimension: usize,
        load: u64,
        capacity: u64,
    },
    #[error("placement rule {rule} is violated")]
    RuleViolated { rule: usize },
    #[error("the total cost is {actual} but the slots add up to {expected}")]
    CostMismatch { expected: u64, actual: u64 },
}

impl PlacementSolution {
    /// Check the placement against `instance`: the usage, fields and capacity of every slot, the
    /// placement rules, and the total cost. Calling this repeatedly gives the same answer.
    pub fn verify(&self, instance: &ProblemInstance) -> Result<(), ConsistencyViolation> {
        if self.placed.len() != instance.num_components()
            || self.slots.len() != instance.num_slots()
            || self
                .placed
                .iter()
                .any(|row| row.len() != instance.num_slots())
        {
            return Err(ConsistencyViolation::ShapeMismatch);
        }

        for (slot, details) in self.slots.iter().enumerate() {
            self.verify_slot(instance, slot, details)?;
        }

        for (rule_idx, rule) in instance.rules().iter().enumerate() {
            if !self.satisfies(instance, rule) {
                return Err(ConsistencyViolation::RuleViolated { rule: rule_idx });
            }
        }

        let expected = self
            .slots
            .iter()
            .map(|details| u64::from(details.price))
            .sum::<u64>();
        if expected != self.total_cost {
            return Err(ConsistencyViolation::CostMismatch {
                expected,
                actual: self.total_cost,
            });
        }

        Ok(())
    }

    fn verify_slot(
        &self,
        instance: &ProblemInstance,
        slot: usize,
        details: &SlotDetails,
    ) -> Result<(), ConsistencyViolation> {
        if let Some(offer) = details.offer {
            if offer.index() >= instance.num_offers() {
                return Err(ConsistencyViolation::UnknownOffer { slot });
            }
        }

        let hosts_components = self.components_on(slot).next().is_some();
        if hosts_components != details.is_used() {
            return Err(ConsistencyViolation::SlotUsage { slot });
        }

        let (expected_resources, expected_price) = match details.offer {
            Some(offer) => (
                instance.offer(offer).capacities.clone(),
                instance.offer(offer).price,
            ),
            None => (vec![0; instance.num_dimensions()], 0),
        };
        if details.resources != expected_resources || details.price != expected_price {
            return Err(ConsistencyViolation::FieldMismatch { slot });
        }

        for (dimension, &capacity) in expected_resources.iter().enumerate() {
            let load = self
                .components_on(slot)
                .map(|component| u64::from(instance.requirement(component, dimension)))
                .sum::<u64>();
            if load > u64::from(capacity) {
                return Err(ConsistencyViolation::CapacityExceeded {
                    slot,
                    dimension,
                    load,
                    capacity: u64::from(capacity),
                });
            }
        }

        Ok(())
    }

    fn satisfies(&self, instance: &ProblemInstance, rule: &PlacementRule) -> bool {
        let count = |component: ComponentId| u64::from(self.deployment_count(component));

        match rule {
            PlacementRule::Cardinality {
                components,
                comparison,
                bound,
            } => {
                let total = components.iter().map(|&c| self.deployment_count(c)).sum();
                comparison.holds(total, *bound)
            }
            PlacementRule::Conflict {
                component,
                conflicting,
            } => (0..instance.num_slots()).all(|slot| {
                !self.is_placed(*component, slot)
                    || conflicting
                        .iter()
                        .all(|&other| !self.is_placed(other, slot))
            }),
            PlacementRule::RequireProvide {
                consumer,
                consumer_ratio,
                provider,
                provider_ratio,
            } => {
                u64::from(*consumer_ratio) * count(*consumer)
                    <= u64::from(*provider_ratio) * count(*provider)
            }
            PlacementRule::Implication {
                antecedent,
                consequent,
                required,
            } => count(*antecedent) == 0 || count(*consequent) >= u64::from(*required),
            PlacementRule::Colocation {
                dependent,
                primaries,
            } => (0..instance.num_slots()).all(|slot| {
                let present = u32::from(self.is_placed(*dependent, slot));
                let primaries_present = primaries
                    .iter()
                    .map(|&primary| u32::from(self.is_placed(primary, slot)))
                    .sum::<u32>();
                present == primaries_present
            }),
        }
    }
}

/// Read the placement from a fully assigned store.
///
/// Every propagator is asked to confirm that its constraint is satisfied, and the resulting
/// placement is verified against the instance. A failure of either check means the solver accepted
/// an invalid assignment, so this panics instead of handing out the placement.
pub(crate) fn extract_solution(
    instance: &ProblemInstance,
    layout: &VariableLayout,
    propagators: &PropagatorStore,
    assignments: &Assignments,
) -> PlacementSolution {
    for (propagator_id, propagator) in propagators.iter() {
        let satisfaction = propagator.check(PropagationContext::new(assignments));
        assert!(
            satisfaction == Satisfaction::Satisfied,
            "{} ({propagator_id}) reports {satisfaction:?} on a fully assigned store",
            propagator.name()
        );
    }

    let values = Solution::from_assignments(assignments);

    let placed = instance
        .component_ids()
        .map(|component| {
            layout
                .component_assignments(component)
                .iter()
                .map(|&bit| values.get_integer_value(bit) == 1)
                .collect()
        })
        .collect();

    let slots = (0..layout.num_slots())
        .map(|slot| SlotDetails {
            offer: OfferId::from_type_value(values.get_integer_value(layout.slot_type(slot))),
            resources: (0..layout.num_dimensions())
                .map(|dimension| values.get_integer_value(layout.resource(slot, dimension)) as u32)
                .collect(),
            price: values.get_integer_value(layout.price(slot)) as u32,
        })
        .collect::<Vec<_>>();

    let total_cost = slots.iter().map(|details| u64::from(details.price)).sum();

    let solution = PlacementSolution {
        placed,
        slots,
        total_cost,
    };

    if let Err(violation) = solution.verify(instance) {
        panic!("the extracted placement is inconsistent: {violation}");
    }

    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Comparison;
    use crate::instance::Component;
    use crate::instance::VmOffer;

    fn instance() -> ProblemInstance {
        let mut instance = ProblemInstance::new(2, ["cpu"]);
        let web = instance.add_component(Component::new("web", [2]));
        let db = instance.add_component(Component::new("db", [3]));
        let _ = instance.add_offer(VmOffer::new("small", [4], 5));
        instance.add_rule(PlacementRule::Cardinality {
            components: vec![web],
            comparison: Comparison::Equal,
            bound: 1,
        });
        instance.add_rule(PlacementRule::Conflict {
            component: web,
            conflicting: vec![db],
        });
        instance
    }

    fn used(price: u32) -> SlotDetails {
        SlotDetails {
            offer: Some(OfferId::new(0)),
            resources: vec![4],
            price,
        }
    }

    fn unused() -> SlotDetails {
        SlotDetails {
            offer: None,
            resources: vec![0],
            price: 0,
        }
    }

    #[test]
    fn valid_placement_is_accepted_repeatedly() {
        let solution = PlacementSolution {
            placed: vec![vec![true, false], vec![false, true]],
            slots: vec![used(5), used(5)],
            total_cost: 10,
        };

        assert_eq!(Ok(()), solution.verify(&instance()));
        assert_eq!(Ok(()), solution.verify(&instance()));
    }

    #[test]
    fn conflicting_components_on_one_slot_are_rejected() {
        let solution = PlacementSolution {
            placed: vec![vec![true, false], vec![true, false]],
            slots: vec![used(5), unused()],
            total_cost: 5,
        };

        // The load of 5 exceeds the capacity before the conflict rule is looked at.
        assert!(matches!(
            solution.verify(&instance()),
            Err(ConsistencyViolation::CapacityExceeded { slot: 0, .. })
        ));
    }

    #[test]
    fn used_slot_without_components_is_rejected() {
        let solution = PlacementSolution {
            placed: vec![vec![true, false], vec![false, false]],
            slots: vec![used(5), used(5)],
            total_cost: 10,
        };

        assert_eq!(
            Err(ConsistencyViolation::SlotUsage { slot: 1 }),
            solution.verify(&instance())
        );
    }

    #[test]
    fn wrong_total_cost_is_rejected() {
        let solution = PlacementSolution {
            placed: vec![vec![true, false], vec![false, true]],
            slots: vec![used(5), used(5)],
            total_cost: 7,
        };

        let violation = solution
            .verify(&instance())
            .expect_err("the slots add up to 10");
        let reported = violation;

        assert_eq!(
            ConsistencyViolation::CostMismatch {
                expected: 10,
                actual: 7
            },
            violation
        );
        assert_eq!(violation, reported);
    }

    #[test]
    fn rule_violations_are_reported_by_index() {
        let solution = PlacementSolution {
            placed: vec![vec![true, true], vec![false, false]],
            slots: vec![used(5), used(5)],
            total_cost: 10,
        };

        assert_eq!(
            Err(ConsistencyViolation::RuleViolated { rule: 0 }),
            solution.verify(&instance())
        );
    }
}
