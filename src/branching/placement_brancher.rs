use crate::basic_types::HashSet;
use crate::branching::value_selection::InDomainMin;
use crate::branching::value_selection::PreferenceOrder;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::FirstFail;
use crate::branching::variable_selection::InputOrder;
use crate::branching::variable_selection::TieBreaking;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::engine::variables::VariableLayout;
use crate::instance::ProblemInstance;

/// The default search strategy of the placement model.
///
/// Variables are chosen in three tiers:
/// 1. the occupancy and type of the slots, smallest domain first;
/// 2. the assignment bits, in component-major order;
/// 3. any remaining variable (the derived fields), in layout order.
///
/// Occupancy flags and assignment bits are tried with 0 first. Slot types are tried "unused"
/// first and then from the cheapest offer to the most expensive one.
#[derive(Clone, Debug)]
pub struct PlacementBrancher {
    slot_selector: FirstFail,
    assignment_selector: InputOrder,
    remaining_selector: InputOrder,
    slot_types: HashSet<DomainId>,
    type_order: PreferenceOrder,
}

impl PlacementBrancher {
    pub fn new(
        instance: &ProblemInstance,
        layout: &VariableLayout,
        tie_breaking: TieBreaking,
    ) -> PlacementBrancher {
        let slot_variables = (0..layout.num_slots())
            .flat_map(|slot| [layout.occupancy(slot), layout.slot_type(slot)])
            .collect::<Vec<_>>();
        let remaining = layout.derived_fields().collect::<Vec<_>>();

        let mut offers = instance.offer_ids().collect::<Vec<_>>();
        offers.sort_by_key(|&offer| (instance.offer(offer).price, offer));
        let type_order = std::iter::once(0)
            .chain(offers.into_iter().map(|offer| offer.type_value()))
            .collect::<Vec<_>>();

        PlacementBrancher {
            slot_selector: FirstFail::new(&slot_variables, tie_breaking),
            assignment_selector: InputOrder::new(layout.all_assignments()),
            remaining_selector: InputOrder::new(&remaining),
            slot_types: layout.slot_types().iter().copied().collect(),
            type_order: PreferenceOrder::new(type_order),
        }
    }
}

impl Brancher for PlacementBrancher {
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision> {
        let variable = self
            .slot_selector
            .select_variable(context)
            .or_else(|| self.assignment_selector.select_variable(context))
            .or_else(|| self.remaining_selector.select_variable(context))?;

        let value = if self.slot_types.contains(&variable) {
            self.type_order.select_value(context, variable)
        } else {
            InDomainMin.select_value(context, variable)
        };

        Some(Decision { variable, value })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::cp::Assignments;
    use crate::instance::Component;
    use crate::instance::VmOffer;

    fn create() -> (ProblemInstance, Assignments, VariableLayout) {
        let mut instance = ProblemInstance::new(2, ["cpu"]);
        let _ = instance.add_component(Component::new("web", [1]));
        let _ = instance.add_offer(VmOffer::new("large", [4], 10));
        let _ = instance.add_offer(VmOffer::new("small", [2], 5));

        let mut assignments = Assignments::default();
        let layout = VariableLayout::create_from_instance(&instance, &mut assignments);
        (instance, assignments, layout)
    }

    #[test]
    fn slot_variables_are_decided_first() {
        let (instance, assignments, layout) = create();
        let mut brancher = PlacementBrancher::new(&instance, &layout, TieBreaking::InputOrder);
        let mut rng = SmallRng::seed_from_u64(42);

        let decision = brancher
            .next_decision(&mut SelectionContext::new(&assignments, &mut rng))
            .expect("nothing is fixed");

        assert_eq!(
            Decision {
                variable: layout.occupancy(0),
                value: 0
            },
            decision
        );
    }

    #[test]
    fn types_are_tried_from_cheap_to_expensive() {
        let (instance, mut assignments, layout) = create();
        let mut brancher = PlacementBrancher::new(&instance, &layout, TieBreaking::InputOrder);
        let mut rng = SmallRng::seed_from_u64(42);

        for slot in 0..2 {
            let _ = assignments.make_assignment(layout.occupancy(slot), 1);
        }
        let _ = assignments.remove_value(layout.slot_type(0), 0);

        let decision = brancher
            .next_decision(&mut SelectionContext::new(&assignments, &mut rng))
            .expect("types are unfixed");

        // The second offer is the cheapest, so its type value 2 comes first.
        assert_eq!(
            Decision {
                variable: layout.slot_type(0),
                value: 2
            },
            decision
        );
    }
}
