use crate::engine::cp::Assignments;
use crate::engine::variables::DomainId;
use crate::instance::ComponentId;
use crate::instance::ProblemInstance;

/// Maps the placement problem onto the flat variable store.
///
/// For `N` components, `V` slots and `H` dimensions the store contains:
/// - an assignment bit per component and slot, `0..=1`;
/// - a type per slot, `0` for unused or `o + 1` for offer `o`;
/// - an occupancy flag per slot, `0..=1`;
/// - a resource field per slot and dimension, `0` or the capacity of some offer;
/// - a price per slot, `0` or the price of some offer.
#[derive(Clone, Debug)]
pub struct VariableLayout {
    num_components: usize,
    num_slots: usize,
    num_dimensions: usize,
    /// Row-major per component.
    assignments: Box<[DomainId]>,
    slot_types: Box<[DomainId]>,
    occupancy: Box<[DomainId]>,
    /// Row-major per slot.
    resources: Box<[DomainId]>,
    prices: Box<[DomainId]>,
}

impl VariableLayout {
    /// Create every variable of the model for `instance` in `assignments`.
    pub fn create_from_instance(
        instance: &ProblemInstance,
        assignments: &mut Assignments,
    ) -> VariableLayout {
        let num_slots = instance.num_slots();
        let num_dimensions = instance.num_dimensions();

        let assignment_bits = instance
            .component_ids()
            .flat_map(|_| 0..num_slots)
            .map(|_| assignments.grow(0, 1))
            .collect::<Vec<_>>();

        let slot_types = (0..num_slots)
            .map(|_| assignments.grow(0, instance.num_offers() as i32))
            .collect::<Vec<_>>();

        let occupancy = (0..num_slots)
            .map(|_| assignments.grow(0, 1))
            .collect::<Vec<_>>();

        let mut resources = Vec::with_capacity(num_slots * num_dimensions);
        for _ in 0..num_slots {
            for dimension in 0..num_dimensions {
                let values = std::iter::once(0).chain(
                    instance
                        .offer_ids()
                        .map(|offer| instance.capacity(offer, dimension) as i32),
                );
                resources.push(assignments.grow_sparse(values));
            }
        }

        let prices = (0..num_slots)
            .map(|_| {
                assignments.grow_sparse(
                    std::iter::once(0).chain(
                        instance
                            .offer_ids()
                            .map(|offer| instance.offer(offer).price as i32),
                    ),
                )
            })
            .collect::<Vec<_>>();

        VariableLayout {
            num_components: instance.num_components(),
            num_slots,
            num_dimensions,
            assignments: assignment_bits.into_boxed_slice(),
            slot_types: slot_types.into_boxed_slice(),
            occupancy: occupancy.into_boxed_slice(),
            resources: resources.into_boxed_slice(),
            prices: prices.into_boxed_slice(),
        }
    }

    pub fn num_components(&self) -> usize {
        self.num_components
    }

    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    pub fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    /// Whether `component` is placed on `slot`.
    pub fn assignment(&self, component: ComponentId, slot: usize) -> DomainId {
        self.assignments[component.index() * self.num_slots + slot]
    }

    /// The assignment bits of `component`, one per slot.
    pub fn component_assignments(&self, component: ComponentId) -> &[DomainId] {
        let start = component.index() * self.num_slots;
        &self.assignments[start..start + self.num_slots]
    }

    /// The assignment bits of every component on `slot`, in component order.
    pub fn slot_assignments(&self, slot: usize) -> Vec<DomainId> {
        (0..self.num_components)
            .map(|component| self.assignments[component * self.num_slots + slot])
            .collect()
    }

    pub fn all_assignments(&self) -> &[DomainId] {
        &self.assignments
    }

    pub fn slot_type(&self, slot: usize) -> DomainId {
        self.slot_types[slot]
    }

    pub fn slot_types(&self) -> &[DomainId] {
        &self.slot_types
    }

    pub fn occupancy(&self, slot: usize) -> DomainId {
        self.occupancy[slot]
    }

    pub fn all_occupancy(&self) -> &[DomainId] {
        &self.occupancy
    }

    pub fn resource(&self, slot: usize, dimension: usize) -> DomainId {
        self.resources[slot * self.num_dimensions + dimension]
    }

    pub fn price(&self, slot: usize) -> DomainId {
        self.prices[slot]
    }

    pub fn prices(&self) -> &[DomainId] {
        &self.prices
    }

    /// The resource fields of every slot followed by the prices.
    pub fn derived_fields(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.resources.iter().chain(self.prices.iter()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Component;
    use crate::instance::VmOffer;

    #[test]
    fn domains_follow_the_catalogue() {
        let mut instance = ProblemInstance::new(2, ["cpu", "memory"]);
        let web = instance.add_component(Component::new("web", [1, 2]));
        let _ = instance.add_offer(VmOffer::new("small", [2, 4], 5));
        let _ = instance.add_offer(VmOffer::new("large", [4, 8], 10));

        let mut assignments = Assignments::default();
        let layout = VariableLayout::create_from_instance(&instance, &mut assignments);

        assert_eq!(2 + 2 + 2 + 4 + 2, assignments.num_domains());
        assert_eq!(2, layout.component_assignments(web).len());
        assert_eq!(
            vec![0, 1, 2],
            assignments
                .get_domain_iter(layout.slot_type(1))
                .collect::<Vec<_>>()
        );
        assert_eq!(
            vec![0, 4, 8],
            assignments
                .get_domain_iter(layout.resource(0, 1))
                .collect::<Vec<_>>()
        );
        assert_eq!(
            vec![0, 5, 10],
            assignments
                .get_domain_iter(layout.price(1))
                .collect::<Vec<_>>()
        );
    }
}
