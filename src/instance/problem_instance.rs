use std::fmt::Display;
use std::fmt::Formatter;

use super::rules::PlacementRule;

/// Identifies a component by its position in the [`ProblemInstance`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    pub fn new(index: usize) -> Self {
        ComponentId(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Components are numbered from 1 when shown to the outside world.
        write!(f, "#{}", self.0 + 1)
    }
}

/// Identifies a VM offer by its position in the [`ProblemInstance`].
///
/// In the variable store the type of a slot is `0` when the slot is unused and `offer.index() + 1`
/// otherwise.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct OfferId(usize);

impl OfferId {
    pub fn new(index: usize) -> Self {
        OfferId(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// The value this offer takes in the domain of a slot type variable.
    pub(crate) fn type_value(&self) -> i32 {
        self.0 as i32 + 1
    }

    /// The inverse of [`OfferId::type_value`]; `0` means "no offer".
    pub(crate) fn from_type_value(value: i32) -> Option<OfferId> {
        if value <= 0 {
            None
        } else {
            Some(OfferId(value as usize - 1))
        }
    }
}

impl Display for OfferId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

/// A component of the application, with its hardware requirement per dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub requirements: Vec<u32>,
}

impl Component {
    pub fn new(name: impl Display, requirements: impl Into<Vec<u32>>) -> Self {
        Component {
            name: name.to_string(),
            requirements: requirements.into(),
        }
    }
}

/// A priced hardware configuration that a slot can adopt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VmOffer {
    pub name: String,
    pub capacities: Vec<u32>,
    pub price: u32,
}

impl VmOffer {
    pub fn new(name: impl Display, capacities: impl Into<Vec<u32>>, price: u32) -> Self {
        VmOffer {
            name: name.to_string(),
            capacities: capacities.into(),
            price,
        }
    }
}

/// Everything the solver needs to know about one placement problem.
#[derive(Clone, Debug, Default)]
pub struct ProblemInstance {
    /// The number of slots in the pool, i.e. the maximum number of VMs that can be rented.
    num_slots: usize,
    /// The names of the hardware dimensions, e.g. `["cpu", "memory", "storage"]`.
    dimensions: Vec<String>,
    components: Vec<Component>,
    offers: Vec<VmOffer>,
    rules: Vec<PlacementRule>,
}

impl ProblemInstance {
    pub fn new<Name: Display>(
        num_slots: usize,
        dimensions: impl IntoIterator<Item = Name>,
    ) -> Self {
        ProblemInstance {
            num_slots,
            dimensions: dimensions.into_iter().map(|name| name.to_string()).collect(),
            components: vec![],
            offers: vec![],
            rules: vec![],
        }
    }

    pub fn add_component(&mut self, component: Component) -> ComponentId {
        self.components.push(component);
        ComponentId(self.components.len() - 1)
    }

    pub fn add_offer(&mut self, offer: VmOffer) -> OfferId {
        self.offers.push(offer);
        OfferId(self.offers.len() - 1)
    }

    pub fn add_rule(&mut self, rule: PlacementRule) {
        self.rules.push(rule);
    }

    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    pub fn num_dimensions(&self) -> usize {
        self.dimensions.len()
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    pub fn num_offers(&self) -> usize {
        self.offers.len()
    }

    pub fn dimension_name(&self, dimension: usize) -> &str {
        &self.dimensions[dimension]
    }

    pub fn component(&self, component: ComponentId) -> &Component {
        &self.components[component.0]
    }

    pub fn offer(&self, offer: OfferId) -> &VmOffer {
        &self.offers[offer.0]
    }

    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> {
        (0..self.components.len()).map(ComponentId)
    }

    pub fn offer_ids(&self) -> impl Iterator<Item = OfferId> {
        (0..self.offers.len()).map(OfferId)
    }

    pub fn rules(&self) -> &[PlacementRule] {
        &self.rules
    }

    /// Look up a component by name.
    pub fn find_component(&self, name: &str) -> Option<ComponentId> {
        self.components
            .iter()
            .position(|component| component.name == name)
            .map(ComponentId)
    }

    /// The capacity of the given offer in a dimension.
    pub fn capacity(&self, offer: OfferId, dimension: usize) -> u32 {
        self.offers[offer.0].capacities[dimension]
    }

    /// The requirement of the given component in a dimension.
    pub fn requirement(&self, component: ComponentId, dimension: usize) -> u32 {
        self.components[component.0].requirements[dimension]
    }

    /// The cheapest price in the catalogue, if there are any offers.
    pub fn cheapest_price(&self) -> Option<u32> {
        self.offers.iter().map(|offer| offer.price).min()
    }
}
