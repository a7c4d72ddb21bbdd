use std::fmt::Display;
use std::fmt::Formatter;

use crate::instance::ComponentId;
use crate::instance::OfferId;

/// What a single slot of the pool looks like in a placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotDetails {
    /// The offer the slot is rented as, or [`None`] when the slot is unused.
    pub offer: Option<OfferId>,
    /// The capacity of the slot per dimension; all 0 when unused.
    pub resources: Vec<u32>,
    /// The price of the slot; 0 when unused.
    pub price: u32,
}

impl SlotDetails {
    pub fn is_used(&self) -> bool {
        self.offer.is_some()
    }
}

/// A placement of every component onto the slot pool, together with the offer chosen for each
/// slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementSolution {
    /// `placed[c][k]` holds when component `c` runs on slot `k`.
    pub(crate) placed: Vec<Vec<bool>>,
    pub(crate) slots: Vec<SlotDetails>,
    pub(crate) total_cost: u64,
}

impl PlacementSolution {
    pub fn num_components(&self) -> usize {
        self.placed.len()
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Whether `component` runs on `slot`.
    pub fn is_placed(&self, component: ComponentId, slot: usize) -> bool {
        self.placed[component.index()][slot]
    }

    /// The number of slots which host `component`.
    pub fn deployment_count(&self, component: ComponentId) -> u32 {
        self.placed[component.index()]
            .iter()
            .filter(|&&placed| placed)
            .count() as u32
    }

    /// The components running on `slot`.
    pub fn components_on(&self, slot: usize) -> impl Iterator<Item = ComponentId> + '_ {
        self.placed
            .iter()
            .enumerate()
            .filter(move |(_, row)| row[slot])
            .map(|(component, _)| ComponentId::new(component))
    }

    pub fn slot(&self, slot: usize) -> &SlotDetails {
        &self.slots[slot]
    }

    pub fn slots(&self) -> &[SlotDetails] {
        &self.slots
    }

    /// The number of slots which are rented.
    pub fn num_used_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_used()).count()
    }

    /// The summed price of every rented slot.
    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }
}

impl Display for PlacementSolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (slot, details) in self.slots.iter().enumerate() {
            let Some(offer) = details.offer else {
                continue;
            };

            let components = self
                .components_on(slot)
                .map(|component| component.to_string())
                .collect::<Vec<_>>();
            writeln!(
                f,
                "slot {slot}: offer {offer} at {} hosting [{}]",
                details.price,
                components.join(", ")
            )?;
        }
        write!(f, "total cost: {}", self.total_cost)
    }
}
