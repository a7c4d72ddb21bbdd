use thiserror::Error;

use super::ComponentId;
use super::PlacementRule;
use super::ProblemInstance;

/// Reasons for rejecting a [`ProblemInstance`] before search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    #[error("the slot pool is empty")]
    NoSlots,
    #[error("the offer catalogue is empty")]
    NoOffers,
    #[error("the instance has no requirement dimensions")]
    NoDimensions,
    #[error("component '{component}' has {actual} requirements, expected {expected}")]
    RequirementDimensionMismatch {
        component: String,
        expected: usize,
        actual: usize,
    },
    #[error("offer '{offer}' has {actual} capacities, expected {expected}")]
    CapacityDimensionMismatch {
        offer: String,
        expected: usize,
        actual: usize,
    },
    /// No offer in the catalogue can ever host the component.
    #[error("component '{component}' ({id}) requires {requirement} {dimension}, but the largest offer provides {largest}")]
    Unplaceable {
        id: ComponentId,
        component: String,
        dimension: String,
        requirement: u32,
        largest: u32,
    },
    #[error("a placement rule refers to unknown component {0}")]
    UnknownComponent(ComponentId),
    #[error("a ratio rule between {consumer} and {provider} has a zero coefficient")]
    ZeroRatio {
        consumer: ComponentId,
        provider: ComponentId,
    },
    #[error("value {value} of {context} does not fit in an integer domain")]
    ValueOutOfRange { context: String, value: u32 },
}

impl InstanceError {
    /// Whether this error proves that the instance has no valid placement, as opposed to the
    /// instance being malformed.
    pub fn is_infeasibility(&self) -> bool {
        matches!(self, InstanceError::Unplaceable { .. })
    }
}

impl ProblemInstance {
    /// Checks that the instance is well-formed and that every component fits on at least one
    /// offer.
    pub fn validate(&self) -> Result<(), InstanceError> {
        if self.num_slots() == 0 {
            return Err(InstanceError::NoSlots);
        }
        if self.num_offers() == 0 {
            return Err(InstanceError::NoOffers);
        }
        if self.num_dimensions() == 0 {
            return Err(InstanceError::NoDimensions);
        }

        let expected = self.num_dimensions();

        for offer in self.offer_ids().map(|id| self.offer(id)) {
            if offer.capacities.len() != expected {
                return Err(InstanceError::CapacityDimensionMismatch {
                    offer: offer.name.clone(),
                    expected,
                    actual: offer.capacities.len(),
                });
            }

            check_range(&offer.name, "price", offer.price)?;
            for (dimension, &capacity) in offer.capacities.iter().enumerate() {
                check_range(&offer.name, self.dimension_name(dimension), capacity)?;
            }
        }

        for id in self.component_ids() {
            let component = self.component(id);
            if component.requirements.len() != expected {
                return Err(InstanceError::RequirementDimensionMismatch {
                    component: component.name.clone(),
                    expected,
                    actual: component.requirements.len(),
                });
            }

            for (dimension, &requirement) in component.requirements.iter().enumerate() {
                let largest = self
                    .offer_ids()
                    .map(|offer| self.capacity(offer, dimension))
                    .max()
                    .unwrap_or(0);

                if requirement > largest {
                    return Err(InstanceError::Unplaceable {
                        id,
                        component: component.name.clone(),
                        dimension: self.dimension_name(dimension).to_owned(),
                        requirement,
                        largest,
                    });
                }
            }
        }

        for rule in self.rules() {
            if let Some(unknown) = rule
                .components()
                .into_iter()
                .find(|component| component.index() >= self.num_components())
            {
                return Err(InstanceError::UnknownComponent(unknown));
            }

            if let PlacementRule::RequireProvide {
                consumer,
                consumer_ratio,
                provider,
                provider_ratio,
            } = rule
            {
                if *consumer_ratio == 0 || *provider_ratio == 0 {
                    return Err(InstanceError::ZeroRatio {
                        consumer: *consumer,
                        provider: *provider,
                    });
                }
            }
        }

        Ok(())
    }
}

fn check_range(owner: &str, field: &str, value: u32) -> Result<(), InstanceError> {
    if i32::try_from(value).is_err() {
        return Err(InstanceError::ValueOutOfRange {
            context: format!("{field} of '{owner}'"),
            value,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Component;
    use crate::instance::VmOffer;

    fn small_instance() -> ProblemInstance {
        let mut instance = ProblemInstance::new(2, ["cpu", "memory"]);
        let _ = instance.add_offer(VmOffer::new("small", [2, 4], 5));
        let _ = instance.add_offer(VmOffer::new("large", [8, 16], 20));
        instance
    }

    #[test]
    fn well_formed_instance_is_accepted() {
        let mut instance = small_instance();
        let _ = instance.add_component(Component::new("web", [8, 1]));

        assert_eq!(Ok(()), instance.validate());
    }

    #[test]
    fn component_larger_than_every_offer_is_unplaceable() {
        let mut instance = small_instance();
        let _ = instance.add_component(Component::new("web", [1, 1]));
        let db = instance.add_component(Component::new("db", [4, 17]));

        let error = instance.validate().expect_err("db does not fit anywhere");
        assert!(error.is_infeasibility());
        assert_eq!(
            InstanceError::Unplaceable {
                id: db,
                component: "db".to_owned(),
                dimension: "memory".to_owned(),
                requirement: 17,
                largest: 16,
            },
            error
        );
    }

    #[test]
    fn requirement_vector_of_wrong_length_is_rejected() {
        let mut instance = small_instance();
        let _ = instance.add_component(Component::new("web", [1]));

        assert!(matches!(
            instance.validate(),
            Err(InstanceError::RequirementDimensionMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn rule_with_unknown_component_is_rejected() {
        let mut instance = small_instance();
        let web = instance.add_component(Component::new("web", [1, 1]));
        instance.add_rule(PlacementRule::requires(web, ComponentId::new(7)));

        assert_eq!(
            Err(InstanceError::UnknownComponent(ComponentId::new(7))),
            instance.validate()
        );
    }

    #[test]
    fn zero_ratio_is_rejected() {
        let mut instance = small_instance();
        let web = instance.add_component(Component::new("web", [1, 1]));
        let db = instance.add_component(Component::new("db", [1, 1]));
        instance.add_rule(PlacementRule::provide(db, web, 0));

        assert!(matches!(
            instance.validate(),
            Err(InstanceError::ZeroRatio { .. })
        ));
    }

    #[test]
    fn empty_pool_is_rejected() {
        let instance = ProblemInstance::new(0, ["cpu"]);
        assert_eq!(Err(InstanceError::NoSlots), instance.validate());
    }
}
