use std::vec::Drain;

use crate::basic_types::Trail;
use crate::engine::cp::IntDomainEvent;
use crate::engine::variables::DomainId;
use crate::placement_assert_eq_simple;
use crate::placement_assert_extreme;
use crate::placement_assert_moderate;
use crate::placement_assert_simple;

/// Signals that a narrowing operation would have removed every value from a domain. The domain is
/// left untouched when this is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// A point in the search to which the [`Assignments`] can be restored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    decision_level: usize,
}

/// The variable store: the domains of all integer variables together with the trail which records
/// every removed value so that changes can be undone.
///
/// Restoring a [`Checkpoint`] only touches the values removed since that checkpoint was taken.
#[derive(Clone, Debug, Default)]
pub struct Assignments {
    domains: Vec<IntegerDomain>,
    trail: Trail<TrailEntry>,
    /// Events which have not yet been processed by the propagation engine.
    events: Vec<(IntDomainEvent, DomainId)>,
    /// The number of domains which contain exactly one value.
    num_fixed: usize,
}

impl Assignments {
    /// Create a new variable with the domain `[lower_bound, upper_bound]`.
    pub fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        placement_assert_simple!(
            lower_bound <= upper_bound,
            "cannot create a variable with an empty domain"
        );

        self.grow_sparse(lower_bound..=upper_bound)
    }

    /// Create a new variable whose domain consists of exactly the given values.
    pub fn grow_sparse(&mut self, values: impl IntoIterator<Item = i32>) -> DomainId {
        let mut values: Vec<i32> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();

        placement_assert_simple!(
            !values.is_empty(),
            "cannot create a variable with an empty domain"
        );

        let domain = IntegerDomain::new(values.into_boxed_slice());
        if domain.size == 1 {
            self.num_fixed += 1;
        }

        let id = DomainId::new(self.domains.len() as u32);
        self.domains.push(domain);
        id
    }

    pub fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> {
        (0..self.domains.len() as u32).map(DomainId::new)
    }

    pub fn get_lower_bound(&self, domain: DomainId) -> i32 {
        self.domains[domain.index()].lower_bound()
    }

    pub fn get_upper_bound(&self, domain: DomainId) -> i32 {
        self.domains[domain.index()].upper_bound()
    }

    pub fn get_domain_size(&self, domain: DomainId) -> usize {
        self.domains[domain.index()].size
    }

    pub fn contains(&self, domain: DomainId, value: i32) -> bool {
        self.domains[domain.index()].contains(value)
    }

    pub fn is_fixed(&self, domain: DomainId) -> bool {
        self.domains[domain.index()].size == 1
    }

    /// The value of the domain if it is fixed.
    pub fn get_assigned_value(&self, domain: DomainId) -> Option<i32> {
        if self.is_fixed(domain) {
            Some(self.get_lower_bound(domain))
        } else {
            None
        }
    }

    /// Iterate over the values currently in the domain, in ascending order.
    pub fn get_domain_iter(&self, domain: DomainId) -> impl Iterator<Item = i32> + '_ {
        self.domains[domain.index()].iter()
    }

    /// Returns `true` when every domain in the store is fixed.
    pub fn is_fully_assigned(&self) -> bool {
        self.num_fixed == self.domains.len()
    }

    pub fn get_decision_level(&self) -> usize {
        self.trail.get_decision_level()
    }

    pub(crate) fn num_trail_entries(&self) -> usize {
        self.trail.len()
    }

    /// Narrow the domain to the single value `value`.
    ///
    /// Fails if `value` is not in the current domain.
    pub fn make_assignment(&mut self, domain: DomainId, value: i32) -> Result<(), EmptyDomain> {
        let Some(value_idx) = self.domains[domain.index()].index_of(value) else {
            return Err(EmptyDomain);
        };

        let to_remove: Vec<usize> = self.domains[domain.index()]
            .present_indices()
            .filter(|&idx| idx != value_idx)
            .collect();

        self.remove_indices(domain, to_remove);
        Ok(())
    }

    /// Remove `value` from the domain. Removing a value which is not in the domain does nothing.
    pub fn remove_value(&mut self, domain: DomainId, value: i32) -> Result<(), EmptyDomain> {
        let Some(value_idx) = self.domains[domain.index()].index_of(value) else {
            return Ok(());
        };

        if self.domains[domain.index()].size == 1 {
            return Err(EmptyDomain);
        }

        self.remove_indices(domain, vec![value_idx]);
        Ok(())
    }

    /// Remove every value smaller than `bound` from the domain.
    pub fn tighten_lower_bound(&mut self, domain: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        if bound <= self.get_lower_bound(domain) {
            return Ok(());
        }
        if bound > self.get_upper_bound(domain) {
            return Err(EmptyDomain);
        }

        let integer_domain = &self.domains[domain.index()];
        let to_remove: Vec<usize> = integer_domain
            .present_indices()
            .take_while(|&idx| integer_domain.values[idx] < bound)
            .collect();

        self.remove_indices(domain, to_remove);
        Ok(())
    }

    /// Remove every value larger than `bound` from the domain.
    pub fn tighten_upper_bound(&mut self, domain: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        if bound >= self.get_upper_bound(domain) {
            return Ok(());
        }
        if bound < self.get_lower_bound(domain) {
            return Err(EmptyDomain);
        }

        let integer_domain = &self.domains[domain.index()];
        let to_remove: Vec<usize> = integer_domain
            .present_indices()
            .filter(|&idx| integer_domain.values[idx] > bound)
            .collect();

        self.remove_indices(domain, to_remove);
        Ok(())
    }

    /// Take a snapshot of the current domains.
    pub fn snapshot(&mut self) -> Checkpoint {
        let checkpoint = Checkpoint {
            decision_level: self.trail.get_decision_level(),
        };
        self.trail.increase_decision_level();
        checkpoint
    }

    /// Undo every change made since `checkpoint` was taken. Checkpoints taken after `checkpoint`
    /// become invalid.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        placement_assert_simple!(checkpoint.decision_level < self.trail.get_decision_level());

        for entry in self.trail.synchronise(checkpoint.decision_level) {
            let domain = &mut self.domains[entry.domain.index()];

            if domain.size == 1 {
                self.num_fixed -= 1;
            }

            domain.present[entry.removed_idx as usize] = true;
            domain.size += 1;
            domain.lower_idx = entry.lower_idx as usize;
            domain.upper_idx = entry.upper_idx as usize;
        }

        placement_assert_eq_simple!(
            checkpoint.decision_level,
            self.trail.get_decision_level()
        );
        placement_assert_extreme!(self.is_consistent());

        self.events.clear();
    }

    /// Whether the bookkeeping of every domain agrees with its present values, and the number of
    /// fixed domains is accurate.
    fn is_consistent(&self) -> bool {
        let bookkeeping_holds = self.domains.iter().all(|domain| {
            let num_present = domain.present.iter().filter(|&&present| present).count();
            let first_present = domain.present.iter().position(|&present| present);
            let last_present = domain.present.iter().rposition(|&present| present);

            num_present == domain.size
                && first_present == Some(domain.lower_idx)
                && last_present == Some(domain.upper_idx)
        });

        let num_fixed = self.domains.iter().filter(|domain| domain.size == 1).count();

        bookkeeping_holds && num_fixed == self.num_fixed
    }

    pub(crate) fn drain_domain_events(&mut self) -> Drain<'_, (IntDomainEvent, DomainId)> {
        self.events.drain(..)
    }

    pub(crate) fn clear_domain_events(&mut self) {
        self.events.clear();
    }

    /// Removes the values at the given positions; at least one value must remain.
    fn remove_indices(&mut self, domain: DomainId, indices: Vec<usize>) {
        if indices.is_empty() {
            return;
        }

        let integer_domain = &mut self.domains[domain.index()];
        placement_assert_simple!(indices.len() < integer_domain.size);

        let old_lower_bound = integer_domain.lower_bound();
        let old_upper_bound = integer_domain.upper_bound();

        for idx in indices {
            placement_assert_moderate!(integer_domain.present[idx]);

            self.trail.push(TrailEntry {
                domain,
                removed_idx: idx as u32,
                lower_idx: integer_domain.lower_idx as u32,
                upper_idx: integer_domain.upper_idx as u32,
            });

            integer_domain.present[idx] = false;
            integer_domain.size -= 1;
            integer_domain.update_bounds();
        }

        self.events.push((IntDomainEvent::Removal, domain));
        if integer_domain.lower_bound() != old_lower_bound {
            self.events.push((IntDomainEvent::LowerBound, domain));
        }
        if integer_domain.upper_bound() != old_upper_bound {
            self.events.push((IntDomainEvent::UpperBound, domain));
        }
        if integer_domain.size == 1 {
            self.num_fixed += 1;
            self.events.push((IntDomainEvent::Assign, domain));
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct TrailEntry {
    domain: DomainId,
    removed_idx: u32,
    /// The position of the lower bound before the removal.
    lower_idx: u32,
    /// The position of the upper bound before the removal.
    upper_idx: u32,
}

#[derive(Clone, Debug)]
struct IntegerDomain {
    /// The initial values, sorted ascending without duplicates.
    values: Box<[i32]>,
    present: Box<[bool]>,
    size: usize,
    lower_idx: usize,
    upper_idx: usize,
}

impl IntegerDomain {
    fn new(values: Box<[i32]>) -> IntegerDomain {
        let size = values.len();

        IntegerDomain {
            present: vec![true; size].into_boxed_slice(),
            values,
            size,
            lower_idx: 0,
            upper_idx: size - 1,
        }
    }

    fn lower_bound(&self) -> i32 {
        self.values[self.lower_idx]
    }

    fn upper_bound(&self) -> i32 {
        self.values[self.upper_idx]
    }

    fn index_of(&self, value: i32) -> Option<usize> {
        self.values
            .binary_search(&value)
            .ok()
            .filter(|&idx| self.present[idx])
    }

    fn contains(&self, value: i32) -> bool {
        self.index_of(value).is_some()
    }

    fn present_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (self.lower_idx..=self.upper_idx).filter(|&idx| self.present[idx])
    }

    fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.present_indices().map(|idx| self.values[idx])
    }

    fn update_bounds(&mut self) {
        if self.size == 0 {
            return;
        }

        while !self.present[self.lower_idx] {
            self.lower_idx += 1;
        }
        while !self.present[self.upper_idx] {
            self.upper_idx -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_domain_is_sorted_and_deduplicated() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow_sparse([5, 0, 3, 5]);

        assert_eq!(vec![0, 3, 5], assignments.get_domain_iter(domain).collect::<Vec<_>>());
        assert_eq!(0, assignments.get_lower_bound(domain));
        assert_eq!(5, assignments.get_upper_bound(domain));
    }

    #[test]
    fn assigning_a_value_outside_the_domain_fails_without_changes() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow_sparse([0, 2, 4]);

        assert_eq!(Err(EmptyDomain), assignments.make_assignment(domain, 3));
        assert_eq!(3, assignments.get_domain_size(domain));
        assert_eq!(0, assignments.num_trail_entries());
    }

    #[test]
    fn assignment_fixes_domain_and_emits_events() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(0, 4);

        assignments
            .make_assignment(domain, 2)
            .expect("2 is in the domain");

        assert_eq!(Some(2), assignments.get_assigned_value(domain));
        assert!(assignments.is_fully_assigned());

        let events: Vec<_> = assignments
            .drain_domain_events()
            .map(|(event, _)| event)
            .collect();
        assert!(events.contains(&IntDomainEvent::Assign));
        assert!(events.contains(&IntDomainEvent::LowerBound));
        assert!(events.contains(&IntDomainEvent::UpperBound));
    }

    #[test]
    fn removing_last_value_is_an_empty_domain() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(1, 1);

        assert_eq!(Err(EmptyDomain), assignments.remove_value(domain, 1));
        assert_eq!(Ok(()), assignments.remove_value(domain, 7));
        assert_eq!(Some(1), assignments.get_assigned_value(domain));
    }

    #[test]
    fn bounds_skip_holes() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(0, 10);

        assignments.remove_value(domain, 0).expect("non-empty");
        assignments.remove_value(domain, 1).expect("non-empty");
        assert_eq!(2, assignments.get_lower_bound(domain));

        assignments.tighten_upper_bound(domain, 7).expect("non-empty");
        assignments.remove_value(domain, 7).expect("non-empty");
        assert_eq!(6, assignments.get_upper_bound(domain));

        assert_eq!(
            Err(EmptyDomain),
            assignments.tighten_lower_bound(domain, 7)
        );
    }

    #[test]
    fn restore_undoes_changes_since_snapshot() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 5);
        let y = assignments.grow_sparse([0, 1]);

        assignments.remove_value(x, 5).expect("non-empty");

        let checkpoint = assignments.snapshot();
        assignments.make_assignment(x, 2).expect("in domain");
        assignments.make_assignment(y, 1).expect("in domain");

        let inner = assignments.snapshot();
        assignments.tighten_lower_bound(x, 2).expect("non-empty");
        assignments.restore(inner);
        assert_eq!(Some(2), assignments.get_assigned_value(x));

        assignments.restore(checkpoint);

        assert_eq!(vec![0, 1, 2, 3, 4], assignments.get_domain_iter(x).collect::<Vec<_>>());
        assert_eq!(2, assignments.get_domain_size(y));
        assert!(!assignments.is_fully_assigned());
        assert_eq!(0, assignments.get_decision_level());
        assert_eq!(1, assignments.num_trail_entries());
    }

    #[test]
    fn nested_restores_keep_the_bookkeeping_consistent() {
        let mut assignments = Assignments::default();
        let x = assignments.grow_sparse([0, 3, 5, 9]);
        let y = assignments.grow(0, 1);

        let root = assignments.snapshot();
        assignments.remove_value(x, 0).expect("non-empty");
        assignments.remove_value(x, 9).expect("non-empty");
        assert!(assignments.is_consistent());

        let inner = assignments.snapshot();
        assignments.make_assignment(x, 5).expect("in domain");
        assignments.make_assignment(y, 0).expect("in domain");
        assert!(assignments.is_fully_assigned());
        assert!(assignments.is_consistent());

        assignments.restore(inner);
        assert!(assignments.is_consistent());
        assert_eq!(vec![3, 5], assignments.get_domain_iter(x).collect::<Vec<_>>());

        assignments.restore(root);
        assert!(assignments.is_consistent());
        assert_eq!((0, 9), (assignments.get_lower_bound(x), assignments.get_upper_bound(x)));
    }
}
