use rand::rngs::SmallRng;
use rand::Rng;

#[cfg(doc)]
use crate::branching::Brancher;
#[cfg(doc)]
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::Assignments;
use crate::engine::variables::DomainId;

/// The context provided to the [`Brancher`], the behaviour is similar to that of the
/// [`PropagationContext`] with access to the random generator of the search for breaking ties.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    assignments: &'a Assignments,
    random_generator: &'a mut SmallRng,
}

impl<'a> SelectionContext<'a> {
    pub fn new(assignments: &'a Assignments, random_generator: &'a mut SmallRng) -> Self {
        SelectionContext {
            assignments,
            random_generator,
        }
    }

    /// Returns a uniformly random index in `0..len`.
    pub fn random_index(&mut self, len: usize) -> usize {
        self.random_generator.gen_range(0..len)
    }

    /// The number of values in the domain of `var`.
    pub fn get_size_of_domain(&self, var: DomainId) -> usize {
        self.assignments.get_domain_size(var)
    }

    pub fn lower_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_lower_bound(var)
    }

    pub fn upper_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_upper_bound(var)
    }

    pub fn contains(&self, var: DomainId, value: i32) -> bool {
        self.assignments.contains(var, value)
    }

    /// Determines whether the domain of `var` contains a single value.
    pub fn is_integer_fixed(&self, var: DomainId) -> bool {
        self.assignments.is_fixed(var)
    }

    /// Returns all variables in the store.
    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> {
        self.assignments.get_domains()
    }
}
