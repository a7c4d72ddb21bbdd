//! Hash containers backed by the FNV hasher, for the small integer keys of the solver.

pub(crate) type HashSet<K> = fnv::FnvHashSet<K>;
