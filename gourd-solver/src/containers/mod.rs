//! Containers used throughout the solver.

mod keyed_vec;

pub use keyed_vec::KeyedVec;
pub use keyed_vec::StorageKey;

pub(crate) type HashSet<T> = fnv::FnvHashSet<T>;
