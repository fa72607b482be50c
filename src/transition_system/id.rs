use std::{fmt::Debug, hash::Hash};

/// Types that can back a handle.
pub trait IdType: Copy + Eq + Hash + Ord + Debug {
    /// The first handle that is handed out.
    const ZERO: Self;
    /// Returns the value following `self`, or `None` if `self` is the largest value.
    fn successor(self) -> Option<Self>;
}

macro_rules! impl_integer_id_type {
    ($($t:ty),*) => {
        $(
            impl IdType for $t {
                const ZERO: Self = 0;
                fn successor(self) -> Option<Self> {
                    self.checked_add(1)
                }
            }
        )*
    }
}

impl_integer_id_type!(u8, u16, u32, u64, usize);

/// The integer type handles are backed by unless specified otherwise.
pub type DefaultIdType = u32;

/// Kinds of objects that handles refer to.
pub trait IdKind {
    /// Prefix used when a handle of this kind is printed, e.g. `q` for states.
    const PREFIX: &'static str;
}

/// An opaque handle. The marker `K` distinguishes handles of different kinds of objects, so that a
/// handle of an edge can never be used to look up a state.
pub struct Id<K, N: IdType = DefaultIdType>(N, std::marker::PhantomData<fn() -> K>);

impl<K, N: IdType> Id<K, N> {
    pub(crate) fn new(n: N) -> Self {
        Self(n, std::marker::PhantomData)
    }

    /// Returns the raw value of the handle.
    pub fn inner(self) -> N {
        self.0
    }
}

impl<K: IdKind, N: IdType> Debug for Id<K, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:?}", K::PREFIX, self.0)
    }
}

impl<K, N: IdType> Clone for Id<K, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, N: IdType> Copy for Id<K, N> {}

impl<K, N: IdType> PartialEq for Id<K, N> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<K, N: IdType> Eq for Id<K, N> {}

impl<K, N: IdType> PartialOrd for Id<K, N> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, N: IdType> Ord for Id<K, N> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl<K, N: IdType> Hash for Id<K, N> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

/// Hands out fresh handles. A handle is never handed out twice, even if the object it referred
/// to has been removed in the meantime. Once every value of `N` has been used, no further handles
/// are produced.
#[derive(Debug)]
pub(crate) struct IdGenerator<K, N: IdType = DefaultIdType> {
    next: Option<N>,
    _kind: std::marker::PhantomData<fn() -> K>,
}

impl<K, N: IdType> Clone for IdGenerator<K, N> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            _kind: std::marker::PhantomData,
        }
    }
}

impl<K, N: IdType> Default for IdGenerator<K, N> {
    fn default() -> Self {
        Self {
            next: Some(N::ZERO),
            _kind: std::marker::PhantomData,
        }
    }
}

impl<K, N: IdType> IdGenerator<K, N> {
    pub(crate) fn fresh(&mut self) -> Option<Id<K, N>> {
        let n = self.next?;
        self.next = n.successor();
        Some(Id::new(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Marker;

    impl IdKind for Marker {
        const PREFIX: &'static str = "m";
    }

    #[test]
    fn handles_are_never_reused() {
        let mut ids = IdGenerator::<Marker>::default();
        let first = ids.fresh().unwrap();
        let second = ids.fresh().unwrap();
        assert_ne!(first, second);
        assert!(first < second);
        assert_eq!(second.inner(), 1);
        assert_eq!(format!("{:?}", second), "m1");

        let cloned = ids.clone();
        let mut ids = cloned;
        assert_eq!(ids.fresh().unwrap().inner(), 2);
    }

    #[test]
    fn small_handle_types_run_out_instead_of_wrapping() {
        let mut ids = IdGenerator::<Marker, u8>::default();
        let handed_out: Vec<_> = std::iter::from_fn(|| ids.fresh()).collect();
        assert_eq!(handed_out.len(), 256);
        assert_eq!(handed_out.last().unwrap().inner(), u8::MAX);
        assert!(ids.fresh().is_none());
        assert!(ids.fresh().is_none());
    }
}
