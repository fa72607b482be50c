/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Type alias for sets that remember the order in which elements were inserted.
pub type OrderedSet<S> = indexmap::IndexSet<S, fxhash::FxBuildHasher>;
/// Type alias for maps that remember the order in which keys were inserted.
pub type OrderedMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;
