//! A step never fails. Symbols outside the alphabet and states without outgoing edges simply lead
//! to no successor (deterministic case) or the empty set (nondeterministic case).
use tracing::trace;

use crate::{alphabet::Symbol, math::OrderedSet};

use super::{Edge, EdgeId, Graph, StateId};

/// Returns the target of the first edge (in the given order) that leaves `current` and fires on
/// `symbol`. Further matching edges are ignored, which can only happen if the edges do not form a
/// valid DFA.
pub fn dfa_step<'a, I>(edges: I, current: StateId, symbol: Symbol) -> Option<StateId>
where
    I: IntoIterator<Item = &'a Edge>,
{
    edges
        .into_iter()
        .find(|e| e.fires(current, symbol))
        .map(Edge::target)
}

/// Collects the targets of all edges that leave `current` and fire on `symbol`. Every target appears
/// once, in the order in which it was first reached.
pub fn nfa_step<'a, I>(edges: I, current: StateId, symbol: Symbol) -> OrderedSet<StateId>
where
    I: IntoIterator<Item = &'a Edge>,
{
    edges
        .into_iter()
        .filter(|e| e.fires(current, symbol))
        .map(Edge::target)
        .collect()
}

/// Computes the successor configuration of a set of active states, which is the union of the
/// [`nfa_step`]s of each of them. An empty result means that the input is rejected.
pub fn nfa_step_all<'a, I, S>(edges: I, current: S, symbol: Symbol) -> OrderedSet<StateId>
where
    I: IntoIterator<Item = &'a Edge>,
    I::IntoIter: Clone,
    S: IntoIterator<Item = StateId>,
{
    let edges = edges.into_iter();
    let mut out = OrderedSet::default();
    for q in current {
        out.extend(nfa_step(edges.clone(), q, symbol));
    }
    out
}

impl Graph {
    /// Deterministic successor of `current` on `symbol`, see [`dfa_step`].
    pub fn dfa_step(&self, current: StateId, symbol: Symbol) -> Option<StateId> {
        let out = dfa_step(self.edges.values(), current, symbol);
        trace!("dfa step {current:?} --{symbol}--> {out:?}");
        out
    }

    /// Returns the handle of the edge that [`Graph::dfa_step`] takes.
    pub fn dfa_edge(&self, current: StateId, symbol: Symbol) -> Option<EdgeId> {
        self.edges()
            .find(|(_, e)| e.fires(current, symbol))
            .map(|(id, _)| id)
    }

    /// Nondeterministic successors of `current` on `symbol`, see [`nfa_step`].
    pub fn nfa_step(&self, current: StateId, symbol: Symbol) -> OrderedSet<StateId> {
        nfa_step(self.edges.values(), current, symbol)
    }

    /// Successor configuration of the given active states, see [`nfa_step_all`].
    pub fn nfa_step_all<S>(&self, current: S, symbol: Symbol) -> OrderedSet<StateId>
    where
        S: IntoIterator<Item = StateId>,
    {
        nfa_step_all(self.edges.values(), current, symbol)
    }

    /// Returns the handles of all edges that leave one of the given states and fire on `symbol`.
    pub fn fired_edges<'s, S>(&self, current: S, symbol: Symbol) -> Vec<EdgeId>
    where
        S: IntoIterator<Item = &'s StateId>,
    {
        let current: OrderedSet<StateId> = current.into_iter().copied().collect();
        self.edges()
            .filter(|(_, e)| current.contains(&e.source) && e.label.matched_by(symbol))
            .map(|(id, _)| id)
            .collect()
    }
}
