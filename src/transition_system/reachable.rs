use std::collections::VecDeque;

use tracing::trace;

use crate::{
    alphabet::Symbol,
    math::{OrderedSet, Set},
};

use super::{Graph, StateId};

/// Determines how the successors of a state on a single symbol are computed. This is the only
/// point in which the reachability search for deterministic and nondeterministic automata differs.
pub trait Successors: Copy {
    /// Returns the successors of `state` on `symbol` in `graph`.
    fn successors(self, graph: &Graph, state: StateId, symbol: Symbol) -> Vec<StateId>;
}

/// Successors are computed with [`Graph::dfa_step`], so there is at most one per symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deterministic;

impl Successors for Deterministic {
    fn successors(self, graph: &Graph, state: StateId, symbol: Symbol) -> Vec<StateId> {
        graph.dfa_step(state, symbol).into_iter().collect()
    }
}

/// Successors are computed with [`Graph::nfa_step`], i.e. the targets of all matching edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nondeterministic;

impl Successors for Nondeterministic {
    fn successors(self, graph: &Graph, state: StateId, symbol: Symbol) -> Vec<StateId> {
        graph.nfa_step(state, symbol).into_iter().collect()
    }
}

/// Depth-first search for an accepting state, starting in `start` and following edges on any symbol
/// of the alphabet. Every state is expanded at most once, so the search terminates on cyclic graphs.
/// Returns `false` if `start` is not part of the graph.
pub fn accepting_state_reachable<S: Successors>(graph: &Graph, start: StateId, how: S) -> bool {
    let mut visited: Set<StateId> = Set::default();
    let mut stack = vec![start];

    while let Some(q) = stack.pop() {
        if graph.is_accepting(q) {
            trace!("found accepting state {q:?} reachable from {start:?}");
            return true;
        }
        if !visited.insert(q) {
            continue;
        }
        // reversed so that symbols are explored in alphabet order
        for sym in graph.alphabet().universe().rev() {
            stack.extend(
                how.successors(graph, q, sym)
                    .into_iter()
                    .rev()
                    .filter(|p| !visited.contains(p)),
            );
        }
    }

    trace!(
        "no accepting state reachable from {start:?}, visited {} states",
        visited.len()
    );
    false
}

/// Returns all states that can be reached from `start` (including `start` itself) in the order in
/// which a breadth-first search discovers them.
pub fn reachable_states<S: Successors>(
    graph: &Graph,
    start: StateId,
    how: S,
) -> OrderedSet<StateId> {
    let mut seen = OrderedSet::default();
    if !graph.contains_state(start) {
        return seen;
    }
    seen.insert(start);
    let mut position = 0;
    while let Some(&q) = seen.get_index(position) {
        for sym in graph.alphabet().universe() {
            for p in how.successors(graph, q, sym) {
                seen.insert(p);
            }
        }
        position += 1;
    }
    seen
}

/// Computes a shortest word that leads from `start` to an accepting state. Among the shortest ones,
/// the word that is minimal with respect to the order of the alphabet is returned. If `start` is
/// accepting, this is the empty word, if no accepting state is reachable, the result is `None`.
pub fn accepting_word<S: Successors>(
    graph: &Graph,
    start: StateId,
    how: S,
) -> Option<Vec<Symbol>> {
    if !graph.contains_state(start) {
        return None;
    }
    let mut seen = Set::from_iter([start]);
    let mut queue = VecDeque::from([(vec![], start)]);

    while let Some((access, q)) = queue.pop_front() {
        if graph.is_accepting(q) {
            return Some(access);
        }
        for sym in graph.alphabet().universe() {
            for p in how.successors(graph, q, sym) {
                if seen.insert(p) {
                    let mut word = access.clone();
                    word.push(sym);
                    queue.push_back((word, p));
                }
            }
        }
    }
    None
}

impl Graph {
    /// Checks whether an accepting state is reachable from `start`, see [`accepting_state_reachable`].
    pub fn accepting_state_reachable<S: Successors>(&self, start: StateId, how: S) -> bool {
        accepting_state_reachable(self, start, how)
    }

    /// Returns the states reachable from `start`, see [`reachable_states`].
    pub fn reachable_states<S: Successors>(&self, start: StateId, how: S) -> OrderedSet<StateId> {
        reachable_states(self, start, how)
    }
}
