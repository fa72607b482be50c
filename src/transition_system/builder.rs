use crate::{
    alphabet::{CharAlphabet, SymbolSet},
    automaton::{Automaton, FsmKind},
};

use super::{Graph, GraphError, State, StateId};

/// Helper struct for the construction of graphs. States are referred to by their position, i.e. the
/// first state that is given has index `0`, the second one index `1` and so on. The actual handles
/// are only created once [`GraphBuilder::into_graph`] is called.
///
/// # Example
///
/// We want to create a DFA with two states `q0` and `q1` over the alphabet `['a', 'b']`, where `q0` is
/// initial and `q1` is accepting. Reading an `a` should always lead to `q1`, reading a `b` to `q0`.
/// ```
/// use stateflow::prelude::*;
///
/// let dfa = GraphBuilder::with_alphabet("ab")
///     .with_states([("q0", true, false), ("q1", false, true)])
///     .with_edges([(0, "a", 1), (0, "b", 0), (1, "a", 1), (1, "b", 0)])
///     .into_automaton(FsmKind::Dfa)
///     .unwrap();
/// assert!(dfa.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    alphabet: CharAlphabet,
    states: Vec<State>,
    edges: Vec<(usize, SymbolSet, usize)>,
}

impl GraphBuilder {
    /// Creates an empty builder for the given alphabet.
    pub fn with_alphabet<A: Into<CharAlphabet>>(alphabet: A) -> Self {
        Self {
            alphabet: alphabet.into(),
            ..Default::default()
        }
    }

    /// Adds states given as triples of name, initial flag and accepting flag.
    pub fn with_states<I, S>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (S, bool, bool)>,
        S: Into<String>,
    {
        self.states.extend(
            iter.into_iter()
                .map(|(name, initial, accepting)| State::new(name, initial, accepting)),
        );
        self
    }

    /// Adds edges given as triples of source index, label and target index.
    pub fn with_edges<I, L>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (usize, L, usize)>,
        L: Into<SymbolSet>,
    {
        self.edges
            .extend(iter.into_iter().map(|(p, l, q)| (p, l.into(), q)));
        self
    }

    /// Creates the graph. Fails if an edge refers to a state index that does not exist or has
    /// an empty label.
    pub fn into_graph(self) -> Result<Graph, GraphError> {
        let mut graph = Graph::new(self.alphabet);
        let ids: Vec<StateId> = self
            .states
            .into_iter()
            .map(|state| graph.add_state(state))
            .collect::<Result<_, _>>()?;

        let resolve = |index: usize| {
            ids.get(index).copied().ok_or(GraphError::IndexOutOfRange {
                index,
                states: ids.len(),
            })
        };
        for (source, label, target) in self.edges {
            graph.add_edge(resolve(source)?, label, resolve(target)?)?;
        }
        Ok(graph)
    }

    /// Creates the graph and wraps it into an [`Automaton`] of the given kind.
    pub fn into_automaton(self, kind: FsmKind) -> Result<Automaton, GraphError> {
        Ok(Automaton::new(kind, self.into_graph()?))
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn builds_in_order() {
        let graph = GraphBuilder::with_alphabet("ab")
            .with_states([("x", true, false), ("", false, true)])
            .with_edges([(0, "ab", 1), (1, "a", 1)])
            .into_graph()
            .unwrap();

        let names: Vec<_> = graph.states().map(|(_, s)| s.name().to_string()).collect();
        assert_eq!(names, vec!["x".to_string(), String::new()]);
        let edges: Vec<_> = graph.edges().map(|(_, e)| e.clone()).collect();
        assert_eq!(edges.len(), 2);
        assert!(edges[1].is_loop());
        assert_eq!(edges[0].label(), &SymbolSet::from("ba"));
    }

    #[test]
    fn rejects_unknown_indices() {
        let out = GraphBuilder::with_alphabet("a")
            .with_states([("q0", true, true)])
            .with_edges([(0, "a", 3)])
            .into_graph();
        assert_eq!(
            out.unwrap_err(),
            GraphError::IndexOutOfRange {
                index: 3,
                states: 1
            }
        );
    }
}
