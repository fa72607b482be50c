use thiserror::Error;

use crate::{
    alphabet::Symbol,
    math::OrderedSet,
    transition_system::{
        reachable::{accepting_word, Deterministic, Nondeterministic},
        Graph, StateId,
    },
    Show,
};

mod dfa;
pub use dfa::{validate_dfa, DfaValidity};

mod nfa;
pub use nfa::{validate_nfa, NfaValidity};

mod run;
pub use run::{Run, RunError, Simulation, Step, Verdict};

/// The two kinds of finite state machines that can be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FsmKind {
    /// Deterministic finite automaton.
    #[default]
    Dfa,
    /// Nondeterministic finite automaton.
    Nfa,
}

/// Error for strings that do not name an [`FsmKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown automaton kind {0:?}, expected `dfa` or `nfa`")]
pub struct UnknownKind(pub String);

impl std::str::FromStr for FsmKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfa" => Ok(FsmKind::Dfa),
            "nfa" => Ok(FsmKind::Nfa),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for FsmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsmKind::Dfa => write!(f, "DFA"),
            FsmKind::Nfa => write!(f, "NFA"),
        }
    }
}

/// Result of validating an [`Automaton`], depending on its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validity {
    /// Outcome of [`validate_dfa`].
    Dfa(DfaValidity),
    /// Outcome of [`validate_nfa`].
    Nfa(NfaValidity),
}

impl Validity {
    /// Returns `true` if the automaton is well-formed.
    pub fn is_ok(self) -> bool {
        match self {
            Validity::Dfa(v) => v.is_ok(),
            Validity::Nfa(v) => v.is_ok(),
        }
    }
}

impl std::fmt::Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Validity::Dfa(v) => write!(f, "{v}"),
            Validity::Nfa(v) => write!(f, "{v}"),
        }
    }
}

/// An automaton is a [`Graph`] that is interpreted either as a DFA or as an NFA. The kind decides
/// which validator is used and how input is consumed.
#[derive(Debug, Clone)]
pub struct Automaton {
    kind: FsmKind,
    graph: Graph,
}

impl Automaton {
    /// Creates a new automaton of the given kind.
    pub fn new(kind: FsmKind, graph: Graph) -> Self {
        Self { kind, graph }
    }

    /// Returns the kind.
    pub fn kind(&self) -> FsmKind {
        self.kind
    }

    /// Changes the kind, the graph stays as it is.
    pub fn set_kind(&mut self, kind: FsmKind) {
        self.kind = kind;
    }

    /// Gives access to the underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Gives mutable access to the underlying graph, e.g. to edit it.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Consumes `self` and returns the graph.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Runs the validator that belongs to the kind of `self`.
    pub fn validate(&self) -> Validity {
        match self.kind {
            FsmKind::Dfa => Validity::Dfa(validate_dfa(&self.graph)),
            FsmKind::Nfa => Validity::Nfa(validate_nfa(&self.graph)),
        }
    }

    /// Computes the configuration that is reached from `active` on `symbol`. For a DFA, only the
    /// first active state is considered and the result holds at most one state.
    pub fn step(&self, active: &OrderedSet<StateId>, symbol: Symbol) -> OrderedSet<StateId> {
        match self.kind {
            FsmKind::Dfa => active
                .first()
                .and_then(|q| self.graph.dfa_step(*q, symbol))
                .into_iter()
                .collect(),
            FsmKind::Nfa => self.graph.nfa_step_all(active.iter().copied(), symbol),
        }
    }

    /// Returns a shortest word that leads from the initial state into an accepting state, if there
    /// is one.
    pub fn accepting_word(&self) -> Option<String> {
        let initial = self.graph.initial_state()?;
        let word = match self.kind {
            FsmKind::Dfa => accepting_word(&self.graph, initial, Deterministic),
            FsmKind::Nfa => accepting_word(&self.graph, initial, Nondeterministic),
        }?;
        Some(word.into_iter().collect())
    }
}

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} over {}", self.kind, self.graph.alphabet().show())?;
        write!(f, "{}", self.graph)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn kind_decides_validator() {
        let graph = GraphBuilder::with_alphabet("ab")
            .with_states([("q0", true, false), ("q1", false, true)])
            .with_edges([(0, "a", 1)])
            .into_graph()
            .unwrap();
        let mut aut = Automaton::new(FsmKind::Dfa, graph);
        assert_eq!(
            aut.validate(),
            Validity::Dfa(DfaValidity::RequireAllInputTransitions)
        );
        aut.set_kind(FsmKind::Nfa);
        assert!(aut.validate().is_ok());
        assert_eq!(aut.accepting_word().as_deref(), Some("a"));
        assert_eq!(aut.validate().to_string(), "NFA is configured correctly!");
    }

    #[test]
    fn kinds_from_strings() {
        assert_eq!("dfa".parse::<FsmKind>(), Ok(FsmKind::Dfa));
        assert_eq!("NFA".parse::<FsmKind>(), Ok(FsmKind::Nfa));
        assert!("pda".parse::<FsmKind>().is_err());
        assert_eq!(FsmKind::Nfa.to_string(), "NFA");
    }

    #[test_log::test]
    fn deterministic_configurations_stay_small() {
        let aut = Automaton::new(FsmKind::Dfa, crate::tests::ends_with_a());
        let q0 = aut.graph().initial_state().unwrap();
        let q1 = aut.graph().nth_state(1).unwrap();
        let active: math::OrderedSet<_> = [q0, q1].into_iter().collect();
        let next = aut.step(&active, 'a');
        assert_eq!(next.into_iter().collect::<Vec<_>>(), vec![q1]);
        assert!(aut.to_string().starts_with("DFA"));
    }
}
