use tracing::{debug, trace};

use crate::transition_system::{
    reachable::{accepting_state_reachable, Nondeterministic},
    Graph, StateId,
};

/// Outcome of [`validate_nfa`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NfaValidity {
    /// The graph is a well-formed NFA.
    Ok,
    /// No alphabet symbol is defined.
    EmptyAlphabet,
    /// Some edge fires on a symbol that is not part of the alphabet.
    InputInvalid,
    /// No state is flagged initial.
    NoInitialState,
    /// No state is flagged accepting.
    NoAcceptingState,
    /// No accepting state can be reached from the initial state.
    AcceptingStateNotReachable,
}

impl NfaValidity {
    /// Returns `true` for [`NfaValidity::Ok`].
    pub fn is_ok(self) -> bool {
        self == NfaValidity::Ok
    }
}

impl std::fmt::Display for NfaValidity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            NfaValidity::Ok => "NFA is configured correctly!",
            NfaValidity::EmptyAlphabet => "Alphabet is not given!",
            NfaValidity::InputInvalid => "Input of a state is not in the alphabet",
            NfaValidity::NoInitialState => "Initial state is not selected!",
            NfaValidity::NoAcceptingState => "There is no accepting state!",
            NfaValidity::AcceptingStateNotReachable => "No path to reach accepting state!",
        };
        write!(f, "{msg}")
    }
}

/// Checks whether `graph` is a well-formed NFA. This runs the same checks as
/// [`super::validate_dfa`], except that states may have any number of outgoing edges per symbol.
/// The reachability check follows every matching edge.
///
/// The states are scanned in creation order until both an initial and an accepting state have been
/// seen. The reachability check starts in the last initial state found up to that point, so an
/// initial state that comes after the first accepting one is only used if no earlier state is
/// initial.
pub fn validate_nfa(graph: &Graph) -> NfaValidity {
    let alphabet = graph.alphabet();
    let out = if alphabet.is_empty() {
        NfaValidity::EmptyAlphabet
    } else if graph.edges().any(|(_, e)| !alphabet.covers(e.label())) {
        NfaValidity::InputInvalid
    } else if let Some(initial) = search_start(graph) {
        if graph.accepting_states().next().is_none() {
            NfaValidity::NoAcceptingState
        } else if !accepting_state_reachable(graph, initial, Nondeterministic) {
            trace!("searched from {initial:?} without success");
            NfaValidity::AcceptingStateNotReachable
        } else {
            NfaValidity::Ok
        }
    } else {
        NfaValidity::NoInitialState
    };
    debug!("validated NFA with {} states: {out:?}", graph.size());
    out
}

fn search_start(graph: &Graph) -> Option<StateId> {
    let mut initial = None;
    let mut accepting = false;
    for (q, state) in graph.states() {
        if state.is_initial() {
            initial = Some(q);
        }
        accepting |= state.is_accepting();
        if initial.is_some() && accepting {
            break;
        }
    }
    initial
}
