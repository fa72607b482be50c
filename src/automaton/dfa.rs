use tracing::{debug, trace};

use crate::transition_system::{
    reachable::{accepting_state_reachable, Deterministic},
    Graph,
};

/// Outcome of [`validate_dfa`]. Everything apart from [`DfaValidity::Ok`] describes the first
/// problem that was found, in the order in which the checks are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DfaValidity {
    /// The graph is a well-formed DFA.
    Ok,
    /// No alphabet symbol is defined.
    EmptyAlphabet,
    /// Some edge fires on a symbol that is not part of the alphabet.
    InputInvalid,
    /// Some state has more than one outgoing edge for the same symbol.
    MultipleTransitionsDefined,
    /// Some state lacks an outgoing edge for some symbol.
    RequireAllInputTransitions,
    /// No state is flagged initial.
    NoInitialState,
    /// No state is flagged accepting.
    NoAcceptingState,
    /// No accepting state can be reached from the initial state.
    AcceptingStateNotReachable,
}

impl DfaValidity {
    /// Returns `true` for [`DfaValidity::Ok`].
    pub fn is_ok(self) -> bool {
        self == DfaValidity::Ok
    }
}

impl std::fmt::Display for DfaValidity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            DfaValidity::Ok => "DFA is configured correctly!",
            DfaValidity::EmptyAlphabet => "Alphabet is not given!",
            DfaValidity::InputInvalid => "Input of a state is not in the alphabet",
            DfaValidity::MultipleTransitionsDefined => {
                "Multiple transitions having same input are not allowed!"
            }
            DfaValidity::RequireAllInputTransitions => {
                "Every state must have all possible transitions defined!"
            }
            DfaValidity::NoInitialState => "Initial state is not selected!",
            DfaValidity::NoAcceptingState => "There is no accepting state!",
            DfaValidity::AcceptingStateNotReachable => "No path to reach accepting state!",
        };
        write!(f, "{msg}")
    }
}

/// Checks whether `graph` is a well-formed DFA. The checks are run in the following order and the
/// first one that fails determines the result:
/// 1. the alphabet must not be empty,
/// 2. every edge may only fire on symbols of the alphabet,
/// 3. every state needs exactly one outgoing edge per symbol (states are checked in order, for each
///    state duplicates are reported before missing symbols),
/// 4. some state must be initial,
/// 5. some state must be accepting and
/// 6. an accepting state must be reachable from the initial state.
///
/// If several states are initial, the last one is used for the reachability check.
pub fn validate_dfa(graph: &Graph) -> DfaValidity {
    let out = check(graph);
    debug!("validated DFA with {} states: {out:?}", graph.size());
    out
}

fn check(graph: &Graph) -> DfaValidity {
    let alphabet = graph.alphabet();
    if alphabet.is_empty() {
        return DfaValidity::EmptyAlphabet;
    }

    if let Some((id, _)) = graph.edges().find(|(_, e)| !alphabet.covers(e.label())) {
        trace!("edge {id:?} uses symbols outside of {alphabet:?}");
        return DfaValidity::InputInvalid;
    }

    let mut initial = None;
    let mut accepting_exists = false;
    for (q, state) in graph.states() {
        if state.is_initial() {
            initial = Some(q);
        }
        accepting_exists |= state.is_accepting();

        let mut tally = vec![0usize; alphabet.size()];
        for (_, edge) in graph.edges_from(q) {
            for pos in edge.label().symbols().filter_map(|sym| alphabet.position(sym)) {
                tally[pos] += 1;
                if tally[pos] > 1 {
                    trace!("state {q:?} has several transitions on {:?}", alphabet[pos]);
                    return DfaValidity::MultipleTransitionsDefined;
                }
            }
        }

        if let Some(pos) = tally.iter().position(|n| *n == 0) {
            trace!("state {q:?} has no transition on {:?}", alphabet[pos]);
            return DfaValidity::RequireAllInputTransitions;
        }
    }

    let Some(initial) = initial else {
        return DfaValidity::NoInitialState;
    };
    if !accepting_exists {
        return DfaValidity::NoAcceptingState;
    }
    if !accepting_state_reachable(graph, initial, Deterministic) {
        return DfaValidity::AcceptingStateNotReachable;
    }

    DfaValidity::Ok
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn dfa<const N: usize>(
        alphabet: &str,
        states: [(&str, bool, bool); 2],
        edges: [(usize, &str, usize); N],
    ) -> Graph {
        GraphBuilder::with_alphabet(alphabet)
            .with_states(states)
            .with_edges(edges)
            .into_graph()
            .unwrap()
    }

    const STATES: [(&str, bool, bool); 2] = [("q0", true, false), ("q1", false, true)];

    #[test_log::test]
    fn complete_dfa_is_valid() {
        let graph = crate::tests::ends_with_a();
        assert_eq!(validate_dfa(&graph), DfaValidity::Ok);
        // validation is pure
        assert_eq!(validate_dfa(&graph), DfaValidity::Ok);

        for q in graph.state_ids() {
            for sym in graph.alphabet().universe() {
                assert!(graph.dfa_step(q, sym).is_some());
                assert_eq!(graph.nfa_step(q, sym).len(), 1);
            }
        }
        let q0 = graph.initial_state().unwrap();
        assert!(graph.accepting_state_reachable(q0, Deterministic));
    }

    #[test_log::test]
    fn missing_transition() {
        let graph = dfa("ab", STATES, [(0, "a", 1), (0, "b", 0), (1, "a", 1)]);
        assert_eq!(validate_dfa(&graph), DfaValidity::RequireAllInputTransitions);
    }

    #[test_log::test]
    fn duplicate_transitions() {
        let graph = dfa(
            "ab",
            STATES,
            [(0, "a", 1), (0, "a", 0), (0, "b", 0), (1, "ab", 1)],
        );
        assert_eq!(validate_dfa(&graph), DfaValidity::MultipleTransitionsDefined);

        // the same target does not make a duplicate acceptable
        let graph = dfa("ab", STATES, [(0, "ab", 1), (0, "a", 1), (1, "ab", 1)]);
        assert_eq!(validate_dfa(&graph), DfaValidity::MultipleTransitionsDefined);

        // duplicates within one label collapse
        let graph = dfa("ab", STATES, [(0, "aab", 1), (1, "abba", 1)]);
        assert_eq!(validate_dfa(&graph), DfaValidity::Ok);
    }

    #[test_log::test]
    fn duplicates_are_reported_before_missing_symbols() {
        let graph = dfa("abc", STATES, [(0, "a", 1), (0, "a", 0)]);
        assert_eq!(validate_dfa(&graph), DfaValidity::MultipleTransitionsDefined);
    }

    #[test_log::test]
    fn unreachable_accepting_state() {
        let graph = dfa("a", STATES, [(0, "a", 0), (1, "a", 1)]);
        assert_eq!(validate_dfa(&graph), DfaValidity::AcceptingStateNotReachable);
    }

    #[test_log::test]
    fn check_order() {
        let empty = dfa("", STATES, [(0, "a", 1)]);
        assert_eq!(validate_dfa(&empty), DfaValidity::EmptyAlphabet);

        let foreign = dfa("a", STATES, [(0, "a", 1), (1, "ab", 1)]);
        assert_eq!(validate_dfa(&foreign), DfaValidity::InputInvalid);

        let no_initial = dfa(
            "a",
            [("q0", false, false), ("q1", false, true)],
            [(0, "a", 1), (1, "a", 1)],
        );
        assert_eq!(validate_dfa(&no_initial), DfaValidity::NoInitialState);

        let no_accepting = dfa(
            "a",
            [("q0", true, false), ("q1", false, false)],
            [(0, "a", 1), (1, "a", 1)],
        );
        assert_eq!(validate_dfa(&no_accepting), DfaValidity::NoAcceptingState);

        // the missing transition of q1 is found before the lack of an initial state
        let both = dfa("a", [("q0", false, false), ("q1", false, true)], [(0, "a", 1)]);
        assert_eq!(validate_dfa(&both), DfaValidity::RequireAllInputTransitions);
    }

    #[test_log::test]
    fn initial_state_may_be_accepting() {
        let graph = dfa(
            "a",
            [("q0", true, true), ("q1", false, false)],
            [(0, "a", 1), (1, "a", 1)],
        );
        assert_eq!(validate_dfa(&graph), DfaValidity::Ok);
    }

    #[test_log::test]
    fn last_initial_state_is_used() {
        let graph = GraphBuilder::with_alphabet("a")
            .with_states([
                ("dead", true, false),
                ("s", true, false),
                ("acc", false, true),
            ])
            .with_edges([(0, "a", 0), (1, "a", 2), (2, "a", 2)])
            .into_graph()
            .unwrap();
        assert_eq!(validate_dfa(&graph), DfaValidity::Ok);

        let mut swapped = graph.clone();
        let [dead, s] = [0, 1].map(|i| swapped.nth_state(i).unwrap());
        swapped.set_initial(s, false).unwrap();
        assert_eq!(swapped.initial_state(), Some(dead));
        assert_eq!(
            validate_dfa(&swapped),
            DfaValidity::AcceptingStateNotReachable
        );
    }

    #[test]
    fn messages() {
        assert_eq!(
            DfaValidity::EmptyAlphabet.to_string(),
            "Alphabet is not given!"
        );
        assert_eq!(
            DfaValidity::AcceptingStateNotReachable.to_string(),
            "No path to reach accepting state!"
        );
        assert!(DfaValidity::Ok.is_ok());
        assert!(!DfaValidity::InputInvalid.is_ok());
    }
}
