//! Library for validating and simulating finite state machines (DFA/NFA) as they are drawn in an
//! editor.
//!
//! An automaton consists of a [`transition_system::Graph`] together with a kind, which is either
//! deterministic or nondeterministic. The graph is simply a collection of states, each of which may be
//! flagged initial and/or accepting, that are connected with directed edges. Every edge carries a label,
//! which is a set of symbols from a [`CharAlphabet`]. An edge labelled `"ab"` fires on `'a'` as well as on
//! `'b'`. States and edges are identified by opaque handles ([`transition_system::StateId`] and
//! [`transition_system::EdgeId`]) that are handed out on creation, so two states with the same name are
//! still distinct.
//!
//! On top of the graph, the crate provides
//! - the transition engine, i.e. [`transition_system::Graph::dfa_step`] and [`transition_system::Graph::nfa_step`],
//!   which compute successors for a single symbol,
//! - a reachability search (see [`transition_system::reachable`]) that decides whether an accepting state can be
//!   reached from some state under any input,
//! - the validators [`automaton::validate_dfa`] and [`automaton::validate_nfa`], which report the most fundamental
//!   problem of a graph as a plain enum value, and
//! - a simulation driver ([`automaton::Automaton::run`]) that consumes an input word step by step.
//!
//! None of these ever mutate the graph, and apart from a transient visited set no state is kept between calls.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use stateflow::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{CharAlphabet, Symbol, SymbolSet},
        automaton::{
            validate_dfa, validate_nfa, Automaton, DfaValidity, FsmKind, NfaValidity, Run,
            RunError, Simulation, Step, Validity, Verdict,
        },
        math,
        transition_system::{
            reachable::{Deterministic, Nondeterministic, Successors},
            Edge, EdgeId, Graph, GraphBuilder, GraphError, State, StateId,
        },
        Show,
    };
}

/// This module contains the collection types which are used throughout the crate.
pub mod math;

/// Module that contains definitions for dealing with alphabets and edge labels.
pub mod alphabet;
pub use alphabet::CharAlphabet;

/// This module defines the graph of states and edges, the successor functions and reachability.
pub mod transition_system;
pub use transition_system::Graph;

/// Defines automata, their validation and the simulation of input words.
pub mod automaton;
pub use automaton::Automaton;

/// Helper trait which can be used to display states, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state that should be
    /// for example its name, for a label something like `a,b`.
    fn show(&self) -> String;
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!(
            "{{{}}}",
            itertools::Itertools::join(&mut self.iter().map(|x| x.show()), ", ")
        )
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
