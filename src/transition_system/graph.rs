use thiserror::Error;
use tracing::{debug, error, trace};

use crate::{
    alphabet::{CharAlphabet, SymbolSet},
    math::OrderedMap,
};

use super::{
    edge::EdgeKind,
    id::IdGenerator,
    state::StateKind,
    Edge, EdgeId, State, StateId,
};

/// Errors that can occur when editing a [`Graph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The given state handle does not refer to a state of the graph.
    #[error("state {0:?} does not exist")]
    UnknownState(StateId),
    /// The given edge handle does not refer to an edge of the graph.
    #[error("edge {0:?} does not exist")]
    UnknownEdge(EdgeId),
    /// Edges must fire on at least one symbol.
    #[error("an edge needs at least one input symbol")]
    EmptyLabel,
    /// Every handle of the given kind has been used up.
    #[error("no more {0} handles are available")]
    OutOfHandles(&'static str),
    /// A positional state index used during construction is out of range.
    #[error("state index {index} is out of range, there are only {states} states")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of states that exist.
        states: usize,
    },
}

/// The graph of states and transition lines as it is drawn in the editor, together with the alphabet
/// that its labels are supposed to use. States and edges are stored in creation order and are
/// referred to through handles which stay valid until the object is removed.
///
/// The graph does not enforce any well-formedness, labels may use symbols outside of the alphabet,
/// several states may be initial and several edges may connect the same pair of states. Use
/// [`crate::automaton::validate_dfa`] and [`crate::automaton::validate_nfa`] to check it.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub(super) alphabet: CharAlphabet,
    pub(super) states: OrderedMap<StateId, State>,
    pub(super) edges: OrderedMap<EdgeId, Edge>,
    state_ids: IdGenerator<StateKind>,
    edge_ids: IdGenerator<EdgeKind>,
}

impl Graph {
    /// Creates an empty graph over the given alphabet.
    pub fn new<A: Into<CharAlphabet>>(alphabet: A) -> Self {
        Self {
            alphabet: alphabet.into(),
            ..Default::default()
        }
    }

    /// Returns a reference to the alphabet.
    pub fn alphabet(&self) -> &CharAlphabet {
        &self.alphabet
    }

    /// Replaces the alphabet. Labels are left untouched.
    pub fn set_alphabet<A: Into<CharAlphabet>>(&mut self, alphabet: A) {
        self.alphabet = alphabet.into();
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds a state and returns its freshly created handle. Fails only if the graph has run out
    /// of handles.
    pub fn add_state(&mut self, state: State) -> Result<StateId, GraphError> {
        let id = self
            .state_ids
            .fresh()
            .ok_or(GraphError::OutOfHandles("state"))?;
        trace!("adding state {id:?} named {:?}", state.name);
        self.states.insert(id, state);
        Ok(id)
    }

    /// Adds a new edge from `source` to `target`, even if these two are already connected.
    pub fn add_edge<L: Into<SymbolSet>>(
        &mut self,
        source: StateId,
        label: L,
        target: StateId,
    ) -> Result<EdgeId, GraphError> {
        self.ensure_state(source)?;
        self.ensure_state(target)?;
        let label = label.into();
        if label.is_empty() {
            return Err(GraphError::EmptyLabel);
        }

        let id = self
            .edge_ids
            .fresh()
            .ok_or(GraphError::OutOfHandles("edge"))?;
        trace!("adding edge {id:?} from {source:?} to {target:?}");
        self.edges.insert(id, Edge::new(source, label, target));
        Ok(id)
    }

    /// Connects `source` with `target` on the given symbols. If there already is an edge between the
    /// two (in this direction), the symbols are appended to its label and its handle is returned.
    /// Otherwise a new edge is created.
    pub fn connect<L: Into<SymbolSet>>(
        &mut self,
        source: StateId,
        label: L,
        target: StateId,
    ) -> Result<EdgeId, GraphError> {
        let label = label.into();
        if label.is_empty() {
            return Err(GraphError::EmptyLabel);
        }
        if let Some((id, edge)) = self
            .edges
            .iter_mut()
            .find(|(_, e)| e.source == source && e.target == target)
        {
            edge.label.extend_from(&label);
            return Ok(*id);
        }
        self.add_edge(source, label, target)
    }

    /// Removes a state together with every edge that enters or leaves it.
    pub fn remove_state(&mut self, id: StateId) -> Result<State, GraphError> {
        let state = self
            .states
            .shift_remove(&id)
            .ok_or_else(|| unknown_state(id))?;
        let before = self.edges.len();
        self.edges.retain(|_, e| e.source != id && e.target != id);
        debug!(
            "removed state {id:?} and {} incident edges",
            before - self.edges.len()
        );
        Ok(state)
    }

    /// Removes an edge.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge, GraphError> {
        self.edges.shift_remove(&id).ok_or_else(|| {
            error!("cannot remove edge {id:?}, it does not exist");
            GraphError::UnknownEdge(id)
        })
    }

    /// Flags or unflags the state as initial. Other states keep their flag.
    pub fn set_initial(&mut self, id: StateId, initial: bool) -> Result<(), GraphError> {
        self.state_mut(id)?.initial = initial;
        Ok(())
    }

    /// Flags or unflags the state as accepting.
    pub fn set_accepting(&mut self, id: StateId, accepting: bool) -> Result<(), GraphError> {
        self.state_mut(id)?.accepting = accepting;
        Ok(())
    }

    /// Changes the name of the state.
    pub fn rename<S: Into<String>>(&mut self, id: StateId, name: S) -> Result<(), GraphError> {
        self.state_mut(id)?.name = name.into();
        Ok(())
    }

    /// Returns the state for the given handle.
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(&id)
    }

    /// Returns the edge for the given handle.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Returns `true` if the handle refers to a state of `self`.
    pub fn contains_state(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    /// Returns the state at the given position (in creation order, ignoring removed states).
    pub fn nth_state(&self, position: usize) -> Option<StateId> {
        self.states.get_index(position).map(|(id, _)| *id)
    }

    /// Iterates over all states in creation order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> + '_ {
        self.states.iter().map(|(id, s)| (*id, s))
    }

    /// Iterates over the handles of all states in creation order.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.keys().copied()
    }

    /// Iterates over all edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().map(|(id, e)| (*id, e))
    }

    /// Iterates over the edges leaving `source`, in creation order.
    pub fn edges_from(&self, source: StateId) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges().filter(move |(_, e)| e.source == source)
    }

    /// Returns the initial state. If several states are flagged initial, the last one
    /// (in creation order) is picked.
    pub fn initial_state(&self) -> Option<StateId> {
        self.initial_states().last()
    }

    /// Iterates over every state flagged initial.
    pub fn initial_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states().filter(|(_, s)| s.initial).map(|(id, _)| id)
    }

    /// Iterates over every accepting state.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states().filter(|(_, s)| s.accepting).map(|(id, _)| id)
    }

    /// Returns `true` if `id` refers to an accepting state.
    pub fn is_accepting(&self, id: StateId) -> bool {
        self.state(id).is_some_and(State::is_accepting)
    }

    /// Returns the name of the state, or its handle if the name is empty.
    pub fn state_name(&self, id: StateId) -> String {
        match self.state(id) {
            Some(s) if !s.name.is_empty() => s.name.clone(),
            _ => format!("{id:?}"),
        }
    }

    fn ensure_state(&self, id: StateId) -> Result<(), GraphError> {
        if self.contains_state(id) {
            Ok(())
        } else {
            Err(unknown_state(id))
        }
    }

    fn state_mut(&mut self, id: StateId) -> Result<&mut State, GraphError> {
        self.states.get_mut(&id).ok_or_else(|| unknown_state(id))
    }
}

fn unknown_state(id: StateId) -> GraphError {
    error!("state {id:?} is not part of the graph");
    GraphError::UnknownState(id)
}
