use super::id::{Id, IdKind};

/// Marker for handles that refer to a [`State`].
#[derive(Debug, Clone, Copy)]
pub struct StateKind;

impl IdKind for StateKind {
    const PREFIX: &'static str = "q";
}

/// Handle of a state in a [`super::Graph`]. Two states are the same iff their handles are equal,
/// regardless of their names.
pub type StateId = Id<StateKind>;

/// A state (or node) of a graph. The name is purely cosmetic, it may be empty and several states
/// may share it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct State {
    pub(super) name: String,
    pub(super) initial: bool,
    pub(super) accepting: bool,
}

impl State {
    /// Creates a new state with the given name and flags.
    pub fn new<S: Into<String>>(name: S, initial: bool, accepting: bool) -> Self {
        Self {
            name: name.into(),
            initial,
            accepting,
        }
    }

    /// Returns the name of the state.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the state is flagged as initial.
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Returns `true` if the state is flagged as accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}
