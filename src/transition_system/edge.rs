use crate::alphabet::{Symbol, SymbolSet};

use super::{
    id::{Id, IdKind},
    StateId,
};

/// Marker for handles that refer to an [`Edge`].
#[derive(Debug, Clone, Copy)]
pub struct EdgeKind;

impl IdKind for EdgeKind {
    const PREFIX: &'static str = "e";
}

/// Handle of an edge in a [`super::Graph`].
pub type EdgeId = Id<EdgeKind>;

/// Represents a transition line of the graph. It stores a source and target state handle as well as
/// the label, which is the set of symbols on which the edge fires. Source and target may coincide.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Edge {
    pub(super) source: StateId,
    pub(super) target: StateId,
    pub(super) label: SymbolSet,
}

impl Edge {
    /// Creates a new edge with the given source, label and target.
    pub fn new<L: Into<SymbolSet>>(source: StateId, label: L, target: StateId) -> Self {
        Self {
            source,
            target,
            label: label.into(),
        }
    }

    /// Returns the handle of the state the edge leaves.
    pub fn source(&self) -> StateId {
        self.source
    }

    /// Returns the handle of the state the edge enters.
    pub fn target(&self) -> StateId {
        self.target
    }

    /// Returns the symbols on which the edge fires.
    pub fn label(&self) -> &SymbolSet {
        &self.label
    }

    /// Returns `true` if the edge leaves `state` and fires on `symbol`.
    pub fn fires(&self, state: StateId, symbol: Symbol) -> bool {
        self.source == state && self.label.matched_by(symbol)
    }

    /// Returns `true` if the edge is a self-loop.
    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }
}
