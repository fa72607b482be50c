/// Defines opaque handles for states and edges.
pub mod id;

mod state;
pub use state::{State, StateId, StateKind};

mod edge;
pub use edge::{Edge, EdgeId, EdgeKind};

mod graph;
pub use graph::{Graph, GraphError};

mod builder;
pub use builder::GraphBuilder;

/// The transition engine, i.e. successor computation for a single symbol.
pub mod step;
pub use step::{dfa_step, nfa_step, nfa_step_all};

/// Search for accepting states that are reachable from a given state.
pub mod reachable;

mod table;
