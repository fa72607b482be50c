use itertools::Itertools;
use owo_colors::OwoColorize;

use crate::Show;

use super::Graph;

impl Graph {
    /// Returns a string representation of the transition table. There is one row per state and one
    /// column per alphabet symbol, each cell lists the targets reached on that symbol (or `-`).
    /// Initial states are marked with `->`, accepting ones with `*`.
    pub fn transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet().universe().map(|sym| sym.show())),
        );

        for (id, state) in self.states() {
            let mut name = self.state_name(id);
            if state.is_accepting() {
                name = format!("*{}", name.green());
            }
            if state.is_initial() {
                name = format!("->{}", name.bold());
            }

            let mut row = vec![name];
            for sym in self.alphabet().universe() {
                let targets = self.nfa_step(id, sym);
                if targets.is_empty() {
                    row.push("-".to_string());
                } else {
                    row.push(targets.iter().map(|q| self.state_name(*q)).join(", "));
                }
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.transition_table())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn table_lists_targets() {
        let graph = GraphBuilder::with_alphabet("ab")
            .with_states([("p", true, false), ("q", false, true), ("r", false, false)])
            .with_edges([(0, "a", 1), (0, "a", 2)])
            .into_graph()
            .unwrap();
        let table = graph.to_string();

        assert!(table.contains("State"));
        assert!(table.contains("q, r"));
        assert!(table.contains("->"));
        assert!(table.contains('*'));
    }
}
