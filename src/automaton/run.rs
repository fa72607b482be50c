use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    alphabet::Symbol,
    math::OrderedSet,
    transition_system::{EdgeId, StateId},
};

use super::{Automaton, FsmKind, Validity};

/// Reasons why an input word cannot be simulated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// The automaton does not pass validation.
    #[error("{0}")]
    Invalid(Validity),
    /// The input contains a character that is not part of the alphabet.
    #[error("Invalid input! {symbol:?} at position {position} is not in the alphabet")]
    InvalidInput {
        /// The offending character.
        symbol: Symbol,
        /// Its position in the input, counted in characters.
        position: usize,
    },
}

/// Whether a word is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Some state that is active after the last symbol is accepting.
    Accepted,
    /// No active state is accepting, or no state is active at all.
    Rejected,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "accepted"),
            Verdict::Rejected => write!(f, "rejected"),
        }
    }
}

/// A single step of a simulation, i.e. the consumption of one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Position of the consumed symbol in the input.
    pub position: usize,
    /// The consumed symbol.
    pub symbol: Symbol,
    /// The edges that fired.
    pub fired: Vec<EdgeId>,
    /// The states that are active after the step.
    pub active: OrderedSet<StateId>,
}

/// Lazily consumes an input word symbol by symbol, see [`Automaton::simulate`].
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    automaton: &'a Automaton,
    input: std::iter::Enumerate<std::str::Chars<'a>>,
    initial: OrderedSet<StateId>,
    active: OrderedSet<StateId>,
}

impl<'a> Simulation<'a> {
    /// Returns the states that are currently active.
    pub fn active(&self) -> &OrderedSet<StateId> {
        &self.active
    }

    /// Returns the verdict for the part of the input that has been consumed so far.
    pub fn verdict(&self) -> Verdict {
        let graph = self.automaton.graph();
        if self.active.iter().any(|q| graph.is_accepting(*q)) {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }

    /// Consumes the remaining input and returns the [`Run`]. Steps that have already been taken
    /// through the iterator are not part of it, but they are accounted for in the states that are
    /// reached and in the verdict.
    pub fn finish(mut self) -> Run {
        let initial = std::mem::take(&mut self.initial);
        let steps: Vec<Step> = self.by_ref().collect();
        let verdict = self.verdict();
        debug!("consumed {} symbols, input is {verdict}", steps.len());
        Run {
            initial,
            steps,
            reached: self.active,
            verdict,
        }
    }
}

impl<'a> Iterator for Simulation<'a> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        let (position, symbol) = self.input.next()?;
        let graph = self.automaton.graph();

        let fired = match self.automaton.kind() {
            FsmKind::Dfa => self
                .active
                .first()
                .and_then(|q| graph.dfa_edge(*q, symbol))
                .into_iter()
                .collect(),
            FsmKind::Nfa => graph.fired_edges(&self.active, symbol),
        };
        self.active = self.automaton.step(&self.active, symbol);
        trace!(
            "consumed {symbol:?} at {position}, fired {fired:?}, now in {:?}",
            self.active
        );

        Some(Step {
            position,
            symbol,
            fired,
            active: self.active.clone(),
        })
    }
}

/// The complete record of a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    initial: OrderedSet<StateId>,
    steps: Vec<Step>,
    reached: OrderedSet<StateId>,
    verdict: Verdict,
}

impl Run {
    /// Returns the configuration before the first symbol was read.
    pub fn initial(&self) -> &OrderedSet<StateId> {
        &self.initial
    }

    /// Returns the steps in the order in which they were taken.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the states that are active after the whole input has been consumed.
    pub fn reached(&self) -> &OrderedSet<StateId> {
        &self.reached
    }

    /// Returns the verdict.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Returns `true` if the input is accepted.
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }
}

impl Automaton {
    /// Prepares the simulation of `input`. The automaton has to pass validation and `input` may only
    /// use symbols of the alphabet. The simulation starts in the initial state; if several states
    /// are flagged initial, the last one is used.
    pub fn simulate<'a>(&'a self, input: &'a str) -> Result<Simulation<'a>, RunError> {
        let validity = self.validate();
        if !validity.is_ok() {
            return Err(RunError::Invalid(validity));
        }
        if let Some((position, symbol)) = self.graph().alphabet().first_foreign(input) {
            return Err(RunError::InvalidInput { symbol, position });
        }

        let initial: OrderedSet<StateId> = self.graph().initial_state().into_iter().collect();
        Ok(Simulation {
            automaton: self,
            input: input.chars().enumerate(),
            active: initial.clone(),
            initial,
        })
    }

    /// Simulates `input` to the end, see [`Automaton::simulate`].
    pub fn run(&self, input: &str) -> Result<Run, RunError> {
        Ok(self.simulate(input)?.finish())
    }

    /// Returns `true` if the automaton is valid and accepts `input`.
    pub fn accepts(&self, input: &str) -> bool {
        self.run(input).is_ok_and(|run| run.is_accepted())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn ends_with_a() -> Automaton {
        Automaton::new(FsmKind::Dfa, crate::tests::ends_with_a())
    }

    #[test_log::test]
    fn deterministic_run() {
        let aut = ends_with_a();
        let q0 = aut.graph().nth_state(0).unwrap();
        let q1 = aut.graph().nth_state(1).unwrap();

        let run = aut.run("aba").unwrap();
        assert!(run.is_accepted());
        assert_eq!(run.steps().len(), 3);
        assert_eq!(run.initial().iter().copied().collect::<Vec<_>>(), vec![q0]);
        assert_eq!(
            run.steps()
                .iter()
                .map(|s| s.active.iter().copied().collect::<Vec<_>>())
                .collect::<Vec<_>>(),
            vec![vec![q1], vec![q0], vec![q1]]
        );
        for step in run.steps() {
            assert_eq!(step.fired.len(), 1);
        }

        assert_eq!(aut.run("ab").unwrap().verdict(), Verdict::Rejected);
        assert!(!aut.accepts(""));
        assert_eq!(aut.run("").unwrap().reached().len(), 1);
    }

    #[test_log::test]
    fn nondeterministic_run() {
        let aut = GraphBuilder::with_alphabet("ab")
            .with_states([
                ("q0", true, false),
                ("q1", false, false),
                ("q2", false, true),
            ])
            .with_edges([(0, "ab", 0), (0, "a", 1), (1, "b", 2)])
            .into_automaton(FsmKind::Nfa)
            .unwrap();

        assert!(aut.accepts("ab"));
        assert!(aut.accepts("bbab"));
        assert!(!aut.accepts("aba"));

        let mut sim = aut.simulate("ab").unwrap();
        let first = sim.next().unwrap();
        assert_eq!(first.active.len(), 2);
        assert_eq!(first.fired.len(), 2);
        assert_eq!(sim.verdict(), Verdict::Rejected);
        let second = sim.next().unwrap();
        assert_eq!(second.position, 1);
        assert_eq!(sim.verdict(), Verdict::Accepted);
        assert!(sim.next().is_none());
    }

    #[test_log::test]
    fn empty_configuration_rejects() {
        let aut = GraphBuilder::with_alphabet("ab")
            .with_states([("q0", true, false), ("q1", false, true)])
            .with_edges([(0, "a", 1)])
            .into_automaton(FsmKind::Nfa)
            .unwrap();

        let run = aut.run("ba").unwrap();
        assert_eq!(run.steps().len(), 2);
        assert!(run.steps().iter().all(|s| s.active.is_empty()));
        assert!(run.reached().is_empty());
        assert_eq!(run.verdict(), Verdict::Rejected);
    }

    #[test_log::test]
    fn finishing_a_partially_consumed_simulation() {
        let aut = ends_with_a();
        let q0 = aut.graph().nth_state(0).unwrap();
        let q1 = aut.graph().nth_state(1).unwrap();

        let mut sim = aut.simulate("a").unwrap();
        assert!(sim.next().is_some());
        let run = sim.finish();
        assert!(run.steps().is_empty());
        assert_eq!(run.verdict(), Verdict::Accepted);
        assert_eq!(run.reached().iter().copied().collect::<Vec<_>>(), vec![q1]);
        assert_eq!(run.initial().iter().copied().collect::<Vec<_>>(), vec![q0]);

        let mut sim = aut.simulate("ab").unwrap();
        sim.next();
        let run = sim.finish();
        assert_eq!(run.steps().len(), 1);
        assert_eq!(run.reached().iter().copied().collect::<Vec<_>>(), vec![q0]);
        assert!(!run.is_accepted());
    }

    #[test_log::test]
    fn starts_in_last_initial_state() {
        let aut = GraphBuilder::with_alphabet("a")
            .with_states([
                ("dead", true, false),
                ("s", true, false),
                ("acc", false, true),
            ])
            .with_edges([(0, "a", 0), (1, "a", 2), (2, "a", 2)])
            .into_automaton(FsmKind::Dfa)
            .unwrap();
        let s = aut.graph().nth_state(1).unwrap();

        let run = aut.run("a").unwrap();
        assert_eq!(run.initial().iter().copied().collect::<Vec<_>>(), vec![s]);
        assert!(run.is_accepted());
        assert!(!aut.accepts(""));
    }

    #[test_log::test]
    fn refuses_invalid_automata_and_input() {
        let aut = ends_with_a();
        assert_eq!(
            aut.run("abc").unwrap_err(),
            RunError::InvalidInput {
                symbol: 'c',
                position: 2
            }
        );

        let mut broken = aut.clone();
        let q1 = broken.graph().nth_state(1).unwrap();
        broken.graph_mut().set_accepting(q1, false).unwrap();
        assert_eq!(
            broken.run("a").unwrap_err(),
            RunError::Invalid(Validity::Dfa(DfaValidity::NoAcceptingState))
        );
        assert!(!broken.accepts("a"));
        assert_eq!(
            broken.run("a").unwrap_err().to_string(),
            "There is no accepting state!"
        );
    }
}
