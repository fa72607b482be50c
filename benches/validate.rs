use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stateflow::prelude::*;

/// A DFA over `ab` that counts the `a`s modulo `n` and accepts when the count is zero.
fn counter(n: usize) -> Automaton {
    let states = (0..n).map(|i| (format!("q{i}"), i == 0, i == n - 1));
    let edges = (0..n).flat_map(|i| [(i, "a", (i + 1) % n), (i, "b", i)]);
    GraphBuilder::with_alphabet("ab")
        .with_states(states)
        .with_edges(edges)
        .into_automaton(FsmKind::Dfa)
        .unwrap()
}

fn validation(c: &mut Criterion) {
    let dfa = counter(200);
    let mut nfa = dfa.clone();
    nfa.set_kind(FsmKind::Nfa);

    c.bench_function("validate dfa", |b| {
        b.iter(|| black_box(&dfa).validate())
    });
    c.bench_function("validate nfa", |b| {
        b.iter(|| black_box(&nfa).validate())
    });

    let input = "ab".repeat(500);
    c.bench_function("run dfa", |b| {
        b.iter(|| black_box(&dfa).run(black_box(&input)).unwrap())
    });
    c.bench_function("run nfa", |b| {
        b.iter(|| black_box(&nfa).run(black_box(&input)).unwrap())
    });
}

criterion_group!(benches, validation);
criterion_main!(benches);
