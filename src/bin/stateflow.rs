use owo_colors::OwoColorize;
use stateflow::prelude::*;

use thiserror::Error;
use tracing::{debug, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgAction, ArgMatches, Command};

#[derive(Debug, Error)]
enum CliError {
    #[error("malformed state {0:?}, expected NAME or NAME:FLAGS with flags `i` (initial) and `a` (accepting)")]
    MalformedState(String),
    #[error("malformed edge {0:?}, expected FROM:SYMBOLS:TO")]
    MalformedEdge(String),
    #[error("edge refers to unknown state {0:?}")]
    UnknownStateName(String),
    #[error(transparent)]
    Kind(#[from] stateflow::automaton::UnknownKind),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Run(#[from] RunError),
}

fn machine_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("kind")
            .short('k')
            .long("kind")
            .value_parser(["dfa", "nfa"])
            .default_value("dfa")
            .help("how the graph is interpreted"),
    )
    .arg(
        Arg::new("alphabet")
            .short('a')
            .long("alphabet")
            .default_value("")
            .help("the input symbols, e.g. `ab`"),
    )
    .arg(
        Arg::new("state")
            .short('s')
            .long("state")
            .action(ArgAction::Append)
            .help("a state given as NAME[:FLAGS], e.g. `q0:i` or `q1:a`"),
    )
    .arg(
        Arg::new("edge")
            .short('e')
            .long("edge")
            .action(ArgAction::Append)
            .help("an edge given as FROM:SYMBOLS:TO, e.g. `q0:ab:q1`"),
    )
}

fn cli() -> clap::Command {
    Command::new("stateflow")
        .about("Validate and simulate finite state machines")
        .subcommand_required(true)
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .subcommand(machine_args(
            Command::new("check").about("validates the automaton and reports the first problem"),
        ))
        .subcommand(machine_args(
            Command::new("table").about("prints the transition table"),
        ))
        .subcommand(machine_args(
            Command::new("run")
                .about("simulates the automaton on the given input word")
                .arg(Arg::new("input").required(true)),
        ))
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn parse_automaton(matches: &ArgMatches) -> Result<Automaton, CliError> {
    let kind: FsmKind = matches
        .get_one::<String>("kind")
        .map(String::as_str)
        .unwrap_or("dfa")
        .parse()?;
    let alphabet = matches
        .get_one::<String>("alphabet")
        .map(String::as_str)
        .unwrap_or_default();
    let mut graph = Graph::new(alphabet);

    for spec in matches.get_many::<String>("state").into_iter().flatten() {
        let (name, flags) = spec.split_once(':').unwrap_or((spec.as_str(), ""));
        if flags.chars().any(|c| c != 'i' && c != 'a') {
            return Err(CliError::MalformedState(spec.clone()));
        }
        graph.add_state(State::new(name, flags.contains('i'), flags.contains('a')))?;
    }

    let lookup = |graph: &Graph, name: &str| {
        graph
            .states()
            .find(|(_, s)| s.name() == name)
            .map(|(id, _)| id)
            .ok_or_else(|| CliError::UnknownStateName(name.to_string()))
    };
    for spec in matches.get_many::<String>("edge").into_iter().flatten() {
        let parts: Vec<&str> = spec.split(':').collect();
        let &[from, symbols, to] = parts.as_slice() else {
            return Err(CliError::MalformedEdge(spec.clone()));
        };
        let source = lookup(&graph, from)?;
        let target = lookup(&graph, to)?;
        graph.connect(source, symbols, target)?;
    }

    debug!(
        "read {kind} with {} states and {} edges",
        graph.size(),
        graph.edge_count()
    );
    Ok(Automaton::new(kind, graph))
}

fn execute(matches: &ArgMatches) -> Result<bool, CliError> {
    match matches.subcommand() {
        Some(("check", sub)) => {
            let aut = parse_automaton(sub)?;
            let validity = aut.validate();
            if validity.is_ok() {
                println!("{}", validity.green());
                if let Some(word) = aut.accepting_word() {
                    info!("shortest accepted word is {word:?}");
                }
            } else {
                println!("{}", validity.red());
            }
            Ok(validity.is_ok())
        }
        Some(("table", sub)) => {
            let aut = parse_automaton(sub)?;
            println!("{aut}");
            Ok(true)
        }
        Some(("run", sub)) => {
            let aut = parse_automaton(sub)?;
            let input = sub
                .get_one::<String>("input")
                .map(String::as_str)
                .unwrap_or_default();

            let start = std::time::Instant::now();
            let run = aut.run(input)?;
            info!("simulation took {}µs", start.elapsed().as_micros());

            let names = |states: &math::OrderedSet<StateId>| {
                states
                    .iter()
                    .map(|q| aut.graph().state_name(*q))
                    .collect::<Vec<_>>()
                    .show()
            };
            println!("start {}", names(run.initial()));
            for step in run.steps() {
                println!(
                    "{} --{}--> {}",
                    step.position,
                    step.symbol,
                    names(&step.active)
                );
            }
            match run.verdict() {
                Verdict::Accepted => println!("{}", run.verdict().green()),
                Verdict::Rejected => println!("{}", run.verdict().red()),
            }
            Ok(run.is_accepted())
        }
        _ => unreachable!("a subcommand is required"),
    }
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match execute(&matches) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", e.red());
            std::process::exit(2);
        }
    }
}
