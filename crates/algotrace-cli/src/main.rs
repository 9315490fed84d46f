//! algotrace command-line front end.
//!
//! Provides the `algotrace` binary:
//! - `list` prints the available algorithms
//! - `record` runs one algorithm and prints its step list as text or JSON
//! - `play` records, then replays the steps on a timer
//!
//! Reads `ALGOTRACE_SPEED_MS` for the default playback delay; `--speed-ms`
//! overrides it. Logs go to stderr so recordings on stdout stay clean.

mod error;
mod input;
mod render;

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use algotrace_algorithms::{
    lookup, BinarySearch, BreadthFirst, BstInsert, BstSearch, BubbleSort, DepthFirst,
    EditDistance, InsertionSort, Knapsack, MergeSort, PatternSearch, QuickSort, CATALOGUE,
};
use algotrace_core::{Algorithm, Snapshot, StepKind, StepList};
use algotrace_playback::{PlaybackConfig, PlaybackState, Player, Renderer};

use error::CliError;
use input::InputArgs;
use render::{metrics_line, TextRenderer};

/// Record and replay algorithm executions step by step.
#[derive(Parser)]
#[command(name = "algotrace", about = "Record and replay algorithm executions")]
struct Cli {
    /// Log recorder and playback internals to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the available algorithms.
    List,

    /// Record an algorithm and print its step list.
    Record {
        /// Algorithm name (see `algotrace list`).
        algorithm: String,

        #[command(flatten)]
        input: InputArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Print each step's state as JSON under its narration.
        #[arg(long)]
        show_state: bool,
    },

    /// Record an algorithm, then replay it on a timer.
    Play {
        /// Algorithm name (see `algotrace list`).
        algorithm: String,

        #[command(flatten)]
        input: InputArgs,

        /// Delay between steps in milliseconds (default: $ALGOTRACE_SPEED_MS or 500).
        #[arg(long)]
        speed_ms: Option<u64>,

        /// Print each step's state as JSON under its narration.
        #[arg(long)]
        show_state: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// What to do with a recorded list.
#[derive(Debug, Clone, Copy)]
enum Mode {
    Print {
        format: Format,
        renderer: TextRenderer,
    },
    Play {
        config: PlaybackConfig,
        renderer: TextRenderer,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    let result = match cli.command {
        Commands::List => run_list(),
        Commands::Record {
            algorithm,
            input,
            format,
            show_state,
        } => {
            let mode = Mode::Print {
                format,
                renderer: TextRenderer { show_state },
            };
            run_algorithm(&algorithm, &input, mode).await
        }
        Commands::Play {
            algorithm,
            input,
            speed_ms,
            show_state,
        } => {
            let mut config = PlaybackConfig::from_env();
            if let Some(ms) = speed_ms {
                config = config.with_speed(Duration::from_millis(ms));
            }
            let mode = Mode::Play {
                config,
                renderer: TextRenderer { show_state },
            };
            run_algorithm(&algorithm, &input, mode).await
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

fn run_list() -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    for entry in CATALOGUE {
        writeln!(
            out,
            "{:<16} {:<7} {:<15} {}",
            entry.name,
            entry.family,
            entry.input.label(),
            entry.summary
        )?;
    }
    Ok(())
}

/// Resolves the algorithm by name, builds its input from the flags, records
/// it and hands the list to `mode`.
async fn run_algorithm(name: &str, args: &InputArgs, mode: Mode) -> Result<(), CliError> {
    let entry = lookup(name).ok_or_else(|| {
        CliError::usage(format!("unknown algorithm '{name}'; run `algotrace list`"))
    })?;
    args.check_random(entry)?;

    match entry.name {
        "bubble-sort" => emit(&BubbleSort::default(), &args.array()?, &(), mode).await,
        "insertion-sort" => emit(&InsertionSort::default(), &args.array()?, &(), mode).await,
        "merge-sort" => emit(&MergeSort::default(), &args.array()?, &(), mode).await,
        "quick-sort" => emit(&QuickSort::default(), &args.array()?, &args.pivot, mode).await,
        "binary-search" => {
            let values = args.sorted_array()?;
            emit(&BinarySearch::default(), &values, &args.target()?, mode).await
        }
        "pattern-search" => {
            let (text, pattern) = args.text_and_pattern()?;
            emit(&PatternSearch::default(), &text, &pattern, mode).await
        }
        "bfs" => {
            let (graph, params) = args.graph()?;
            emit(&BreadthFirst::default(), &graph, &params, mode).await
        }
        "dfs" => {
            let (graph, params) = args.graph()?;
            emit(&DepthFirst::default(), &graph, &params, mode).await
        }
        "bst-insert" => emit(&BstInsert::default(), &args.array()?, &(), mode).await,
        "bst-search" => {
            let keys = args.array()?;
            emit(&BstSearch::default(), &keys, &args.target()?, mode).await
        }
        "knapsack" => {
            let items = args.items()?;
            emit(&Knapsack::default(), &items, &args.capacity()?, mode).await
        }
        "edit-distance" => emit(&EditDistance::default(), &args.strings(), &(), mode).await,
        other => Err(CliError::usage(format!("no recorder wired for '{other}'"))),
    }
}

async fn emit<A>(
    algorithm: &A,
    input: &A::Input,
    params: &A::Params,
    mode: Mode,
) -> Result<(), CliError>
where
    A: Algorithm,
    A::Kind: Send + Sync + 'static,
    A::State: Send + Sync + 'static,
{
    let list = algorithm.record(input, params)?;
    if cfg!(debug_assertions) {
        if let Err(defect) = list.check_invariants() {
            tracing::error!(algorithm = list.algorithm(), %defect, "malformed step list");
        }
    }

    match mode {
        Mode::Print {
            format: Format::Json,
            ..
        } => print_json(&list),
        Mode::Print {
            format: Format::Text,
            renderer,
        } => print_text(&list, renderer),
        Mode::Play { config, renderer } => play(list, config, renderer).await,
    }
}

fn print_json<A: serde::Serialize>(list: &A) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, list)?;
    writeln!(out)?;
    Ok(())
}

fn print_text<K, S>(list: &StepList<K, S>, renderer: TextRenderer) -> Result<(), CliError>
where
    K: StepKind,
    S: Snapshot,
{
    let mut out = io::stdout().lock();
    let total = list.len();
    for (index, step) in list.iter().enumerate() {
        writeln!(out, "{}", renderer.render(step, index, total))?;
    }
    write_footer(&mut out, list)
}

fn write_footer<K, S>(out: &mut impl Write, list: &StepList<K, S>) -> Result<(), CliError>
where
    K: StepKind,
    S: Snapshot,
{
    writeln!(out, "{}", metrics_line(&list.last().metrics))?;
    writeln!(out, "fingerprint: {}", list.fingerprint())?;
    Ok(())
}

/// Replays `list` on a timer, printing each step as the player reaches it.
async fn play<K, S>(
    list: StepList<K, S>,
    config: PlaybackConfig,
    renderer: TextRenderer,
) -> Result<(), CliError>
where
    K: StepKind + Send + Sync + 'static,
    S: Snapshot + Send + Sync + 'static,
{
    let total = list.len();
    let mut player = Player::new(list.clone(), config);
    let mut updates = player.subscribe();

    // the first step is on screen before the first tick
    let mut shown = 0;
    println!("{}", renderer.render(list.first(), 0, total));

    player.play().await;
    loop {
        let position = *updates.borrow_and_update();
        // the watch channel only keeps the latest position; catch up on any
        // steps it coalesced
        while shown < position.index {
            shown += 1;
            if let Some(step) = list.get(shown) {
                println!("{}", renderer.render(step, shown, total));
            }
        }
        if position.state != PlaybackState::Playing {
            break;
        }
        if updates.changed().await.is_err() {
            break;
        }
    }

    let mut out = io::stdout().lock();
    write_footer(&mut out, &list)
}
