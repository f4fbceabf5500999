use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use mec_enum::{
    enumerate_chickering, enumerate_cpdag, enumerate_dfs, enumerate_meek, enumerate_pdag,
    mec_size, MeasureOpts, Measurement,
};
use mec_graph::{read_graph_file, render_graph, write_dag_file};
use mec_orient::{extend, meek_close};

/// Emission cap applied to the branching and reversal enumerators when
/// none is given; their visited sets and recursion stacks grow with the
/// output.
const DEFAULT_EMIT_CAP: u64 = 1 << 20;

#[derive(Parser, Debug)]
#[command(name = "mec", about = "Markov equivalence class toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a consistent DAG extension of the input graph.
    Extend(ExtendArgs),
    /// Close the input graph under the Meek rules.
    Meek(MeekArgs),
    /// Enumerate the Markov equivalence class of the input graph.
    Enumerate(EnumerateArgs),
    /// Count the class of a CC/CPDAG input without enumerating.
    Count(CountArgs),
}

#[derive(ClapArgs, Debug)]
struct ExtendArgs {
    /// Input graph in the text format.
    #[arg(long = "in")]
    input: PathBuf,
    /// Output file receiving the extension.
    #[arg(long)]
    out: PathBuf,
    /// Treat each input line as an undirected edge.
    #[arg(long)]
    undirected: bool,
}

#[derive(ClapArgs, Debug)]
struct MeekArgs {
    /// Input graph in the text format.
    #[arg(long = "in")]
    input: PathBuf,
    /// Output file receiving the closure.
    #[arg(long)]
    out: PathBuf,
    /// Treat each input line as an undirected edge.
    #[arg(long)]
    undirected: bool,
}

#[derive(ClapArgs, Debug)]
struct EnumerateArgs {
    /// Input graph in the text format.
    #[arg(long = "in")]
    input: PathBuf,
    /// Output directory for summary.json and optional artefacts.
    #[arg(long)]
    out: PathBuf,
    /// Treat each input line as an undirected edge.
    #[arg(long)]
    undirected: bool,
    /// Enumeration family to run.
    #[arg(long, value_enum, default_value_t = Algorithm::Pdag)]
    algorithm: Algorithm,
    /// Wall-clock budget in seconds.
    #[arg(long, default_value_t = 3600.0)]
    timeout_s: f64,
    /// Append per-emission delays to delays.csv under the output directory.
    #[arg(long)]
    delay_log: bool,
    /// Write every emitted DAG to dags/dag-<k>.txt under the output directory.
    #[arg(long)]
    write_dags: bool,
    /// Emission cap; unset applies the built-in default to the meek,
    /// chickering and dfs families and none to the MCS families.
    #[arg(long)]
    max_emits: Option<u64>,
    /// Trust the input instead of checking extendability first
    /// (meek family only).
    #[arg(long)]
    skip_check: bool,
}

#[derive(ClapArgs, Debug)]
struct CountArgs {
    /// Input graph in the text format.
    #[arg(long = "in")]
    input: PathBuf,
    /// Treat each input line as an undirected edge.
    #[arg(long)]
    undirected: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Algorithm {
    Cpdag,
    Pdag,
    Meek,
    Chickering,
    Dfs,
}

impl Algorithm {
    fn capped_by_default(self) -> bool {
        matches!(self, Algorithm::Meek | Algorithm::Chickering | Algorithm::Dfs)
    }

    fn label(self) -> &'static str {
        match self {
            Algorithm::Cpdag => "cpdag",
            Algorithm::Pdag => "pdag",
            Algorithm::Meek => "meek",
            Algorithm::Chickering => "chickering",
            Algorithm::Dfs => "dfs",
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Extend(args) => run_extend(args),
        Command::Meek(args) => run_meek(args),
        Command::Enumerate(args) => run_enumerate(args),
        Command::Count(args) => run_count(args),
    }
}

fn run_extend(args: ExtendArgs) -> Result<(), Box<dyn Error>> {
    let g = read_graph_file(&args.input, args.undirected)?;
    match extend(&g) {
        Some(d) => {
            write_dag_file(&args.out, &d)?;
            println!("extension written to {}", args.out.display());
        }
        None => println!("input admits no consistent extension"),
    }
    Ok(())
}

fn run_meek(args: MeekArgs) -> Result<(), Box<dyn Error>> {
    let mut g = read_graph_file(&args.input, args.undirected)?;
    let oriented = meek_close(&mut g);
    fs::write(&args.out, render_graph(&g))?;
    println!("{oriented} edges oriented");
    Ok(())
}

fn run_count(args: CountArgs) -> Result<(), Box<dyn Error>> {
    let g = read_graph_file(&args.input, args.undirected)?;
    println!("{}", mec_size(&g));
    Ok(())
}

fn run_enumerate(args: EnumerateArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let g = read_graph_file(&args.input, args.undirected)?;

    let max_emits = args.max_emits.or_else(|| {
        args.algorithm
            .capped_by_default()
            .then_some(DEFAULT_EMIT_CAP)
    });
    let opts = MeasureOpts {
        timeout_s: args.timeout_s,
        delay_log_path: args.delay_log.then(|| args.out.join("delays.csv")),
        max_emits,
    };
    let mut sink = Measurement::new(&opts)?;
    let dag_dir = args.write_dags.then(|| args.out.join("dags"));
    let dag_dir = dag_dir.as_deref();

    let outcome = match args.algorithm {
        Algorithm::Cpdag => enumerate_cpdag(&g, &mut sink, dag_dir),
        Algorithm::Pdag => enumerate_pdag(&g, &mut sink, dag_dir),
        Algorithm::Meek => enumerate_meek(&g, &mut sink, dag_dir, args.skip_check),
        Algorithm::Chickering => enumerate_chickering(&g, &mut sink, dag_dir),
        Algorithm::Dfs => enumerate_dfs(&g, &mut sink, dag_dir),
    };

    // Cooperative stops still produce a summary: the delay aggregate is
    // valid, the count is a lower bound.
    let (count, stop_reason) = match outcome {
        Ok(count) => (count.to_string(), None),
        Err(err) if err.is_deadline() || err.is_emit_cap() => {
            (sink.samples().to_string(), Some(err.info().code.clone()))
        }
        Err(err) => return Err(err.into()),
    };
    write_summary(&args.out, args.algorithm, &count, stop_reason, &sink)?;
    println!("{count}");
    Ok(())
}

fn write_summary(
    out_dir: &Path,
    algorithm: Algorithm,
    count: &str,
    stop_reason: Option<String>,
    sink: &Measurement,
) -> Result<(), Box<dyn Error>> {
    let summary = sink.summary();
    let payload = serde_json::json!({
        "algorithm": algorithm.label(),
        "count": count,
        "complete": stop_reason.is_none(),
        "stop_reason": stop_reason,
        "delays": summary,
    });
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(out_dir.join("summary.json"), json)?;
    Ok(())
}
