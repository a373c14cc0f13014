use std::{ fs, io::Write, path::PathBuf };
use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use grover_sim::{
    bits,
    counts::Counts,
    search::{ GroverSearch, SearchConfig },
};
use tracing::info;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

const BAR_WIDTH: usize = 50;

/// Grover's search demo on a simulated register of 1-3 qubits.
#[derive(Parser, Debug)]
#[command(name = "grover", version, about, long_about = None)]
struct Args {
    /// Number of qubits
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=3))]
    n: u8,

    /// Index of the marked element (0..2^n - 1)
    #[arg(long, default_value_t = 1)]
    marked: usize,

    /// Number of measurement samples
    #[arg(long, default_value_t = 1024)]
    shots: usize,

    /// Number of Grover iterations (overrides the recommendation)
    #[arg(long)]
    iterations: Option<usize>,

    /// Seed for the measurement sampler
    #[arg(long)]
    seed: Option<u64>,

    /// Output folder
    #[arg(long, default_value = "results")]
    out: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn histogram(counts: &Counts, n: usize) -> String {
    let max = counts.most_frequent().map(|(_, c)| c).unwrap_or(0).max(1);
    (0..1_usize << n)
        .filter_map(|k| bits::to_bitstring(k, n).ok())
        .map(|b| {
            let c = counts.get(&b);
            format!("{} | {:<width$} {}", b, "#".repeat(c * BAR_WIDTH / max), c, width = BAR_WIDTH)
        })
        .join("\n")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::new(&args.log_level))
        .init();

    let n = args.n as usize;
    let dim = 1_usize << n;
    if args.marked >= dim {
        anyhow::bail!("Marked must be in [0, {}] for n={}", dim - 1, n);
    }
    let config = SearchConfig {
        n,
        marked: args.marked,
        shots: args.shots,
        iterations: args.iterations,
        seed: args.seed,
    };
    let mut search = GroverSearch::new(config)?;
    let outcome = search.run()?;
    let header = format!(
        "n={}, N={}, marked={}, iterations={}, shots={}",
        n, dim, args.marked, outcome.iterations, args.shots,
    );

    println!("Grover: {}", header);
    println!("\nCircuit (text):\n");
    println!("{}", outcome.circuit);
    println!("\nRaw counts:");
    println!("{}", outcome.counts);
    println!("\n{}", histogram(&outcome.counts, n));

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let out_txt = args.out.join("grover_results.txt");
    let mut file = fs::File::create(&out_txt)
        .with_context(|| format!("creating {}", out_txt.display()))?;
    writeln!(file, "{}\n", header)?;
    writeln!(file, "Circuit (text):")?;
    writeln!(file, "{}\n", outcome.circuit)?;
    writeln!(file, "Counts:")?;
    for (bits, count) in outcome.counts.ranked() {
        writeln!(file, "{} : {}", bits, count)?;
    }
    writeln!(file, "\nHistogram:")?;
    writeln!(file, "{}", histogram(&outcome.counts, n))?;
    info!(path = %out_txt.display(), "saved results");
    println!("\nSaved results to: {}", out_txt.display());

    Ok(())
}
