use clap::{ builder::RangedU64ValueParser, Parser };
use itertools::Itertools;
use grover_sim::{
    bits::MAX_QUBITS,
    grover::success_probability,
    search::{ GroverSearch, SearchConfig },
};
use rayon::iter::{ IntoParallelIterator, ParallelIterator };
use tracing::debug;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

/// Measured vs. predicted success probability for every marked index.
#[derive(Parser, Debug)]
#[command(name = "sweep", version, about, long_about = None)]
struct Args {
    /// Smallest register size
    #[arg(long, default_value_t = 1, value_parser = qubit_range())]
    n_min: usize,

    /// Largest register size
    #[arg(long, default_value_t = 6, value_parser = qubit_range())]
    n_max: usize,

    /// Number of measurement samples per run
    #[arg(long, default_value_t = 4096)]
    shots: usize,

    /// Base seed; run (n, marked) uses `seed + 2^n + marked`, wrapping
    #[arg(long, default_value_t = 10546)]
    seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn qubit_range() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(1..=MAX_QUBITS as u64)
}

// distinct per (n, marked) for a fixed base
fn run_seed(base: u64, n: usize, marked: usize) -> u64 {
    base.wrapping_add(1_u64 << n).wrapping_add(marked as u64)
}

#[derive(Copy, Clone, Debug)]
struct Row {
    n: usize,
    marked: usize,
    iterations: usize,
    measured: f64,
    predicted: f64,
}

fn eval(n: usize, marked: usize, shots: usize, seed: u64) -> anyhow::Result<Row> {
    let config = SearchConfig {
        n,
        marked,
        shots,
        iterations: None,
        seed: Some(run_seed(seed, n, marked)),
    };
    let outcome = GroverSearch::new(config)?.run()?;
    let measured = outcome.success_rate(marked)?;
    debug!(n, marked, measured, "finished run");
    Ok(Row {
        n,
        marked,
        iterations: outcome.iterations,
        measured,
        predicted: success_probability(n, outcome.iterations),
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::new(&args.log_level))
        .init();

    if args.n_min > args.n_max {
        anyhow::bail!("--n-min ({}) exceeds --n-max ({})", args.n_min, args.n_max);
    }
    let jobs: Vec<(usize, usize)>
        = (args.n_min..=args.n_max)
        .flat_map(|n| (0..1_usize << n).map(move |m| (n, m)))
        .collect();
    let rows: Vec<Row>
        = jobs.into_par_iter()
        .map(|(n, marked)| eval(n, marked, args.shots, args.seed))
        .collect::<anyhow::Result<Vec<Row>>>()?;

    println!(" n  iters  marked  measured  predicted");
    for (_, group) in &rows.iter().chunk_by(|row| row.n) {
        let group: Vec<&Row> = group.collect();
        let worst
            = group.iter()
            .min_by(|a, b| a.measured.total_cmp(&b.measured))
            .map(|row| row.marked)
            .unwrap_or(0);
        for row in group.iter() {
            println!(
                "{:>2}  {:>5}  {:>6}  {:>8.4}  {:>9.4}{}",
                row.n,
                row.iterations,
                row.marked,
                row.measured,
                row.predicted,
                if row.marked == worst { "  <- worst" } else { "" },
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn register_sizes_are_bounded() {
        let args = Args::try_parse_from(["sweep", "--n-min", "2", "--n-max", "4"]).unwrap();
        assert_eq!((args.n_min, args.n_max), (2, 4));
        assert!(Args::try_parse_from(["sweep", "--n-max", "64"]).is_err());
        assert!(Args::try_parse_from(["sweep", "--n-min", "0"]).is_err());
        let too_big = (MAX_QUBITS + 1).to_string();
        assert!(Args::try_parse_from(["sweep", "--n-max", too_big.as_str()]).is_err());
    }

    #[test]
    fn run_seed_wraps() {
        assert_eq!(run_seed(10, 2, 3), 17);
        assert_eq!(run_seed(u64::MAX, 1, 0), 1);
        assert_ne!(run_seed(u64::MAX, 1, 0), run_seed(u64::MAX, 1, 1));
    }

    #[test]
    fn eval_with_extreme_seed() {
        let row = eval(1, 1, 100, u64::MAX).unwrap();
        assert_eq!(row.iterations, 1);
        assert!((row.predicted - 0.5).abs() < 1e-12);
    }
}
