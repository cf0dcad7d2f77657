use clap::Parser;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use qmc_rs::minimize::simplify_timed;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Smallest number of variables to test.
    #[clap(long, value_name = "INT", default_value = "4")]
    min_vars: u32,

    /// Largest number of variables to test.
    #[clap(long, value_name = "INT", default_value = "12")]
    max_vars: u32,

    /// Fraction of the input space used as minterms.
    #[clap(long, value_name = "FLOAT", default_value = "0.25")]
    density: f64,

    /// Fraction of the input space used as don't-cares.
    #[clap(long, value_name = "FLOAT", default_value = "0.05")]
    dont_care_density: f64,

    /// Timed runs per variable count.
    #[clap(long, value_name = "INT", default_value = "10")]
    runs: u32,

    /// RNG seed.
    #[clap(long, value_name = "INT", default_value = "42")]
    seed: u64,
}

/// Samples a random function: disjoint minterm and don't-care sets at the
/// requested densities.
fn random_function(
    rng: &mut ChaCha8Rng,
    n: u32,
    density: f64,
    dc_density: f64,
) -> (Vec<u64>, Vec<u64>) {
    let universe = 1u64 << n;
    let num_ones = (universe as f64 * density) as usize;
    let num_dc = (universe as f64 * dc_density) as usize;

    let mut indices: Vec<u64> = (0..universe).collect();
    indices.shuffle(rng);
    let ones = indices[..num_ones].to_vec();
    let dont_cares = indices[num_ones..(num_ones + num_dc).min(indices.len())].to_vec();
    (ones, dont_cares)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Warn,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    // Note: runtime roughly doubles-or-worse per extra variable at fixed
    // density; 13 variables is already in the minutes range.

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    println!("| n vars | minterms | don't cares | phase 1 (ms) | phase 2 (ms) | total (ms) |");
    println!("|--------|----------|-------------|--------------|--------------|------------|");

    for n in args.min_vars..=args.max_vars {
        let (ones, dont_cares) =
            random_function(&mut rng, n, args.density, args.dont_care_density);

        let mut phase1 = 0.0;
        let mut phase2 = 0.0;
        for _ in 0..args.runs {
            let result = simplify_timed(&ones, &dont_cares, Some(n))?;
            phase1 += result.timing.phase1.as_secs_f64();
            phase2 += result.timing.phase2.as_secs_f64();
        }

        let runs = args.runs.max(1) as f64;
        println!(
            "| {:>6} | {:>8} | {:>11} | {:>12.4} | {:>12.4} | {:>10.4} |",
            n,
            ones.len(),
            dont_cares.len(),
            phase1 / runs * 1000.0,
            phase2 / runs * 1000.0,
            (phase1 + phase2) / runs * 1000.0,
        );
    }

    Ok(())
}
