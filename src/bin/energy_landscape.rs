//! Enumerate the energy landscape of a small imprinted network
//!
//! Usage:
//!   cargo run --bin energy_landscape -- --units 6 --patterns 2 --seed 3

use anyhow::{bail, Result};
use clap::Parser;
use energy_memory::hopfield::landscape::{decode_state, MAX_LANDSCAPE_UNITS};
use energy_memory::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "energy_landscape")]
#[command(about = "List downhill transitions and local minima of a small Hopfield network")]
struct Args {
    /// Number of units
    #[arg(long, default_value = "6")]
    units: usize,

    /// Number of random patterns to imprint
    #[arg(long, default_value = "2")]
    patterns: usize,

    /// Random seed
    #[arg(long, default_value = "3")]
    seed: u64,

    /// Print every state, not only the minima
    #[arg(long)]
    all: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.units > MAX_LANDSCAPE_UNITS {
        bail!("at most {} units can be enumerated", MAX_LANDSCAPE_UNITS);
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut imprinter = HebbianImprinter::new(args.units);
    for _ in 0..args.patterns {
        let pattern: Vec<f64> = (0..args.units)
            .map(|_| if rng.gen::<bool>() { 1.0 } else { -1.0 })
            .collect();
        info!(pattern = %format_state(&pattern), "imprinting");
        imprinter.add_pattern(&pattern)?;
    }

    let start = vec![1.0; args.units];
    let model = imprinter.into_model(&start, None)?;
    let landscape = EnergyLandscape::build(&model)?;

    println!("\n=== Energy Landscape ===");
    println!("States:      {}", landscape.len());
    println!("Transitions: {}", landscape.transition_count());

    if args.all {
        println!("\nstate        energy   downhill");
        for (code, node) in landscape.iter() {
            let targets: Vec<String> = node
                .downhill
                .iter()
                .map(|&t| format_code(t, args.units))
                .collect();
            println!(
                "{}  {:>8.3}   {}",
                format_code(code, args.units),
                node.energy,
                targets.join(" ")
            );
        }
    }

    println!("\nLocal minima:");
    for code in landscape.local_minima() {
        if let Some(node) = landscape.node(code) {
            println!("  {}  E = {:.3}", format_code(code, args.units), node.energy);
        }
    }

    Ok(())
}

fn format_code(code: u32, n: usize) -> String {
    format_state(decode_state(code, n).as_slice().unwrap_or(&[]))
}

fn format_state(state: &[f64]) -> String {
    state.iter().map(|&s| if s > 0.0 { '+' } else { '-' }).collect()
}
