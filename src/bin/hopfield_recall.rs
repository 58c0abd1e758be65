//! Store two 10x10 glyphs in a Hopfield memory and recall one from noise
//!
//! Usage:
//!   cargo run --bin hopfield_recall -- --noise 0.2 --seed 7

use anyhow::Result;
use clap::{Parser, ValueEnum};
use energy_memory::config::load_json;
use energy_memory::prelude::*;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

const SIDE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Glyph {
    /// Smiling face
    Face,
    /// Tree with a trunk and crown
    Tree,
}

#[derive(Parser, Debug)]
#[command(name = "hopfield_recall")]
#[command(about = "Recall a stored glyph from a corrupted copy")]
struct Args {
    /// Glyph to corrupt and recall
    #[arg(long, value_enum, default_value_t = Glyph::Face)]
    glyph: Glyph,

    /// Fraction of pixels to flip
    #[arg(long, default_value = "0.2")]
    noise: f64,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Step cap (overrides the config file)
    #[arg(long)]
    max_steps: Option<usize>,

    /// JSON file with a relaxation config
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_json::<RelaxationConfig>(path)?,
        None => RelaxationConfig::recall(),
    };
    if let Some(max_steps) = args.max_steps {
        config = config.max_steps(max_steps);
    }

    let face = face();
    let tree = tree();
    let target = match args.glyph {
        Glyph::Face => face.clone(),
        Glyph::Tree => tree.clone(),
    };

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut imprinter = HebbianImprinter::new(SIDE * SIDE);
    imprinter.add_pattern(&face)?;
    imprinter.add_pattern(&tree)?;

    let bipolar_target = normalize_input_state(&target).to_vec();
    let corrupted = corrupt_pattern(&bipolar_target, args.noise, &mut rng)?.to_vec();
    info!(
        glyph = ?args.glyph,
        flipped = hamming_distance(&bipolar_target, &corrupted),
        "corrupted input"
    );

    let model = imprinter.into_model(&corrupted, None)?;
    let mut relaxer = StochasticRelaxer::new(model, rng);
    let report = relaxer.recall(&corrupted, &config)?;

    let recalled = relaxer.model().units().clone();

    println!("\n=== Corrupted input ===");
    print_grid(&Array1::from_vec(corrupted));
    println!("\n=== Recalled state ===");
    print_grid(&recalled);

    println!("\n=== Relaxation ===");
    println!("Converged:   {}", report.converged);
    println!("Steps:       {}", report.steps);
    println!("Energy:      {:.3}", relaxer.model().total_energy());
    println!(
        "Overlap:     face {:+.2}, tree {:+.2}",
        overlap(&recalled.to_vec(), &normalize_input_state(&face).to_vec()),
        overlap(&recalled.to_vec(), &normalize_input_state(&tree).to_vec())
    );
    println!("Trace:");
    for (i, energy) in report.trace.iter().enumerate() {
        println!("  [{:>3}] {:.3}", i, energy);
    }

    Ok(())
}

fn print_grid(state: &Array1<f64>) {
    for r in 0..SIDE {
        let line: String = (0..SIDE)
            .map(|c| if state[r * SIDE + c] > 0.0 { '#' } else { '.' })
            .collect();
        println!("  {}", line);
    }
}

fn face() -> Vec<f64> {
    let mut grid = vec![0.0; SIDE * SIDE];
    let on = [
        (9, 0),
        (8, 1),
        (7, 2),
        (6, 3),
        (6, 4),
        (6, 5),
        (7, 6),
        (8, 7),
        (8, 8),
        (9, 9),
        (1, 3),
        (1, 7),
        (4, 4),
    ];
    for (r, c) in on {
        grid[r * SIDE + c] = 1.0;
    }
    grid
}

fn tree() -> Vec<f64> {
    let mut grid = vec![0.0; SIDE * SIDE];
    for r in 0..SIDE {
        grid[r * SIDE + 4] = 1.0;
        grid[r * SIDE + 5] = 1.0;
    }
    for c in 3..7 {
        grid[SIDE + c] = 1.0;
        grid[c] = 1.0;
    }
    for c in 2..9 {
        grid[4 * SIDE + c] = 1.0;
    }
    grid[5 * SIDE + 8] = 1.0;
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_argument() {
        let args = Args::try_parse_from(["hopfield_recall"]).unwrap();
        assert_eq!(args.glyph, Glyph::Face);

        let args = Args::try_parse_from(["hopfield_recall", "--glyph", "tree"]).unwrap();
        assert_eq!(args.glyph, Glyph::Tree);

        assert!(Args::try_parse_from(["hopfield_recall", "--glyph", "house"]).is_err());
    }
}
