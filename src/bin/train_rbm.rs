//! Train an RBM on bars-and-stripes images
//!
//! Usage:
//!   cargo run --bin train_rbm -- --side 4 --hidden 16 --epochs 50 --output trace.json

use anyhow::{Context, Result};
use clap::Parser;
use energy_memory::config::{load_json, save_json};
use energy_memory::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "train_rbm")]
#[command(about = "Train a Restricted Boltzmann Machine with contrastive divergence")]
struct Args {
    /// Image side length (visible units = side^2)
    #[arg(long, default_value = "4")]
    side: usize,

    /// Number of hidden units
    #[arg(long, default_value = "16")]
    hidden: usize,

    /// Number of training images
    #[arg(long, default_value = "200")]
    samples: usize,

    /// Learning rate
    #[arg(long, default_value = "0.1")]
    learning_rate: f64,

    /// Mini-batch size
    #[arg(long, default_value = "10")]
    batch_size: usize,

    /// Gibbs steps per negative phase
    #[arg(short, long, default_value = "1")]
    k: usize,

    /// Number of epochs
    #[arg(long, default_value = "50")]
    epochs: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// JSON file with a training config (overrides the flags above)
    #[arg(long)]
    config: Option<String>,

    /// Write the free-energy trace to this JSON file
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_json::<TrainingConfig>(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => TrainingConfig::default()
            .learning_rate(args.learning_rate)
            .batch_size(args.batch_size)
            .k(args.k)
            .epochs(args.epochs)
            .seed(args.seed),
    };
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(args.seed));

    let data = bars_and_stripes(args.side, args.samples, &mut rng)?;
    info!("Generated {} images of {}x{}", data.nrows(), args.side, args.side);

    let mut rbm =
        RestrictedBoltzmannMachine::new(&RbmConfig::new(data.ncols(), args.hidden), &mut rng)?;
    let initial = rbm.average_free_energy(&data)?;

    let trace = rbm.train_with(&data, &config, &mut rng)?;

    let final_energy = rbm.average_free_energy(&data)?;
    let error = rbm.reconstruction_error(&data, &mut rng)?;

    println!("\n=== Training Summary ===");
    println!("Visible units:        {}", rbm.n_visible());
    println!("Hidden units:         {}", rbm.n_hidden());
    println!("Epochs:               {}", trace.len());
    println!("Initial free energy:  {:.4}", initial);
    println!("Final free energy:    {:.4}", final_energy);
    println!("Net change:           {:+.4}", trace.total());
    println!("Decreasing epochs:    {:.1}%", trace.negative_fraction() * 100.0);
    println!("Reconstruction error: {:.4}", error);

    println!("\n=== Samples (k = 100) ===");
    for (visible, _) in rbm.sample(100, 3, &mut rng)? {
        for r in 0..args.side {
            let line: String = (0..args.side)
                .map(|c| if visible[r * args.side + c] > 0.5 { '#' } else { '.' })
                .collect();
            println!("  {}", line);
        }
        println!();
    }

    if let Some(path) = &args.output {
        save_json(&trace, path)?;
        info!("Saved free-energy trace to {}", path);
    }

    Ok(())
}
