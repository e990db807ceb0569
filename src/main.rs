//! Roomgen CLI - SOM Exhibition Room Generator
//!
//! Command-line interface for generating exhibition rooms from feature tables.

use clap::{Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::error;
use roomgen::{
    Config, DirectoryFeatureSource, DirectoryObjectSource, Exhibition, FeatureWeight,
    GenerationRequest, GridSize, Result, SomRoomGenerator,
};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "roomgen")]
#[command(author = "Roomgen Contributors")]
#[command(version)]
#[command(about = "SOM Exhibition Room Generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an exhibition with one SOM-arranged room
    Generate {
        /// Directory holding `<table>.json` feature files
        #[arg(long)]
        features_dir: PathBuf,

        /// Directory holding `<id>.<ext>` image files
        #[arg(long)]
        objects_dir: PathBuf,

        /// Feature table as `name` or `name:weight` (repeatable)
        #[arg(short, long = "table", required = true)]
        tables: Vec<FeatureWeight>,

        /// Requested grid width (columns)
        #[arg(short = 'W', long, default_value = "8")]
        width: usize,

        /// Requested grid height (rows)
        #[arg(short = 'H', long, default_value = "2")]
        height: usize,

        /// Random seed for reproducibility
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Number of training epochs
        #[arg(short, long, default_value = "100")]
        epochs: usize,

        /// Restrict to these item ids (comma separated, with or without segment suffix)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,

        /// Configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file; prints to stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the grid a request would be fitted to
    Fit {
        /// Requested grid width (columns)
        #[arg(short = 'W', long)]
        width: usize,

        /// Requested grid height (rows)
        #[arg(short = 'H', long)]
        height: usize,

        /// Number of items
        #[arg(short = 'n', long)]
        samples: usize,
    },

    /// Print the default configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Generate {
            features_dir,
            objects_dir,
            tables,
            width,
            height,
            seed,
            epochs,
            ids,
            config,
            output,
        } => {
            let request = GenerationRequest::new(tables, width, height)
                .with_seed(seed)
                .with_epochs(epochs)
                .with_ids(ids);
            generate(features_dir, objects_dir, request, config, output)
        }

        Commands::Fit {
            width,
            height,
            samples,
        } => fit_grid(width, height, samples),

        Commands::Config => show_config(),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn generate(
    features_dir: PathBuf,
    objects_dir: PathBuf,
    request: GenerationRequest,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let start_time = Instant::now();

    let config = match config_path {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    request.validate()?;

    let features = DirectoryFeatureSource::new(features_dir, &config.retrieval);
    let objects = DirectoryObjectSource::new(objects_dir, &config.retrieval);
    let generator = SomRoomGenerator::new(&config, features, objects);

    let spinner_style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style);
    pb.set_message(format!(
        "Generating room ({}x{} grid, {} epochs)...",
        request.width, request.height, request.epochs
    ));
    pb.enable_steady_tick(Duration::from_millis(100));

    let exhibition = generator.generate_exhibition(&request);
    pb.finish_and_clear();
    let exhibition = exhibition?;

    let json = serde_json::to_string_pretty(&exhibition)?;
    match &output {
        Some(path) => {
            fs::write(path, json)?;
            print_summary(&exhibition);
            println!("   Output: {}", path.display());
            println!("Done in {}", HumanDuration(start_time.elapsed()));
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn print_summary(exhibition: &Exhibition) {
    println!("✓ {}", exhibition.name);
    for room in &exhibition.rooms {
        println!(
            "   {}: {} exhibits on {} walls, {:.1} x {:.1} x {:.1}",
            room.text,
            room.exhibit_count(),
            room.walls.len(),
            room.size.x,
            room.size.y,
            room.size.z
        );
    }
}

fn fit_grid(width: usize, height: usize, samples: usize) -> Result<()> {
    let requested = GridSize::new(width, height);
    let fitted = requested.fit(samples);

    println!("Requested: {}x{} ({} nodes)", requested.width, requested.height, requested.total());
    println!("Fitted:    {}x{} ({} nodes)", fitted.width, fitted.height, fitted.total());
    println!("Per wall:  {} column(s) per row", fitted.width / 4);

    Ok(())
}

fn show_config() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&Config::default())?);
    Ok(())
}
