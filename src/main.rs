use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use eyre::{eyre, Result, WrapErr};
use grain_core::{
    load_microstructure, save_microstructure, save_microstructure_timestamped, GrainConfig,
    Microstructure, SeedMethod, TessellationProgress,
};
use grain_sampling::StdRandom;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

#[derive(Parser)]
#[command(name = "grain_studio")]
#[command(about = "Synthesize 2D polycrystalline microstructures")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Place seeds, grow grains and save the grid
    Generate(GenerateArgs),
    /// Load a saved grid and print a summary
    Inspect(InspectArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// JSON file with cols, rows, orientations and seed_method
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of columns (overrides the config file)
    #[arg(long)]
    cols: Option<usize>,

    /// Number of rows (overrides the config file)
    #[arg(long)]
    rows: Option<usize>,

    /// Number of grains (overrides the config file)
    #[arg(long)]
    orientations: Option<u32>,

    /// pseudo, sobol, halton or latin (overrides the config file)
    #[arg(long)]
    method: Option<String>,

    /// RNG seed; drawn from entropy and logged when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Exact output path
    #[arg(long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Directory for grid_<timestamp>.json
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Skip writing the grid to disk
    #[arg(long)]
    no_save: bool,

    /// Print the label dump to stdout
    #[arg(long)]
    dump: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// Saved grid file
    file: PathBuf,

    /// Print the label dump to stdout
    #[arg(long)]
    dump: bool,

    /// Print one recovered location per grain
    #[arg(long)]
    seeds: bool,
}

/// Column progress shown as an indicatif bar.
struct ColumnBar {
    bar: ProgressBar,
}

impl ColumnBar {
    fn new(columns: usize) -> Self {
        let style = ProgressStyle::with_template(
            "  Generating microstructure... [{bar:40.cyan/blue}] {pos}/{len} columns ETA {eta}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
        let bar = ProgressBar::new(columns as u64);
        bar.set_style(style);
        Self { bar }
    }
}

impl TessellationProgress for ColumnBar {
    fn column_done(&mut self, column: usize, total_columns: usize) {
        self.bar.inc(1);
        if column + 1 == total_columns {
            self.bar.finish_and_clear();
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("grain_studio=info".parse()?)
                .add_directive("grain_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Inspect(args) => inspect(args),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    let mut rng = match args.seed {
        Some(seed) => StdRandom::from_u64_seed(seed),
        None => {
            let (rng, seed) = StdRandom::from_entropy();
            info!("Using RNG seed {} (pass --seed {} to reproduce)", seed, seed);
            rng
        }
    };

    let microstructure = if args.no_progress {
        Microstructure::create(&config, &mut rng)?
    } else {
        let mut bar = ColumnBar::new(config.cols);
        Microstructure::create_with_progress(&config, &mut rng, &mut bar)?
    };

    if args.dump {
        print!("{}", microstructure);
    }

    if args.no_save {
        return Ok(());
    }
    match &args.output {
        Some(path) => {
            save_microstructure(&microstructure, path)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            info!("Microstructure data saved as: {}", path.display());
        }
        None => {
            save_microstructure_timestamped(&microstructure, &args.output_dir).wrap_err_with(
                || format!("failed to write into {}", args.output_dir.display()),
            )?;
        }
    }
    Ok(())
}

/// Merge the optional config file with explicit flags, flags winning.
fn resolve_config(args: &GenerateArgs) -> Result<GrainConfig> {
    let file = args.config.as_deref().map(read_config_file).transpose()?;

    let cols = args
        .cols
        .or(file.as_ref().map(|c| c.cols))
        .ok_or_else(|| eyre!("missing --cols"))?;
    let rows = args
        .rows
        .or(file.as_ref().map(|c| c.rows))
        .ok_or_else(|| eyre!("missing --rows"))?;
    let orientations = args
        .orientations
        .or(file.as_ref().map(|c| c.orientations))
        .ok_or_else(|| eyre!("missing --orientations"))?;
    let seed_method = match (&args.method, &file) {
        (Some(name), _) => name.parse::<SeedMethod>()?,
        (None, Some(c)) => c.seed_method,
        (None, None) => return Err(eyre!("missing --method")),
    };

    let config = GrainConfig::new(cols, rows, orientations, seed_method);
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<GrainConfig> {
    let file = File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("invalid config file {}", path.display()))
}

fn inspect(args: InspectArgs) -> Result<()> {
    let microstructure = load_microstructure(&args.file)
        .wrap_err_with(|| format!("failed to load {}", args.file.display()))?;
    let grid = microstructure.grid();

    println!("cols:          {}", microstructure.cols());
    println!("rows:          {}", microstructure.rows());
    println!("orientations:  {}", microstructure.orientations());
    println!("grains found:  {}", grid.distinct_labels());
    println!("unassigned:    {}", grid.unassigned_count());

    if args.seeds {
        if let Microstructure::Loaded(loaded) = &microstructure {
            let found = loaded.recover_seed_locations();
            for (label, seed) in &found {
                println!("grain {}: ({}, {})", label, seed.x, seed.y);
            }
            let absent = u64::from(loaded.orientations()).saturating_sub(found.len() as u64);
            if absent > 0 {
                println!("absent grains: {}", absent);
            }
        }
    }

    if args.dump {
        print!("{}", microstructure);
    }
    Ok(())
}
