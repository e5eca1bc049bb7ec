use clap::Parser;
use log::info;
use pixelart::{Pipeline, PipelineConfig, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process;

/// Turns a photograph into pixel art.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source image
    #[arg(short, long, value_name = "FILE", required_unless_present = "dump_config")]
    input: Option<PathBuf>,

    /// Destination image, format picked from the extension
    #[arg(short, long, value_name = "FILE", required_unless_present = "dump_config")]
    output: Option<PathBuf>,

    /// YAML pipeline description (defaults: relax then sharpen at 256x256)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Working resolution, overrides both width and height
    #[arg(short, long)]
    size: Option<u32>,

    /// Nearest-neighbor magnification of the result
    #[arg(short, long)]
    upscale: Option<u32>,

    /// Seed for the relaxation filter, random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    dump_config: bool,
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(size) = args.size {
        config.width = size;
        config.height = size;
    }
    if let Some(upscale) = args.upscale {
        config.upscale = upscale;
    }

    if args.dump_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let pipeline = Pipeline::new(config)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // clap guarantees both paths unless --dump-config
    if let (Some(input), Some(output)) = (&args.input, &args.output) {
        info!("{} -> {}", input.display(), output.display());
        pipeline.process_file(input, output, &mut rng)?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(error) = run(Args::parse()) {
        eprintln!("error: {}", error);
        process::exit(1);
    }
}
