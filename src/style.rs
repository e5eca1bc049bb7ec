use clap::{Parser, ValueEnum};
use pixelart::config::{
    BinarizeParams, EdgeParams, RelaxParams, SharpenParams, Stage, ThinParams,
};
use pixelart::{pipeline, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Filter {
    Relax,
    Surface,
    Edges,
    Thin,
    Sharpen,
    Binarize,
}

impl Filter {
    fn stage(self) -> Stage {
        match self {
            Filter::Relax => Stage::Relax(RelaxParams::default()),
            Filter::Surface => Stage::SurfaceChange,
            Filter::Edges => Stage::EdgeMap(EdgeParams::default()),
            Filter::Thin => Stage::Thin(ThinParams::default()),
            Filter::Sharpen => Stage::Sharpen(SharpenParams::default()),
            Filter::Binarize => Stage::Binarize(BinarizeParams::default()),
        }
    }
}

// This is for trying out one filter at a time, with default parameters and
// no resizing.
#[derive(Parser, Debug)]
struct Args {
    #[arg(short, long)]
    input: PathBuf,
    #[arg(short, long)]
    output: PathBuf,
    #[arg(short, long, value_enum)]
    filter: Filter,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn run(args: Args) -> Result<()> {
    let source = image::io::Reader::open(&args.input)?
        .with_guessed_format()?
        .decode()?
        .into_rgba8();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let canvas = pipeline::apply(&args.filter.stage(), source, &mut rng);
    pipeline::save(&canvas, &args.output)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(error) = run(Args::parse()) {
        eprintln!("error: {}", error);
        process::exit(1);
    }
}
