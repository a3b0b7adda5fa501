use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use job_generator::catalog::Catalog;
use job_generator::generator::{JobGenerator, SystemClock, DEFAULT_JOB_COUNT};
use job_generator::writer::{write_jobs, write_jobs_to_path};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Where to write the jobs CSV. Written to stdout when omitted
    pub(crate) output_file: Option<PathBuf>,

    /// Seed the random source to get the same sheet on every run
    #[clap(short, long)]
    pub(crate) seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut generator = JobGenerator::new(Catalog::default(), rng, SystemClock)?;
    let jobs = generator.generate(DEFAULT_JOB_COUNT)?;

    match &cli.output_file {
        Some(path) => {
            write_jobs_to_path(&jobs, path)?;
            info!("Wrote {} jobs to {}", jobs.len(), path.display());
        }
        None => write_jobs(&jobs, io::stdout())?,
    }

    Ok(())
}
