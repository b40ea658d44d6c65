use std::io::{self, Write};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use fast_laplacian::{run_jobs, FilterOptions, ImageFilter, Job, LaplacianFilter, DEFAULT_WORKERS};
use log::{debug, error};

#[derive(Parser)]
#[clap(author = "Kirill K.")]
#[clap(version, about, long_about = None)]
struct Cli {
    /// Paths to source images in the binary PPM format. The result for
    /// the N-th image is written into the file "laplacianN.ppm"
    /// in the current directory. Options must precede file names.
    #[clap(value_parser, allow_hyphen_values = true)]
    files: Vec<PathBuf>,

    /// Count of threads used to filter every image
    #[clap(short, long, value_parser, default_value_t = DEFAULT_WORKERS)]
    workers: NonZeroU32,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<ExitCode> {
    let cli: Cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    if cli.files.is_empty() {
        println!("Usage: detector filename[s]");
        return Ok(ExitCode::FAILURE);
    }
    let filter = LaplacianFilter::new(FilterOptions::new().workers(cli.workers));
    debug!(
        "Filter {} images with {} threads per image",
        cli.files.len(),
        cli.workers
    );
    detect_edges(&cli.files, Path::new("."), filter, &mut io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}

/// Filters every file in its own thread and prints the total time
/// of filtering into `out`.
///
/// Results are written into `out_dir`. Images that were not filtered
/// are logged after the total time and turn the result into an error.
fn detect_edges<F>(
    files: &[PathBuf],
    out_dir: &Path,
    filter: F,
    out: &mut impl Write,
) -> Result<()>
where
    F: ImageFilter + 'static,
{
    let jobs: Vec<Job> = files
        .iter()
        .enumerate()
        .map(|(i, path)| Job::new(i + 1, path).in_dir(out_dir))
        .collect();
    let jobs_count = jobs.len();

    let summary = run_jobs(jobs, filter)?;
    writeln!(out, "Total elapsed time: {:.4} s", summary.total.as_secs_f64())?;
    out.flush()?;

    if !summary.is_success() {
        let failed_count = summary.failed.len();
        for err in summary.failed {
            error!("{:#}", anyhow::Error::from(err));
        }
        return Err(anyhow!(
            "{} of {} images were not filtered",
            failed_count,
            jobs_count
        ));
    }
    Ok(())
}
