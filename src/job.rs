//! Processing of image files: every job reads one image, filters it,
//! writes the result and accounts the time spent by filtering.
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use log::debug;

use crate::filter::{Filtered, ImageFilter};
use crate::{ppm, JobError};

/// Stages of processing of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Created,
    Reading,
    Filtering,
    Writing,
    AccumulatingTime,
    Done,
    Failed,
}

/// Sum of filtering time of all jobs.
#[derive(Debug, Default)]
pub struct TimeAccumulator {
    total: Mutex<Duration>,
}

impl TimeAccumulator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add(&self, elapsed: Duration) {
        // Poisoned lock still holds a valid total
        let mut total = self.total.lock().unwrap_or_else(PoisonError::into_inner);
        *total += elapsed;
    }

    pub fn total(&self) -> Duration {
        *self.total.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Filtering of one input file into the output file.
#[derive(Debug)]
pub struct Job {
    index: usize,
    input: PathBuf,
    output: PathBuf,
    state: JobState,
}

impl Job {
    /// Creates a job for the input file with given 1-based position
    /// among all input files. Result is written into the current directory.
    pub fn new(index: usize, input: impl Into<PathBuf>) -> Self {
        Self {
            index,
            input: input.into(),
            output: PathBuf::from(Self::output_name(index)),
            state: JobState::Created,
        }
    }

    /// Moves the output file into given directory.
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output = dir.as_ref().join(Self::output_name(self.index));
        self
    }

    /// Name of the output file for the input with given 1-based position.
    pub fn output_name(index: usize) -> String {
        format!("laplacian{index}.ppm")
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn input(&self) -> &Path {
        &self.input
    }

    #[inline]
    pub fn output(&self) -> &Path {
        &self.output
    }

    #[inline]
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Runs all stages of the job and returns the time spent by filtering.
    ///
    /// Time is added into `total` only if the result image was written.
    pub fn run<F: ImageFilter + ?Sized>(
        &mut self,
        filter: &F,
        total: &TimeAccumulator,
    ) -> Result<Duration, JobError> {
        let res = self.process(filter, total);
        if res.is_err() {
            self.set_state(JobState::Failed);
        }
        res
    }

    fn process<F: ImageFilter + ?Sized>(
        &mut self,
        filter: &F,
        total: &TimeAccumulator,
    ) -> Result<Duration, JobError> {
        self.set_state(JobState::Reading);
        let src_image = ppm::open(&self.input).map_err(|source| JobError::Read {
            path: self.input.clone(),
            source,
        })?;

        self.set_state(JobState::Filtering);
        let Filtered { image, elapsed } =
            filter.filter(&src_image).map_err(|source| JobError::Filter {
                path: self.input.clone(),
                source,
            })?;

        self.set_state(JobState::Writing);
        ppm::save(&image, &self.output).map_err(|source| JobError::Write {
            path: self.output.clone(),
            source,
        })?;

        self.set_state(JobState::AccumulatingTime);
        total.add(elapsed);
        self.set_state(JobState::Done);
        Ok(elapsed)
    }

    fn set_state(&mut self, state: JobState) {
        debug!(
            "Job #{} ({:?}): {:?} -> {:?}",
            self.index, self.input, self.state, state
        );
        self.state = state;
    }
}

/// Outcome of [run_jobs] if no fatal error happened.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Sum of filtering time of all completed jobs.
    pub total: Duration,
    pub completed: usize,
    /// Jobs that failed without affecting other jobs.
    pub failed: Vec<JobError>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs every job in its own thread named `job-{index}`.
///
/// All jobs are started before waiting for any of them. The first fatal
/// error is returned immediately, jobs still running are not awaited.
/// A panic of a job is resumed in the calling thread after all other
/// jobs have finished.
pub fn run_jobs<F>(jobs: Vec<Job>, filter: F) -> Result<RunSummary, JobError>
where
    F: ImageFilter + 'static,
{
    let filter = Arc::new(filter);
    let total = Arc::new(TimeAccumulator::new());
    let (sender, receiver) = mpsc::channel();
    let mut handles = Vec::with_capacity(jobs.len());
    for mut job in jobs {
        let index = job.index();
        let sender = sender.clone();
        let filter = Arc::clone(&filter);
        let total = Arc::clone(&total);
        let handle = thread::Builder::new()
            .name(format!("job-{index}"))
            .spawn(move || {
                let res = job.run(filter.as_ref(), &total);
                // Receiver is gone if another job has failed fatally
                sender.send(res).ok();
            })
            .map_err(|source| JobError::Spawn { index, source })?;
        handles.push(handle);
    }
    drop(sender);

    let mut summary = RunSummary::default();
    for res in receiver {
        match res {
            Ok(_) => summary.completed += 1,
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => summary.failed.push(err),
        }
    }
    for handle in handles {
        if let Err(payload) = handle.join() {
            panic::resume_unwind(payload);
        }
    }
    summary.total = total.total();
    Ok(summary)
}
