use std::process::Command;
use anyhow::{ Context, Result };
use tracing::{ debug, warn };

use crate::error::Error;

mod record;
pub mod gpu;
pub mod load;
pub mod processes;

pub use load::{ Thresholds, Tier };

// Holds everything that is compiled in. Built once in main.
pub struct Config {
    pub thresholds: Thresholds,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            color: true,
        }
    }
}

/// Runs an external program to completion and hands back its stdout.
///
/// Every call to `nvidia-smi` and `ps` goes through this so the collectors
/// can be fed canned output.
pub trait Runner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, Error>;
}

pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, Error> {
        debug!(program, ?args, "running external command");

        // Blocks until the program exits, there is no timeout
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| Error::Spawn { program: program.to_string(), source })?;

        if !output.status.success() {
            return Err(Error::ExitStatus {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| Error::NonUtf8 { program: program.to_string() })
    }
}

// One inventory snapshot plus the settings used to present it
pub struct System {
    pub config: Config,
    pub gpus: gpu::Gpus,
    pub processes: processes::Processes,
}

impl System {
    pub fn collect(config: Config, runner: &impl Runner) -> Result<Self> {
        let gpus = gpu::retrieve(runner).context("Can't query GPUs")?;
        if gpus.is_empty() {
            warn!("nvidia-smi didn't report any GPUs");
        }

        let processes = processes::retrieve(runner).context("Can't query compute processes")?;

        debug!(gpus = gpus.len(), processes = processes.len(), "collected snapshot");

        Ok(Self {
            config,
            gpus,
            processes,
        })
    }
}
