mod process;

use tracing::debug;

use crate::error::Error;
use super::{ record, Runner };

pub use process::ProcessRecord;

pub const QUERY_ARGS: [&str; 2] = [
    "--format=csv,noheader,nounits",
    "--query-compute-apps=gpu_uuid,pid,used_memory",
];

// Compute processes in the order nvidia-smi listed them
#[derive(Default, Debug)]
pub struct Processes {
    pub processes: Vec<ProcessRecord>,
}

impl Processes {
    pub fn parse(output: &str, runner: &impl Runner) -> Result<Self, Error> {
        let processes = record::lines(output)
            .map(|line| ProcessRecord::from_line(line, runner))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { processes })
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessRecord> {
        self.processes.iter()
    }

    // Is anything running on this GPU?
    pub fn on_gpu(&self, uuid: &str) -> bool {
        self.processes.iter().any(|v| v.gpu_uuid == uuid)
    }
}

pub fn retrieve(runner: &impl Runner) -> Result<Processes, Error> {
    let output = runner.run("nvidia-smi", &QUERY_ARGS)?;
    let processes = Processes::parse(&output, runner)?;

    debug!(count = processes.len(), "parsed compute processes");

    Ok(processes)
}
