use ahash::AHashMap;
use tracing::{ debug, warn };

use crate::error::{ Error, RecordKind };
use super::record::{ self, Fields };
use super::{ load, Runner, Thresholds, Tier };

pub const QUERY_ARGS: [&str; 2] = [
    "--format=csv,noheader,nounits",
    "--query-gpu=index,gpu_uuid,name,memory.used,memory.total,utilization.gpu,persistence_mode",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuRecord {
    pub index: u32,
    pub uuid: String,
    pub name: String,
    pub memory_used: u32,  // MiB
    pub memory_total: u32, // MiB
    pub utilization: u32,  // %
    pub persistence_mode: bool,
}

impl GpuRecord {
    pub fn from_line(line: &str) -> Result<Self, Error> {
        let fields = Fields::split(RecordKind::Gpu, line, 7)?;

        Ok(Self {
            index: fields.number(0, "index")?,
            uuid: fields.text(1).to_string(),
            name: fields.text(2).to_string(),
            memory_used: fields.number(3, "memory.used")?,
            memory_total: fields.number(4, "memory.total")?,
            utilization: fields.number(5, "utilization.gpu")?,
            persistence_mode: fields.text(6) == "Enabled",
        })
    }

    pub fn memory_percent(&self) -> u32 {
        load::memory_percent(self.memory_used, self.memory_total)
    }

    pub fn tier(&self, thresholds: &Thresholds) -> Tier {
        thresholds.classify(self.utilization, self.memory_percent())
    }
}

/// Every GPU in one snapshot, keyed by uuid.
#[derive(Default, Debug)]
pub struct Gpus {
    records: Vec<GpuRecord>,
    by_uuid: AHashMap<String, usize>,
}

impl Gpus {
    pub fn parse(output: &str) -> Result<Self, Error> {
        let mut gpus = Self::default();

        for line in record::lines(output) {
            let gpu = GpuRecord::from_line(line)?;
            if let Some(old) = gpus.insert(gpu) {
                warn!(uuid = %old.uuid, index = old.index, "duplicate GPU uuid, keeping the last one");
            }
        }

        Ok(gpus)
    }

    // Last write wins. Hands back the record that got replaced.
    pub fn insert(&mut self, gpu: GpuRecord) -> Option<GpuRecord> {
        match self.by_uuid.get(&gpu.uuid) {
            Some(&slot) => Some(std::mem::replace(&mut self.records[slot], gpu)),
            None => {
                self.by_uuid.insert(gpu.uuid.clone(), self.records.len());
                self.records.push(gpu);
                None
            }
        }
    }

    pub fn get(&self, uuid: &str) -> Option<&GpuRecord> {
        self.by_uuid.get(uuid).map(|&slot| &self.records[slot])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // Sorted by index, ties keep the order nvidia-smi reported them in
    pub fn by_index(&self) -> Vec<&GpuRecord> {
        let mut sorted: Vec<&GpuRecord> = self.records.iter().collect();
        sorted.sort_by_key(|v| v.index);
        sorted
    }

    pub fn persistence_disabled(&self) -> bool {
        self.records.iter().any(|v| !v.persistence_mode)
    }
}

pub fn retrieve(runner: &impl Runner) -> Result<Gpus, Error> {
    let output = runner.run("nvidia-smi", &QUERY_ARGS)?;
    let gpus = Gpus::parse(&output)?;

    debug!(count = gpus.len(), "parsed GPU inventory");

    Ok(gpus)
}
