use crate::error::{ Error, RecordKind };
use crate::system::record::Fields;
use crate::system::Runner;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub gpu_uuid: String,
    pub pid: u32,
    pub used_memory: u32, // MiB
    pub user: String,
    pub command: String,
}

impl ProcessRecord {
    // Parses the csv line and asks ps who owns the pid and what it is running
    pub fn from_line(line: &str, runner: &impl Runner) -> Result<Self, Error> {
        let fields = Fields::split(RecordKind::Process, line, 3)?;

        let gpu_uuid = fields.text(0).to_string();
        let pid = fields.number(1, "pid")?;
        let used_memory = fields.number(2, "used_memory")?;

        // The process can exit between nvidia-smi and ps. That's fatal too.
        let user = lookup(runner, pid, "user")?;
        let command = lookup(runner, pid, "command")?;

        Ok(Self {
            gpu_uuid,
            pid,
            used_memory,
            user,
            command,
        })
    }
}

fn lookup(runner: &impl Runner, pid: u32, attribute: &'static str) -> Result<String, Error> {
    let pid_str = pid.to_string();

    let output = runner
        .run("ps", &["ho", attribute, &pid_str])
        .map_err(|err| Error::ProcessLookup { pid, attribute, reason: err.to_string() })?;

    let value = output.trim();
    if value.is_empty() {
        return Err(Error::ProcessLookup { pid, attribute, reason: "ps returned nothing".to_string() });
    }

    Ok(value.to_string())
}
