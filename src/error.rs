use thiserror::Error;

// Which line schema a parse failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Gpu,
    Process,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Gpu => write!(f, "GPU"),
            RecordKind::Process => write!(f, "process"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Can't run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} failed with {status}: {stderr}")]
    ExitStatus {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} produced output that isn't valid UTF-8")]
    NonUtf8 { program: String },

    #[error("Malformed {kind} record, expected {expected} fields but found {found}: {line:?}")]
    FieldCount {
        kind: RecordKind,
        expected: usize,
        found: usize,
        line: String,
    },

    #[error("Malformed {kind} record, '{field}' is not a number ({value:?}): {line:?}")]
    MalformedRecord {
        kind: RecordKind,
        field: &'static str,
        value: String,
        line: String,
    },

    #[error("Can't look up the {attribute} of pid {pid}: {reason}")]
    ProcessLookup {
        pid: u32,
        attribute: &'static str,
        reason: String,
    },
}

impl Error {
    // Process exit code for each kind of failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Spawn { .. } | Error::ExitStatus { .. } | Error::NonUtf8 { .. } => 2,
            Error::FieldCount { .. } | Error::MalformedRecord { .. } => 3,
            Error::ProcessLookup { .. } => 4,
        }
    }
}
