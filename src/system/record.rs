use crate::error::{ Error, RecordKind };

// nvidia-smi separates csv fields with a comma and a space
const SEPARATOR: &str = ", ";

/// One csv line split into its positional fields.
pub struct Fields<'a> {
    kind: RecordKind,
    line: &'a str,
    values: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    pub fn split(kind: RecordKind, line: &'a str, expected: usize) -> Result<Self, Error> {
        let line = line.trim_end();
        let values: Vec<&str> = line.split(SEPARATOR).map(str::trim).collect();

        if values.len() != expected {
            return Err(Error::FieldCount {
                kind,
                expected,
                found: values.len(),
                line: line.to_string(),
            });
        }

        Ok(Self { kind, line, values })
    }

    pub fn text(&self, idx: usize) -> &'a str {
        self.values[idx]
    }

    // Base 10, no sign. Anything else is fatal.
    pub fn number(&self, idx: usize, field: &'static str) -> Result<u32, Error> {
        let value = self.values[idx];

        btoi::btou::<u32>(value.as_bytes()).map_err(|_| Error::MalformedRecord {
            kind: self.kind,
            field,
            value: value.to_string(),
            line: self.line.to_string(),
        })
    }
}

// Non-blank lines of a command's output
pub fn lines(output: &str) -> impl Iterator<Item = &str> {
    output.trim().lines().filter(|line| !line.trim().is_empty())
}
