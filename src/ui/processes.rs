use std::io::Write;
use anyhow::Result;
use tracing::warn;

use crate::system::System as System;
use crate::system::processes::ProcessRecord;

pub struct Processes <'a> {
    pub system: &'a System,
}

impl <'a> Processes <'a> {
    pub fn new(system: &'a System) -> Self {
        Self { system }
    }

    pub fn draw_static(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "| GPU | USER       | PID     | VRAM      | COMMAND                |")?;
        writeln!(out, "|-----+------------+---------+-----------+------------------------|")?;

        Ok(())
    }

    pub fn draw(&self, out: &mut impl Write) -> Result<()> {
        self.draw_static(out)?;

        for process in self.system.processes.iter() {
            writeln!(out, "{}", self.row(process))?;
        }

        writeln!(out, "+-----+------------+---------+-----------+------------------------+")?;

        Ok(())
    }

    fn row(&self, process: &ProcessRecord) -> String {
        // nvidia-smi can list a process on a GPU the gpu query didn't report
        let index = match self.system.gpus.get(&process.gpu_uuid) {
            Some(gpu) => gpu.index.to_string(),
            None => {
                warn!(uuid = %process.gpu_uuid, pid = process.pid, "process on unknown GPU");
                "?".to_string()
            }
        };

        format!(
            "| {:>3} | {:>10} | {:>7} | {:>5} MiB | {:>22.22} |",
            index,
            process.user,
            process.pid,
            process.used_memory,
            process.command
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::{ process, system, t4 };

    const BORDER: &str = "+-----+------------+---------+-----------+------------------------+";

    #[test]
    fn long_commands_are_cut_to_the_column() {
        let system = system(
            vec![t4(0, "GPU-a", 0, true)],
            vec![process("GPU-a", 1, "/usr/bin/python3 -m torch.distributed.run train.py")],
            false,
        );

        let row = Processes::new(&system).row(&system.processes.processes[0]);

        assert!(row.ends_with("| /usr/bin/python3 -m to |"));
        assert_eq!(row.len(), BORDER.len());
    }

    #[test]
    fn unknown_gpu_shows_placeholder() {
        let system = system(vec![t4(0, "GPU-a", 0, true)], vec![process("GPU-zzz", 5, "x")], false);

        let row = Processes::new(&system).row(&system.processes.processes[0]);

        assert!(row.starts_with("|   ? |"));
    }

    #[test]
    fn rows_keep_insertion_order() {
        let system = system(
            vec![t4(0, "GPU-a", 0, true), t4(1, "GPU-b", 0, true)],
            vec![process("GPU-b", 30, "c"), process("GPU-a", 10, "a"), process("GPU-b", 20, "b")],
            false,
        );
        let mut out = Vec::new();

        Processes::new(&system).draw(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let pids: Vec<&str> = text
            .lines()
            .skip(2)
            .take(3)
            .map(|v| v.split('|').nth(3).unwrap().trim())
            .collect();
        assert_eq!(pids, vec!["30", "10", "20"]);
        assert_eq!(text.lines().last(), Some(BORDER));
    }
}
