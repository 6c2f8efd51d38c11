use std::io::Write;
use anyhow::Result;

use crate::system::{ System, Tier };

mod gpu;
mod processes;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

const ADVISORY: &str = "Consider enabling persistence mode on your GPU(s) for faster response.\n\
For more information: https://docs.nvidia.com/deploy/driver-persistence/";

// Green when free, yellow when moderate, red when busy
pub fn tier_color(tier: Tier) -> &'static str {
    match tier {
        Tier::Free => GREEN,
        Tier::Moderate => YELLOW,
        Tier::High => RED,
    }
}

pub struct Ui <'a> {
    pub system: &'a System,
    gpu: gpu::Gpu<'a>,
    processes: processes::Processes<'a>,
}

impl <'a> Ui <'a> {
    pub fn new(system: &'a System) -> Self {
        Self {
            system,
            gpu: gpu::Gpu::new(system),
            processes: processes::Processes::new(system),
        }
    }

    pub fn draw(&self, out: &mut impl Write) -> Result<()> {
        // Once per run, no matter how many GPUs have it off
        if self.system.gpus.persistence_disabled() {
            writeln!(out, "{}", ADVISORY)?;
        }

        self.gpu.draw(out)?;

        if self.system.processes.is_empty() {
            writeln!(out, "| No running processes found                                      |")?;
            writeln!(out, "+-----------------------------------------------------------------+")?;
            return Ok(());
        }

        self.processes.draw(out)?;

        Ok(())
    }
}
