use std::io::Write;
use anyhow::Result;

use crate::system::System as System;
use crate::system::gpu::GpuRecord;
use super::{ tier_color, RESET };

pub struct Gpu <'a> {
    pub system: &'a System,
}

impl <'a> Gpu <'a> {
    pub fn new(system: &'a System) -> Self {
        Self { system }
    }

    pub fn draw_static(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "+----------------------------+------+-------------------+---------+")?;
        writeln!(out, "| GPU                        | %GPU | VRAM              | PROCESS |")?;
        writeln!(out, "|----------------------------+------+-------------------+---------|")?;

        Ok(())
    }

    pub fn draw(&self, out: &mut impl Write) -> Result<()> {
        self.draw_static(out)?;

        for gpu in self.system.gpus.by_index() {
            let row = self.row(gpu);

            if self.system.config.color {
                let tier = gpu.tier(&self.system.config.thresholds);
                writeln!(out, "{}{}{}", tier_color(tier), row, RESET)?;
            } else {
                writeln!(out, "{}", row)?;
            }
        }

        writeln!(out, "|=================================================================|")?;

        Ok(())
    }

    fn row(&self, gpu: &GpuRecord) -> String {
        let marker = if self.system.processes.on_gpu(&gpu.uuid) {
            "RUNNING"
        } else {
            "-------"
        };

        format!(
            "| {:>3} {:>22} | {:>3}  | {:>5} / {:>5} MiB | {} |",
            gpu.index,
            gpu.name,
            gpu.utilization,
            gpu.memory_used,
            gpu.memory_total,
            marker
        )
    }
}
