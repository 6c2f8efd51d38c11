// Load tier of a single GPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Free,
    Moderate,
    High,
}

/// Percent thresholds used to sort a GPU into a [`Tier`].
///
/// Anything at or above `gpu_moderate` / `mem_moderate` is High, anything at
/// or above `gpu_free` / `mem_free` is Moderate and the rest is Free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub gpu_free: u32,
    pub mem_free: u32,
    pub gpu_moderate: u32,
    pub mem_moderate: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            gpu_free: 5,
            mem_free: 5,
            gpu_moderate: 75,
            mem_moderate: 90,
        }
    }
}

impl Thresholds {
    pub fn classify(&self, utilization: u32, memory_percent: u32) -> Tier {
        if utilization >= self.gpu_moderate || memory_percent >= self.mem_moderate {
            Tier::High
        } else if utilization >= self.gpu_free || memory_percent >= self.mem_free {
            Tier::Moderate
        } else {
            Tier::Free
        }
    }
}

// Truncated integer percentage. A zero total reports 0% instead of dividing by zero.
pub fn memory_percent(used: u32, total: u32) -> u32 {
    (u64::from(used) * 100)
        .checked_div(u64::from(total))
        .map_or(0, |v| v.min(u64::from(u32::MAX)) as u32)
}
