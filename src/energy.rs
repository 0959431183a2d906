use crate::config::EnergyConfig;

/// The boost meter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Energy {
    config: EnergyConfig,
    level: u32,
    locked: bool,
}

impl Energy {
    pub fn new(config: EnergyConfig) -> Self {
        Energy {
            config,
            level: config.max,
            locked: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Level as a fraction of the maximum, for drawing a meter.
    pub fn ratio(&self) -> f32 {
        self.level as f32 / self.config.max as f32
    }

    pub fn can_boost(&self) -> bool {
        !self.locked && self.level > 0
    }

    /// Spend one boosted frame. Returns `false` once the meter is empty, at
    /// which point it stays locked until [`Energy::regenerate`] refills it
    /// to the re-engage threshold.
    pub fn drain(&mut self) -> bool {
        self.level = self.level.saturating_sub(self.config.drain);
        if self.level == 0 {
            self.locked = true;
        }
        !self.locked
    }

    pub fn regenerate(&mut self) {
        self.level = (self.level + self.config.regen).min(self.config.max);
        if self.locked && self.level >= self.config.reengage_threshold {
            self.locked = false;
        }
    }

    pub fn refill(&mut self) {
        self.level = self.config.max;
        self.locked = false;
    }
}
