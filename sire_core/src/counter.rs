use std::time::Duration;

use crate::timer::FrameClock;

/// Headline number shown in the hero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroStat {
    pub key: String,
    pub label: String,
    pub value: u64,
}

impl HeroStat {
    pub fn new(key: &str, label: &str, value: u64) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value,
        }
    }
}

pub fn default_hero_stats() -> Vec<HeroStat> {
    vec![
        HeroStat::new("creators", "Creators Verified", 1240),
        HeroStat::new("campaigns", "Campaigns Managed", 89),
        HeroStat::new("categories", "Brand Categories", 32),
    ]
}

/// `1 - (1 - p)^3`
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Counts every stat up from zero on mount.
#[derive(Debug, Clone)]
pub struct AnimatedCounts {
    targets: Vec<HeroStat>,
    values: Vec<u64>,
    clock: FrameClock,
}

impl AnimatedCounts {
    pub fn new(targets: Vec<HeroStat>, duration: Duration) -> Self {
        let values = vec![0; targets.len()];
        Self {
            targets,
            values,
            clock: FrameClock::new(duration),
        }
    }

    /// Skip the animation, e.g. for reduced motion
    pub fn settled(targets: Vec<HeroStat>) -> Self {
        let mut counts = Self::new(targets, Duration::ZERO);
        counts.tick(Duration::ZERO);
        counts
    }

    /// Advance one frame. Returns whether any value changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(progress) = self.clock.advance(dt) else {
            return false;
        };
        let eased = ease_out_cubic(progress);
        let mut changed = false;
        for (value, stat) in self.values.iter_mut().zip(&self.targets) {
            let next = (stat.value as f64 * eased).floor() as u64;
            if next != *value {
                *value = next;
                changed = true;
            }
        }
        changed
    }

    pub fn cancel(&mut self) {
        self.clock.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn value(&self, key: &str) -> Option<u64> {
        self.targets
            .iter()
            .position(|s| s.key == key)
            .map(|i| self.values[i])
    }

    /// `(stat, current value)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (&HeroStat, u64)> {
        self.targets.iter().zip(self.values.iter().copied())
    }
}
