// Per-session refresh cadence for each data class.

use crate::domain::DataClass;
use std::time::{Duration, Instant};

/// Refresh intervals and feature toggles shared by every session.
#[derive(Debug, Clone)]
pub struct CadencePolicy {
    /// Minimum time between player refreshes (zero means every cycle).
    pub player_interval: Duration,
    /// Minimum time between loot, corpse and exfil refreshes.
    pub loot_interval: Duration,
    /// Whether container contents are streamed at all.
    pub containers_enabled: bool,
    /// Whether loose loot is streamed at all.
    pub loose_loot_enabled: bool,
}

impl Default for CadencePolicy {
    fn default() -> Self {
        Self {
            player_interval: Duration::ZERO,
            loot_interval: Duration::from_secs(5),
            containers_enabled: false,
            loose_loot_enabled: true,
        }
    }
}

impl CadencePolicy {
    pub fn interval(&self, class: DataClass) -> Duration {
        match class {
            DataClass::Players => self.player_interval,
            _ => self.loot_interval,
        }
    }

    pub fn is_enabled(&self, class: DataClass) -> bool {
        match class {
            DataClass::Containers => self.containers_enabled,
            DataClass::LooseLoot => self.loose_loot_enabled,
            _ => true,
        }
    }
}

/// Classes selected for one refresh cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueSet {
    due: [bool; DataClass::ALL.len()],
}

impl DueSet {
    pub fn contains(&self, class: DataClass) -> bool {
        self.due[class.index()]
    }

    pub fn is_empty(&self) -> bool {
        !self.due.iter().any(|d| *d)
    }

    fn insert(&mut self, class: DataClass) {
        self.due[class.index()] = true;
    }
}

/// Last successful refresh per data class for a single session.
#[derive(Debug, Clone)]
pub struct CadenceScheduler {
    policy: CadencePolicy,
    last_refresh: [Option<Instant>; DataClass::ALL.len()],
}

impl CadenceScheduler {
    pub fn new(policy: CadencePolicy) -> Self {
        Self {
            policy,
            last_refresh: [None; DataClass::ALL.len()],
        }
    }

    pub fn is_due(&self, class: DataClass, now: Instant) -> bool {
        if !self.policy.is_enabled(class) {
            return false;
        }
        match self.last_refresh[class.index()] {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.policy.interval(class),
        }
    }

    pub fn due_classes(&self, classes: &[DataClass], now: Instant) -> DueSet {
        let mut due = DueSet::default();
        for class in classes {
            if self.is_due(*class, now) {
                due.insert(*class);
            }
        }
        due
    }

    /// Records a refresh. Call only after the frame carrying `due` was sent.
    pub fn mark_refreshed(&mut self, due: &DueSet, now: Instant) {
        for class in DataClass::ALL {
            if due.contains(class) {
                self.last_refresh[class.index()] = Some(now);
            }
        }
    }

    pub fn last_refresh(&self, class: DataClass) -> Option<Instant> {
        self.last_refresh[class.index()]
    }
}
