//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        rand::thread_rng().gen_range(min..=max)
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Settable clock for testing.
#[cfg(test)]
pub struct FixedClock(pub std::sync::Mutex<DateTime<Utc>>);

#[cfg(test)]
impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(std::sync::Mutex::new(now))
    }

    pub fn advance(&self, by: chrono::Duration) {
        if let Ok(mut now) = self.0.lock() {
            *now += by;
        }
    }
}

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock poisoned")
    }
}

/// Replays queued samples, clamped to the requested range; `min` once drained.
/// UUIDs count up from 1 so ids stay distinct and predictable.
#[cfg(test)]
pub struct ScriptedRandom {
    samples: std::sync::Mutex<std::collections::VecDeque<i32>>,
    next_uuid: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(samples: impl IntoIterator<Item = i32>) -> Self {
        Self {
            samples: std::sync::Mutex::new(samples.into_iter().collect()),
            next_uuid: std::sync::atomic::AtomicU64::new(1),
        }
    }

    pub fn push(&self, samples: impl IntoIterator<Item = i32>) {
        self.samples
            .lock()
            .expect("random lock poisoned")
            .extend(samples);
    }
}

#[cfg(test)]
impl RandomPort for ScriptedRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        let next = self.samples.lock().expect("random lock poisoned").pop_front();
        next.map_or(min, |value| value.clamp(min, max))
    }

    fn gen_uuid(&self) -> Uuid {
        let n = self
            .next_uuid
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Uuid::from_u128(u128::from(n))
    }
}
