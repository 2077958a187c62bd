//! Sleep timer state machine: `Idle -> Armed(remaining) -> Idle`.
//!
//! The timer only counts; pausing the tracks on expiry is the caller's job.
//! Wall-clock cadence lives in the runtime, one `tick` per elapsed second.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SleepTimer {
    #[default]
    Idle,
    Armed { remaining: u64 },
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing was counting.
    Idle,
    /// Still armed with this many seconds left.
    Counting(u64),
    /// The countdown reached zero on this tick; the timer is idle again.
    Expired,
}

impl SleepTimer {
    /// Start a countdown of `seconds`, replacing any running one.
    /// Zero clears the timer. Returns whether the timer is now armed.
    pub fn arm(&mut self, seconds: u64) -> bool {
        if seconds == 0 {
            self.clear();
            return false;
        }
        *self = Self::Armed { remaining: seconds };
        true
    }

    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    pub fn tick(&mut self) -> Tick {
        match *self {
            Self::Idle => Tick::Idle,
            Self::Armed { remaining } if remaining <= 1 => {
                *self = Self::Idle;
                Tick::Expired
            }
            Self::Armed { remaining } => {
                *self = Self::Armed {
                    remaining: remaining - 1,
                };
                Tick::Counting(remaining - 1)
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Armed { .. })
    }

    /// Seconds left, zero when idle.
    pub fn remaining(&self) -> u64 {
        match self {
            Self::Idle => 0,
            Self::Armed { remaining } => *remaining,
        }
    }
}
