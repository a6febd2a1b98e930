//! Timeouts for the suspension points of the hub.

use core::fmt;
use std::time::Duration;

/// How long a blocking call may suspend the calling task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeout {
    /// Poll once, never suspend.
    NoWait,
    /// Suspend for at most the given duration.
    After(Duration),
    /// Suspend until the condition is met.
    Forever,
}

impl Timeout {
    /// RTOS-style tick value in milliseconds: `0` polls, `u32::MAX` waits forever.
    pub const fn from_millis(ms: u32) -> Self {
        match ms {
            0 => Self::NoWait,
            u32::MAX => Self::Forever,
            ms => Self::After(Duration::from_millis(ms as u64)),
        }
    }

    pub const fn is_forever(self) -> bool {
        matches!(self, Self::Forever)
    }
}

impl From<Duration> for Timeout {
    fn from(value: Duration) -> Self {
        if value.is_zero() {
            Self::NoWait
        } else {
            Self::After(value)
        }
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWait => write!(f, "no-wait"),
            Self::After(d) => write!(f, "{d:?}"),
            Self::Forever => write!(f, "forever"),
        }
    }
}
