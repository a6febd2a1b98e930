//! Execution context of a fault.
//!
//! Firmware distinguishes two places code can run: an RTOS task (thread) and
//! an interrupt service routine. The fault path behaves differently in each,
//! because an ISR must never touch buffered or blocking I/O. Rather than
//! sampling a processor status register, callers state their context
//! explicitly, which keeps the path portable to host builds.

use alloc::string::String;
use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Where a fault was raised.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecContext {
    /// Regular task context, with the task name when one is known.
    Task(Option<String>),
    /// Interrupt service routine.
    Isr,
}

impl ExecContext {
    /// Context of the calling task.
    ///
    /// With `std`, the task name is the current thread name.
    pub fn task() -> Self {
        #[cfg(feature = "std")]
        {
            Self::Task(std::thread::current().name().map(String::from))
        }
        #[cfg(not(feature = "std"))]
        {
            Self::Task(None)
        }
    }

    /// Task context with an explicit name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Task(Some(name.into()))
    }

    pub const fn isr() -> Self {
        Self::Isr
    }

    pub fn is_isr(&self) -> bool {
        matches!(self, Self::Isr)
    }

    /// Task name, if this is a named task context.
    pub fn task_name(&self) -> Option<&str> {
        match self {
            Self::Task(name) => name.as_deref(),
            Self::Isr => None,
        }
    }
}

impl fmt::Display for ExecContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task(Some(name)) => write!(f, "task '{name}'"),
            Self::Task(None) => write!(f, "unnamed task"),
            Self::Isr => write!(f, "ISR"),
        }
    }
}
