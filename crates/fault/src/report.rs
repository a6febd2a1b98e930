//! Fault diagnostics.

use alloc::string::String;
use core::fmt;
use core::panic::Location;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::ExecContext;

/// Which fail-fast path raised the fault.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Always-on contract check (`check!`).
    Check,
    /// Debug-only assertion (`debug_check!`).
    Assert,
    /// Unconditional crash (`crash!`).
    Crash,
}

/// Everything the fault path knows about a contract violation.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultReport {
    pub kind: FaultKind,
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
    /// Source text of the failing condition. Empty for crashes.
    pub condition: &'static str,
    pub message: Option<String>,
    pub context: ExecContext,
}

impl FaultReport {
    pub fn new(
        kind: FaultKind,
        location: &'static Location<'static>,
        condition: &'static str,
        message: Option<String>,
        context: ExecContext,
    ) -> Self {
        Self {
            kind,
            file: location.file(),
            line: location.line(),
            column: location.column(),
            condition,
            message,
            context,
        }
    }
}

impl fmt::Display for FaultReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FaultKind::Check => write!(f, "check `{}` failed", self.condition)?,
            FaultKind::Assert => write!(f, "assertion `{}` failed", self.condition)?,
            FaultKind::Crash => write!(f, "crash")?,
        }
        write!(f, " at {}:{}:{} in {}", self.file, self.line, self.column, self.context)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}
