//! # fault
//!
//! Fail-fast contract checking for the hub coordination layer.
//!
//! Contract violations (double destroy, open-count underflow, releasing a
//! value mutex with a foreign lease, ...) are programming defects, not runtime
//! conditions. They are never returned to the caller: the fault path formats a
//! [`FaultReport`] with the source location, the failing condition and the
//! [`ExecContext`], hands it to the installed [`FaultSink`], keeps it as the
//! [`last_fault`] and halts. There is no resumption.
//!
//! Halting is a panic. The workspace profiles build with `panic = "abort"`,
//! so on target (and in host binaries) a fault stops the system; test
//! harnesses unwind and can observe it with `#[should_panic]`.
//!
//! ## Macros
//! - [`check!`] – always-on contract check.
//! - [`debug_check!`] – check compiled only with `debug_assertions`.
//! - [`crash!`] – unconditional fault.
//!
//! Each macro accepts an optional `ctx =>` prefix naming the execution
//! context; without it the calling task's context is used.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

use alloc::string::String;
use core::panic::Location;

mod context;
mod report;
mod sink;

pub use context::ExecContext;
pub use report::{FaultKind, FaultReport};
pub use sink::{install_sink, last_fault, take_sink, FaultSink, LogSink};

#[doc(hidden)]
pub mod __private {
    pub use alloc::format;
}

/// Raises a fault and halts.
///
/// This is the target of all fault macros. The reported location is the
/// outermost `#[track_caller]` frame, so library entry points marked with it
/// blame their caller rather than themselves.
#[cold]
#[inline(never)]
#[track_caller]
pub fn fail(
    kind: FaultKind,
    context: ExecContext,
    condition: &'static str,
    message: Option<String>,
) -> ! {
    let report = FaultReport::new(kind, Location::caller(), condition, message, context);
    sink::emit(&report);
    sink::remember(&report);
    halt(&report)
}

fn halt(report: &FaultReport) -> ! {
    panic!("{report}")
}

/// Always-on contract check.
///
/// ```should_panic
/// let open_count: usize = 0;
/// fault::check!(open_count > 0, "record closed more times than opened");
/// ```
#[macro_export]
macro_rules! check {
    ($ctx:expr => $cond:expr $(,)?) => {
        if !$cond {
            $crate::fail($crate::FaultKind::Check, $ctx, stringify!($cond), None)
        }
    };
    ($ctx:expr => $cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::fail(
                $crate::FaultKind::Check,
                $ctx,
                stringify!($cond),
                Some($crate::__private::format!($($arg)+)),
            )
        }
    };
    ($cond:expr $(,)?) => {
        $crate::check!($crate::ExecContext::task() => $cond)
    };
    ($cond:expr, $($arg:tt)+) => {
        $crate::check!($crate::ExecContext::task() => $cond, $($arg)+)
    };
}

/// Contract check compiled only into debug builds.
#[macro_export]
macro_rules! debug_check {
    ($ctx:expr => $cond:expr $(,)?) => {
        if cfg!(debug_assertions) && !$cond {
            $crate::fail($crate::FaultKind::Assert, $ctx, stringify!($cond), None)
        }
    };
    ($ctx:expr => $cond:expr, $($arg:tt)+) => {
        if cfg!(debug_assertions) && !$cond {
            $crate::fail(
                $crate::FaultKind::Assert,
                $ctx,
                stringify!($cond),
                Some($crate::__private::format!($($arg)+)),
            )
        }
    };
    ($cond:expr $(,)?) => {
        $crate::debug_check!($crate::ExecContext::task() => $cond)
    };
    ($cond:expr, $($arg:tt)+) => {
        $crate::debug_check!($crate::ExecContext::task() => $cond, $($arg)+)
    };
}

/// Unconditional fault.
#[macro_export]
macro_rules! crash {
    () => {
        $crate::fail($crate::FaultKind::Crash, $crate::ExecContext::task(), "", None)
    };
    ($ctx:expr => $($arg:tt)+) => {
        $crate::fail(
            $crate::FaultKind::Crash,
            $ctx,
            "",
            Some($crate::__private::format!($($arg)+)),
        )
    };
    ($($arg:tt)+) => {
        $crate::fail(
            $crate::FaultKind::Crash,
            $crate::ExecContext::task(),
            "",
            Some($crate::__private::format!($($arg)+)),
        )
    };
}
