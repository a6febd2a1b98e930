//! Pluggable fault output and the post-mortem slot.
//!
//! Both globals sit behind `spin` locks rather than OS mutexes: the fault
//! path can run in an ISR, where blocking on a scheduler primitive is not
//! allowed. From ISR context the locks are only ever *tried*, so a fault that
//! interrupts a task holding them degrades to "no output" instead of a
//! deadlock.

use alloc::sync::Arc;

use spin::{Mutex, RwLock};

use crate::FaultReport;

/// Destination for fault diagnostics.
///
/// Sinks are invoked from ISR context as well, so implementations must not
/// block and should avoid allocation when `report.context.is_isr()`.
pub trait FaultSink: Send + Sync {
    fn emit(&self, report: &FaultReport);
}

/// Sink that forwards reports to the `log` facade. Reports raised in ISR
/// context are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl FaultSink for LogSink {
    fn emit(&self, report: &FaultReport) {
        if !report.context.is_isr() {
            log::error!("{report}");
        }
    }
}

static SINK: RwLock<Option<Arc<dyn FaultSink>>> = RwLock::new(None);
static LAST_FAULT: Mutex<Option<FaultReport>> = Mutex::new(None);

/// Installs `sink` as the fault output, returning the previous one.
pub fn install_sink(sink: Arc<dyn FaultSink>) -> Option<Arc<dyn FaultSink>> {
    SINK.write().replace(sink)
}

/// Removes the installed sink; faults fall back to [`LogSink`].
pub fn take_sink() -> Option<Arc<dyn FaultSink>> {
    SINK.write().take()
}

/// Most recent fault report, kept for post-mortem inspection.
pub fn last_fault() -> Option<FaultReport> {
    LAST_FAULT.lock().clone()
}

pub(crate) fn emit(report: &FaultReport) {
    if report.context.is_isr() {
        if let Some(guard) = SINK.try_read() {
            if let Some(sink) = guard.as_ref() {
                sink.emit(report);
            }
        }
        return;
    }

    match SINK.read().as_ref() {
        Some(sink) => sink.emit(report),
        None => LogSink.emit(report),
    }
}

pub(crate) fn remember(report: &FaultReport) {
    let slot = if report.context.is_isr() {
        LAST_FAULT.try_lock()
    } else {
        Some(LAST_FAULT.lock())
    };
    if let Some(mut slot) = slot {
        *slot = Some(report.clone());
    }
}
