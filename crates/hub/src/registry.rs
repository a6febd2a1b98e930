//! Named record registry.
//!
//! Tasks publish shared singletons (drivers, buses, services) under a
//! well-known name and other tasks look them up by that name. The registry
//! only stores a `&'static` handle; it never owns, copies or frees the value.
//!
//! Every successful open bumps the record's open count and must be paired
//! with a close. The open count gates [`Records::destroy`]: a record that is
//! still open cannot be removed.
//!
//! Opening a record that does not exist yet suspends the caller until some
//! task creates it. With [`Timeout::Forever`] that wait has no bound, so a
//! record that is never created blocks its opener for good; the registry logs
//! a warning every [`RegistryConfig::open_warning_interval`] while that
//! happens.

use core::any::{type_name, Any};
use core::fmt;
use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;

use crate::config::RegistryConfig;
use crate::sync::{Gate, MutexGuard};
use crate::Timeout;

/// Type-erased record handle.
pub type RecordValue = &'static (dyn Any + Send + Sync);

/// Recoverable registry failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record '{name}' is still open {open_count} time(s)")]
    Busy { name: String, open_count: usize },
}

/// Registry contract, object safe so tasks can hold a `&dyn Records`.
///
/// Most callers want the typed wrappers in [`RecordsExt`].
pub trait Records: Send + Sync {
    /// Registers `value` under `name`. Creating an existing name is a fault.
    fn create_erased(&self, name: &str, value: RecordValue, type_name: &'static str);

    /// Opens `name`, waiting up to `timeout` for it to be created.
    fn open_erased(&self, name: &str, timeout: Timeout) -> Option<RecordValue>;

    /// Gives back one open of `name`.
    fn close(&self, name: &str);

    /// Removes `name` if nobody holds it open.
    fn destroy(&self, name: &str) -> Result<(), RecordError>;

    /// Advisory: whether `name` is registered right now.
    fn exists(&self, name: &str) -> bool;
}

/// Typed access on top of [`Records`].
pub trait RecordsExt: Records {
    /// Registers a typed value under `name`.
    #[track_caller]
    fn create<T: Any + Send + Sync>(&self, name: &str, value: &'static T) {
        self.create_erased(name, value, type_name::<T>());
    }

    /// Opens `name` as a `T`, waiting for it to be created if needed.
    #[track_caller]
    fn open<T: Any + Send + Sync>(&self, name: &str) -> &'static T {
        match self.open_timeout::<T>(name, Timeout::Forever) {
            Some(value) => value,
            None => fault::crash!("open of record '{name}' returned without a value"),
        }
    }

    /// Opens `name` as a `T` within `timeout`. `None` means it was not created
    /// in time. Opening with the wrong type is a fault.
    #[track_caller]
    fn open_timeout<T: Any + Send + Sync>(
        &self,
        name: &str,
        timeout: impl Into<Timeout>,
    ) -> Option<&'static T> {
        let value = self.open_erased(name, timeout.into())?;
        match value.downcast_ref::<T>() {
            Some(value) => Some(value),
            None => fault::crash!("record '{name}' opened as {}", type_name::<T>()),
        }
    }
}

impl<R: Records + ?Sized> RecordsExt for R {}

struct RecordEntry {
    value: RecordValue,
    type_name: &'static str,
    open_count: usize,
}

type Table = HashMap<String, RecordEntry>;

/// Registry of named records, shared by reference between tasks.
pub struct Registry {
    config: RegistryConfig,
    table: Gate<Table>,
}

impl Registry {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let table = HashMap::with_capacity(config.capacity);
        Self {
            config,
            table: Gate::new(table),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Current open count of `name`, `None` if it is not registered.
    pub fn open_count(&self, name: &str) -> Option<usize> {
        self.table.lock().get(name).map(|entry| entry.open_count)
    }

    /// Type the record was created with, `None` if it is not registered.
    pub fn type_name(&self, name: &str) -> Option<&'static str> {
        self.table.lock().get(name).map(|entry| entry.type_name)
    }

    /// Number of registered records.
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn wait_forever(&self, table: &mut MutexGuard<'_, Table>, name: &str) {
        let interval = self
            .config
            .open_warning_interval
            .max(Duration::from_millis(1));
        while !self
            .table
            .wait_while(table, Timeout::After(interval), |table| {
                !table.contains_key(name)
            })
        {
            log::warn!(
                "{}: still waiting for record '{name}' after {interval:?}",
                self.config.name
            );
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Records for Registry {
    #[track_caller]
    fn create_erased(&self, name: &str, value: RecordValue, type_name: &'static str) {
        let mut table = self.table.lock();
        fault::check!(
            !table.contains_key(name),
            "record '{name}' already exists"
        );
        table.insert(
            name.to_owned(),
            RecordEntry {
                value,
                type_name,
                open_count: 0,
            },
        );
        drop(table);

        log::debug!("{}: record '{name}' created ({type_name})", self.config.name);
        self.table.notify_all();
    }

    fn open_erased(&self, name: &str, timeout: Timeout) -> Option<RecordValue> {
        let mut table = self.table.lock();
        let present = match timeout {
            Timeout::Forever => {
                self.wait_forever(&mut table, name);
                true
            }
            timeout => self
                .table
                .wait_while(&mut table, timeout, |table| !table.contains_key(name)),
        };
        if !present {
            log::trace!("{}: open '{name}' timed out after {timeout}", self.config.name);
            return None;
        }

        let entry = table.get_mut(name)?;
        entry.open_count += 1;
        log::trace!(
            "{}: open '{name}' -> {}",
            self.config.name,
            entry.open_count
        );
        Some(entry.value)
    }

    #[track_caller]
    fn close(&self, name: &str) {
        let mut table = self.table.lock();
        let Some(entry) = table.get_mut(name) else {
            fault::crash!("close of unknown record '{name}'")
        };
        fault::check!(
            entry.open_count > 0,
            "record '{name}' closed more times than opened"
        );
        entry.open_count -= 1;
        log::trace!(
            "{}: close '{name}' -> {}",
            self.config.name,
            entry.open_count
        );
    }

    #[track_caller]
    fn destroy(&self, name: &str) -> Result<(), RecordError> {
        let mut table = self.table.lock();
        let open_count = match table.get(name) {
            Some(entry) => entry.open_count,
            None => fault::crash!("destroy of unknown record '{name}'"),
        };
        if open_count != 0 {
            log::warn!(
                "{}: refusing to destroy '{name}', open {open_count} time(s)",
                self.config.name
            );
            return Err(RecordError::Busy {
                name: name.to_owned(),
                open_count,
            });
        }
        table.remove(name);
        log::debug!("{}: record '{name}' destroyed", self.config.name);
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.table.lock().contains_key(name)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.lock();
        let mut names: Vec<&str> = table.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Registry")
            .field("name", &self.config.name)
            .field("records", &names)
            .finish()
    }
}
