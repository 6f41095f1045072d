use std::{
    collections::VecDeque,
    ops::DerefMut,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

/// Number of entries kept for diagnostics.
pub const MAX_ENTRIES: usize = 100;

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

pub trait Service {
    #[allow(clippy::missing_errors_doc)]
    fn get_log_entries(&self) -> Result<VecDeque<Entry>, Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(storage: Arc<Mutex<dyn Repository>>) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(storage);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(log) = LOG.lock() {
                if let Some(ref log) = *log {
                    let message = record.args().to_string();
                    match record.level() {
                        Level::Error => gloo_console::error!(message.clone()),
                        Level::Warn => gloo_console::warn!(message.clone()),
                        Level::Info => gloo_console::info!(message.clone()),
                        Level::Debug | Level::Trace => gloo_console::debug!(message.clone()),
                    }

                    if let Ok(mut repository) = log.lock() {
                        let _ = repository.deref_mut().write_entry(Entry {
                            time: Local::now().format("%b %d %H:%M:%S").to_string(),
                            level: record.level(),
                            message,
                        });
                    }
                }
            }
        }
    }

    fn flush(&self) {}
}
