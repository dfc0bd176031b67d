//! A [`log`] backend writing to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::Error;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(format!("{} {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Route the `log` records to the console, at most `level`
pub(crate) fn init(level: LevelFilter) {
    // fails only if already installed
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Change the console log level, one of `off`, `error`, `warn`, `info`, `debug`, `trace`
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), Error> {
    let level: LevelFilter = level
        .parse()
        .map_err(|_| Error::Generic(format!("Unknown log level '{level}'")))?;
    init(level);
    Ok(())
}
