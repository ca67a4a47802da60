//! `log` records and JS errors, routed to the browser console.
use log::{Level, LevelFilter, Metadata, Record};
use riskmap_core::error::{Result, RiskMapError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::console;

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the console logger. Later calls are no-ops.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Best-effort message out of a thrown JS value.
pub fn js_error(value: JsValue) -> RiskMapError {
    let message = match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
    };
    RiskMapError::Js(message)
}

/// Log the error of a DOM callback; callbacks have nowhere to return it.
pub fn report(context: &str, result: Result<()>) {
    if let Err(e) = result {
        log::error!("{context}: {e}");
    }
}
