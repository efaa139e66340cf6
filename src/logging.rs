//! Tracing setup for the browser: each formatted event becomes one
//! `console.log` / `console.warn` / `console.error` line.

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::GameError;

/// Writer that buffers one formatted event and flushes it to the console on drop.
pub struct ConsoleWriter {
    level: tracing::Level,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        let msg = wasm_bindgen::JsValue::from_str(line.trim_end());
        match self.level {
            tracing::Level::ERROR => web_sys::console::error_1(&msg),
            tracing::Level::WARN => web_sys::console::warn_1(&msg),
            _ => web_sys::console::log_1(&msg),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: tracing::Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

/// Install the console subscriber. Calling it again (e.g. on a second
/// `start_game`) keeps the first subscriber.
pub fn setup_console_logging(level: &str) -> Result<(), GameError> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| GameError::InvalidConfig(format!("unknown log_level '{level}'")))?;
    let installed = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(filter)
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        tracing::info!("Logging initialized: level={}", level);
    }
    Ok(())
}
