//! Test logging for the gateway.
//!
//! `init` installs the process-wide subscriber once (installed by `ctor` in
//! each test binary). `capture_json` additionally records the current
//! thread's events as JSON so a test can assert on the gateway's structured
//! log fields.

use std::io;
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Level precedence: `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
fn filter() -> EnvFilter {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

pub fn init() {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(filter())
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Events recorded by `capture_json`, one JSON object per event with the
/// event fields flattened to the top level.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn events(&self) -> Vec<Value> {
        let bytes = self.buf.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Events whose message is exactly `message`.
    pub fn with_message(&self, message: &str) -> Vec<Value> {
        self.events()
            .into_iter()
            .filter(|event| event["message"] == message)
            .collect()
    }
}

pub struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if let Ok(mut buf) = self.buf.lock() {
            buf.extend_from_slice(data);
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buf: Arc::clone(&self.buf),
        }
    }
}

/// Record every info-or-above event on this thread until the guard drops.
///
/// actix test services run on the test's own thread, so this sees the
/// middleware and handler events of requests made through `call_service`.
pub fn capture_json() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = fmt()
        .json()
        .flatten_event(true)
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(logs.clone())
        .finish();

    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
