use std::fmt;

use tracing::{error, info};

use crate::types::SessionSummary;

/// Category of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Info,
    Success,
    Error,
    Rank,
    Balance,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Info => "INFO",
            Category::Success => "SUCCESS",
            Category::Error => "ERROR",
            Category::Rank => "RANK",
            Category::Balance => "BALANCE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Emit a categorized message. Errors go out at ERROR level, the rest at INFO.
pub fn report(category: Category, message: impl fmt::Display) {
    let label = category.label();
    match category {
        Category::Error => error!(category = label, "{label}: {message}"),
        _ => info!(category = label, "{label}: {message}"),
    }
}

/// Emit the exit summary as pretty-printed JSON to stdout.
pub fn report_exit_summary(summary: &SessionSummary) {
    if let Ok(json) = serde_json::to_string_pretty(summary) {
        println!("{json}");
    }
}

/// Log capture for tests: an in-memory writer behind a thread-local subscriber.
#[cfg(test)]
pub(crate) mod capture {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::subscriber::DefaultGuard;

    #[derive(Clone, Default)]
    pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub(crate) fn lines(&self) -> Vec<String> {
            let buf = self.0.lock().unwrap();
            String::from_utf8_lossy(&buf)
                .lines()
                .map(str::to_string)
                .collect()
        }

        /// Lines whose message starts with `label:`.
        pub(crate) fn with_label(&self, label: &str) -> Vec<String> {
            let needle = format!("{label}: ");
            self.lines()
                .into_iter()
                .filter(|l| l.contains(&needle))
                .collect()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Route INFO and above on the current thread into a buffer until the
    /// guard is dropped.
    pub(crate) fn capture_logs() -> (CapturedLogs, DefaultGuard) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }
}
