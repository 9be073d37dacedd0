use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::utils::app_paths::AppPaths;

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Writer that appends to the session log file.
#[derive(Clone)]
struct FileLogWriter {
    file: Arc<Mutex<Option<File>>>,
}

impl Write for FileLogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut file_opt) = self.file.lock() {
            if let Some(ref mut file) = *file_opt {
                file.write_all(buf)?;
                file.flush()?; // a crash must leave a complete log
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if let Ok(mut file_opt) = self.file.lock() {
            if let Some(ref mut file) = *file_opt {
                file.flush()?;
            }
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FileLogWriter {
    type Writer = FileLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Initialize tracing with a timestamped file in the app's log directory.
/// RUST_LOG controls the filter; the default is "info".
pub fn init_tracing() {
    let log_dir =
        AppPaths::logs_dir().unwrap_or_else(|_| std::env::temp_dir().join("hello-cli"));
    let _ = std::fs::create_dir_all(&log_dir);

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("hello-cli_{}.log", timestamp));

    // "latest.log" points at the current session's file
    let latest_path = log_dir.join("latest.log");

    #[cfg(unix)]
    {
        let _ = std::fs::remove_file(&latest_path);
        let _ = std::os::unix::fs::symlink(&log_path, &latest_path);
    }

    #[cfg(windows)]
    {
        // Symlinks need elevation on Windows; a pointer file does not
        let pointer_content = format!("Current log file: {}\n", log_path.display());
        let _ = std::fs::write(&latest_path, pointer_content);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    let writer = FileLogWriter {
        file: Arc::new(Mutex::new(file)),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .compact()
        .try_init();

    let _ = LOG_PATH.set(log_path);
    tracing::info!(target: "system", "logging initialized");
}

/// Path of the current session's log file, once tracing is up.
pub fn log_path() -> Option<&'static PathBuf> {
    LOG_PATH.get()
}
