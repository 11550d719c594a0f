//! Output file placement.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default file name for generated interchanges.
pub fn default_file_name() -> String {
    format!("enrollment_{}.edi", chrono::Utc::now().timestamp_millis())
}

/// Decide where a generated file goes.
///
/// An existing directory, or a path ending in a separator, receives a
/// timestamped default name. A path without an extension gets `.edi`.
pub fn resolve_output_path(requested: &Path) -> PathBuf {
    let raw = requested.as_os_str().to_string_lossy();
    let names_directory = raw.ends_with('/') || raw.ends_with('\\');

    if requested.is_dir() || names_directory {
        return requested.join(default_file_name());
    }

    if requested.extension().is_none() {
        return requested.with_extension("edi");
    }

    requested.to_path_buf()
}

/// Write to a file (creating parent directories) or to stdout.
pub fn write_output(path: Option<&Path>, content: &str) -> io::Result<()> {
    match path {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
