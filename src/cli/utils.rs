//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use godelmap::{Config, Engine};
use log::debug;

/// Build the engine from an optional config file, falling back to defaults.
pub fn load_engine(path: Option<&Path>) -> Result<Engine> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    debug!("using config {:?}", config);
    Ok(Engine::new(config))
}

/// Resolve plain-text input for commands that accept either inline strings or files.
/// Surrounding whitespace (such as a trailing newline from a file) is stripped.
pub fn read_text_arg(text: Option<String>, from: Option<PathBuf>) -> Result<String> {
    if let Some(t) = text {
        return Ok(t);
    }
    let raw = match from {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => read_stdin()?,
    };
    Ok(raw.trim().to_string())
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

/// Persist a string either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content.as_bytes())?;
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Create the parent directory of an output file when it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    Ok(())
}
