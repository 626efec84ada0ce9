//! Line-oriented fixture file access.
//!
//! Writes go to a temporary file next to the target and are renamed over it
//! on [`FixtureWriter::commit`], so readers only ever see a complete file.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{FixtureError, Result};

/// Scoped writer for one generation run.
///
/// Dropping it without calling [`commit`](Self::commit) removes the
/// temporary file and leaves the target untouched.
#[derive(Debug)]
pub struct FixtureWriter {
    target: PathBuf,
    out: BufWriter<NamedTempFile>,
    lines: usize,
}

impl FixtureWriter {
    #[tracing::instrument]
    pub fn create(target: &Path) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut builder = tempfile::Builder::new();
        builder.prefix(".fixture-");
        // Same mode a plain File::create would get under the current umask
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let tmp = builder
            .tempfile_in(dir)
            .map_err(|e| FixtureError::io(dir, e))?;
        debug!("staging {} at {}", target.display(), tmp.path().display());

        Ok(Self {
            target: target.to_path_buf(),
            out: BufWriter::new(tmp),
            lines: 0,
        })
    }

    // Serializes one record as a line and returns the exact text written
    pub fn write_record<T: Display>(&mut self, record: &T) -> Result<String> {
        let line = record.to_string();
        writeln!(self.out, "{line}").map_err(|e| FixtureError::io(&self.target, e))?;
        self.lines += 1;
        Ok(line)
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    // Flushes and atomically replaces the target; returns the line count
    #[tracing::instrument(skip(self), fields(target = %self.target.display()))]
    pub fn commit(self) -> Result<usize> {
        let Self { target, out, lines } = self;
        let tmp = out
            .into_inner()
            .map_err(|e| FixtureError::io(&target, e.into_error()))?;
        // A regenerated file keeps the permissions of the one it replaces
        if let Ok(meta) = fs::metadata(&target) {
            fs::set_permissions(tmp.path(), meta.permissions())
                .map_err(|e| FixtureError::io(&target, e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| FixtureError::io(&target, e))?;
        tmp.persist(&target)
            .map_err(|e| FixtureError::io(&target, e.error))?;
        info!("wrote {} lines to {}", lines, target.display());
        Ok(lines)
    }
}

/// A non-empty line with its 1-based position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedLine {
    pub number: usize,
    pub text: String,
}

// Reads every non-empty line, trailing whitespace stripped
#[tracing::instrument]
pub fn read_lines(path: &Path) -> Result<Vec<NumberedLine>> {
    let file = File::open(path).map_err(|e| FixtureError::io(path, e))?;
    let mut lines = Vec::new();

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| FixtureError::io(path, e))?;
        let text = line.trim_end();
        if text.is_empty() {
            continue;
        }
        lines.push(NumberedLine {
            number: index + 1,
            text: text.to_string(),
        });
    }

    debug!("read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

// Splits a line on whitespace runs, requiring exactly `expected` fields
pub fn split_fields<'a>(
    path: &Path,
    line: &'a NumberedLine,
    expected: usize,
) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.text.split_whitespace().collect();
    if fields.len() != expected {
        return Err(FixtureError::Format {
            path: path.to_path_buf(),
            line_number: line.number,
            line: line.text.clone(),
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}
