//! Verbatim line storage for a SQL dump

use std::fs;
use std::path::Path;

use anyhow::Result;
use encoding_rs::WINDOWS_1252;

use crate::error::ReorderError;

/// Decode dump bytes, trying UTF-8 first, then Windows-1252 as fallback
fn decode_with_fallback(bytes: Vec<u8>) -> Option<String> {
    match String::from_utf8(bytes) {
        Ok(s) => Some(s),
        Err(err) => {
            let bytes = err.into_bytes();
            let (decoded, _, had_errors) = WINDOWS_1252.decode(&bytes);
            if had_errors {
                None
            } else {
                Some(decoded.into_owned())
            }
        }
    }
}

/// An ordered sequence of lines read verbatim from a SQL dump.
///
/// Every line keeps its own terminator (`\n`, `\r\n`, or nothing for an
/// unterminated last line), so writing the sequence back reproduces the
/// input byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    /// Read a dump from disk
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| ReorderError::InputReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let text = decode_with_fallback(bytes).ok_or_else(|| ReorderError::InputDecodeError {
            path: path.to_path_buf(),
        })?;
        Ok(Self::from_text(&text))
    }

    /// Split text into lines, keeping terminators
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Write the sequence to `path`, creating parent directories as needed
    pub fn write(&self, path: &Path) -> Result<()> {
        let write_err = |source| ReorderError::OutputWriteError {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, self.to_text()).map_err(write_err)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Concatenate all lines back into one string
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}
