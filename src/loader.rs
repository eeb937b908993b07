use thiserror::Error;

use crate::cpu::{Machine, MEMORY_WORDS};

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum LoadError {
    #[error("line {line}: '{text}' is not a binary literal of at most 16 bits")]
    Format { line: usize, text: String },
    #[error("program has {lines} lines but memory holds only {} words", MEMORY_WORDS)]
    Capacity { lines: usize },
}

/// Parses newline-delimited binary literals into instruction words.
///
/// Surrounding whitespace on each line is ignored; the remainder must be
/// 1 to 16 `0`/`1` digits.
///
/// # Errors
///
/// Will return `LoadError::Format` on the first malformed line, or
/// `LoadError::Capacity` if the program does not fit in memory.
pub fn parse_program(source: &str) -> Result<Vec<u16>, LoadError> {
    let mut words = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        if i >= MEMORY_WORDS {
            return Err(LoadError::Capacity {
                lines: source.lines().count(),
            });
        }
        let text = raw.trim();
        if text.is_empty() || text.len() > 16 || !text.bytes().all(|b| matches!(b, b'0' | b'1')) {
            return Err(LoadError::Format {
                line: i + 1,
                text: text.to_owned(),
            });
        }
        let word = u16::from_str_radix(text, 2).map_err(|_| LoadError::Format {
            line: i + 1,
            text: text.to_owned(),
        })?;
        words.push(word);
    }
    Ok(words)
}

impl Machine {
    /// Parses `source` and copies it into memory starting at address 0,
    /// one line per cell in file order.
    ///
    /// # Errors
    ///
    /// Will return an `Err` if any line is malformed or the program is too
    /// long; memory is left untouched in that case.
    pub fn load_program(&mut self, source: &str) -> Result<(), LoadError> {
        let words = parse_program(source)?;
        tracing::debug!(words = words.len(), "loading program");
        for (addr, word) in (0..=u16::MAX).zip(&words) {
            self.memory_mut().write(addr, *word);
        }
        Ok(())
    }
}
