use std::fmt;

use crate::extractor::ExtractionResult;

/// Values listed per kind before the rest are summarized as "... and N more".
pub const DEFAULT_LIMIT: usize = 5;

const TITLE: &str = "INFORMATION EXTRACTION SUMMARY";
const RULE_WIDTH: usize = 60;

/// Human-readable rendering of an [`ExtractionResult`], grouped by kind.
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    result: &'a ExtractionResult,
    limit: usize,
}

impl<'a> Summary<'a> {
    pub fn new(result: &'a ExtractionResult) -> Self {
        Self {
            result,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        write!(f, "{}", "=".repeat(RULE_WIDTH))?;

        if self.result.is_empty() {
            return write!(f, "\n\nNo structured information found.");
        }

        for (kind, values) in self.result.iter().filter(|(_, v)| !v.is_empty()) {
            write!(f, "\n\n{} ({}):", kind.label(), values.len())?;
            for value in values.iter().take(self.limit) {
                write!(f, "\n  - {}", value)?;
            }
            if values.len() > self.limit {
                write!(f, "\n  ... and {} more", values.len() - self.limit)?;
            }
        }
        Ok(())
    }
}
