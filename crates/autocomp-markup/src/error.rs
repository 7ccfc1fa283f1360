//! Error types for autocomp-markup

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error at {line}:{column}: {message}")]
    Parse {
        message: String,
        offset: usize,
        line: usize,
        column: usize,
    },
}

impl Error {
    /// Build a parse error, computing the 1-based line and column of `offset`.
    pub fn parse(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(source.len());
        let before = &source.as_bytes()[..offset];
        let line = before.iter().filter(|b| **b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|b| *b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        Self::Parse {
            message: message.into(),
            offset,
            line,
            column: offset - line_start + 1,
        }
    }
}
