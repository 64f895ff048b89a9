use thiserror::Error;

/// A Liberty keyword that does not belong to the vocabulary it was looked up in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} keyword `{keyword}`")]
pub struct UnknownKeyword {
    /// What was being resolved, e.g. `timing_type`
    pub kind: &'static str,
    pub keyword: String,
}

impl UnknownKeyword {
    pub fn new(kind: &'static str, keyword: &str) -> Self {
        Self {
            kind,
            keyword: keyword.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LutError {
    #[error("index_{axis} has {len} breakpoints but no variable")]
    MissingVariable { axis: usize, len: usize },
    #[error("index_{axis} is not strictly increasing at position {position}")]
    NonMonotonicIndex { axis: usize, position: usize },
    #[error("table shape {rows}x{cols} expects {expected} values, found {actual}")]
    InvalidValueCount {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },
    #[error("index_2 is populated but index_1 is empty")]
    SecondAxisOnly,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed arc file: {0}")]
    Json(#[from] miniserde::Error),
    #[error(transparent)]
    Keyword(#[from] UnknownKeyword),
    #[error("arc {arc}, table {table}: {source}")]
    Table {
        arc: usize,
        table: &'static str,
        #[source]
        source: LutError,
    },
    #[error("arc {arc}: related_pin is empty")]
    EmptyRelatedPin { arc: usize },
    #[error("arc {arc}: {timing_type} arc must not carry a {table} table")]
    MixedTables {
        arc: usize,
        timing_type: &'static str,
        table: &'static str,
    },
}
