//! Error taxonomy (§7, §10.4). Small on purpose: the core is a pure
//! computation over validated input, so everything recoverable funnels
//! through one enum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("line {line}: {message}")]
    Input { line: usize, message: String },

    #[error("{0}")]
    Usage(String),
}
