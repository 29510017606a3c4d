use std::error::Error as StdError;
use std::fmt;

/// A static-validation failure, one variant per exit-code family the
/// loader is responsible for. Mirrors `ippcode21::RuntimeError`'s shape
/// (a flat enum over the public exit-code contract) rather than the
/// nested parse/assemble split an error-recovering compiler would want:
/// this loader stops at the first problem.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadError {
    /// The document is not well-formed XML. Exit code 31.
    Xml(String),
    /// The document is well-formed but violates the `program`/`instruction`/
    /// `argN` structure or an argument's type/payload contract. Exit code 32.
    Structure(String),
    /// A duplicate `LABEL` or an unresolved jump/call target. Exit code 52.
    Semantic(String),
}

impl LoadError {
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::Xml(_) => 31,
            LoadError::Structure(_) => 32,
            LoadError::Semantic(_) => 52,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::Xml(msg) => write!(f, "malformed XML: {}", msg),
            LoadError::Structure(msg) => write!(f, "XML structure error: {}", msg),
            LoadError::Semantic(msg) => write!(f, "semantic error: {}", msg),
        }
    }
}

impl StdError for LoadError {}

impl From<roxmltree::Error> for LoadError {
    fn from(err: roxmltree::Error) -> LoadError {
        LoadError::Xml(err.to_string())
    }
}
