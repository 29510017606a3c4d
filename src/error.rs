use std::error::Error as StdError;
use std::fmt;

/// A typed execution-time failure, one variant per exit-code family from
/// the public contract. The dispatcher never recovers from one of these;
/// it propagates the `Result` up to the caller, which is responsible for
/// the single `process::exit` call (see `ipp-interp`).
#[derive(Clone, Debug, PartialEq)]
pub enum RuntimeError {
    /// A duplicate `LABEL` name or a `DEFVAR` redeclaration. Exit code 52.
    /// Unlike the rest of this enum these are structural checks against
    /// names already seen, not value/type checks, but `DEFVAR`'s
    /// redeclaration case only becomes knowable once the instruction
    /// actually runs (the addressed frame is a runtime quantity), so it
    /// surfaces here rather than from the loader.
    Semantic(String),
    /// Access to `LF@*` with an empty local-frame stack, or to `TF@*`
    /// with no temporary frame in existence. Exit code 55.
    Frame(String),
    /// A variable name that was never `DEFVAR`-ed in its frame. Exit code 54.
    UndefinedVariable(String),
    /// A declared variable read while still `Undef`, or an empty-stack pop.
    /// Exit code 56.
    MissingValue(String),
    /// An operand did not satisfy the type precondition of the operation
    /// using it. Exit code 53.
    OperandType(String),
    /// An operand had the right type but an illegal value (division by
    /// zero, `EXIT` out of `[0,49]`). Exit code 57.
    OperandValue(String),
    /// A string operation (`GETCHAR`/`SETCHAR`/`STRI2INT`/`INT2CHAR`) was
    /// given an out-of-range index or code point. Exit code 58.
    StringOp(String),
}

impl RuntimeError {
    pub fn exit_code(&self) -> i32 {
        match self {
            RuntimeError::Semantic(_) => 52,
            RuntimeError::Frame(_) => 55,
            RuntimeError::UndefinedVariable(_) => 54,
            RuntimeError::MissingValue(_) => 56,
            RuntimeError::OperandType(_) => 53,
            RuntimeError::OperandValue(_) => 57,
            RuntimeError::StringOp(_) => 58,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeError::Semantic(msg) => write!(f, "semantic error: {}", msg),
            RuntimeError::Frame(msg) => write!(f, "frame error: {}", msg),
            RuntimeError::UndefinedVariable(msg) => write!(f, "undefined variable: {}", msg),
            RuntimeError::MissingValue(msg) => write!(f, "missing value: {}", msg),
            RuntimeError::OperandType(msg) => write!(f, "operand type mismatch: {}", msg),
            RuntimeError::OperandValue(msg) => write!(f, "invalid operand value: {}", msg),
            RuntimeError::StringOp(msg) => write!(f, "string operation error: {}", msg),
        }
    }
}

impl StdError for RuntimeError {}

/// How a program run terminated normally (as opposed to via
/// [`RuntimeError`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The instruction pointer ran off the end of the instruction array.
    Finished,
    /// `EXIT n` was executed, with `n` already checked to be in `[0, 49]`.
    Exited(u8),
}

impl ExecOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecOutcome::Finished => 0,
            ExecOutcome::Exited(n) => *n as i32,
        }
    }
}
