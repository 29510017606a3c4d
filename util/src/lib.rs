use std::{error::Error, fmt};

/// Error returned by [`EnumFromStr`] when a string does not name any
/// variant of the target enum.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseEnumError {
    pub value: String,
    pub enum_name: &'static str,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\" is not a valid {}", &self.value, &self.enum_name)
    }
}

impl Error for ParseEnumError {
    fn description(&self) -> &str {
        "Failed to parse enum."
    }
}

/// Parses a fieldless enum from its variant name, matched
/// case-insensitively (IPPcode21 opcode and type tokens are case-folded
/// to upper before lookup, so the comparison must not be case-sensitive).
pub trait EnumFromStr: Sized {
    fn from_str(s: &str) -> Result<Self, ParseEnumError>;
}
