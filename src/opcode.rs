use util::EnumFromStr;
use util_derive::{EnumFromStr, OpcodeArity};

/// The IPPcode21 instruction set.
///
/// Each variant carries its declared arity via `#[arity(N)]`, read by the
/// `OpcodeArity` derive to build `OpCode::arity`. Opcode text in the XML
/// source is case-folded to upper before being matched against a variant
/// name (see [`EnumFromStr`]).
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumFromStr, OpcodeArity)]
pub enum OpCode {
    // Frames and variables
    #[arity(0)]
    CreateFrame,
    #[arity(0)]
    PushFrame,
    #[arity(0)]
    PopFrame,
    #[arity(1)]
    DefVar,
    #[arity(2)]
    Move,

    // Function calls
    #[arity(1)]
    Call,
    #[arity(0)]
    Return,

    // Data stack
    #[arity(1)]
    Pushs,
    #[arity(1)]
    Pops,
    #[arity(0)]
    Clears,

    // Arithmetic, register family
    #[arity(3)]
    Add,
    #[arity(3)]
    Sub,
    #[arity(3)]
    Mul,
    #[arity(3)]
    IDiv,
    #[arity(3)]
    Div,
    // Arithmetic, stack family
    #[arity(0)]
    Adds,
    #[arity(0)]
    Subs,
    #[arity(0)]
    Muls,
    #[arity(0)]
    IDivs,
    #[arity(0)]
    Divs,

    // Relational / logical, register family
    #[arity(3)]
    Lt,
    #[arity(3)]
    Gt,
    #[arity(3)]
    Eq,
    #[arity(3)]
    And,
    #[arity(3)]
    Or,
    #[arity(2)]
    Not,
    // Relational / logical, stack family
    #[arity(0)]
    Lts,
    #[arity(0)]
    Gts,
    #[arity(0)]
    Eqs,
    #[arity(0)]
    Ands,
    #[arity(0)]
    Ors,
    #[arity(0)]
    Nots,

    // Conversions, register family
    #[arity(2)]
    Int2Char,
    #[arity(3)]
    Stri2Int,
    #[arity(2)]
    Int2Float,
    #[arity(2)]
    Float2Int,
    // Conversions, stack family
    #[arity(0)]
    Int2Chars,
    #[arity(0)]
    Stri2Ints,
    #[arity(0)]
    Int2Floats,
    #[arity(0)]
    Float2Ints,

    // I/O
    #[arity(2)]
    Read,
    #[arity(1)]
    Write,

    // Strings
    #[arity(3)]
    Concat,
    #[arity(2)]
    Strlen,
    #[arity(3)]
    GetChar,
    #[arity(3)]
    SetChar,

    // Type introspection
    #[arity(2)]
    Type,

    // Control flow
    #[arity(1)]
    Label,
    #[arity(1)]
    Jump,
    #[arity(3)]
    JumpIfEq,
    #[arity(3)]
    JumpIfNeq,
    #[arity(1)]
    JumpIfEqs,
    #[arity(1)]
    JumpIfNeqs,

    // Termination and debugging
    #[arity(1)]
    Exit,
    #[arity(1)]
    Dprint,
    #[arity(0)]
    Break,
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Operand type tags as they appear in the `type` attribute of an XML
/// `arg` element, plus the data-typed variants an operand can resolve to.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumFromStr)]
pub enum TypeTag {
    Int,
    Float,
    Bool,
    String,
    Nil,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn opcode_from_str_is_case_insensitive() {
        assert_eq!(OpCode::from_str("move"), Ok(OpCode::Move));
        assert_eq!(OpCode::from_str("MOVE"), Ok(OpCode::Move));
        assert_eq!(OpCode::from_str("MoVe"), Ok(OpCode::Move));
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        assert!(OpCode::from_str("FROBNICATE").is_err());
    }

    #[test]
    fn arity_matches_declared_table() {
        assert_eq!(OpCode::Move.arity(), 2);
        assert_eq!(OpCode::CreateFrame.arity(), 0);
        assert_eq!(OpCode::Add.arity(), 3);
        assert_eq!(OpCode::Pushs.arity(), 1);
        assert_eq!(OpCode::JumpIfEqs.arity(), 1);
    }
}
