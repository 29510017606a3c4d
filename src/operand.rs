use crate::error::RuntimeError;
use crate::frame::Frames;
use crate::program::{Operand, VarName};
use crate::value::Value;

/// Resolves an operand to a concrete [`Value`]: a literal is returned
/// as-is, a variable is looked up through the frame its name addresses
/// (propagating `Frame`/`UndefinedVariable`/`MissingValue` as appropriate).
/// `Label`/`Type` operands have no value representation and are only ever
/// consumed directly by the handlers that expect them.
pub fn resolve(operand: &Operand, frames: &Frames) -> Result<Value, RuntimeError> {
    match operand {
        Operand::Int(i) => Ok(Value::Int(*i)),
        Operand::Float(f) => Ok(Value::Float(*f)),
        Operand::Bool(b) => Ok(Value::Bool(*b)),
        Operand::Str(s) => Ok(Value::Str(s.clone())),
        Operand::Nil => Ok(Value::Nil),
        Operand::Var(var) => frames.read(var).cloned(),
        Operand::Label(_) | Operand::Type(_) => Err(RuntimeError::OperandType(
            "a label or type operand cannot be used as a value".into(),
        )),
    }
}

/// The destination of an assigning instruction must be a variable operand.
pub fn expect_var(operand: &Operand) -> Result<&VarName, RuntimeError> {
    match operand {
        Operand::Var(var) => Ok(var),
        _ => Err(RuntimeError::OperandType(
            "destination operand must be a variable".into(),
        )),
    }
}

/// A same-typed numeric operand pair, as required by the arithmetic family
/// (`ADD`/`SUB`/`MUL` accept either; `IDIV` requires `Int`; `DIV` requires `Float`).
pub enum NumPair {
    Int(i64, i64),
    Float(f64, f64),
}

pub fn numeric_pair(a: &Value, b: &Value) -> Result<NumPair, RuntimeError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(NumPair::Int(*x, *y)),
        (Value::Float(x), Value::Float(y)) => Ok(NumPair::Float(*x, *y)),
        _ => Err(RuntimeError::OperandType(format!(
            "expected two operands of the same numeric type, got {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

pub fn int_pair(a: &Value, b: &Value) -> Result<(i64, i64), RuntimeError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok((*x, *y)),
        _ => Err(RuntimeError::OperandType(format!(
            "expected two int operands, got {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

pub fn float_pair(a: &Value, b: &Value) -> Result<(f64, f64), RuntimeError> {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => Ok((*x, *y)),
        _ => Err(RuntimeError::OperandType(format!(
            "expected two float operands, got {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

/// `LT`/`GT`: operands must share a type and may not be `nil`.
pub fn relational_pair(a: &Value, b: &Value) -> Result<std::cmp::Ordering, RuntimeError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => {
            x.partial_cmp(y).ok_or_else(|| {
                RuntimeError::OperandType("float comparison produced no ordering (NaN)".into())
            })
        }
        (Value::Bool(x), Value::Bool(y)) => Ok(x.cmp(y)),
        (Value::Str(x), Value::Str(y)) => Ok(x.chars().cmp(y.chars())),
        (Value::Nil, _) | (_, Value::Nil) => Err(RuntimeError::OperandType(
            "nil is not orderable".into(),
        )),
        _ => Err(RuntimeError::OperandType(format!(
            "expected two operands of the same orderable type, got {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

/// `EQ`: operands must share a type, or either side may be `nil`.
pub fn equal(a: &Value, b: &Value) -> Result<bool, RuntimeError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x == y),
        (Value::Float(x), Value::Float(y)) => Ok(x == y),
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        (Value::Str(x), Value::Str(y)) => Ok(x == y),
        (Value::Nil, Value::Nil) => Ok(true),
        (Value::Nil, _) | (_, Value::Nil) => Ok(false),
        _ => Err(RuntimeError::OperandType(format!(
            "cannot compare {} and {} for equality",
            a.type_name(),
            b.type_name()
        ))),
    }
}

pub fn bool_pair(a: &Value, b: &Value) -> Result<(bool, bool), RuntimeError> {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => Ok((*x, *y)),
        _ => Err(RuntimeError::OperandType(format!(
            "expected two bool operands, got {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

pub fn expect_bool(a: &Value) -> Result<bool, RuntimeError> {
    match a {
        Value::Bool(b) => Ok(*b),
        _ => Err(RuntimeError::OperandType(format!(
            "expected a bool operand, got {}",
            a.type_name()
        ))),
    }
}

pub fn expect_str<'a>(a: &'a Value) -> Result<&'a crate::value::IppStr, RuntimeError> {
    match a {
        Value::Str(s) => Ok(s),
        _ => Err(RuntimeError::OperandType(format!(
            "expected a string operand, got {}",
            a.type_name()
        ))),
    }
}

pub fn expect_int(a: &Value) -> Result<i64, RuntimeError> {
    match a {
        Value::Int(i) => Ok(*i),
        _ => Err(RuntimeError::OperandType(format!(
            "expected an int operand, got {}",
            a.type_name()
        ))),
    }
}

pub fn expect_float(a: &Value) -> Result<f64, RuntimeError> {
    match a {
        Value::Float(f) => Ok(*f),
        _ => Err(RuntimeError::OperandType(format!(
            "expected a float operand, got {}",
            a.type_name()
        ))),
    }
}
