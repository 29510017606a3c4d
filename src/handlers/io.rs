use crate::dispatcher::Flow;
use crate::error::RuntimeError;
use crate::hexfloat;
use crate::interpreter::Interpreter;
use crate::opcode::TypeTag;
use crate::operand;
use crate::program::Operand;
use crate::value::{IppStr, Value};

fn coerce(line: Option<String>, requested: TypeTag) -> Value {
    let line = match line {
        Some(l) => l,
        None => return Value::Nil,
    };
    match requested {
        TypeTag::Int => line.trim().parse::<i64>().map(Value::Int).unwrap_or(Value::Nil),
        // Floats are written as IEEE-754 hex literals, but a plain decimal
        // literal is also accepted since nothing requires input text to
        // have come from this interpreter's own WRITE.
        TypeTag::Float => {
            let trimmed = line.trim();
            hexfloat::parse_hex_float(trimmed)
                .or_else(|| trimmed.parse::<f64>().ok())
                .map(Value::Float)
                .unwrap_or(Value::Nil)
        }
        TypeTag::Bool => match line.trim().to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Nil,
        },
        TypeTag::String => Value::Str(IppStr::from(line)),
        TypeTag::Nil => Value::Nil,
    }
}

pub fn read(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let requested = match &args[1] {
        Operand::Type(tag) => *tag,
        _ => return Err(RuntimeError::OperandType("READ expects a type operand".into())),
    };
    let line = interp.read_line();
    let value = coerce(line, requested);
    interp.frames_mut().write(&dst, value)?;
    Ok(Flow::Next)
}

pub fn write(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let value = operand::resolve(&args[0], interp.frames())?;
    let text = value.write_format();
    interp.write_stdout(&text);
    Ok(Flow::Next)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coerce_eof_is_nil() {
        assert_eq!(coerce(None, TypeTag::Int), Value::Nil);
    }

    #[test]
    fn coerce_unparseable_int_is_nil() {
        assert_eq!(coerce(Some("not a number".into()), TypeTag::Int), Value::Nil);
    }

    #[test]
    fn coerce_bool_is_case_insensitive() {
        assert_eq!(coerce(Some("TRUE".into()), TypeTag::Bool), Value::Bool(true));
    }

    #[test]
    fn coerce_accepts_a_hex_float_literal() {
        assert_eq!(
            coerce(Some("0x1.8p+1".into()), TypeTag::Float),
            Value::Float(3.0)
        );
    }

    #[test]
    fn coerce_still_accepts_a_decimal_float() {
        assert_eq!(
            coerce(Some("3.5".into()), TypeTag::Float),
            Value::Float(3.5)
        );
    }
}
