use crate::dispatcher::Flow;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::operand::{self, NumPair};
use crate::program::Operand;
use crate::value::Value;

enum Op {
    Add,
    Sub,
    Mul,
    IDiv,
    Div,
}

fn apply(op: &Op, a: &Value, b: &Value) -> Result<Value, RuntimeError> {
    match op {
        Op::Add => match operand::numeric_pair(a, b)? {
            NumPair::Int(x, y) => Ok(Value::Int(x.wrapping_add(y))),
            NumPair::Float(x, y) => Ok(Value::Float(x + y)),
        },
        Op::Sub => match operand::numeric_pair(a, b)? {
            NumPair::Int(x, y) => Ok(Value::Int(x.wrapping_sub(y))),
            NumPair::Float(x, y) => Ok(Value::Float(x - y)),
        },
        Op::Mul => match operand::numeric_pair(a, b)? {
            NumPair::Int(x, y) => Ok(Value::Int(x.wrapping_mul(y))),
            NumPair::Float(x, y) => Ok(Value::Float(x * y)),
        },
        Op::IDiv => {
            let (x, y) = operand::int_pair(a, b)?;
            if y == 0 {
                return Err(RuntimeError::OperandValue("integer division by zero".into()));
            }
            Ok(Value::Int(x.wrapping_div(y)))
        }
        Op::Div => {
            let (x, y) = operand::float_pair(a, b)?;
            if y == 0.0 {
                return Err(RuntimeError::OperandValue("float division by zero".into()));
            }
            Ok(Value::Float(x / y))
        }
    }
}

fn register(interp: &mut Interpreter, args: &[Operand], op: Op) -> Result<Flow, RuntimeError> {
    let dst = crate::operand::expect_var(&args[0])?.clone();
    let a = crate::operand::resolve(&args[1], interp.frames())?;
    let b = crate::operand::resolve(&args[2], interp.frames())?;
    let result = apply(&op, &a, &b)?;
    interp.frames_mut().write(&dst, result)?;
    Ok(Flow::Next)
}

fn stack(interp: &mut Interpreter, op: Op) -> Result<Flow, RuntimeError> {
    let b = interp.pop_data()?;
    let a = interp.pop_data()?;
    let result = apply(&op, &a, &b)?;
    interp.push_data(result);
    Ok(Flow::Next)
}

pub fn add(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    register(interp, args, Op::Add)
}
pub fn sub(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    register(interp, args, Op::Sub)
}
pub fn mul(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    register(interp, args, Op::Mul)
}
pub fn idiv(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    register(interp, args, Op::IDiv)
}
pub fn div(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    register(interp, args, Op::Div)
}

pub fn adds(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    stack(interp, Op::Add)
}
pub fn subs(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    stack(interp, Op::Sub)
}
pub fn muls(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    stack(interp, Op::Mul)
}
pub fn idivs(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    stack(interp, Op::IDiv)
}
pub fn divs(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    stack(interp, Op::Div)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn idiv_truncates_toward_zero() {
        assert_eq!(apply(&Op::IDiv, &Value::Int(-7), &Value::Int(2)).unwrap(), Value::Int(-3));
        assert_eq!(apply(&Op::IDiv, &Value::Int(7), &Value::Int(2)).unwrap(), Value::Int(3));
    }

    #[test]
    fn idiv_by_zero_is_operand_value_error() {
        assert!(matches!(
            apply(&Op::IDiv, &Value::Int(1), &Value::Int(0)),
            Err(RuntimeError::OperandValue(_))
        ));
    }

    #[test]
    fn add_rejects_mixed_numeric_types() {
        assert!(apply(&Op::Add, &Value::Int(1), &Value::Float(1.0)).is_err());
    }
}
