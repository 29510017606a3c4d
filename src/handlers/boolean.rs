use crate::dispatcher::Flow;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::operand;
use crate::program::Operand;
use crate::value::Value;

fn register(
    interp: &mut Interpreter,
    args: &[Operand],
    combine: fn(bool, bool) -> bool,
) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let a = operand::resolve(&args[1], interp.frames())?;
    let b = operand::resolve(&args[2], interp.frames())?;
    let (x, y) = operand::bool_pair(&a, &b)?;
    interp.frames_mut().write(&dst, Value::Bool(combine(x, y)))?;
    Ok(Flow::Next)
}

fn stack(interp: &mut Interpreter, combine: fn(bool, bool) -> bool) -> Result<Flow, RuntimeError> {
    let b = interp.pop_data()?;
    let a = interp.pop_data()?;
    let (x, y) = operand::bool_pair(&a, &b)?;
    interp.push_data(Value::Bool(combine(x, y)));
    Ok(Flow::Next)
}

pub fn and(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    register(interp, args, |x, y| x && y)
}
pub fn or(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    register(interp, args, |x, y| x || y)
}
pub fn ands(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    stack(interp, |x, y| x && y)
}
pub fn ors(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    stack(interp, |x, y| x || y)
}

pub fn not(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let a = operand::resolve(&args[1], interp.frames())?;
    let x = operand::expect_bool(&a)?;
    interp.frames_mut().write(&dst, Value::Bool(!x))?;
    Ok(Flow::Next)
}

pub fn nots(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    let a = interp.pop_data()?;
    let x = operand::expect_bool(&a)?;
    interp.push_data(Value::Bool(!x));
    Ok(Flow::Next)
}
