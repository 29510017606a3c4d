use crate::dispatcher::Flow;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::operand;
use crate::program::Operand;
use crate::value::Value;
use std::cmp::Ordering;

fn register(
    interp: &mut Interpreter,
    args: &[Operand],
    want: fn(Ordering) -> bool,
) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let a = operand::resolve(&args[1], interp.frames())?;
    let b = operand::resolve(&args[2], interp.frames())?;
    let ordering = operand::relational_pair(&a, &b)?;
    interp.frames_mut().write(&dst, Value::Bool(want(ordering)))?;
    Ok(Flow::Next)
}

fn stack(interp: &mut Interpreter, want: fn(Ordering) -> bool) -> Result<Flow, RuntimeError> {
    let b = interp.pop_data()?;
    let a = interp.pop_data()?;
    let ordering = operand::relational_pair(&a, &b)?;
    interp.push_data(Value::Bool(want(ordering)));
    Ok(Flow::Next)
}

pub fn lt(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    register(interp, args, |o| o == Ordering::Less)
}
pub fn gt(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    register(interp, args, |o| o == Ordering::Greater)
}
pub fn lts(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    stack(interp, |o| o == Ordering::Less)
}
pub fn gts(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    stack(interp, |o| o == Ordering::Greater)
}

pub fn eq(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let a = operand::resolve(&args[1], interp.frames())?;
    let b = operand::resolve(&args[2], interp.frames())?;
    let result = operand::equal(&a, &b)?;
    interp.frames_mut().write(&dst, Value::Bool(result))?;
    Ok(Flow::Next)
}

pub fn eqs(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    let b = interp.pop_data()?;
    let a = interp.pop_data()?;
    let result = operand::equal(&a, &b)?;
    interp.push_data(Value::Bool(result));
    Ok(Flow::Next)
}
