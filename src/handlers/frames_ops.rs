use crate::dispatcher::Flow;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::operand;
use crate::program::Operand;

pub fn create_frame(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    interp.frames_mut().create_frame();
    Ok(Flow::Next)
}

pub fn push_frame(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    interp.frames_mut().push_frame()?;
    Ok(Flow::Next)
}

pub fn pop_frame(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    interp.frames_mut().pop_frame()?;
    Ok(Flow::Next)
}

pub fn defvar(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let var = operand::expect_var(&args[0])?;
    interp.frames_mut().declare(var)?;
    Ok(Flow::Next)
}

pub fn move_(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let value = operand::resolve(&args[1], interp.frames())?;
    interp.frames_mut().write(&dst, value)?;
    Ok(Flow::Next)
}
