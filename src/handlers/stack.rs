use crate::dispatcher::Flow;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::operand;
use crate::program::Operand;

pub fn pushs(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let value = operand::resolve(&args[0], interp.frames())?;
    interp.push_data(value);
    Ok(Flow::Next)
}

pub fn pops(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let value = interp.pop_data()?;
    interp.frames_mut().write(&dst, value)?;
    Ok(Flow::Next)
}

pub fn clears(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    interp.clear_data_stack();
    Ok(Flow::Next)
}
