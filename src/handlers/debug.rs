use crate::dispatcher::Flow;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::operand;
use crate::program::Operand;

pub fn dprint(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let value = operand::resolve(&args[0], interp.frames())?;
    let text = value.write_format();
    interp.write_stderr(&text);
    Ok(Flow::Next)
}

pub fn break_(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dump = format!(
        "-- BREAK at ip={} ic={} --\ndata stack: {:?}\nframes: {:?}\n",
        interp.ip(),
        interp.ic(),
        interp.data_stack(),
        interp.frames()
    );
    interp.write_stderr(&dump);
    Ok(Flow::Next)
}
