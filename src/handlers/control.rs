use crate::dispatcher::Flow;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::operand;
use crate::program::Operand;

fn label_target(interp: &Interpreter, operand: &Operand) -> Result<usize, RuntimeError> {
    match operand {
        Operand::Label(name) => interp.program().label_target(name).ok_or_else(|| {
            RuntimeError::Semantic(format!("jump target {:?} does not exist", name))
        }),
        _ => Err(RuntimeError::OperandType(
            "expected a label operand".into(),
        )),
    }
}

pub fn call(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let target = label_target(interp, &args[0])?;
    interp.push_call(interp.ip() + 1);
    Ok(Flow::Jump(target))
}

pub fn return_(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    let target = interp.pop_call()?;
    Ok(Flow::Jump(target))
}

pub fn label(_interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    Ok(Flow::Next)
}

pub fn jump(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let target = label_target(interp, &args[0])?;
    Ok(Flow::Jump(target))
}

pub fn jump_if(
    interp: &mut Interpreter,
    args: &[Operand],
    want_eq: bool,
) -> Result<Flow, RuntimeError> {
    let target = label_target(interp, &args[0])?;
    let a = operand::resolve(&args[1], interp.frames())?;
    let b = operand::resolve(&args[2], interp.frames())?;
    let matched = operand::equal(&a, &b)?;
    if matched == want_eq {
        Ok(Flow::Jump(target))
    } else {
        Ok(Flow::Next)
    }
}

pub fn jump_ifs(
    interp: &mut Interpreter,
    args: &[Operand],
    want_eq: bool,
) -> Result<Flow, RuntimeError> {
    let target = label_target(interp, &args[0])?;
    let b = interp.pop_data()?;
    let a = interp.pop_data()?;
    let matched = operand::equal(&a, &b)?;
    if matched == want_eq {
        Ok(Flow::Jump(target))
    } else {
        Ok(Flow::Next)
    }
}

pub fn exit(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let value = operand::resolve(&args[0], interp.frames())?;
    let n = operand::expect_int(&value)?;
    if !(0..=49).contains(&n) {
        return Err(RuntimeError::OperandValue(format!(
            "EXIT code {} is out of range [0, 49]",
            n
        )));
    }
    Ok(Flow::Exit(n as u8))
}
