use crate::dispatcher::Flow;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::operand;
use crate::program::Operand;
use crate::value::{IppStr, Value};

pub fn concat(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let a = operand::resolve(&args[1], interp.frames())?;
    let b = operand::resolve(&args[2], interp.frames())?;
    let a = operand::expect_str(&a)?.clone();
    let b = operand::expect_str(&b)?;
    let mut result = a;
    result.push_str(b);
    interp.frames_mut().write(&dst, Value::Str(result))?;
    Ok(Flow::Next)
}

pub fn strlen(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let s = operand::resolve(&args[1], interp.frames())?;
    let s = operand::expect_str(&s)?;
    interp.frames_mut().write(&dst, Value::Int(s.len() as i64))?;
    Ok(Flow::Next)
}

pub fn get_char(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let s = operand::resolve(&args[1], interp.frames())?;
    let i = operand::resolve(&args[2], interp.frames())?;
    let s = operand::expect_str(&s)?;
    let i = operand::expect_int(&i)?;
    if i < 0 || i as usize >= s.len() {
        return Err(RuntimeError::StringOp(format!(
            "index {} is out of bounds for a string of length {}",
            i,
            s.len()
        )));
    }
    let c = s.get(i as usize).unwrap();
    interp
        .frames_mut()
        .write(&dst, Value::Str(IppStr::from(c)))?;
    Ok(Flow::Next)
}

pub fn set_char(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let i = operand::resolve(&args[1], interp.frames())?;
    let src = operand::resolve(&args[2], interp.frames())?;
    let i = operand::expect_int(&i)?;
    let src = operand::expect_str(&src)?;

    let mut current = operand::expect_str(interp.frames().read(&dst)?)?.clone();
    if src.is_empty() {
        return Err(RuntimeError::StringOp("SETCHAR source is empty".into()));
    }
    if i < 0 || i as usize >= current.len() {
        return Err(RuntimeError::StringOp(format!(
            "index {} is out of bounds for a string of length {}",
            i,
            current.len()
        )));
    }
    current.set(i as usize, src.get(0).unwrap());
    interp.frames_mut().write(&dst, Value::Str(current))?;
    Ok(Flow::Next)
}

/// `TYPE` is the one operation that can observe a declared-but-unassigned
/// slot without failing: it reports an empty string instead of raising
/// `MissingValue`.
pub fn type_of(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let value = match &args[1] {
        Operand::Var(var) => interp.frames().read_including_undef(var)?.clone(),
        other => operand::resolve(other, interp.frames())?,
    };
    let type_name = Value::Str(IppStr::from(value.type_name()));
    interp.frames_mut().write(&dst, type_name)?;
    Ok(Flow::Next)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::interpreter::{InputSource, Interpreter};
    use crate::program::{FrameTag, Program, VarName};

    fn var(name: &str) -> VarName {
        VarName {
            frame: FrameTag::Global,
            name: name.to_string(),
        }
    }

    #[test]
    fn set_char_rejects_empty_source() {
        let program = Program::new(Vec::new(), std::collections::HashMap::new());
        let mut interp = Interpreter::new(&program, InputSource::from_lines(Vec::new()));
        let dst = var("s");
        interp.frames_mut().declare(&dst).unwrap();
        interp
            .frames_mut()
            .write(&dst, Value::Str(IppStr::from("hi")))
            .unwrap();

        let args = [
            Operand::Var(dst),
            Operand::Int(0),
            Operand::Str(IppStr::from("")),
        ];
        let err = set_char(&mut interp, &args).unwrap_err();
        assert!(matches!(err, RuntimeError::StringOp(_)));
    }

    #[test]
    fn set_char_replaces_one_scalar_in_place() {
        let program = Program::new(Vec::new(), std::collections::HashMap::new());
        let mut interp = Interpreter::new(&program, InputSource::from_lines(Vec::new()));
        let dst = var("s");
        interp.frames_mut().declare(&dst).unwrap();
        interp
            .frames_mut()
            .write(&dst, Value::Str(IppStr::from("hi")))
            .unwrap();

        let args = [
            Operand::Var(dst.clone()),
            Operand::Int(0),
            Operand::Str(IppStr::from("y")),
        ];
        set_char(&mut interp, &args).unwrap();
        let result = operand::expect_str(interp.frames().read(&dst).unwrap())
            .unwrap()
            .clone();
        assert_eq!(result, IppStr::from("yi"));
    }
}
