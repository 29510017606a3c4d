use crate::dispatcher::Flow;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::operand;
use crate::program::Operand;
use crate::value::{IppStr, Value};

fn int_to_char(n: i64) -> Result<Value, RuntimeError> {
    let code = u32::try_from(n).map_err(|_| {
        RuntimeError::StringOp(format!("{} is not a valid Unicode scalar code point", n))
    })?;
    let c = char::from_u32(code).ok_or_else(|| {
        RuntimeError::StringOp(format!("{} is not a valid Unicode scalar code point", n))
    })?;
    Ok(Value::Str(IppStr::from(c)))
}

fn str_at_index(s: &IppStr, i: i64) -> Result<char, RuntimeError> {
    if i < 0 || i as usize >= s.len() {
        return Err(RuntimeError::StringOp(format!(
            "index {} is out of bounds for a string of length {}",
            i,
            s.len()
        )));
    }
    Ok(s.get(i as usize).unwrap())
}

pub fn int2char(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let src = operand::resolve(&args[1], interp.frames())?;
    let n = operand::expect_int(&src)?;
    let value = int_to_char(n)?;
    interp.frames_mut().write(&dst, value)?;
    Ok(Flow::Next)
}

pub fn stri2int(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let s = operand::resolve(&args[1], interp.frames())?;
    let i = operand::resolve(&args[2], interp.frames())?;
    let s = operand::expect_str(&s)?;
    let i = operand::expect_int(&i)?;
    let c = str_at_index(s, i)?;
    interp.frames_mut().write(&dst, Value::Int(c as i64))?;
    Ok(Flow::Next)
}

pub fn int2float(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let src = operand::resolve(&args[1], interp.frames())?;
    let n = operand::expect_int(&src)?;
    interp.frames_mut().write(&dst, Value::Float(n as f64))?;
    Ok(Flow::Next)
}

pub fn float2int(interp: &mut Interpreter, args: &[Operand]) -> Result<Flow, RuntimeError> {
    let dst = operand::expect_var(&args[0])?.clone();
    let src = operand::resolve(&args[1], interp.frames())?;
    let f = operand::expect_float(&src)?;
    interp.frames_mut().write(&dst, Value::Int(f as i64))?;
    Ok(Flow::Next)
}

pub fn int2chars(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    let top = interp.pop_data()?;
    let n = operand::expect_int(&top)?;
    interp.push_data(int_to_char(n)?);
    Ok(Flow::Next)
}

pub fn stri2ints(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    let i = interp.pop_data()?;
    let s = interp.pop_data()?;
    let s = operand::expect_str(&s)?;
    let i = operand::expect_int(&i)?;
    let c = str_at_index(s, i)?;
    interp.push_data(Value::Int(c as i64));
    Ok(Flow::Next)
}

pub fn int2floats(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    let top = interp.pop_data()?;
    let n = operand::expect_int(&top)?;
    interp.push_data(Value::Float(n as f64));
    Ok(Flow::Next)
}

pub fn float2ints(interp: &mut Interpreter, _args: &[Operand]) -> Result<Flow, RuntimeError> {
    let top = interp.pop_data()?;
    let f = operand::expect_float(&top)?;
    interp.push_data(Value::Int(f as i64));
    Ok(Flow::Next)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn int_to_char_rejects_negative_code_points() {
        assert!(int_to_char(-1).is_err());
    }

    #[test]
    fn int_to_char_accepts_valid_scalar() {
        assert_eq!(int_to_char(65).unwrap(), Value::Str(IppStr::from("A")));
    }

    #[test]
    fn str_at_index_rejects_out_of_bounds() {
        let s = IppStr::from("hi");
        assert!(str_at_index(&s, 5).is_err());
        assert!(str_at_index(&s, -1).is_err());
    }
}
