pub mod dispatcher;
pub mod error;
pub mod frame;
mod handlers;
pub mod hexfloat;
pub mod interpreter;
pub mod opcode;
pub mod operand;
pub mod program;
pub mod value;

pub use dispatcher::Flow;
pub use error::{ExecOutcome, RuntimeError};
pub use interpreter::{InputSource, Interpreter};
pub use opcode::{OpCode, TypeTag};
pub use program::{FrameTag, Instruction, Operand, Program, VarName};
pub use value::{IppStr, Value};

/// Runs `program` to completion or to its first typed error.
pub fn execute(program: &Program, input: InputSource) -> Result<ExecOutcome, RuntimeError> {
    let mut interp = Interpreter::new(program, input);
    dispatcher::run(&mut interp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn instr(order: u32, opcode: OpCode, args: Vec<Operand>) -> Instruction {
        Instruction { order, opcode, args }
    }

    fn gvar(name: &str) -> VarName {
        VarName {
            frame: FrameTag::Global,
            name: name.to_string(),
        }
    }

    #[test]
    fn falling_off_the_end_is_exit_code_zero() {
        let program = Program::new(vec![], HashMap::new());
        let outcome = execute(&program, InputSource::Buffered(Default::default())).unwrap();
        assert_eq!(outcome, ExecOutcome::Finished);
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn defvar_move_write_round_trip() {
        let instructions = vec![
            Some(instr(1, OpCode::DefVar, vec![Operand::Var(gvar("x"))])),
            Some(instr(
                2,
                OpCode::Move,
                vec![Operand::Var(gvar("x")), Operand::Int(42)],
            )),
            Some(instr(3, OpCode::Write, vec![Operand::Var(gvar("x"))])),
        ];
        let program = Program::new(instructions, HashMap::new());
        let outcome = execute(&program, InputSource::from_lines(vec![])).unwrap();
        assert_eq!(outcome, ExecOutcome::Finished);
    }

    #[test]
    fn jump_to_label_skips_instructions() {
        let mut labels = HashMap::new();
        labels.insert("skip".to_string(), 2);
        let instructions = vec![
            Some(instr(
                1,
                OpCode::Jump,
                vec![Operand::Label("skip".to_string())],
            )),
            Some(instr(2, OpCode::DefVar, vec![Operand::Var(gvar("never"))])),
            Some(instr(3, OpCode::Label, vec![Operand::Label("skip".to_string())])),
        ];
        let program = Program::new(instructions, labels);
        let outcome = execute(&program, InputSource::from_lines(vec![])).unwrap();
        assert_eq!(outcome, ExecOutcome::Finished);
    }

    #[test]
    fn exit_out_of_range_is_operand_value_error() {
        let instructions = vec![Some(instr(1, OpCode::Exit, vec![Operand::Int(100)]))];
        let program = Program::new(instructions, HashMap::new());
        let err = execute(&program, InputSource::from_lines(vec![])).unwrap_err();
        assert_eq!(err.exit_code(), 57);
    }

    #[test]
    fn exit_in_range_terminates_with_that_code() {
        let instructions = vec![Some(instr(1, OpCode::Exit, vec![Operand::Int(9)]))];
        let program = Program::new(instructions, HashMap::new());
        let outcome = execute(&program, InputSource::from_lines(vec![])).unwrap();
        assert_eq!(outcome, ExecOutcome::Exited(9));
        assert_eq!(outcome.exit_code(), 9);
    }

    /// A `Write` sink backed by a shared buffer, so a test can read back
    /// what an `Interpreter` wrote after `run` returns.
    #[derive(Clone, Default)]
    struct SharedBuf(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

    impl std::io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            self.0.borrow_mut().flush()
        }
    }

    /// Falling off the end of the program must flush stdout before
    /// returning, not just on `EXIT`: a dropped `Box<dyn Write>` around the
    /// process's real stdout handle does not flush the global buffer, and
    /// `WRITE` emits no trailing newline to force a line-buffered flush.
    #[test]
    fn finishing_normally_flushes_buffered_write_output() {
        let instructions = vec![
            Some(instr(1, OpCode::DefVar, vec![Operand::Var(gvar("x"))])),
            Some(instr(
                2,
                OpCode::Move,
                vec![Operand::Var(gvar("x")), Operand::Int(7)],
            )),
            Some(instr(3, OpCode::Write, vec![Operand::Var(gvar("x"))])),
        ];
        let program = Program::new(instructions, HashMap::new());
        let out = SharedBuf::default();
        let mut interp = Interpreter::with_sinks(
            &program,
            InputSource::from_lines(vec![]),
            Box::new(out.clone()),
            Box::new(std::io::sink()),
        );
        let outcome = dispatcher::run(&mut interp).unwrap();
        assert_eq!(outcome, ExecOutcome::Finished);
        assert_eq!(out.0.borrow().as_slice(), b"7");
    }

    /// A typed error unwinding out of `run` must not drop buffered `WRITE`
    /// output that happened before the failing instruction.
    #[test]
    fn an_error_still_flushes_output_written_before_it() {
        let instructions = vec![
            Some(instr(1, OpCode::DefVar, vec![Operand::Var(gvar("x"))])),
            Some(instr(
                2,
                OpCode::Move,
                vec![Operand::Var(gvar("x")), Operand::Int(7)],
            )),
            Some(instr(3, OpCode::Write, vec![Operand::Var(gvar("x"))])),
            Some(instr(4, OpCode::Exit, vec![Operand::Int(100)])),
        ];
        let program = Program::new(instructions, HashMap::new());
        let out = SharedBuf::default();
        let mut interp = Interpreter::with_sinks(
            &program,
            InputSource::from_lines(vec![]),
            Box::new(out.clone()),
            Box::new(std::io::sink()),
        );
        let err = dispatcher::run(&mut interp).unwrap_err();
        assert_eq!(err.exit_code(), 57);
        assert_eq!(out.0.borrow().as_slice(), b"7");
    }
}
