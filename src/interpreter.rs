use crate::error::RuntimeError;
use crate::frame::Frames;
use crate::program::Program;
use crate::value::Value;
use std::collections::VecDeque;
use std::io::{self, Write};

/// Where `READ` pulls its next line from: the `--input` replacement file
/// if one was supplied, otherwise the process's actual stdin.
pub enum InputSource {
    Buffered(VecDeque<String>),
    Stdin,
}

impl InputSource {
    pub fn from_lines(lines: Vec<String>) -> InputSource {
        InputSource::Buffered(lines.into())
    }

    fn next_line(&mut self) -> Option<String> {
        match self {
            InputSource::Buffered(lines) => lines.pop_front(),
            InputSource::Stdin => {
                let mut line = String::new();
                match io::stdin().read_line(&mut line) {
                    Ok(0) => None,
                    Ok(_) => {
                        if line.ends_with('\n') {
                            line.pop();
                            if line.ends_with('\r') {
                                line.pop();
                            }
                        }
                        Some(line)
                    }
                    Err(_) => None,
                }
            }
        }
    }
}

/// The mutable runtime state threaded through every instruction handler:
/// the program being executed, the three frame spaces, the data and call
/// stacks, the instruction pointer/counter, the input source for `READ`,
/// and the output sinks for `WRITE`/`DPRINT`/`BREAK`.
///
/// Held as an explicit struct threaded through handler calls, rather than
/// module-level mutable state, so tests can run independent interpreters
/// concurrently and inject an in-memory input source or output sink.
pub struct Interpreter<'p> {
    program: &'p Program,
    frames: Frames,
    data_stack: Vec<Value>,
    call_stack: Vec<usize>,
    ip: usize,
    ic: u64,
    input: InputSource,
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl<'p> Interpreter<'p> {
    pub fn new(program: &'p Program, input: InputSource) -> Interpreter<'p> {
        Interpreter {
            program,
            frames: Frames::new(),
            data_stack: Vec::new(),
            call_stack: Vec::new(),
            ip: 0,
            ic: 0,
            input,
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }

    /// Builds an interpreter with in-memory output sinks, for tests that
    /// want to assert on what would have gone to stdout/stderr.
    pub fn with_sinks(
        program: &'p Program,
        input: InputSource,
        stdout: Box<dyn Write>,
        stderr: Box<dyn Write>,
    ) -> Interpreter<'p> {
        Interpreter {
            program,
            frames: Frames::new(),
            data_stack: Vec::new(),
            call_stack: Vec::new(),
            ip: 0,
            ic: 0,
            input,
            stdout,
            stderr,
        }
    }

    pub fn program(&self) -> &Program {
        self.program
    }

    pub fn frames(&self) -> &Frames {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut Frames {
        &mut self.frames
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn set_ip(&mut self, ip: usize) {
        self.ip = ip;
    }

    pub fn ic(&self) -> u64 {
        self.ic
    }

    pub fn bump_ic(&mut self) {
        self.ic += 1;
    }

    pub fn push_data(&mut self, value: Value) {
        self.data_stack.push(value);
    }

    pub fn pop_data(&mut self) -> Result<Value, RuntimeError> {
        self.data_stack
            .pop()
            .ok_or_else(|| RuntimeError::MissingValue("data stack is empty".into()))
    }

    pub fn clear_data_stack(&mut self) {
        self.data_stack.clear();
    }

    pub fn data_stack(&self) -> &[Value] {
        &self.data_stack
    }

    pub fn push_call(&mut self, return_ip: usize) {
        self.call_stack.push(return_ip);
    }

    pub fn pop_call(&mut self) -> Result<usize, RuntimeError> {
        self.call_stack
            .pop()
            .ok_or_else(|| RuntimeError::MissingValue("call stack is empty".into()))
    }

    pub fn read_line(&mut self) -> Option<String> {
        self.input.next_line()
    }

    pub fn write_stdout(&mut self, text: &str) {
        let _ = self.stdout.write_all(text.as_bytes());
    }

    pub fn write_stderr(&mut self, text: &str) {
        let _ = self.stderr.write_all(text.as_bytes());
    }

    pub fn flush_stdout(&mut self) {
        let _ = self.stdout.flush();
    }
}
