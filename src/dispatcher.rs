use crate::error::{ExecOutcome, RuntimeError};
use crate::handlers;
use crate::interpreter::Interpreter;

/// What a handler asks the dispatcher to do with the instruction pointer
/// once it returns.
///
/// The reference description has `JUMP`/`CALL`/conditional-jump handlers
/// store `target - 1` so that the dispatcher's unconditional post-handler
/// increment lands on `target`. That is an artifact of a fixed always-
/// increment core; here the handler instead names the absolute index it
/// wants control to resume at, and the dispatcher simply does not apply
/// its `Next` increment in that case. Behaviorally identical, one fewer
/// off-by-one to reason about at every call site.
#[derive(Debug)]
pub enum Flow {
    /// Resume at the following instruction.
    Next,
    /// Resume at this absolute instruction index.
    Jump(usize),
    /// Terminate the run with this process exit code.
    Exit(u8),
}

/// Runs `interp` to completion: either the instruction pointer runs off
/// the end of the program, or a handler returns `Flow::Exit`, or a
/// handler raises a [`RuntimeError`], which unwinds immediately.
pub fn run(interp: &mut Interpreter) -> Result<ExecOutcome, RuntimeError> {
    loop {
        if interp.ip() >= interp.program().len() {
            interp.flush_stdout();
            return Ok(ExecOutcome::Finished);
        }
        let flow = match interp.program().get(interp.ip()) {
            None => Flow::Next,
            Some(instr) => {
                let instr = instr.clone();
                interp.bump_ic();
                match handlers::dispatch(interp, &instr) {
                    Ok(flow) => flow,
                    Err(err) => {
                        interp.flush_stdout();
                        return Err(err);
                    }
                }
            }
        };
        match flow {
            Flow::Next => interp.set_ip(interp.ip() + 1),
            Flow::Jump(target) => interp.set_ip(target),
            Flow::Exit(code) => {
                interp.flush_stdout();
                return Ok(ExecOutcome::Exited(code));
            }
        }
    }
}
