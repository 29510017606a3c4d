mod arithmetic;
mod boolean;
mod control;
mod conversions;
mod debug;
mod frames_ops;
mod io;
mod relational;
mod stack;
mod strings;

use crate::dispatcher::Flow;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::opcode::OpCode;
use crate::program::Instruction;

/// The single point every opcode is routed through, delegating to the
/// family module that owns it. Kept as one flat match rather than a
/// trait-object table: with a fixed, closed opcode set there is no
/// extensibility to buy with indirection.
pub fn dispatch(interp: &mut Interpreter, instr: &Instruction) -> Result<Flow, RuntimeError> {
    let args = &instr.args;
    match instr.opcode {
        OpCode::CreateFrame => frames_ops::create_frame(interp, args),
        OpCode::PushFrame => frames_ops::push_frame(interp, args),
        OpCode::PopFrame => frames_ops::pop_frame(interp, args),
        OpCode::DefVar => frames_ops::defvar(interp, args),
        OpCode::Move => frames_ops::move_(interp, args),

        OpCode::Call => control::call(interp, args),
        OpCode::Return => control::return_(interp, args),
        OpCode::Label => control::label(interp, args),
        OpCode::Jump => control::jump(interp, args),
        OpCode::JumpIfEq => control::jump_if(interp, args, true),
        OpCode::JumpIfNeq => control::jump_if(interp, args, false),
        OpCode::JumpIfEqs => control::jump_ifs(interp, args, true),
        OpCode::JumpIfNeqs => control::jump_ifs(interp, args, false),
        OpCode::Exit => control::exit(interp, args),

        OpCode::Pushs => stack::pushs(interp, args),
        OpCode::Pops => stack::pops(interp, args),
        OpCode::Clears => stack::clears(interp, args),

        OpCode::Add => arithmetic::add(interp, args),
        OpCode::Sub => arithmetic::sub(interp, args),
        OpCode::Mul => arithmetic::mul(interp, args),
        OpCode::IDiv => arithmetic::idiv(interp, args),
        OpCode::Div => arithmetic::div(interp, args),
        OpCode::Adds => arithmetic::adds(interp, args),
        OpCode::Subs => arithmetic::subs(interp, args),
        OpCode::Muls => arithmetic::muls(interp, args),
        OpCode::IDivs => arithmetic::idivs(interp, args),
        OpCode::Divs => arithmetic::divs(interp, args),

        OpCode::Lt => relational::lt(interp, args),
        OpCode::Gt => relational::gt(interp, args),
        OpCode::Eq => relational::eq(interp, args),
        OpCode::Lts => relational::lts(interp, args),
        OpCode::Gts => relational::gts(interp, args),
        OpCode::Eqs => relational::eqs(interp, args),

        OpCode::And => boolean::and(interp, args),
        OpCode::Or => boolean::or(interp, args),
        OpCode::Not => boolean::not(interp, args),
        OpCode::Ands => boolean::ands(interp, args),
        OpCode::Ors => boolean::ors(interp, args),
        OpCode::Nots => boolean::nots(interp, args),

        OpCode::Int2Char => conversions::int2char(interp, args),
        OpCode::Stri2Int => conversions::stri2int(interp, args),
        OpCode::Int2Float => conversions::int2float(interp, args),
        OpCode::Float2Int => conversions::float2int(interp, args),
        OpCode::Int2Chars => conversions::int2chars(interp, args),
        OpCode::Stri2Ints => conversions::stri2ints(interp, args),
        OpCode::Int2Floats => conversions::int2floats(interp, args),
        OpCode::Float2Ints => conversions::float2ints(interp, args),

        OpCode::Read => io::read(interp, args),
        OpCode::Write => io::write(interp, args),

        OpCode::Concat => strings::concat(interp, args),
        OpCode::Strlen => strings::strlen(interp, args),
        OpCode::GetChar => strings::get_char(interp, args),
        OpCode::SetChar => strings::set_char(interp, args),

        OpCode::Type => strings::type_of(interp, args),

        OpCode::Dprint => debug::dprint(interp, args),
        OpCode::Break => debug::break_(interp, args),
    }
}
