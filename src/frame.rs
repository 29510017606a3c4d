use crate::error::RuntimeError;
use crate::program::{FrameTag, VarName};
use crate::value::Value;
use std::collections::HashMap;

type Slots = HashMap<String, Value>;

/// The three lexical frame spaces a variable name can address: a single
/// global frame for the process lifetime, at most one temporary frame, and
/// a stack of local frames addressable only at the top.
///
/// `CREATEFRAME`/`PUSHFRAME`/`POPFRAME` move whole `Slots` maps between
/// `temporary` and the top of `local_stack` rather than literally
/// retagging every key's `TF@`/`LF@` prefix, per the "equivalent and
/// faster" note in the design — a name's frame tag lives only in the
/// `VarName` used to look it up, never stored alongside the slot.
#[derive(Debug, Default)]
pub struct Frames {
    global: Slots,
    temporary: Option<Slots>,
    local_stack: Vec<Slots>,
}

impl Frames {
    pub fn new() -> Frames {
        Frames::default()
    }

    pub fn create_frame(&mut self) {
        log::trace!("CREATEFRAME");
        self.temporary = Some(Slots::new());
    }

    pub fn push_frame(&mut self) -> Result<(), RuntimeError> {
        let frame = self
            .temporary
            .take()
            .ok_or_else(|| RuntimeError::Frame("PUSHFRAME: no temporary frame exists".into()))?;
        log::trace!("PUSHFRAME ({} variable(s))", frame.len());
        self.local_stack.push(frame);
        Ok(())
    }

    pub fn pop_frame(&mut self) -> Result<(), RuntimeError> {
        let frame = self
            .local_stack
            .pop()
            .ok_or_else(|| RuntimeError::Frame("POPFRAME: local frame stack is empty".into()))?;
        log::trace!("POPFRAME ({} variable(s))", frame.len());
        self.temporary = Some(frame);
        Ok(())
    }

    fn slots(&self, tag: FrameTag) -> Result<&Slots, RuntimeError> {
        match tag {
            FrameTag::Global => Ok(&self.global),
            FrameTag::Temporary => self
                .temporary
                .as_ref()
                .ok_or_else(|| RuntimeError::Frame("TF@ access with no temporary frame".into())),
            FrameTag::Local => self
                .local_stack
                .last()
                .ok_or_else(|| RuntimeError::Frame("LF@ access with an empty local frame stack".into())),
        }
    }

    fn slots_mut(&mut self, tag: FrameTag) -> Result<&mut Slots, RuntimeError> {
        match tag {
            FrameTag::Global => Ok(&mut self.global),
            FrameTag::Temporary => self
                .temporary
                .as_mut()
                .ok_or_else(|| RuntimeError::Frame("TF@ access with no temporary frame".into())),
            FrameTag::Local => self
                .local_stack
                .last_mut()
                .ok_or_else(|| RuntimeError::Frame("LF@ access with an empty local frame stack".into())),
        }
    }

    /// Declares `var` in its frame as `Undef`. Fails with `Frame` if the
    /// frame does not exist, and with `Semantic` (the same family as a
    /// duplicate `LABEL`) on redeclaration of an already-declared name.
    pub fn declare(&mut self, var: &VarName) -> Result<(), RuntimeError> {
        let slots = self.slots_mut(var.frame)?;
        if slots.contains_key(&var.name) {
            return Err(RuntimeError::Semantic(format!(
                "variable {:?}@{} already declared",
                var.frame, var.name
            )));
        }
        slots.insert(var.name.clone(), Value::Undef);
        Ok(())
    }

    /// Reads `var`'s value. Distinguishes "never declared" (`UndefinedVariable`,
    /// exit 54) from "declared but never assigned" (`MissingValue`, exit 56).
    pub fn read(&self, var: &VarName) -> Result<&Value, RuntimeError> {
        let slots = self.slots(var.frame)?;
        match slots.get(&var.name) {
            None => Err(RuntimeError::UndefinedVariable(format!(
                "{:?}@{}",
                var.frame, var.name
            ))),
            Some(Value::Undef) => Err(RuntimeError::MissingValue(format!(
                "read of unassigned variable {:?}@{}",
                var.frame, var.name
            ))),
            Some(value) => Ok(value),
        }
    }

    /// Writes `value` into `var`'s slot. The slot must already exist
    /// (`DEFVAR`-ed); assigning to an undeclared name is `UndefinedVariable`.
    pub fn write(&mut self, var: &VarName, value: Value) -> Result<(), RuntimeError> {
        let slots = self.slots_mut(var.frame)?;
        if !slots.contains_key(&var.name) {
            return Err(RuntimeError::UndefinedVariable(format!(
                "{:?}@{}",
                var.frame, var.name
            )));
        }
        slots.insert(var.name.clone(), value);
        Ok(())
    }

    /// Like [`read`](Frames::read) but also succeeds for a declared,
    /// unassigned slot — used by `TYPE`, which reports an empty string for
    /// `Undef` instead of failing.
    pub fn read_including_undef(&self, var: &VarName) -> Result<&Value, RuntimeError> {
        let slots = self.slots(var.frame)?;
        slots.get(&var.name).ok_or_else(|| {
            RuntimeError::UndefinedVariable(format!("{:?}@{}", var.frame, var.name))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn var(frame: FrameTag, name: &str) -> VarName {
        VarName {
            frame,
            name: name.to_string(),
        }
    }

    #[test]
    fn defvar_then_read_is_missing_value() {
        let mut frames = Frames::new();
        let x = var(FrameTag::Global, "x");
        frames.declare(&x).unwrap();
        assert_eq!(
            frames.read(&x),
            Err(RuntimeError::MissingValue(
                "read of unassigned variable Global@x".into()
            ))
        );
    }

    #[test]
    fn reading_undeclared_variable_is_undefined_variable() {
        let frames = Frames::new();
        let x = var(FrameTag::Global, "x");
        assert!(matches!(frames.read(&x), Err(RuntimeError::UndefinedVariable(_))));
    }

    #[test]
    fn local_frame_access_without_push_is_frame_error() {
        let frames = Frames::new();
        let y = var(FrameTag::Local, "y");
        assert!(matches!(frames.read(&y), Err(RuntimeError::Frame(_))));
    }

    #[test]
    fn temporary_frame_access_without_createframe_is_frame_error() {
        let frames = Frames::new();
        let t = var(FrameTag::Temporary, "t");
        assert!(matches!(frames.read(&t), Err(RuntimeError::Frame(_))));
    }

    #[test]
    fn pushframe_without_createframe_fails() {
        let mut frames = Frames::new();
        assert!(frames.push_frame().is_err());
    }

    #[test]
    fn createframe_pushframe_popframe_round_trips() {
        let mut frames = Frames::new();
        frames.create_frame();
        let t = var(FrameTag::Temporary, "t");
        frames.declare(&t).unwrap();
        frames.write(&t, Value::Int(7)).unwrap();
        frames.push_frame().unwrap();

        let l = var(FrameTag::Local, "t");
        assert_eq!(frames.read(&l), Ok(&Value::Int(7)));

        frames.pop_frame().unwrap();
        assert_eq!(frames.read(&t), Ok(&Value::Int(7)));
    }

    #[test]
    fn redeclaring_a_variable_is_a_semantic_error() {
        let mut frames = Frames::new();
        let x = var(FrameTag::Global, "x");
        frames.declare(&x).unwrap();
        assert!(matches!(frames.declare(&x), Err(RuntimeError::Semantic(_))));
    }

    #[test]
    fn type_of_undef_is_reachable_via_read_including_undef() {
        let mut frames = Frames::new();
        let x = var(FrameTag::Global, "x");
        frames.declare(&x).unwrap();
        assert_eq!(frames.read_including_undef(&x), Ok(&Value::Undef));
    }
}
