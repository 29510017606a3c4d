use crate::error::LoadError;
use ippcode21::{Instruction, OpCode, Operand};
use std::collections::HashMap;

fn label_name(instr: &Instruction) -> &str {
    match &instr.args[0] {
        Operand::Label(name) => name,
        _ => unreachable!("the loader only ever builds a label-family arg0 as Operand::Label"),
    }
}

/// Scans every `LABEL` instruction and registers its name at the
/// instruction's own index, failing on a repeated name.
pub fn build_label_table(
    instructions: &[Option<Instruction>],
) -> Result<HashMap<String, usize>, LoadError> {
    let mut labels = HashMap::new();
    for (index, slot) in instructions.iter().enumerate() {
        let Some(instr) = slot else { continue };
        if instr.opcode != OpCode::Label {
            continue;
        }
        let name = label_name(instr).to_string();
        log::trace!("registering label {:?} at index {}", name, index);
        if labels.insert(name.clone(), index).is_some() {
            return Err(LoadError::Semantic(format!(
                "duplicate label {:?}",
                name
            )));
        }
    }
    Ok(labels)
}

const JUMP_FAMILY: &[OpCode] = &[
    OpCode::Jump,
    OpCode::Call,
    OpCode::JumpIfEq,
    OpCode::JumpIfNeq,
    OpCode::JumpIfEqs,
    OpCode::JumpIfNeqs,
];

/// Checks every jumping/calling instruction's target label exists in the
/// table built by [`build_label_table`]. Must run after the full table is
/// built, since a forward reference to a label declared later is legal.
pub fn validate_jump_targets(
    instructions: &[Option<Instruction>],
    labels: &HashMap<String, usize>,
) -> Result<(), LoadError> {
    for slot in instructions.iter() {
        let Some(instr) = slot else { continue };
        if !JUMP_FAMILY.contains(&instr.opcode) {
            continue;
        }
        let name = label_name(instr);
        if !labels.contains_key(name) {
            return Err(LoadError::Semantic(format!(
                "jump target {:?} does not exist",
                name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use ippcode21::Operand as Op;

    fn label_instr(order: u32, name: &str) -> Option<Instruction> {
        Some(Instruction {
            order,
            opcode: OpCode::Label,
            args: vec![Op::Label(name.to_string())],
        })
    }

    #[test]
    fn duplicate_label_is_rejected() {
        let instructions = vec![label_instr(1, "loop"), label_instr(2, "loop")];
        assert!(matches!(
            build_label_table(&instructions),
            Err(LoadError::Semantic(_))
        ));
    }

    #[test]
    fn unresolved_jump_target_is_rejected() {
        let instructions = vec![Some(Instruction {
            order: 1,
            opcode: OpCode::Jump,
            args: vec![Op::Label("nowhere".to_string())],
        })];
        let labels = build_label_table(&instructions).unwrap();
        assert!(matches!(
            validate_jump_targets(&instructions, &labels),
            Err(LoadError::Semantic(_))
        ));
    }
}
