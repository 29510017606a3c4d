use crate::error::LoadError;
use crate::payload;
use ippcode21::{Instruction, OpCode};
use roxmltree::Node;
use std::collections::HashSet;
use util::EnumFromStr;

fn structure(msg: impl Into<String>) -> LoadError {
    LoadError::Structure(msg.into())
}

fn parse_order(node: &Node) -> Result<u32, LoadError> {
    let text = node
        .attribute("order")
        .ok_or_else(|| structure("instruction is missing the order attribute"))?;
    let order: i64 = text
        .trim()
        .parse()
        .map_err(|_| structure(format!("{:?} is not a valid order value", text)))?;
    if order <= 0 {
        return Err(structure(format!(
            "order must be a positive integer, got {}",
            order
        )));
    }
    Ok(order as u32)
}

fn parse_opcode(node: &Node) -> Result<OpCode, LoadError> {
    let text = node
        .attribute("opcode")
        .ok_or_else(|| structure("instruction is missing the opcode attribute"))?;
    OpCode::from_str(text).map_err(|_| structure(format!("{:?} is not a known opcode", text)))
}

/// Collects an instruction's `argN` children, sorted lexicographically by
/// tag name exactly as the reference loader does (the arity ceiling of 3
/// means this never misorders a double-digit tag against a single-digit
/// one), then checks the sorted sequence is precisely `arg1, arg2, …,
/// argK` for the opcode's declared arity.
fn parse_args(node: &Node, opcode: OpCode) -> Result<Vec<ippcode21::Operand>, LoadError> {
    let mut children: Vec<Node> = node
        .children()
        .filter(|n| n.is_element())
        .collect();
    children.sort_by(|a, b| a.tag_name().name().cmp(b.tag_name().name()));

    let arity = opcode.arity() as usize;
    if children.len() != arity {
        return Err(structure(format!(
            "{} expects {} argument(s), found {}",
            opcode,
            arity,
            children.len()
        )));
    }
    for (i, child) in children.iter().enumerate() {
        let expected = format!("arg{}", i + 1);
        if child.tag_name().name() != expected {
            return Err(structure(format!(
                "expected argument tag {:?}, found {:?}",
                expected,
                child.tag_name().name()
            )));
        }
    }

    children
        .iter()
        .map(|child| {
            let type_attr = child
                .attribute("type")
                .ok_or_else(|| structure("argument is missing the type attribute"))?;
            let text = child.text().unwrap_or("");
            payload::parse_operand(type_attr, text)
        })
        .collect()
}

/// Parses every `instruction` child of `program` into a sparse,
/// `order`-indexed array: index `order - 1` holds the instruction,
/// skipped orders are `None` and execute as no-ops.
pub fn load_instructions(program: Node) -> Result<Vec<Option<Instruction>>, LoadError> {
    let mut seen_orders: HashSet<u32> = HashSet::new();
    let mut by_order: Vec<(u32, Instruction)> = Vec::new();

    for child in program.children().filter(|n| n.is_element()) {
        if child.tag_name().name() != "instruction" {
            return Err(structure(format!(
                "expected an <instruction> element, found <{}>",
                child.tag_name().name()
            )));
        }
        let attr_names: HashSet<&str> = child.attributes().map(|a| a.name()).collect();
        if attr_names != HashSet::from(["order", "opcode"]) {
            return Err(structure(
                "instruction must have exactly the order and opcode attributes",
            ));
        }
        let order = parse_order(&child)?;
        if !seen_orders.insert(order) {
            return Err(structure(format!("duplicate instruction order {}", order)));
        }
        let opcode = parse_opcode(&child)?;
        let args = parse_args(&child, opcode)?;
        log::trace!("parsed instruction order={} opcode={}", order, opcode);
        by_order.push((order, Instruction { order, opcode, args }));
    }

    let max_order = by_order.iter().map(|(o, _)| *o).max().unwrap_or(0);
    let mut slots: Vec<Option<Instruction>> = (0..max_order).map(|_| None).collect();
    for (order, instr) in by_order {
        slots[(order - 1) as usize] = Some(instr);
    }
    Ok(slots)
}
