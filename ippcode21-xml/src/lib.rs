//! Loader for [ippcode21](../ippcode21/index.html) XML source documents.
//!
//! The main entry point is [`load`], which accepts the text of an
//! `<program language="IPPcode21">` document and returns a
//! [`Program`](ippcode21::Program) ready to run, or a [`LoadError`]
//! identifying which exit-code family the input violates: malformed XML
//! (31), a structural or type violation of the `program`/`instruction`/
//! `argN` schema (32), or a semantic violation — a duplicate label or an
//! unresolved jump target (52).
//!
//! Validation happens in two passes, both eager: `instructions` builds
//! the order-indexed instruction array and resolves every argument's
//! literal or variable operand, failing fast on the first structural
//! problem; `labels` then builds the label table and checks every
//! jump/call target against it, since a forward reference to a label
//! declared later in the program is legal and can only be checked once
//! the whole document has been read.

mod error;
mod instructions;
mod labels;
mod payload;

use ippcode21::Program;
use roxmltree::Document;

pub use error::LoadError;

fn structure(msg: impl Into<String>) -> LoadError {
    LoadError::Structure(msg.into())
}

fn validate_root<'a>(doc: &'a Document<'a>) -> Result<roxmltree::Node<'a, 'a>, LoadError> {
    let root = doc.root_element();
    log::trace!("validating root element <{}>", root.tag_name().name());
    if root.tag_name().name() != "program" {
        return Err(structure(format!(
            "expected root element <program>, found <{}>",
            root.tag_name().name()
        )));
    }
    if root.attribute("language") != Some("IPPcode21") {
        return Err(structure(
            "<program> is missing language=\"IPPcode21\"",
        ));
    }
    let allowed = ["language", "name", "description"];
    for attr in root.attributes() {
        if !allowed.contains(&attr.name()) {
            return Err(structure(format!(
                "<program> has unexpected attribute {:?}",
                attr.name()
            )));
        }
    }
    Ok(root)
}

/// Parses and validates an IPPcode21 XML source document into a
/// [`Program`]. Does not execute anything.
pub fn load(xml: &str) -> Result<Program, LoadError> {
    let doc = Document::parse(xml)?;
    log::debug!("parsed XML document, validating structure");
    let root = validate_root(&doc)?;
    let instructions = instructions::load_instructions(root)?;
    log::debug!("loaded {} instruction slot(s), building label table", instructions.len());
    let labels = labels::build_label_table(&instructions)?;
    labels::validate_jump_targets(&instructions, &labels)?;
    log::debug!("resolved {} label(s), all jump targets valid", labels.len());
    Ok(Program::new(instructions, labels))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_malformed_xml() {
        assert!(matches!(load("<program"), Err(LoadError::Xml(_))));
    }

    #[test]
    fn rejects_wrong_root_element() {
        let xml = r#"<wrong language="IPPcode21"></wrong>"#;
        assert!(matches!(load(xml), Err(LoadError::Structure(_))));
    }

    #[test]
    fn rejects_missing_language_attribute() {
        let xml = r#"<program></program>"#;
        assert!(matches!(load(xml), Err(LoadError::Structure(_))));
    }

    #[test]
    fn loads_a_trivial_program() {
        let xml = r#"
            <program language="IPPcode21">
                <instruction order="1" opcode="DEFVAR">
                    <arg1 type="var">GF@x</arg1>
                </instruction>
                <instruction order="2" opcode="MOVE">
                    <arg1 type="var">GF@x</arg1>
                    <arg2 type="int">42</arg2>
                </instruction>
            </program>
        "#;
        let program = load(xml).unwrap();
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn non_contiguous_orders_leave_gaps() {
        let xml = r#"
            <program language="IPPcode21">
                <instruction order="5" opcode="CREATEFRAME"></instruction>
                <instruction order="2" opcode="CREATEFRAME"></instruction>
            </program>
        "#;
        let program = load(xml).unwrap();
        assert_eq!(program.len(), 5);
        assert!(program.get(0).is_none());
        assert!(program.get(1).is_some());
        assert!(program.get(4).is_some());
    }

    #[test]
    fn duplicate_order_is_rejected() {
        let xml = r#"
            <program language="IPPcode21">
                <instruction order="1" opcode="CREATEFRAME"></instruction>
                <instruction order="1" opcode="PUSHFRAME"></instruction>
            </program>
        "#;
        assert!(matches!(load(xml), Err(LoadError::Structure(_))));
    }

    #[test]
    fn forward_label_reference_is_accepted() {
        let xml = r#"
            <program language="IPPcode21">
                <instruction order="1" opcode="JUMP">
                    <arg1 type="label">later</arg1>
                </instruction>
                <instruction order="2" opcode="LABEL">
                    <arg1 type="label">later</arg1>
                </instruction>
            </program>
        "#;
        assert!(load(xml).is_ok());
    }

    #[test]
    fn unresolved_jump_target_is_semantic_error() {
        let xml = r#"
            <program language="IPPcode21">
                <instruction order="1" opcode="JUMP">
                    <arg1 type="label">nowhere</arg1>
                </instruction>
            </program>
        "#;
        assert!(matches!(load(xml), Err(LoadError::Semantic(_))));
    }

    #[test]
    fn argument_element_order_in_xml_is_irrelevant() {
        let xml = r#"
            <program language="IPPcode21">
                <instruction order="1" opcode="MOVE">
                    <arg2 type="int">1</arg2>
                    <arg1 type="var">GF@x</arg1>
                </instruction>
            </program>
        "#;
        assert!(load(xml).is_ok());
    }

    #[test]
    fn missing_argument_is_structure_error() {
        let xml = r#"
            <program language="IPPcode21">
                <instruction order="1" opcode="MOVE">
                    <arg1 type="var">GF@x</arg1>
                </instruction>
            </program>
        "#;
        assert!(matches!(load(xml), Err(LoadError::Structure(_))));
    }
}
