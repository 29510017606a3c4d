use crate::error::LoadError;
use ippcode21::hexfloat;
use ippcode21::{FrameTag, IppStr, Operand, TypeTag, VarName};
use regex::Regex;
use std::sync::OnceLock;

const IDENT_CLASS: &str = r"[A-Za-z_\-$&%*!?][A-Za-z_\-$&%*!?0-9]*";

fn var_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^(GF|LF|TF)@{}$", IDENT_CLASS)).unwrap())
}

fn ident_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^{}$", IDENT_CLASS)).unwrap())
}

fn structure(msg: impl Into<String>) -> LoadError {
    LoadError::Structure(msg.into())
}

fn parse_var(text: &str) -> Result<VarName, LoadError> {
    if !var_regex().is_match(text) {
        return Err(structure(format!("{:?} is not a valid variable name", text)));
    }
    let (frame, name) = text.split_once('@').unwrap();
    let frame = match frame {
        "GF" => FrameTag::Global,
        "LF" => FrameTag::Local,
        "TF" => FrameTag::Temporary,
        _ => unreachable!(),
    };
    Ok(VarName {
        frame,
        name: name.to_string(),
    })
}

fn parse_ident(text: &str) -> Result<String, LoadError> {
    if !ident_regex().is_match(text) {
        return Err(structure(format!("{:?} is not a valid identifier", text)));
    }
    Ok(text.to_string())
}

fn parse_type_tag(text: &str) -> Result<TypeTag, LoadError> {
    match text {
        "int" => Ok(TypeTag::Int),
        "string" => Ok(TypeTag::String),
        "bool" => Ok(TypeTag::Bool),
        "float" => Ok(TypeTag::Float),
        _ => Err(structure(format!(
            "{:?} is not a valid type argument (expected int, string, bool or float)",
            text
        ))),
    }
}

fn parse_int(text: &str) -> Result<i64, LoadError> {
    text.trim()
        .parse()
        .map_err(|_| structure(format!("{:?} is not a valid integer literal", text)))
}

fn parse_float(text: &str) -> Result<f64, LoadError> {
    hexfloat::parse_hex_float(text.trim())
        .ok_or_else(|| structure(format!("{:?} is not a valid hex float literal", text)))
}

fn parse_bool(text: &str) -> Result<bool, LoadError> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(structure(format!(
            "{:?} is not a valid bool literal (expected true or false)",
            text
        ))),
    }
}

fn parse_nil(text: &str) -> Result<(), LoadError> {
    if text == "nil" {
        Ok(())
    } else {
        Err(structure(format!("{:?} is not the nil literal", text)))
    }
}

/// Decodes a `string` arg's payload: bytes at or below `0x20` and `#` are
/// forbidden outside of a `\NNN` escape, which names a code point by
/// exactly three decimal digits.
fn decode_string(text: &str) -> Result<String, LoadError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            let digits: String = (0..3)
                .map(|_| chars.next())
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| structure("string escape is missing its three digits"))?
                .into_iter()
                .collect();
            if !digits.chars().all(|d| d.is_ascii_digit()) {
                return Err(structure(format!(
                    "{:?} is not a valid \\NNN escape",
                    digits
                )));
            }
            let code: u32 = digits.parse().unwrap();
            let escaped = char::from_u32(code)
                .ok_or_else(|| structure(format!("\\{} is not a valid code point", digits)))?;
            out.push(escaped);
        } else if (c as u32) <= 0x20 || c == '#' {
            return Err(structure(format!(
                "string payload contains a forbidden raw character {:?}; use \\NNN",
                c
            )));
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Builds the resolved [`Operand`] for one `argN` element's `type`
/// attribute and text payload.
pub fn parse_operand(type_attr: &str, text: &str) -> Result<Operand, LoadError> {
    match type_attr {
        "int" => Ok(Operand::Int(parse_int(text)?)),
        "float" => Ok(Operand::Float(parse_float(text)?)),
        "bool" => Ok(Operand::Bool(parse_bool(text)?)),
        "nil" => {
            parse_nil(text)?;
            Ok(Operand::Nil)
        }
        "string" => Ok(Operand::Str(IppStr::from(decode_string(text)?))),
        "var" => Ok(Operand::Var(parse_var(text)?)),
        "label" => Ok(Operand::Label(parse_ident(text)?)),
        "type" => Ok(Operand::Type(parse_type_tag(text)?)),
        other => Err(structure(format!(
            "{:?} is not a recognized argument type",
            other
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn var_regex_accepts_all_three_frames() {
        assert!(parse_var("GF@x").is_ok());
        assert!(parse_var("LF@_tmp").is_ok());
        assert!(parse_var("TF@x1").is_ok());
    }

    #[test]
    fn var_regex_rejects_bad_prefix() {
        assert!(parse_var("XF@x").is_err());
        assert!(parse_var("GFx").is_err());
    }

    #[test]
    fn string_escape_decodes_three_digit_code_point() {
        assert_eq!(decode_string("a\\035b").unwrap(), "a#b");
    }

    #[test]
    fn string_rejects_raw_hash_and_control_bytes() {
        assert!(decode_string("a#b").is_err());
        assert!(decode_string("a\tb").is_err());
    }

    #[test]
    fn type_tag_rejects_nil() {
        assert!(parse_type_tag("nil").is_err());
    }
}
