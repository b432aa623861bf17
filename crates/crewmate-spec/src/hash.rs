//! Canonical appearance hashing.
//!
//! Two appearances hash equal exactly when their canonical JSON forms are
//! equal, so a collaborator can key baked spritesheets by this hash and
//! only re-bake when a customization actually changes.
//!
//! ```text
//! appearance_hash = hex(BLAKE3(JCS(appearance_json)))
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::appearance::CharacterAppearance;
use crate::error::SpecError;

/// Computes the canonical BLAKE3 hash of an appearance.
///
/// Returns a 64-character lowercase hex string.
///
/// # Example
/// ```
/// use crewmate_spec::hash::canonical_appearance_hash;
/// use crewmate_spec::preset::{classic, slim};
///
/// let a = canonical_appearance_hash(&classic()).unwrap();
/// let b = canonical_appearance_hash(&slim()).unwrap();
/// assert_eq!(a.len(), 64);
/// assert_ne!(a, b);
/// ```
pub fn canonical_appearance_hash(appearance: &CharacterAppearance) -> Result<String, SpecError> {
    canonical_hash(appearance)
}

/// Hashes any serializable value through its canonical JSON form.
pub fn canonical_hash<T: Serialize>(value: &T) -> Result<String, SpecError> {
    let value = serde_json::to_value(value)?;
    let canonical = canonicalize_json(&value)?;
    Ok(blake3::hash(canonical.as_bytes()).to_hex().to_string())
}

/// Serializes a JSON value with sorted keys and no whitespace.
///
/// Non-finite numbers cannot be represented and are rejected.
pub fn canonicalize_json(value: &Value) -> Result<String, SpecError> {
    let mut out = String::new();
    write_value(value, &mut out)?;
    Ok(out)
}

fn write_value(value: &Value, out: &mut String) -> Result<(), SpecError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(n)?),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_value(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn format_number(n: &serde_json::Number) -> Result<String, SpecError> {
    if let Some(i) = n.as_i64() {
        return Ok(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.to_string());
    }
    let f = n
        .as_f64()
        .filter(|f| f.is_finite())
        .ok_or_else(|| SpecError::Canonicalization(format!("unrepresentable number {}", n)))?;
    if f == 0.0 {
        return Ok("0".to_string());
    }
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return Ok(format!("{}", f as i64));
    }
    // Shortest round-trip form; Display never uses an exponent.
    Ok(format!("{}", f))
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}
