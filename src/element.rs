// ABOUTME: Lightweight references to elements inside a validated buffer.
// ABOUTME: Renders field names and `_id` values for diagnostic messages.

use std::fmt::Write;

use crate::types::{element_type, limits};

/// An element located by byte offsets into the document buffer.
///
/// `start` is the offset of the type byte; `size` covers the type byte,
/// field name, and value. Only the field name is guaranteed readable for
/// elements that opened a frame; the full extent is valid for `_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Element {
    start: usize,
    size: usize,
}

impl Element {
    #[inline]
    pub(crate) fn new(start: usize, size: usize) -> Self {
        Self { start, size }
    }

    pub(crate) fn element_type(&self, data: &[u8]) -> Option<u8> {
        data.get(self.start).copied()
    }

    pub(crate) fn field_name<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        field_name_at(data, self.start)
    }

    /// The value bytes following the field name's terminator.
    fn value<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        let value_start = self.start + 1 + self.field_name(data).len() + 1;
        data.get(value_start..self.start.checked_add(self.size)?)
    }

    /// Render as `name: value`, the way `_id` appears in error contexts.
    pub(crate) fn render(&self, data: &[u8]) -> String {
        let mut out = String::new();
        escape_into(&mut out, self.field_name(data));
        out.push_str(": ");
        let rendered = match (self.element_type(data), self.value(data)) {
            (Some(code), Some(value)) => render_value(&mut out, code, value),
            _ => None,
        };
        if rendered.is_none() {
            out.push('?');
        }
        out
    }
}

/// The field name of the element whose type byte is at `start`.
pub(crate) fn field_name_at(data: &[u8], start: usize) -> &[u8] {
    let name = data.get(start.saturating_add(1)..).unwrap_or_default();
    match memchr::memchr(0, name) {
        Some(len) => &name[..len],
        None => name,
    }
}

/// Append `bytes` with quotes, backslashes and control characters escaped.
pub(crate) fn escape_into(out: &mut String, bytes: &[u8]) {
    for c in String::from_utf8_lossy(bytes).chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
}

#[inline]
fn le_bytes<const N: usize>(bytes: &[u8], at: usize) -> Option<[u8; N]> {
    bytes.get(at..at + N)?.try_into().ok()
}

fn push_hex(out: &mut String, bytes: &[u8], upper: bool) {
    for byte in bytes {
        let _ = if upper {
            write!(out, "{byte:02X}")
        } else {
            write!(out, "{byte:02x}")
        };
    }
}

/// Quoted contents of an int32-length-prefixed string at `at`.
/// Returns the offset just past the string.
fn push_string(out: &mut String, bytes: &[u8], at: usize) -> Option<usize> {
    let len = u32::from_le_bytes(le_bytes(bytes, at)?) as usize;
    let content = bytes.get(at + 4..(at + 4 + len).checked_sub(1)?)?;
    out.push('"');
    escape_into(out, content);
    out.push('"');
    Some(at + 4 + len)
}

fn render_value(out: &mut String, code: u8, value: &[u8]) -> Option<()> {
    match code {
        element_type::DOUBLE => {
            let _ = write!(out, "{:?}", f64::from_le_bytes(le_bytes(value, 0)?));
        }
        element_type::STRING | element_type::SYMBOL | element_type::JAVASCRIPT => {
            push_string(out, value, 0)?;
        }
        element_type::BINARY => {
            let len = u32::from_le_bytes(le_bytes(value, 0)?) as usize;
            let subtype = *value.get(4)?;
            let _ = write!(out, "BinData({subtype}, ");
            push_hex(out, value.get(5..5 + len)?, true);
            out.push(')');
        }
        element_type::UNDEFINED => out.push_str("undefined"),
        element_type::OBJECT_ID => {
            out.push_str("ObjectId('");
            push_hex(out, value.get(..limits::OBJECT_ID_SIZE)?, false);
            out.push_str("')");
        }
        element_type::BOOL => out.push_str(if *value.first()? == 0 { "false" } else { "true" }),
        element_type::DATE => {
            let _ = write!(out, "new Date({})", i64::from_le_bytes(le_bytes(value, 0)?));
        }
        element_type::NULL => out.push_str("null"),
        element_type::REGEX => {
            let pattern_len = memchr::memchr(0, value)?;
            let flags = value.get(pattern_len + 1..)?;
            let flags_len = memchr::memchr(0, flags)?;
            out.push('/');
            escape_into(out, &value[..pattern_len]);
            out.push('/');
            escape_into(out, &flags[..flags_len]);
        }
        element_type::DB_POINTER => {
            out.push_str("DBRef(");
            let oid_at = push_string(out, value, 0)?;
            out.push_str(", ");
            push_hex(out, value.get(oid_at..oid_at + limits::OBJECT_ID_SIZE)?, false);
            out.push(')');
        }
        element_type::INT32 => {
            let _ = write!(out, "{}", i32::from_le_bytes(le_bytes(value, 0)?));
        }
        element_type::TIMESTAMP => {
            let increment = u32::from_le_bytes(le_bytes(value, 0)?);
            let seconds = u32::from_le_bytes(le_bytes(value, 4)?);
            let _ = write!(out, "Timestamp({seconds}, {increment})");
        }
        element_type::INT64 => {
            let _ = write!(out, "{}", i64::from_le_bytes(le_bytes(value, 0)?));
        }
        element_type::DECIMAL128 => {
            let bits = u128::from_le_bytes(le_bytes(value, 0)?);
            let _ = write!(out, "NumberDecimal(0x{bits:032x})");
        }
        element_type::MIN_KEY => out.push_str("MinKey"),
        element_type::MAX_KEY => out.push_str("MaxKey"),
        other => out.push_str(element_type::name(other)?),
    }
    Some(())
}
