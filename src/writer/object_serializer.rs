//! PDF object serialization.
//!
//! Serializes PDF objects to their byte representation (ISO 32000-1:2008, 7.3).

use crate::object::{Dict, Object, ObjectRef};
use std::collections::HashMap;
use std::io::Write;

/// Serializer for PDF objects.
///
/// Converts PDF Object types to their byte representation following
/// PDF syntax rules with minimal whitespace. Dictionary keys are always
/// written in sorted order so output is deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a new object serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize an object to a string (for debugging).
    pub fn serialize_to_string(&self, obj: &Object) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_object(&mut buf, obj);
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Write an indirect object definition.
    ///
    /// Format: `{id} {gen} obj\n{object}\nendobj\n`
    pub fn write_indirect<W: Write>(
        &self,
        w: &mut W,
        id: u32,
        gen: u16,
        obj: &Object,
    ) -> std::io::Result<()> {
        writeln!(w, "{} {} obj", id, gen)?;
        self.write_object(w, obj)?;
        write!(w, "\nendobj\n")
    }

    /// Write an object.
    pub fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> std::io::Result<()> {
        match obj {
            Object::Null => write!(w, "null"),
            Object::Boolean(b) => write!(w, "{}", if *b { "true" } else { "false" }),
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) if !r.is_finite() => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{} is not a valid PDF number", r),
            )),
            Object::Real(r) => write!(w, "{}", format_number(*r)),
            Object::String(s) => self.write_string(w, s),
            Object::Name(n) => write_name(w, n),
            Object::Array(arr) => self.write_array(w, arr),
            Object::Dictionary(dict) => self.write_dictionary(w, dict),
            Object::Stream { dict, data } => self.write_stream(w, dict, data),
            Object::Reference(r) => write!(w, "{} {} R", r.id, r.gen),
        }
    }

    /// Write a PDF string.
    ///
    /// Uses literal string syntax `(...)` with proper escaping,
    /// or hex string syntax `<...>` for binary data.
    fn write_string<W: Write>(&self, w: &mut W, data: &[u8]) -> std::io::Result<()> {
        let is_printable = data
            .iter()
            .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));

        if is_printable {
            write!(w, "(")?;
            write_escaped_bytes(w, data)?;
            write!(w, ")")
        } else {
            write!(w, "<")?;
            for byte in data {
                write!(w, "{:02X}", byte)?;
            }
            write!(w, ">")
        }
    }

    /// Write a PDF array.
    fn write_array<W: Write>(&self, w: &mut W, arr: &[Object]) -> std::io::Result<()> {
        write!(w, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_object(w, obj)?;
        }
        write!(w, "]")
    }

    /// Write a PDF dictionary.
    fn write_dictionary<W: Write>(&self, w: &mut W, dict: &Dict) -> std::io::Result<()> {
        write!(w, "<<")?;

        let mut keys: Vec<_> = dict.keys().collect();
        keys.sort();

        for (i, key) in keys.into_iter().enumerate() {
            if let Some(value) = dict.get(key) {
                if i > 0 {
                    write!(w, " ")?;
                }
                write_name(w, key)?;
                write!(w, " ")?;
                self.write_object(w, value)?;
            }
        }

        write!(w, ">>")
    }

    /// Write a PDF stream. `/Length` always reflects the actual data.
    fn write_stream<W: Write>(
        &self,
        w: &mut W,
        dict: &Dict,
        data: &[u8],
    ) -> std::io::Result<()> {
        let mut dict_with_length = dict.clone();
        dict_with_length.insert("Length".to_string(), Object::Integer(data.len() as i64));

        self.write_dictionary(w, &dict_with_length)?;
        write!(w, "\nstream\n")?;
        w.write_all(data)?;
        write!(w, "\nendstream")
    }
}

/// Helper functions for building PDF objects.
impl ObjectSerializer {
    /// Create a Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Create a String object from a Rust string.
    pub fn string(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec())
    }

    /// Create a text string object.
    ///
    /// ASCII text is stored as-is; anything else is stored as UTF-16BE with
    /// a byte order mark, which is how PDF encodes Unicode text strings.
    pub fn text_string(s: &str) -> Object {
        if s.is_ascii() {
            return Self::string(s);
        }
        let mut data = vec![0xFE, 0xFF];
        for unit in s.encode_utf16() {
            data.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(data)
    }

    /// Create an Integer object.
    pub fn integer(i: i64) -> Object {
        Object::Integer(i)
    }

    /// Create a Dictionary object.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        let map: HashMap<String, Object> = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Object::Dictionary(map)
    }

    /// Create a Reference object.
    pub fn reference(r: ObjectRef) -> Object {
        Object::Reference(r)
    }

    /// Create a rectangle array `[llx lly urx ury]`.
    pub fn rect(rect: &crate::geometry::Rect) -> Object {
        Object::Array(vec![
            Object::Real(rect.llx),
            Object::Real(rect.lly),
            Object::Real(rect.urx),
            Object::Real(rect.ury),
        ])
    }
}

/// Format a number the way PDF content and objects expect it.
///
/// Integral values print without a fraction; others keep at most five
/// decimals with trailing zeros trimmed.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.5}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        match trimmed {
            "-0" | "" => "0".to_string(),
            t => t.to_string(),
        }
    }
}

/// Write a PDF name.
///
/// Names start with `/` and escape special characters with `#xx`.
pub fn write_name<W: Write>(w: &mut W, name: &str) -> std::io::Result<()> {
    write!(w, "/")?;
    for byte in name.bytes() {
        match byte {
            b'!'
            | b'"'
            | b'$'
            | b'&'
            | b'\''
            | b'*'..=b'.'
            | b'0'..=b':'
            | b';'
            | b'='
            | b'?'
            | b'@'
            | b'A'..=b'Z'
            | b'^'..=b'z'
            | b'|'
            | b'~' => {
                w.write_all(&[byte])?;
            },
            _ => {
                write!(w, "#{:02X}", byte)?;
            },
        }
    }
    Ok(())
}

/// Write the body of a literal string (without the surrounding parentheses).
///
/// `(`, `)` and `\` are backslash-escaped, line breaks and tabs use their
/// mnemonic escapes and any other byte outside printable ASCII is written as
/// a three-digit octal escape.
pub fn write_escaped_bytes<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    for &byte in data {
        match byte {
            b'(' => w.write_all(b"\\(")?,
            b')' => w.write_all(b"\\)")?,
            b'\\' => w.write_all(b"\\\\")?,
            b'\n' => w.write_all(b"\\n")?,
            b'\r' => w.write_all(b"\\r")?,
            b'\t' => w.write_all(b"\\t")?,
            0x20..=0x7E => w.write_all(&[byte])?,
            _ => write!(w, "\\{:03o}", byte)?,
        }
    }
    Ok(())
}
