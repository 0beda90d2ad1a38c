//! Standard font selection and font resources.
//!
//! Text is set in the fourteen standard Type1 fonts every PDF reader ships
//! with, so no font program is embedded: each font used in a document becomes
//! one small font dictionary that pages reference by resource name.

use indexmap::IndexMap;

use super::object_allocator::ObjectAllocator;
use super::object_serializer::ObjectSerializer;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectRef};

/// Font family classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Helvetica (sans-serif), also selected by "Arial"
    Helvetica,
    /// Times (serif)
    Times,
    /// Courier (monospace)
    Courier,
    /// Symbol
    Symbol,
    /// ZapfDingbats
    ZapfDingbats,
}

impl FontFamily {
    /// Parse a family name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "helvetica" | "arial" => Some(FontFamily::Helvetica),
            "times" | "times-roman" | "times new roman" => Some(FontFamily::Times),
            "courier" | "courier new" => Some(FontFamily::Courier),
            "symbol" => Some(FontFamily::Symbol),
            "zapfdingbats" => Some(FontFamily::ZapfDingbats),
            _ => None,
        }
    }
}

/// Font weight classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// Normal weight
    #[default]
    Normal,
    /// Bold weight
    Bold,
}

/// Parsed style string: any combination of `B` (bold), `I` (italic) and
/// `U` (underline, accepted but not part of font selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontStyle {
    /// Weight
    pub weight: FontWeight,
    /// Italic / oblique
    pub italic: bool,
}

impl FontStyle {
    /// Parse a style string such as `""`, `"B"`, `"bi"` or `"IU"`.
    pub fn parse(style: &str) -> Option<Self> {
        let mut parsed = FontStyle::default();
        for ch in style.chars() {
            match ch.to_ascii_uppercase() {
                'B' => parsed.weight = FontWeight::Bold,
                'I' => parsed.italic = true,
                'U' => {},
                _ => return None,
            }
        }
        Some(parsed)
    }
}

/// One of the fourteen standard Type1 fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    /// Helvetica
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
    /// Helvetica-Oblique
    HelveticaOblique,
    /// Helvetica-BoldOblique
    HelveticaBoldOblique,
    /// Times-Roman
    TimesRoman,
    /// Times-Bold
    TimesBold,
    /// Times-Italic
    TimesItalic,
    /// Times-BoldItalic
    TimesBoldItalic,
    /// Courier
    Courier,
    /// Courier-Bold
    CourierBold,
    /// Courier-Oblique
    CourierOblique,
    /// Courier-BoldOblique
    CourierBoldOblique,
    /// Symbol
    Symbol,
    /// ZapfDingbats
    ZapfDingbats,
}

impl StandardFont {
    /// Select the standard font for a family and style.
    pub fn select(family: FontFamily, style: FontStyle) -> Self {
        match (family, style.weight, style.italic) {
            (FontFamily::Helvetica, FontWeight::Normal, false) => StandardFont::Helvetica,
            (FontFamily::Helvetica, FontWeight::Bold, false) => StandardFont::HelveticaBold,
            (FontFamily::Helvetica, FontWeight::Normal, true) => StandardFont::HelveticaOblique,
            (FontFamily::Helvetica, FontWeight::Bold, true) => StandardFont::HelveticaBoldOblique,
            (FontFamily::Times, FontWeight::Normal, false) => StandardFont::TimesRoman,
            (FontFamily::Times, FontWeight::Bold, false) => StandardFont::TimesBold,
            (FontFamily::Times, FontWeight::Normal, true) => StandardFont::TimesItalic,
            (FontFamily::Times, FontWeight::Bold, true) => StandardFont::TimesBoldItalic,
            (FontFamily::Courier, FontWeight::Normal, false) => StandardFont::Courier,
            (FontFamily::Courier, FontWeight::Bold, false) => StandardFont::CourierBold,
            (FontFamily::Courier, FontWeight::Normal, true) => StandardFont::CourierOblique,
            (FontFamily::Courier, FontWeight::Bold, true) => StandardFont::CourierBoldOblique,
            (FontFamily::Symbol, _, _) => StandardFont::Symbol,
            (FontFamily::ZapfDingbats, _, _) => StandardFont::ZapfDingbats,
        }
    }

    /// Resolve a caller-facing `(family, style)` pair.
    pub fn resolve(family: &str, style: &str) -> Result<Self> {
        match (FontFamily::from_name(family), FontStyle::parse(style)) {
            (Some(family), Some(style)) => Ok(Self::select(family, style)),
            _ => Err(Error::UnknownFont {
                family: family.to_string(),
                style: style.to_string(),
            }),
        }
    }

    /// PostScript name written as `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
            StandardFont::Symbol => "Symbol",
            StandardFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Symbolic fonts use their built-in encoding.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, StandardFont::Symbol | StandardFont::ZapfDingbats)
    }

    /// Build the font dictionary.
    pub fn font_object(&self) -> Object {
        let mut entries = vec![
            ("Type", ObjectSerializer::name("Font")),
            ("Subtype", ObjectSerializer::name("Type1")),
            ("BaseFont", ObjectSerializer::name(self.base_font())),
        ];
        if !self.is_symbolic() {
            entries.push(("Encoding", ObjectSerializer::name("WinAnsiEncoding")));
        }
        ObjectSerializer::dict(entries)
    }
}

/// A font registered with a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredFont {
    /// Resource name used in content streams (e.g., "F1")
    pub resource_name: String,
    /// Indirect reference of the font dictionary
    pub object_ref: ObjectRef,
}

/// Document-wide font registry.
///
/// Each standard font gets one object id and one resource name the first
/// time it is used; names are `F1`, `F2`, ... in first-use order.
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    fonts: IndexMap<StandardFont, RegisteredFont>,
}

impl FontRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font, allocating its object on first use.
    pub fn register(&mut self, font: StandardFont, alloc: &mut ObjectAllocator) -> &RegisteredFont {
        let next_index = self.fonts.len() + 1;
        self.fonts.entry(font).or_insert_with(|| {
            let object_ref = alloc.allocate_ref();
            log::debug!(
                "Registered font {} as F{} ({})",
                font.base_font(),
                next_index,
                object_ref
            );
            RegisteredFont {
                resource_name: format!("F{}", next_index),
                object_ref,
            }
        })
    }

    /// Look up a registered font.
    pub fn get(&self, font: StandardFont) -> Option<&RegisteredFont> {
        self.fonts.get(&font)
    }

    /// Iterate registered fonts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (StandardFont, &RegisteredFont)> {
        self.fonts.iter().map(|(font, reg)| (*font, reg))
    }

    /// Number of registered fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether no font has been registered.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Transcode text to WinAnsiEncoding (Windows code page 1252).
///
/// Returns the encoded bytes and the number of characters that had no
/// WinAnsi code point and were replaced with `?`.
pub fn encode_win_ansi(text: &str) -> (Vec<u8>, usize) {
    let mut out = Vec::with_capacity(text.len());
    let mut replaced = 0;
    for ch in text.chars() {
        match win_ansi_byte(ch) {
            Some(b) => out.push(b),
            None => {
                out.push(b'?');
                replaced += 1;
            },
        }
    }
    (out, replaced)
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if cp < 0x80 || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    let byte = match ch {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_mapping() {
        assert_eq!(StandardFont::resolve("Helvetica", "").unwrap(), StandardFont::Helvetica);
        assert_eq!(StandardFont::resolve("Arial", "B").unwrap(), StandardFont::HelveticaBold);
        assert_eq!(StandardFont::resolve("times", "bi").unwrap(), StandardFont::TimesBoldItalic);
        assert_eq!(StandardFont::resolve("Courier", "IU").unwrap(), StandardFont::CourierOblique);
        assert_eq!(StandardFont::resolve("Symbol", "B").unwrap(), StandardFont::Symbol);
    }

    #[test]
    fn test_unknown_font() {
        assert!(matches!(
            StandardFont::resolve("Comic Sans", ""),
            Err(Error::UnknownFont { .. })
        ));
        assert!(matches!(
            StandardFont::resolve("Helvetica", "X"),
            Err(Error::UnknownFont { .. })
        ));
    }

    #[test]
    fn test_font_object() {
        let s = ObjectSerializer::new();
        assert_eq!(
            s.serialize_to_string(&StandardFont::TimesBold.font_object()),
            "<</BaseFont /Times-Bold /Encoding /WinAnsiEncoding /Subtype /Type1 /Type /Font>>"
        );
        let symbol = s.serialize_to_string(&StandardFont::ZapfDingbats.font_object());
        assert!(!symbol.contains("Encoding"));
    }

    #[test]
    fn test_registry_allocates_once() {
        let mut alloc = ObjectAllocator::new();
        let mut registry = FontRegistry::new();

        let first = registry.register(StandardFont::Helvetica, &mut alloc).clone();
        let second = registry.register(StandardFont::CourierBold, &mut alloc).clone();
        let again = registry.register(StandardFont::Helvetica, &mut alloc).clone();

        assert_eq!(first.resource_name, "F1");
        assert_eq!(second.resource_name, "F2");
        assert_eq!(first, again);
        assert_eq!(alloc.allocated(), 2);
        assert_eq!(registry.len(), 2);

        let order: Vec<_> = registry.iter().map(|(font, _)| font).collect();
        assert_eq!(order, vec![StandardFont::Helvetica, StandardFont::CourierBold]);
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Hello"), (b"Hello".to_vec(), 0));
        assert_eq!(encode_win_ansi("café €5"), (b"caf\xe9 \x805".to_vec(), 0));
        assert_eq!(encode_win_ansi("\u{201C}q\u{201D}"), (b"\x93q\x94".to_vec(), 0));
        assert_eq!(encode_win_ansi("日本"), (b"??".to_vec(), 2));
    }
}
