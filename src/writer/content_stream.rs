//! PDF content stream builder.
//!
//! Builds PDF content streams containing graphics and text operators
//! (ISO 32000-1:2008, 8-9). NaN and infinite operands are rejected.
//!
//! Operations are recorded symbolically: fonts are kept as [`StandardFont`]
//! values and templates as object references, and both are turned into
//! resource names only when the stream is finalized.

use std::io::Write;

use super::font_manager::{encode_win_ansi, StandardFont};
use super::object_serializer::{format_number, write_escaped_bytes};
use crate::error::{Error, Result};
use crate::object::ObjectRef;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Concatenate transformation matrix (cm)
    Transform([f64; 6]),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font and size (Tf)
    SetFont(StandardFont, f64),
    /// Move text position (Td)
    MoveText(f64, f64),
    /// Show text (Tj), already encoded for the font
    ShowText(Vec<u8>),
    /// Set fill color RGB (rg)
    SetFillColorRGB(f64, f64, f64),
    /// Set stroke color RGB (RG)
    SetStrokeColorRGB(f64, f64, f64),
    /// Set line width (w)
    SetLineWidth(f64),
    /// Move to (m)
    MoveTo(f64, f64),
    /// Line to (l)
    LineTo(f64, f64),
    /// Rectangle (re)
    Rectangle(f64, f64, f64, f64),
    /// Close path (h)
    ClosePath,
    /// Stroke (S)
    Stroke,
    /// Fill (f)
    Fill,
    /// Paint a template Form XObject (Do)
    PaintTemplate(ObjectRef),
    /// Raw operator text
    Raw(String),
}

/// Maps symbolic resources to the names a page's resource dictionary uses.
pub trait ResourceResolver {
    /// Resource name for a font (e.g., "F1").
    fn font_resource(&self, font: StandardFont) -> Option<&str>;
    /// Resource name for a template XObject (e.g., "TPL1").
    fn template_resource(&self, template: ObjectRef) -> Option<&str>;
}

/// Builder for one page's content stream.
#[derive(Debug, Clone, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font and size
    current_font: Option<(StandardFont, f64)>,
    /// Fonts referenced, in first-use order
    fonts_used: Vec<StandardFont>,
    /// Templates referenced, in first-use order
    templates_used: Vec<ObjectRef>,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    ///
    /// Fonts and templates named by the operation are recorded as used.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        match &op {
            ContentStreamOp::SetFont(font, size) => {
                self.current_font = Some((*font, *size));
                if !self.fonts_used.contains(font) {
                    self.fonts_used.push(*font);
                }
            },
            ContentStreamOp::PaintTemplate(template) => {
                if !self.templates_used.contains(template) {
                    self.templates_used.push(*template);
                }
            },
            _ => {},
        }
        self.operations.push(op);
        self
    }

    /// Select the font for subsequent text. Repeating the current selection
    /// adds nothing to the stream.
    pub fn set_font(&mut self, font: StandardFont, size: f64) -> Result<&mut Self> {
        check_finite("font size", &[size])?;
        if self.current_font != Some((font, size)) {
            self.op(ContentStreamOp::SetFont(font, size));
        }
        Ok(self)
    }

    /// Currently selected font, if any.
    pub fn current_font(&self) -> Option<(StandardFont, f64)> {
        self.current_font
    }

    /// Draw text with its baseline starting at `(x, y)`.
    ///
    /// Fails with [`Error::NoFontSelected`] if no font has been set.
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str) -> Result<&mut Self> {
        let (font, _) = self.current_font.ok_or(Error::NoFontSelected)?;
        check_finite("text position", &[x, y])?;
        let (encoded, replaced) = encode_win_ansi(text);
        if replaced > 0 {
            log::warn!(
                "{} character(s) in {:?} not encodable in {}; replaced with '?'",
                replaced,
                text,
                font.base_font()
            );
        }
        self.op(ContentStreamOp::BeginText)
            .op(ContentStreamOp::MoveText(x, y))
            .op(ContentStreamOp::ShowText(encoded))
            .op(ContentStreamOp::EndText);
        Ok(self)
    }

    /// Paint a template scaled and positioned by `matrix`.
    pub fn draw_template(&mut self, template: ObjectRef, matrix: [f64; 6]) -> Result<&mut Self> {
        check_finite("template matrix", &matrix)?;
        Ok(self
            .op(ContentStreamOp::SaveState)
            .op(ContentStreamOp::Transform(matrix))
            .op(ContentStreamOp::PaintTemplate(template))
            .op(ContentStreamOp::RestoreState))
    }

    /// Set fill color with RGB values in 0.0..=1.0.
    pub fn set_fill_color(&mut self, r: f64, g: f64, b: f64) -> Result<&mut Self> {
        check_finite("fill color", &[r, g, b])?;
        Ok(self.op(ContentStreamOp::SetFillColorRGB(r, g, b)))
    }

    /// Set stroke color with RGB values in 0.0..=1.0.
    pub fn set_stroke_color(&mut self, r: f64, g: f64, b: f64) -> Result<&mut Self> {
        check_finite("stroke color", &[r, g, b])?;
        Ok(self.op(ContentStreamOp::SetStrokeColorRGB(r, g, b)))
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f64) -> Result<&mut Self> {
        check_finite("line width", &[width])?;
        Ok(self.op(ContentStreamOp::SetLineWidth(width)))
    }

    /// Draw a straight line.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<&mut Self> {
        check_finite("line endpoint", &[x1, y1, x2, y2])?;
        Ok(self
            .op(ContentStreamOp::MoveTo(x1, y1))
            .op(ContentStreamOp::LineTo(x2, y2))
            .op(ContentStreamOp::Stroke))
    }

    /// Add a rectangle to the current path.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<&mut Self> {
        check_finite("rectangle", &[x, y, width, height])?;
        Ok(self.op(ContentStreamOp::Rectangle(x, y, width, height)))
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) -> &mut Self {
        self.op(ContentStreamOp::ClosePath)
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Fill the current path.
    pub fn fill(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Fill)
    }

    /// Save graphics state.
    pub fn save_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::SaveState)
    }

    /// Restore graphics state.
    pub fn restore_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::RestoreState)
    }

    /// Recorded operations.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Fonts referenced by this stream, in first-use order.
    pub fn fonts_used(&self) -> &[StandardFont] {
        &self.fonts_used
    }

    /// Templates referenced by this stream, in first-use order.
    pub fn templates_used(&self) -> &[ObjectRef] {
        &self.templates_used
    }

    /// Whether no operations have been recorded.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Produce the operator bytes.
    ///
    /// Does not modify the builder, so calling it again yields the same bytes.
    pub fn finalize(&self, resources: &dyn ResourceResolver) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut font_selected = false;

        for op in &self.operations {
            match op {
                ContentStreamOp::SetFont(..) => font_selected = true,
                ContentStreamOp::ShowText(_) if !font_selected => {
                    return Err(Error::NoFontSelected);
                },
                _ => {},
            }
            self.write_op(&mut buf, op, resources)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }

    /// Write a single operation to the buffer.
    fn write_op<W: Write>(
        &self,
        w: &mut W,
        op: &ContentStreamOp,
        resources: &dyn ResourceResolver,
    ) -> Result<()> {
        let n = checked_number;
        match op {
            ContentStreamOp::SaveState => write!(w, "q")?,
            ContentStreamOp::RestoreState => write!(w, "Q")?,
            ContentStreamOp::Transform([a, b, c, d, e, f]) => write!(
                w,
                "{} {} {} {} {} {} cm",
                n(*a)?,
                n(*b)?,
                n(*c)?,
                n(*d)?,
                n(*e)?,
                n(*f)?
            )?,
            ContentStreamOp::BeginText => write!(w, "BT")?,
            ContentStreamOp::EndText => write!(w, "ET")?,
            ContentStreamOp::SetFont(font, size) => {
                let name = resources.font_resource(*font).ok_or_else(|| {
                    Error::UnresolvedResource(format!("font {}", font.base_font()))
                })?;
                write!(w, "/{} {} Tf", name, n(*size)?)?
            },
            ContentStreamOp::MoveText(tx, ty) => write!(w, "{} {} Td", n(*tx)?, n(*ty)?)?,
            ContentStreamOp::ShowText(text) => {
                write!(w, "(")?;
                write_escaped_bytes(w, text)?;
                write!(w, ") Tj")?
            },
            ContentStreamOp::SetFillColorRGB(r, g, b) => {
                write!(w, "{} {} {} rg", n(*r)?, n(*g)?, n(*b)?)?
            },
            ContentStreamOp::SetStrokeColorRGB(r, g, b) => {
                write!(w, "{} {} {} RG", n(*r)?, n(*g)?, n(*b)?)?
            },
            ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", n(*width)?)?,
            ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", n(*x)?, n(*y)?)?,
            ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", n(*x)?, n(*y)?)?,
            ContentStreamOp::Rectangle(x, y, width, height) => {
                write!(w, "{} {} {} {} re", n(*x)?, n(*y)?, n(*width)?, n(*height)?)?
            },
            ContentStreamOp::ClosePath => write!(w, "h")?,
            ContentStreamOp::Stroke => write!(w, "S")?,
            ContentStreamOp::Fill => write!(w, "f")?,
            ContentStreamOp::PaintTemplate(template) => {
                let name = resources
                    .template_resource(*template)
                    .ok_or_else(|| Error::UnresolvedResource(format!("template {}", template)))?;
                write!(w, "/{} Do", name)?
            },
            ContentStreamOp::Raw(raw) => write!(w, "{}", raw)?,
        }
        Ok(())
    }
}


/// Reject NaN and infinities before they reach the stream.
fn check_finite(name: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(value) => Err(Error::InvalidNumber {
            name,
            value: *value,
        }),
        None => Ok(()),
    }
}

fn checked_number(value: f64) -> Result<String> {
    check_finite("operand", &[value])?;
    Ok(format_number(value))
}
