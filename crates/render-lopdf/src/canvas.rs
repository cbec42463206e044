use crate::metrics::{FontFace, to_win_ansi};
use invoicer_layout::Rgb;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

/// Baseline offset below the top of a line box, as a fraction of font size.
const ASCENT: f32 = 0.8;

#[derive(Default, Clone, PartialEq)]
struct CanvasState {
    font: Option<(FontFace, f32)>,
    fill: Option<Rgb>,
    stroke: Option<Rgb>,
    line_width: Option<f32>,
}

/// Drawing surface for one page.
///
/// Callers work in top-down coordinates (y grows towards the bottom of the
/// page); the canvas flips them into PDF user space. Font and colour
/// operators are only emitted when the value changes.
pub struct PageCanvas {
    page_height: f32,
    content: Content,
    state: CanvasState,
}

impl PageCanvas {
    pub fn new(page_height: f32) -> Self {
        Self { page_height, content: Content { operations: vec![] }, state: CanvasState::default() }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, op: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(op, operands));
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.state.font != Some((face, size)) {
            self.push("Tf", vec![Object::Name(face.resource_name().as_bytes().to_vec()), size.into()]);
            self.state.font = Some((face, size));
        }
    }

    fn set_fill_color(&mut self, color: Rgb) {
        if self.state.fill != Some(color) {
            let (r, g, b) = color.unit();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Rgb, width: f32) {
        if self.state.stroke != Some(color) {
            let (r, g, b) = color.unit();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke = Some(color);
        }
        if self.state.line_width != Some(width) {
            self.push("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
    }

    /// Draws one line of text whose line box starts at `top`.
    pub fn text(&mut self, x: f32, top: f32, face: FontFace, size: f32, color: Rgb, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let baseline = self.page_height - (top + size * ASCENT);
        self.push("BT", vec![]);
        self.set_font(face, size);
        self.set_fill_color(color);
        self.push("Td", vec![x.into(), baseline.into()]);
        self.push("Tj", vec![Object::String(to_win_ansi(text), StringFormat::Literal)]);
        self.push("ET", vec![]);
    }

    /// Like [`PageCanvas::text`], but the text ends at `right`.
    pub fn text_right(&mut self, right: f32, top: f32, face: FontFace, size: f32, color: Rgb, text: &str) {
        let x = right - face.text_width(text, size);
        self.text(x, top, face, size, color, text);
    }

    /// Centres the text on `center`.
    pub fn text_center(&mut self, center: f32, top: f32, face: FontFace, size: f32, color: Rgb, text: &str) {
        let x = center - face.text_width(text, size) / 2.0;
        self.text(x, top, face, size, color, text);
    }

    pub fn hline(&mut self, x1: f32, x2: f32, y: f32, color: Rgb, width: f32) {
        let pdf_y = self.page_height - y;
        self.set_stroke(color, width);
        self.push("m", vec![x1.into(), pdf_y.into()]);
        self.push("l", vec![x2.into(), pdf_y.into()]);
        self.push("S", vec![]);
    }

    pub fn stroke_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: Rgb, line_width: f32) {
        let pdf_y = self.page_height - (top + height);
        self.set_stroke(color, line_width);
        self.push("re", vec![x.into(), pdf_y.into(), width.into(), height.into()]);
        self.push("S", vec![]);
    }
}
