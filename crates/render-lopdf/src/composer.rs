//! Flows an [`InvoiceView`] onto fixed-size pages.
//!
//! Sections are placed top to bottom in layout order. The items table
//! repeats its header row on every continuation page, the totals block is
//! never split, notes flow line by line, and every page gets the footer.

use crate::canvas::PageCanvas;
use crate::metrics::FontFace;
use crate::wrap::wrap_text;
use invoicer_layout::{Align, ColumnKind, DocumentLayout, InvoiceView, PartyView, Section};
use lopdf::content::Content;

/// Horizontal gap kept between the description and the first numeric column.
const CELL_GAP: f32 = 8.0;
const RULE_WIDTH: f32 = 1.0;

pub struct Composer<'a> {
    layout: &'a DocumentLayout,
    view: &'a InvoiceView,
    pages: Vec<Content>,
    canvas: PageCanvas,
    cursor: f32,
}

impl<'a> Composer<'a> {
    pub fn new(layout: &'a DocumentLayout, view: &'a InvoiceView) -> Self {
        Self {
            layout,
            view,
            pages: Vec::new(),
            canvas: PageCanvas::new(layout.page.height()),
            cursor: layout.page.margin_top,
        }
    }

    /// Lays out the whole document and returns one content stream per page.
    pub fn compose(mut self) -> Vec<Content> {
        let layout = self.layout;
        for section in &layout.sections {
            match section {
                Section::Header => self.header(),
                Section::Parties => self.parties(),
                Section::Items => self.items(),
                Section::Totals => self.totals(),
                Section::Notes => self.notes(),
                // drawn on every page by `close_page`
                Section::Footer => {}
            }
        }
        let canvas = std::mem::replace(&mut self.canvas, PageCanvas::new(0.0));
        self.close_page(canvas);
        log::debug!("Composed invoice '{}' onto {} page(s)", self.view.id, self.pages.len());
        self.pages
    }

    fn lh(&self, size: f32) -> f32 {
        self.layout.line_height(size)
    }

    fn left(&self) -> f32 {
        self.layout.page.margin_left
    }

    fn right(&self) -> f32 {
        self.layout.page.width() - self.layout.page.margin_right
    }

    fn bottom(&self) -> f32 {
        self.layout.page.height() - self.layout.page.margin_bottom
    }

    fn remaining(&self) -> f32 {
        self.bottom() - self.cursor
    }

    fn at_page_top(&self) -> bool {
        self.cursor <= self.layout.page.margin_top
    }

    fn new_page(&mut self) {
        let fresh = PageCanvas::new(self.layout.page.height());
        let finished = std::mem::replace(&mut self.canvas, fresh);
        self.close_page(finished);
        self.cursor = self.layout.page.margin_top;
    }

    /// Starts a new page unless `height` still fits on this one.
    fn ensure(&mut self, height: f32) {
        if height > self.remaining() && !self.at_page_top() {
            self.new_page();
        }
    }

    fn close_page(&mut self, mut canvas: PageCanvas) {
        let t = &self.layout.typography;
        let top = self.layout.page.height() - self.layout.spacing.footer_bottom - t.footer;
        let center = (self.left() + self.right()) / 2.0;
        canvas.text_center(
            center,
            top,
            FontFace::Regular,
            t.footer,
            self.layout.palette.footer,
            &self.layout.footer_text,
        );
        self.pages.push(canvas.finish());
    }

    fn header(&mut self) {
        let t = self.layout.typography;
        let palette = self.layout.palette;
        let view = self.view;

        let meta = [
            format!("Status: {}", view.status),
            format!("Invoice #: {}", view.number),
            format!("Date: {}", view.date),
        ];
        let meta_width = meta
            .iter()
            .map(|line| FontFace::Regular.text_width(line, t.small))
            .fold(0.0_f32, f32::max);
        let title_width = (self.right() - self.left() - meta_width - self.layout.spacing.party_gap).max(0.0);
        let title_lines = wrap_text(&view.title_display, FontFace::Bold, t.title, title_width);

        let top = self.cursor;
        let mut left_y = top;
        for line in &title_lines {
            self.canvas.text(self.left(), left_y, FontFace::Bold, t.title, palette.text, line);
            left_y += self.lh(t.title);
        }
        if let Some(brand) = &view.brand_name {
            left_y += self.layout.spacing.title_bottom;
            self.canvas.text(self.left(), left_y, FontFace::Regular, t.small, palette.muted, brand);
            left_y += self.lh(t.small);
        }

        let mut right_y = top;
        for line in &meta {
            self.canvas.text_right(self.right(), right_y, FontFace::Regular, t.small, palette.muted, line);
            right_y += self.lh(t.small);
        }

        self.cursor = left_y.max(right_y) + self.layout.spacing.header_bottom;
    }

    fn party_lines(&self, party: &PartyView, width: f32) -> Vec<String> {
        let size = self.layout.typography.body;
        std::iter::once(party.name.as_str())
            .chain(party.contact_lines.iter().map(String::as_str))
            .flat_map(|text| wrap_text(text, FontFace::Regular, size, width))
            .collect()
    }

    fn parties(&mut self) {
        let t = self.layout.typography;
        let palette = self.layout.palette;
        let spacing = self.layout.spacing;
        let card_width = (self.right() - self.left() - spacing.party_gap) / 2.0;
        let inner_width = card_width - 2.0 * spacing.card_padding;

        let cards = [&self.view.from, &self.view.bill_to]
            .map(|party| (party.label, self.party_lines(party, inner_width)));
        let body_height = cards
            .iter()
            .map(|(_, lines)| lines.len() as f32 * self.lh(t.body))
            .fold(0.0_f32, f32::max);
        let card_height =
            2.0 * spacing.card_padding + self.lh(t.label) + spacing.label_bottom + body_height;

        self.ensure(card_height);
        let top = self.cursor;
        for (i, (label, lines)) in cards.iter().enumerate() {
            let x = self.left() + i as f32 * (card_width + spacing.party_gap);
            self.canvas.stroke_rect(x, top, card_width, card_height, palette.border, RULE_WIDTH);

            let text_x = x + spacing.card_padding;
            let mut y = top + spacing.card_padding;
            self.canvas.text(text_x, y, FontFace::Regular, t.label, palette.label, label);
            y += self.lh(t.label) + spacing.label_bottom;
            for line in lines {
                self.canvas.text(text_x, y, FontFace::Regular, t.body, palette.text, line);
                y += self.lh(t.body);
            }
        }
        self.cursor = top + card_height;

        self.cursor += spacing.divider;
        self.canvas.hline(self.left(), self.right(), self.cursor, palette.border, RULE_WIDTH);
        self.cursor += spacing.divider;
    }

    fn column_edges(&self) -> Vec<(f32, f32)> {
        let mut x = self.left();
        self.layout
            .column_widths()
            .into_iter()
            .map(|w| {
                let edge = (x, x + w);
                x += w;
                edge
            })
            .collect()
    }

    /// Index of the wrapping description column, if the layout has one.
    fn description_column(&self) -> Option<usize> {
        self.layout.columns.iter().position(|c| c.kind == ColumnKind::Description)
    }

    fn cell(&mut self, edges: (f32, f32), align: Align, top: f32, face: FontFace, text: &str) {
        let t = self.layout.typography;
        let color = self.layout.palette.text;
        match align {
            Align::Left => self.canvas.text(edges.0, top, face, t.body, color, text),
            Align::Right => self.canvas.text_right(edges.1, top, face, t.body, color, text),
        }
    }

    fn table_header_height(&self) -> f32 {
        self.lh(self.layout.typography.body) + self.layout.spacing.header_row_bottom
    }

    fn table_header(&mut self) {
        let layout = self.layout;
        let edges = self.column_edges();
        let top = self.cursor;
        for (column, edge) in layout.columns.iter().zip(edges) {
            self.cell(edge, column.align, top, FontFace::Bold, column.header);
        }
        self.cursor += self.table_header_height();
        self.canvas.hline(self.left(), self.right(), self.cursor, self.layout.palette.border, RULE_WIDTH);
    }

    fn continue_table(&mut self) {
        self.new_page();
        self.table_header();
    }

    fn items(&mut self) {
        let t = self.layout.typography;
        let spacing = self.layout.spacing;
        let body = self.lh(t.body);
        let row_chrome = 2.0 * spacing.row_padding;

        self.ensure(
            spacing.section_top
                + self.lh(t.section)
                + spacing.section_bottom
                + self.table_header_height()
                + body
                + row_chrome,
        );
        self.cursor += spacing.section_top;
        self.canvas.text(self.left(), self.cursor, FontFace::Bold, t.section, self.layout.palette.text, "Items");
        self.cursor += self.lh(t.section) + spacing.section_bottom;
        self.table_header();

        let description_width = self
            .description_column()
            .map(|i| {
                let (left, right) = self.column_edges()[i];
                (right - left - CELL_GAP).max(0.0)
            });
        let fresh_capacity = self.bottom() - self.layout.page.margin_top - self.table_header_height();

        let view = self.view;
        for (index, row) in view.rows.iter().enumerate() {
            let lines = match description_width {
                Some(width) => wrap_text(&row.description_display, FontFace::Regular, t.body, width),
                None => vec![String::new()],
            };
            let height = lines.len() as f32 * body + row_chrome;
            if height > self.remaining() && height <= fresh_capacity {
                self.continue_table();
            }

            let mut rest = lines.as_slice();
            let mut first = true;
            loop {
                let capacity = ((self.remaining() - row_chrome) / body).floor().max(0.0) as usize;
                if capacity == 0 && !first_on_page(self) {
                    self.continue_table();
                    continue;
                }
                let (chunk, tail) = rest.split_at(capacity.clamp(1, rest.len()));
                self.row_chunk(index, chunk, first);
                first = false;
                rest = tail;
                if rest.is_empty() {
                    break;
                }
                self.continue_table();
            }
        }
    }

    fn row_chunk(&mut self, index: usize, lines: &[String], with_numbers: bool) {
        let layout = self.layout;
        let view = self.view;
        let row = &view.rows[index];
        let body = self.lh(layout.typography.body);
        let padding = self.layout.spacing.row_padding;
        let edges = self.column_edges();
        let top = self.cursor + padding;

        for (column, edge) in layout.columns.iter().zip(edges) {
            if column.kind == ColumnKind::Description {
                for (i, line) in lines.iter().enumerate() {
                    self.cell(edge, column.align, top + i as f32 * body, FontFace::Regular, line);
                }
            } else if with_numbers {
                self.cell(edge, column.align, top, FontFace::Regular, row.cell(column.kind));
            }
        }

        self.cursor += lines.len() as f32 * body + 2.0 * padding;
        self.canvas.hline(self.left(), self.right(), self.cursor, self.layout.palette.rule, RULE_WIDTH);
    }

    fn totals(&mut self) {
        let t = self.layout.typography;
        let spacing = self.layout.spacing;
        let body = self.lh(t.body);
        let view = self.view;
        let totals = &view.totals;
        let rows = [
            ("Subtotal", totals.subtotal.display.as_str(), FontFace::Regular),
            (totals.tax_label.as_str(), totals.tax.display.as_str(), FontFace::Regular),
            ("Total", totals.total.display.as_str(), FontFace::Bold),
        ];

        self.ensure(spacing.totals_top + rows.len() as f32 * (spacing.totals_row_gap + body));
        self.cursor += spacing.totals_top;
        let x = self.right() - self.layout.totals_width;
        let color = self.layout.palette.text;
        for (label, value, face) in rows {
            self.cursor += spacing.totals_row_gap;
            self.canvas.text(x, self.cursor, face, t.body, color, label);
            self.canvas.text_right(self.right(), self.cursor, face, t.body, color, value);
            self.cursor += body;
        }
    }

    fn notes(&mut self) {
        if !self.view.has_notes() {
            return;
        }
        let t = self.layout.typography;
        let spacing = self.layout.spacing;
        let body = self.lh(t.body);
        let width = self.right() - self.left();
        let lines = wrap_text(&self.view.notes, FontFace::Regular, t.body, width);

        // keep the heading with the first line
        self.ensure(spacing.section_top + self.lh(t.section) + spacing.notes_top + body);
        self.cursor += spacing.section_top;
        self.canvas.text(self.left(), self.cursor, FontFace::Bold, t.section, self.layout.palette.text, "Notes");
        self.cursor += self.lh(t.section) + spacing.notes_top;

        for line in &lines {
            if body > self.remaining() {
                self.new_page();
            }
            self.canvas.text(self.left(), self.cursor, FontFace::Regular, t.body, self.layout.palette.text, line);
            self.cursor += body;
        }
    }
}

/// True when nothing but the repeated table header sits above the cursor.
fn first_on_page(composer: &Composer<'_>) -> bool {
    composer.cursor <= composer.layout.page.margin_top + composer.table_header_height() + 0.01
}
