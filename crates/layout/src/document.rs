//! The one layout description both renderers read.
//!
//! Widths and sizes are in points. The HTML view prints them as CSS `pt`
//! values and the PDF view draws with them directly, so the two agree on
//! column proportions, section order and styling.

use crate::color::Rgb;
use crate::page::{PageGeometry, PageSize};
use serde::Serialize;

/// Top-level blocks, in the order they appear on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Header,
    Parties,
    Items,
    Totals,
    Notes,
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKind {
    Description,
    Rate,
    Qty,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "pt")]
pub enum ColumnWidth {
    /// Takes whatever the fixed columns leave over.
    Flex,
    Fixed(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub kind: ColumnKind,
    pub header: &'static str,
    pub width: ColumnWidth,
    pub align: Align,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Typography {
    pub body: f32,
    pub title: f32,
    pub small: f32,
    pub label: f32,
    pub section: f32,
    pub footer: f32,
    /// Line height as a multiple of the font size.
    pub leading: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Palette {
    pub text: Rgb,
    pub muted: Rgb,
    pub label: Rgb,
    pub border: Rgb,
    pub rule: Rgb,
    pub footer: Rgb,
}

/// Vertical and horizontal gaps between blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spacing {
    pub header_bottom: f32,
    pub title_bottom: f32,
    pub party_gap: f32,
    pub card_padding: f32,
    pub label_bottom: f32,
    pub divider: f32,
    pub section_top: f32,
    pub section_bottom: f32,
    pub header_row_bottom: f32,
    pub row_padding: f32,
    pub totals_top: f32,
    pub totals_row_gap: f32,
    pub notes_top: f32,
    pub footer_bottom: f32,
}

/// Text shown in place of missing values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholders {
    pub title: String,
    pub description: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLayout {
    pub page: PageGeometry,
    pub sections: Vec<Section>,
    pub columns: Vec<Column>,
    pub typography: Typography,
    pub palette: Palette,
    pub spacing: Spacing,
    pub totals_width: f32,
    pub footer_text: String,
    pub placeholders: Placeholders,
}

impl DocumentLayout {
    pub fn new(size: PageSize) -> Self {
        let numeric = |kind, header| Column {
            kind,
            header,
            width: ColumnWidth::Fixed(80.0),
            align: Align::Right,
        };
        Self {
            page: PageGeometry::new(size),
            sections: vec![
                Section::Header,
                Section::Parties,
                Section::Items,
                Section::Totals,
                Section::Notes,
                Section::Footer,
            ],
            columns: vec![
                Column {
                    kind: ColumnKind::Description,
                    header: "Description",
                    width: ColumnWidth::Flex,
                    align: Align::Left,
                },
                numeric(ColumnKind::Rate, "Rate"),
                numeric(ColumnKind::Qty, "Qty"),
                numeric(ColumnKind::Amount, "Amount"),
            ],
            typography: Typography {
                body: 11.0,
                title: 18.0,
                small: 10.0,
                label: 9.0,
                section: 12.0,
                footer: 9.0,
                leading: 1.3,
            },
            palette: Palette {
                text: Rgb::gray(0x11),
                muted: Rgb::gray(0x55),
                label: Rgb::new(0x6b, 0x72, 0x80),
                border: Rgb::new(0xe5, 0xe7, 0xeb),
                rule: Rgb::new(0xf3, 0xf4, 0xf6),
                footer: Rgb::new(0x9c, 0xa3, 0xaf),
            },
            spacing: Spacing {
                header_bottom: 16.0,
                title_bottom: 6.0,
                party_gap: 12.0,
                card_padding: 10.0,
                label_bottom: 2.0,
                divider: 10.0,
                section_top: 14.0,
                section_bottom: 6.0,
                header_row_bottom: 6.0,
                row_padding: 6.0,
                totals_top: 10.0,
                totals_row_gap: 4.0,
                notes_top: 12.0,
                footer_bottom: 24.0,
            },
            totals_width: 220.0,
            footer_text: "Thank you for your business.".to_string(),
            placeholders: Placeholders {
                title: "Invoice".to_string(),
                description: "-".to_string(),
                notes: "\u{2014}".to_string(),
            },
        }
    }

    /// Resolved column widths for a table spanning the content box. The
    /// flexible column never shrinks below zero.
    pub fn column_widths(&self) -> Vec<f32> {
        let fixed: f32 = self
            .columns
            .iter()
            .map(|c| match c.width {
                ColumnWidth::Fixed(w) => w,
                ColumnWidth::Flex => 0.0,
            })
            .sum();
        let flex_count = self.columns.iter().filter(|c| c.width == ColumnWidth::Flex).count();
        let flex = if flex_count == 0 {
            0.0
        } else {
            ((self.page.content_width() - fixed) / flex_count as f32).max(0.0)
        };
        self.columns
            .iter()
            .map(|c| match c.width {
                ColumnWidth::Fixed(w) => w,
                ColumnWidth::Flex => flex,
            })
            .collect()
    }

    pub fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.typography.leading
    }
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self::new(PageSize::A4)
    }
}
