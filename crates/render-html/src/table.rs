//! Item table rows, one cell per layout column.

use crate::controls::encode;
use crate::error::HtmlError;
use invoicer_edit::{Edit, LineItemField};
use invoicer_layout::{Align, ColumnKind, DocumentLayout, InvoiceView, LineRow};
use invoicer_types::LineItemId;
use serde::Serialize;

#[derive(Serialize)]
pub struct CellInput<'a> {
    pub value: &'a str,
    pub numeric: bool,
    pub placeholder: Option<&'static str>,
    pub edit: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell<'a> {
    pub kind: ColumnKind,
    pub align: Align,
    pub text: &'a str,
    pub is_amount: bool,
    /// Edit mode only; the amount column never has one.
    pub input: Option<CellInput<'a>>,
}

#[derive(Serialize)]
pub struct TableRow<'a> {
    pub id: &'a str,
    pub cells: Vec<Cell<'a>>,
    pub remove: Option<String>,
}

pub fn rows<'a>(
    view: &'a InvoiceView,
    layout: &DocumentLayout,
    editable: bool,
) -> Result<Vec<TableRow<'a>>, HtmlError> {
    view.rows.iter().map(|row| table_row(row, layout, editable)).collect()
}

fn table_row<'a>(
    row: &'a LineRow,
    layout: &DocumentLayout,
    editable: bool,
) -> Result<TableRow<'a>, HtmlError> {
    let id = || LineItemId::from(row.id.as_str());
    let cells = layout
        .columns
        .iter()
        .map(|column| {
            let input = if editable { cell_input(row, column.kind, id())? } else { None };
            Ok::<_, HtmlError>(Cell {
                kind: column.kind,
                align: column.align,
                text: row.cell(column.kind),
                is_amount: column.kind == ColumnKind::Amount,
                input,
            })
        })
        .collect::<Result<_, _>>()?;
    let remove = if editable { Some(encode(&Edit::RemoveLineItem { id: id() })?) } else { None };
    Ok(TableRow { id: &row.id, cells, remove })
}

fn cell_input(row: &LineRow, kind: ColumnKind, id: LineItemId) -> Result<Option<CellInput<'_>>, HtmlError> {
    let (field, value, numeric, placeholder) = match kind {
        ColumnKind::Description => {
            (LineItemField::Description, row.description.as_str(), false, Some("Description"))
        }
        ColumnKind::Rate => (LineItemField::Rate, row.rate_input.as_str(), true, None),
        ColumnKind::Qty => (LineItemField::Qty, row.qty.as_str(), true, None),
        ColumnKind::Amount => return Ok(None),
    };
    Ok(Some(CellInput {
        value,
        numeric,
        placeholder,
        edit: encode(&Edit::patch_line_item(id, field, ""))?,
    }))
}
