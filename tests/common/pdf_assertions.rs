use lopdf::Document as LopdfDocument;
use lopdf::content::Content;

/// Decodes a WinAnsi byte string back to text for the characters the
/// renderer emits.
pub fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80 => '\u{20ac}',
            0x96 => '\u{2013}',
            0x97 => '\u{2014}',
            other => other as char,
        })
        .collect()
}

/// Every string drawn with `Tj` on the given 1-based page
pub fn page_strings(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    let Some(page_id) = doc.get_pages().get(&page_num).copied() else {
        return Vec::new();
    };
    let Ok(content) = doc.get_page_content(page_id) else {
        return Vec::new();
    };
    let Ok(content) = Content::decode(&content) else {
        return Vec::new();
    };
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(decode_win_ansi)
        .collect()
}

/// Width and height of a page's MediaBox in points
pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let page_id = doc.get_pages().get(&page_num).copied()?;
    let page = doc.get_object(page_id).ok()?.as_dict().ok()?;
    let media_box = page.get(b"MediaBox").ok()?.as_array().ok()?;
    let number = |i: usize| media_box.get(i).and_then(|o| o.as_float().ok());
    Some((number(2)? - number(0)?, number(3)? - number(1)?))
}

/// BaseFont names referenced by the document's fonts
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut names: Vec<String> = doc
        .objects
        .values()
        .filter_map(|obj| obj.as_dict().ok())
        .filter(|dict| dict.get(b"Type").and_then(|t| t.as_name()).ok() == Some(b"Font".as_slice()))
        .filter_map(|dict| dict.get(b"BaseFont").and_then(|n| n.as_name()).ok())
        .map(|name| String::from_utf8_lossy(name).to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}
