use crate::metrics::FontFace;

/// Greedy word wrap to `max_width` points.
///
/// Explicit newlines always break. A word wider than the line is split
/// between characters. Always returns at least one line.
pub fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate =
                if line.is_empty() { word.to_string() } else { format!("{} {}", line, word) };
            if face.text_width(&candidate, size) <= max_width {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if face.text_width(word, size) <= max_width {
                line = word.to_string();
            } else {
                for piece in split_word(word, face, size, max_width) {
                    if !line.is_empty() {
                        lines.push(std::mem::take(&mut line));
                    }
                    line = piece;
                }
            }
        }
        lines.push(line);
    }
    lines
}

fn split_word(word: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if face.text_width(&current, size) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
