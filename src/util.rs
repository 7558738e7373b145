pub fn unquote_string_literal(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() < 2 {
        return None;
    }
    let first = trimmed.chars().next()?;
    if first == '"' || first == '\'' || first == '`' {
        let last = trimmed.chars().last()?;
        if last == first {
            return Some(trimmed[1..trimmed.len() - 1].to_string());
        }
    }
    None
}

/// 1-based line and column for a byte offset. Offsets past the end clamp to
/// the last position.
pub fn line_and_char(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (idx, ch) in source.char_indices() {
        if idx >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
