/// Makes user text safe to print on a terminal.
///
/// Control characters (ESC, carriage return, bell...) are replaced by
/// their escaped spelling so a task title cannot move the cursor or change
/// colours. Tabs become a single space.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.push(' '),
            c if c.is_control() => out.extend(c.escape_default()),
            c => out.push(c),
        }
    }
    out
}

/// Like [`sanitize`] but collapses line breaks, for single-line cells.
pub fn sanitize_line(text: &str) -> String {
    sanitize(&text.replace(['\r', '\n'], " "))
}
