//! Minimal quote-aware CSV helpers shared by tag sources and session logs.
//!
//! The tag table and session log formats are fixed single-table shapes, so a
//! small RFC-4180-style splitter/escaper covers them without pulling in a
//! full reader stack.

/// Split one CSV record into fields, honoring double-quoted fields and
/// doubled-quote escapes. A trailing carriage return is dropped.
pub(crate) fn split_record(line: &str) -> Vec<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(ch),
            }
        }
    }
    fields.push(field);
    fields
}

/// Quote a field when it contains a delimiter, quote, or newline.
pub(crate) fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
