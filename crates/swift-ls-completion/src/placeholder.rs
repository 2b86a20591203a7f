//! Rewriting of the daemon's `<#display##type##type_for_expansion#>`
//! editor placeholders into LSP snippet placeholders `${n:display}`.
//!
//! Implemented as a small push-down automaton: a stack of in-progress
//! placeholder frames, so that an inner placeholder's rendering completes
//! (and is escaped) before it is folded into its enclosing placeholder's
//! body.

struct Frame {
    index: u32,
    /// Segments split by `##`; only the first (`display_name`) is used in
    /// the rendered snippet text.
    parts: Vec<String>,
}

/// Rewrite every `<#...#>` placeholder in `text`.
///
/// Returns the rewritten text and whether any placeholder was found. When
/// `client_snippet_support` is false, placeholders are stripped to the
/// empty string and no escapes are emitted.
pub fn rewrite(text: &str, client_snippet_support: bool) -> (String, bool) {
    if !client_snippet_support {
        return strip(text);
    }

    let mut stack: Vec<Frame> = Vec::new();
    let mut root = String::new();
    let mut counter = 0u32;
    let mut changed = false;

    let mut i = 0usize;
    let len = text.len();
    while i < len {
        if text[i..].starts_with("<#") {
            counter += 1;
            stack.push(Frame { index: counter, parts: vec![String::new()] });
            changed = true;
            i += 2;
            continue;
        }
        if text[i..].starts_with("#>") {
            if let Some(frame) = stack.pop() {
                let rendered = render_frame(&frame);
                append(&mut stack, &mut root, &rendered);
                i += 2;
                continue;
            }
        }
        if text[i..].starts_with("##") {
            if let Some(frame) = stack.last_mut() {
                frame.parts.push(String::new());
                i += 2;
                continue;
            }
        }

        let Some(ch) = text[i..].chars().next() else { break };
        let mut buf = [0u8; 4];
        let s = ch.encode_utf8(&mut buf);
        append(&mut stack, &mut root, s);
        i += ch.len_utf8();
    }

    // Unterminated placeholders at end of input: fold their captured text
    // back in as plain literal text rather than losing it.
    while let Some(frame) = stack.pop() {
        let literal = frame.parts.join("##");
        match stack.last_mut().and_then(|parent| parent.parts.last_mut()) {
            Some(last_part) => last_part.push_str(&literal),
            None => root.push_str(&literal),
        }
    }

    (root, changed)
}

fn append(stack: &mut [Frame], root: &mut String, s: &str) {
    match stack.last_mut().and_then(|top| top.parts.last_mut()) {
        Some(last_part) => last_part.push_str(s),
        None => root.push_str(s),
    }
}

fn render_frame(frame: &Frame) -> String {
    let display_name = frame.parts.first().map(String::as_str).unwrap_or("");
    format!("${{{}:{}}}", frame.index, escape(display_name))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '$' | '}') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn strip(text: &str) -> (String, bool) {
    let mut out = String::new();
    let mut depth = 0u32;
    let mut changed = false;
    let mut i = 0usize;
    let len = text.len();
    while i < len {
        if text[i..].starts_with("<#") {
            depth += 1;
            changed = true;
            i += 2;
            continue;
        }
        if depth > 0 && text[i..].starts_with("#>") {
            depth -= 1;
            i += 2;
            continue;
        }
        if depth == 0 {
            let Some(ch) = text[i..].chars().next() else { break };
            out.push(ch);
            i += ch.len_utf8();
        } else {
            i += 1;
        }
    }
    (out, changed)
}
