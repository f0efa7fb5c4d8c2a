//! Paragraph-boundary text chunker.
//!
//! Splits a text item into pieces that respect a `max_tokens` limit,
//! carrying a configurable overlap between adjacent pieces. Splitting
//! occurs on paragraph boundaries (`\n\n`) to preserve semantic coherence;
//! a single oversized paragraph is hard-split at word boundaries.
//!
//! Most corpus items (email snippets, page titles, event titles) are short
//! and come out as exactly one chunk.

/// Approximate chars-per-token ratio.
const CHARS_PER_TOKEN: usize = 4;

/// Split text into chunks, respecting `max_tokens` with `overlap_tokens`
/// of trailing context carried into each subsequent chunk.
/// Always returns at least one chunk.
pub fn chunk_text(text: &str, max_tokens: usize, overlap_tokens: usize) -> Vec<String> {
    let max_chars = max_tokens * CHARS_PER_TOKEN;
    let overlap_chars = overlap_tokens * CHARS_PER_TOKEN;

    let trimmed_text = text.trim();
    if trimmed_text.is_empty() || char_count(trimmed_text) <= max_chars {
        return vec![trimmed_text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut buf = String::new();
    // Overlap carried from the previous chunk never counts as fresh content;
    // a chunk is only emitted once a paragraph has landed in it.
    let mut buf_has_content = false;

    for para in trimmed_text.split("\n\n") {
        let para = para.trim();
        if para.is_empty() {
            continue;
        }

        let would_be = if buf.is_empty() {
            char_count(para)
        } else {
            char_count(&buf) + 2 + char_count(para)
        };

        if would_be > max_chars && buf_has_content {
            let carried = overlap_tail(&buf, overlap_chars);
            chunks.push(buf);
            buf = carried;
            buf_has_content = false;
        }

        if char_count(para) > max_chars {
            if buf_has_content {
                let carried = overlap_tail(&buf, overlap_chars);
                chunks.push(buf);
                buf = carried;
                buf_has_content = false;
            }
            // Hard split at word boundaries
            let mut remaining = para;
            while !remaining.is_empty() {
                let at = split_point(remaining, max_chars);
                let piece = remaining[..at].trim();
                if !piece.is_empty() {
                    chunks.push(piece.to_string());
                }
                remaining = &remaining[at..];
            }
            buf.clear();
        } else {
            if !buf.is_empty() {
                buf.push_str("\n\n");
            }
            buf.push_str(para);
            buf_has_content = true;
        }
    }

    if buf_has_content {
        chunks.push(buf);
    }

    if chunks.is_empty() {
        chunks.push(trimmed_text.to_string());
    }

    chunks
}

fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of a split at or before `max_chars` characters, preferring a
/// newline or space boundary.
fn split_point(s: &str, max_chars: usize) -> usize {
    let hard = match s.char_indices().nth(max_chars) {
        Some((i, _)) => i,
        None => return s.len(),
    };
    s[..hard]
        .rfind('\n')
        .or_else(|| s[..hard].rfind(' '))
        .map(|p| p + 1)
        .unwrap_or(hard)
}

/// The last `overlap_chars` characters of a chunk, advanced to the next
/// word boundary so the carried text never starts mid-word.
fn overlap_tail(s: &str, overlap_chars: usize) -> String {
    if overlap_chars == 0 || s.is_empty() {
        return String::new();
    }
    let total = char_count(s);
    if total <= overlap_chars {
        return s.to_string();
    }
    let start = s
        .char_indices()
        .nth(total - overlap_chars)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let tail = &s[start..];
    match tail.find(char::is_whitespace) {
        Some(p) => tail[p..].trim_start().to_string(),
        None => tail.to_string(),
    }
}
