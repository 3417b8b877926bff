// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Character-based line wrapping for dense text.
//
// Korean body text in the templates carries no reliable inter-word spaces to
// break on, so lines are filled greedily one character at a time. Spaces are
// ordinary characters and are kept, which makes the output concatenate back
// to the input exactly.

/// Wrap `text` into lines of at most `max_line_chars` characters.
///
/// Lengths are counted in Unicode scalar values, never bytes. The empty string
/// wraps to no lines at all.
///
/// # Panics
///
/// Panics if `max_line_chars` is zero. `LayoutConfig::validate` rejects such
/// configurations before any wrapping happens.
pub fn wrap(text: &str, max_line_chars: usize) -> Vec<String> {
    assert!(max_line_chars > 0, "wrap width must be at least one character");

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for ch in text.chars() {
        if current_len + 1 > max_line_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push(ch);
        current_len += 1;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
