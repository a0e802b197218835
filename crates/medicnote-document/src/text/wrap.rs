// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Greedy word wrap against a caller-supplied width measure.

/// Wrap `text` so that no line measures wider than `max_width`.
///
/// Words are joined with single spaces; a word that would push the candidate
/// line past `max_width` starts a new line. A word wider than `max_width` on
/// its own is kept whole on its own line (no hyphenation). Explicit newlines
/// start a new paragraph, and a blank paragraph yields an empty line.
///
/// Input that is empty or whitespace-only yields no lines.
pub fn wrap<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    if text.trim().is_empty() {
        return lines;
    }

    for paragraph in text.trim().lines() {
        let mut words = paragraph.split_whitespace();
        let Some(first) = words.next() else {
            lines.push(String::new());
            continue;
        };

        let mut current = first.to_owned();
        for word in words {
            let candidate = format!("{current} {word}");
            if measure(&candidate) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_owned()));
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }

    lines
}
