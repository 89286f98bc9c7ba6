/// Greedily break `text` into lines no wider than `max_width_px`.
///
/// Words are appended to the current line while the joined line still fits. A word that would
/// overflow a non-empty line starts a new one; a single word wider than the limit gets a line of
/// its own and is never split. Runs of whitespace collapse to one space.
pub fn wrap_words(
    text: &str,
    max_width_px: f64,
    mut measure: impl FnMut(&str) -> f64,
) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate_len = current.len();
        current.push(' ');
        current.push_str(word);
        if measure(&current) > max_width_px {
            current.truncate(candidate_len);
            out.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Wrap each line of an already-broken sequence independently.
///
/// For lines that each fit within `max_width_px` this returns them unchanged.
pub fn rewrap_lines(
    lines: &[String],
    max_width_px: f64,
    mut measure: impl FnMut(&str) -> f64,
) -> Vec<String> {
    lines
        .iter()
        .flat_map(|l| wrap_words(l, max_width_px, &mut measure))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
