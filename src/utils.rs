use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cuts `s` to at most `max_width` display columns, marking the cut with "...".
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Display column of a character-indexed cursor inside `text`.
pub fn cursor_column(text: &str, cursor: usize) -> usize {
    text.chars()
        .take(cursor)
        .map(|ch| ch.width().unwrap_or(0))
        .sum()
}

/// "3 / 10 (30%)"; an empty round reads as 0%.
pub fn format_score(score: usize, total: usize) -> String {
    let percent = if total == 0 { 0 } else { score * 100 / total };
    format!("{} / {} ({}%)", score, total, percent)
}

/// Blanks out every whole-word occurrence of `word` in `text`, ignoring case.
pub fn mask_word(text: &str, word: &str) -> String {
    let target: Vec<char> = word.trim().chars().collect();
    if target.is_empty() {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let end = i + target.len();
        let starts_word = i == 0 || !chars[i - 1].is_alphanumeric();
        if starts_word
            && end <= chars.len()
            && chars[i..end]
                .iter()
                .zip(&target)
                .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
            && chars.get(end).is_none_or(|c| !c.is_alphanumeric())
        {
            out.push_str("____");
            i = end;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}
