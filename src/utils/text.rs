use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates `s` to at most `max` terminal columns, ending in `…` when cut.
pub fn fit_width(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Pads `s` with spaces to exactly `width` columns (after truncation), so a
/// tinted background spans the whole row.
pub fn pad_to(s: &str, width: usize) -> String {
    let mut out = fit_width(s, width);
    let w = UnicodeWidthStr::width(out.as_str());
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(w)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(fit_width("Intro", 10), "Intro");
    }

    #[test]
    fn long_text_is_ellipsized() {
        assert_eq!(fit_width("Windowlicker", 6), "Windo…");
    }

    #[test]
    fn wide_glyphs_count_double() {
        // each CJK char is two columns
        assert_eq!(fit_width("東京事変", 5), "東京…");
    }

    #[test]
    fn padding_fills_row() {
        assert_eq!(pad_to("ab", 4), "ab  ");
        assert_eq!(pad_to("abcdef", 4), "abc…");
    }
}
