//! Text measurement and truncation for axis labels.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Largest number of characters that fit in `max_px`.
fn chars_fitting(font_px: u32, max_px: u32) -> usize {
    let per_char = (font_px as f32 * 0.60).max(1.0);
    (max_px as f32 / per_char).floor() as usize
}

/// Shorten `text` to fit `max_px`, ending in a single ellipsis when cut.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let keep = chars_fitting(font_px, max_px).saturating_sub(1);
    if keep == 0 {
        return "…".to_string();
    }
    let mut out: String = text.chars().take(keep).collect();
    out.truncate(out.trim_end().len());
    out.push('…');
    // The character budget is approximate; trim until the estimate fits.
    while estimate_text_width_px(&out, font_px) > max_px && out.chars().count() > 1 {
        out.pop();
        out.pop();
        out.truncate(out.trim_end().len());
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_labels_pass_through() {
        assert_eq!(truncate_to_width("China", 12, 200), "China");
    }

    #[test]
    fn long_labels_end_in_ellipsis_and_fit() {
        let s = truncate_to_width("United Kingdom of Great Britain", 10, 60);
        assert!(s.ends_with('…'));
        assert!(estimate_text_width_px(&s, 10) <= 60, "{s}");
    }

    #[test]
    fn truncated_labels_fit_across_font_sizes() {
        let label = "Mortality rate, under-5 (per 1,000 live births)";
        for font_px in [9, 10, 11, 12, 14] {
            for max_px in [20, 48, 60, 61, 90, 120] {
                let s = truncate_to_width(label, font_px, max_px);
                assert!(
                    s == "…" || estimate_text_width_px(&s, font_px) <= max_px,
                    "{font_px}px in {max_px}: {s}"
                );
            }
        }
    }
}
