//! Utility functions for visualization: colors, value ranges, tick labels.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// Sequential "Blues" ramp endpoints (light to dark).
const BLUES_LIGHT: (f64, f64, f64) = (247.0, 251.0, 255.0);
const BLUES_DARK: (f64, f64, f64) = (8.0, 48.0, 107.0);

/// Color for `t` in `[0, 1]` on a light-to-dark blue ramp.
pub fn blues(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(
        lerp(BLUES_LIGHT.0, BLUES_DARK.0),
        lerp(BLUES_LIGHT.1, BLUES_DARK.1),
        lerp(BLUES_LIGHT.2, BLUES_DARK.2),
    )
}

/// Perceived brightness below which annotations switch to white text.
pub fn is_dark(c: &RGBColor) -> bool {
    let RGBColor(r, g, b) = *c;
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) < 128.0
}

/// Y range covering all finite values with 5% headroom; `None` when there are none.
///
/// `include_zero` anchors the range at zero (bar charts).
pub fn value_range<I>(values: I, include_zero: bool) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let (mut lo, mut hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return None;
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }
    let pad = (hi - lo) * 0.05;
    let lo = if include_zero && lo == 0.0 { 0.0 } else { lo - pad };
    Some((lo, hi + pad))
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Tick label: locale thousands grouping above 1000, otherwise up to two decimals.
pub fn format_tick(v: f64, locale_tag: &str) -> String {
    let (locale, dec_sep) = map_locale(locale_tag);
    let a = v.abs();
    if a >= 1000.0 {
        return (v.round() as i64).to_formatted_string(locale);
    }
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    let s = format!("{:.*}", prec, v);
    if dec_sep == '.' {
        s
    } else {
        s.replace('.', &dec_sep.to_string())
    }
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px(
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: u32,
    locale_tag: &str,
) -> u32 {
    let mut max_px = 0u32;
    // Sample the same number of tick positions as requested from Plotters.
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        let s = format_tick(v, locale_tag);
        max_px = max_px.max(estimate_text_width_px(&s, font_px));
    }

    // Room for tick marks and the rotated axis title.
    let with_padding = max_px.saturating_add(40);
    with_padding.clamp(60, 160)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_range_pads_and_anchors_bars_at_zero() {
        let (lo, hi) = value_range([2.0, 10.0], true).unwrap();
        assert_eq!(lo, 0.0);
        assert!(hi > 10.0);
        assert!(value_range([f64::NAN], false).is_none());
    }

    #[test]
    fn ticks_follow_locale() {
        assert_eq!(format_tick(12345.0, "en"), "12,345");
        assert_eq!(format_tick(12345.0, "de"), "12.345");
        assert_eq!(format_tick(2.5, "de"), "2,50");
        assert_eq!(format_tick(42.26, "en"), "42.3");
    }

    #[test]
    fn blues_ramp_endpoints() {
        assert_eq!(blues(0.0), RGBColor(247, 251, 255));
        assert_eq!(blues(1.0), RGBColor(8, 48, 107));
        assert!(is_dark(&blues(1.0)));
        assert!(!is_dark(&blues(0.0)));
    }
}
