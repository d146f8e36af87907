//! Layout-time text extent estimates.
//!
//! Scene building runs without a font backend, so legend boxes and axis
//! label offsets are sized from character counts. The raster backend
//! measures real glyph extents when it draws.

const AVERAGE_GLYPH_WIDTH_EM: f64 = 0.6;
const LINE_HEIGHT_EM: f64 = 1.2;
const SCRIPT_GLYPH_WIDTH_EM: f64 = 0.4;

/// Estimated (width, height) of a possibly multi-line label in pixels.
#[must_use]
pub fn estimate_text_extent(text: &str, font_size_px: f64, markup: bool) -> (f64, f64) {
    let visible = if markup {
        strip_markup(text)
    } else {
        VisibleText {
            body: text.to_owned(),
            script_chars: 0,
        }
    };

    let line_count = visible.body.lines().count().max(1);
    let widest = visible
        .body
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let width = (widest as f64 * AVERAGE_GLYPH_WIDTH_EM
        - visible.script_chars as f64 * (AVERAGE_GLYPH_WIDTH_EM - SCRIPT_GLYPH_WIDTH_EM))
        .max(0.0)
        * font_size_px;
    let height = line_count as f64 * LINE_HEIGHT_EM * font_size_px;
    (width, height)
}

#[must_use]
pub fn estimate_text_width(text: &str, font_size_px: f64, markup: bool) -> f64 {
    estimate_text_extent(text, font_size_px, markup).0
}

/// Escapes `&`, `<` and `>` for use inside Pango markup.
#[must_use]
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

struct VisibleText {
    body: String,
    script_chars: usize,
}

fn strip_markup(text: &str) -> VisibleText {
    let mut body = String::with_capacity(text.len());
    let mut script_depth = 0usize;
    let mut script_chars = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '<' => {
                let mut tag = String::new();
                for next in chars.by_ref() {
                    if next == '>' {
                        break;
                    }
                    tag.push(next);
                }
                match tag.as_str() {
                    "sub" | "sup" => script_depth += 1,
                    "/sub" | "/sup" => script_depth = script_depth.saturating_sub(1),
                    _ => {}
                }
            }
            '&' => {
                while chars.next_if(|next| *next != ';').is_some() {}
                let _ = chars.next();
                body.push('?');
                if script_depth > 0 {
                    script_chars += 1;
                }
            }
            other => {
                body.push(other);
                if script_depth > 0 && other != '\n' {
                    script_chars += 1;
                }
            }
        }
    }

    VisibleText { body, script_chars }
}

#[cfg(test)]
mod tests {
    use super::{escape_markup, estimate_text_extent};

    #[test]
    fn markup_tags_do_not_count_towards_width() {
        let plain = estimate_text_extent("log10(n)", 10.0, false).0;
        let marked = estimate_text_extent("log<sub>10</sub>(n)", 10.0, true).0;
        assert!(marked < plain);
        assert!(marked > 0.0);
    }

    #[test]
    fn multi_line_text_grows_in_height() {
        let (_, one) = estimate_text_extent("Stellar", 10.0, false);
        let (_, two) = estimate_text_extent("Stellar\nfeedback", 10.0, false);
        assert!((two - 2.0 * one).abs() <= 1e-9);
    }

    #[test]
    fn entities_count_as_one_glyph() {
        let escaped = estimate_text_extent("a &lt; b", 10.0, true).0;
        let plain = estimate_text_extent("a < b", 10.0, false).0;
        assert!((escaped - plain).abs() <= 1e-9);
    }

    #[test]
    fn escape_markup_escapes_angle_brackets() {
        assert_eq!(escape_markup("sSFR < -1 & more"), "sSFR &lt; -1 &amp; more");
    }
}
