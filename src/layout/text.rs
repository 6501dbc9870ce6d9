use crate::font::Font;
use crate::units::Pt;

/// Calculate the width of a given string of text given the font and font size
pub fn width_of_text(text: &str, font: &Font, size: Pt) -> Pt {
    text.chars().map(|ch| font.advance(ch, size)).sum()
}

/// Drawn in place of whatever [truncate_to_width] cuts off
pub const ELLIPSIS: &str = "\u{2026}";

/// Shortens `text` until it is no wider than `max_width`, ending it with an ellipsis when
/// anything was cut. Text that already fits comes back unchanged.
pub fn truncate_to_width(text: &str, font: &Font, size: Pt, max_width: Pt) -> String {
    if width_of_text(text, font, size) <= max_width {
        return text.to_string();
    }

    let mut room = max_width - width_of_text(ELLIPSIS, font, size);
    if room < Pt(0.0) {
        return String::new();
    }
    let mut kept = String::new();
    for ch in text.chars() {
        let advance = font.advance(ch, size);
        if advance > room {
            break;
        }
        room -= advance;
        kept.push(ch);
    }
    kept.truncate(kept.trim_end().len());
    kept.push_str(ELLIPSIS);
    kept
}

/// Calculates the vertical offset from the top of a line box to the baseline of text
/// set in it. In PDF, text coordinates specify the baseline position, so this is what
/// needs to be subtracted from a top edge to place a line of text just below it.
pub fn baseline_offset(font: &Font, size: Pt) -> Pt {
    font.ascent(size)
}

/// The baseline that visually centres a single line of text on `mid_y`
pub fn centred_baseline(font: &Font, size: Pt, mid_y: Pt) -> Pt {
    mid_y - font.cap_height(size) / 2.0
}

/// Greedy word wrap using the font's glyph widths.
///
/// The first word starts the first line. Each following word is appended to the current
/// line when `line + " " + word` measures strictly less than `max_width`; otherwise the
/// current line is flushed and the word starts a new one. The final line is always
/// flushed. A single word wider than `max_width` is never broken and will overflow.
///
/// Any whitespace separates words, so newlines in the input do not force breaks. Text with
/// no words produces one empty line.
///
/// This is a pure function of its arguments: measuring a section and later drawing it
/// with the same font, size and width yields the same lines.
pub fn wrap(text: &str, font: &Font, size: Pt, max_width: Pt) -> Vec<String> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return vec![String::new()];
    };

    let mut lines: Vec<String> = Vec::new();
    let mut line = first.to_string();
    for word in words {
        let candidate = format!("{line} {word}");
        if width_of_text(&candidate, font, size) < max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    lines.push(line);

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::StandardFont;

    fn helvetica() -> Font {
        Font::standard(StandardFont::Helvetica)
    }

    #[test]
    fn widths_sum_glyph_advances() {
        let font = helvetica();
        // H 722 + i 222 at 1000pt
        assert_eq!(width_of_text("Hi", &font, Pt(1000.0)), Pt(944.0));
        assert_eq!(width_of_text("", &font, Pt(11.0)), Pt(0.0));
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let font = helvetica();
        let lines = wrap("Install smoke detectors", &font, Pt(11.0), Pt(468.0));
        assert_eq!(lines, vec!["Install smoke detectors".to_string()]);
    }

    #[test]
    fn every_line_fits_unless_it_is_a_single_long_word() {
        let font = helvetica();
        let text = lipsum::lipsum(120);
        for &width in &[60.0, 120.0, 200.0, 428.0] {
            let max = Pt(width);
            for line in wrap(&text, &font, Pt(11.0), max) {
                let measured = width_of_text(&line, &font, Pt(11.0));
                assert!(
                    measured <= max || !line.contains(' '),
                    "line {line:?} measures {measured} > {max}"
                );
            }
        }
    }

    #[test]
    fn wrapping_keeps_every_word_in_order() {
        let font = helvetica();
        let text = lipsum::lipsum(80);
        let lines = wrap(&text, &font, Pt(11.0), Pt(150.0));
        let rejoined = lines.join(" ");
        let original: Vec<&str> = text.split_whitespace().collect();
        let wrapped: Vec<&str> = rejoined.split_whitespace().collect();
        assert_eq!(original, wrapped);
        assert!(lines.len() > 1);
    }

    #[test]
    fn unbreakable_words_overflow_on_their_own_line() {
        let font = helvetica();
        let lines = wrap(
            "see https://permits.example.gov/a/very/long/unbroken/path ok",
            &font,
            Pt(11.0),
            Pt(80.0),
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "https://permits.example.gov/a/very/long/unbroken/path");
        assert!(width_of_text(&lines[1], &font, Pt(11.0)) > Pt(80.0));
    }

    #[test]
    fn exact_fit_breaks_because_the_comparison_is_strict() {
        let font = helvetica();
        let width = width_of_text("aaa aaa", &font, Pt(10.0));
        assert_eq!(wrap("aaa aaa", &font, Pt(10.0), width).len(), 2);
        assert_eq!(wrap("aaa aaa", &font, Pt(10.0), width + Pt(0.01)).len(), 1);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let font = helvetica();
        assert_eq!(wrap("", &font, Pt(11.0), Pt(100.0)), vec![String::new()]);
        assert_eq!(wrap("  \n ", &font, Pt(11.0), Pt(100.0)), vec![String::new()]);
    }

    #[test]
    fn truncation_fits_and_marks_the_cut() {
        let font = helvetica();
        let size = Pt(11.0);
        assert_eq!(truncate_to_width("12 Elm St", &font, size, Pt(200.0)), "12 Elm St");

        let text = "1200 North Industrial Parkway, Springfield, IL 62701";
        let cut = truncate_to_width(text, &font, size, Pt(150.0));
        assert!(cut.ends_with(ELLIPSIS));
        assert!(width_of_text(&cut, &font, size) <= Pt(150.0));
        assert!(text.starts_with(cut.trim_end_matches(ELLIPSIS)));
        assert!(!cut.trim_end_matches(ELLIPSIS).ends_with(' '));

        assert_eq!(truncate_to_width(text, &font, size, Pt(2.0)), "");
    }

    #[test]
    fn wrapping_is_repeatable() {
        let font = helvetica();
        let text = lipsum::lipsum(60);
        let measured = wrap(&text, &font, Pt(11.0), Pt(428.0));
        let drawn = wrap(&text, &font, Pt(11.0), Pt(428.0));
        assert_eq!(measured, drawn);
    }
}
