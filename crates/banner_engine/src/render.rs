use std::path::Path;

use crate::{BannerFont, BannerResult, glyph_offset};

/// One run of glyph offsets or an explicit break within a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    GlyphRun(Vec<usize>),
    LineBreak,
}

/// Renders `text` with the banner font at `font_path`.
///
/// The font is loaded fresh for every call; concurrent renders share no
/// state. The first invalid character or font fault aborts the whole call
/// with no partial output.
pub fn render(text: &str, font_path: &Path) -> BannerResult<String> {
    let font = BannerFont::load(font_path)?;
    render_text(text, &font)
}

/// Renders `text` with an already loaded font, one 8-row block per input
/// line, blocks joined by a single `\n`.
pub fn render_text(text: &str, font: &BannerFont) -> BannerResult<String> {
    font.check_line_count()?;
    let mut result = String::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            result.push('\n');
        }
        result.push_str(&render_line(line, font)?);
    }
    Ok(result)
}

fn render_line(line: &str, font: &BannerFont) -> BannerResult<String> {
    let mut offsets = Vec::with_capacity(line.len());
    for ch in line.chars() {
        offsets.push(glyph_offset(ch)?);
    }
    render_offsets(&offsets, font)
}

/// Renders one line's worth of glyph offsets: segments them, renders every
/// glyph run, emits a bare `\n` per explicit break, and applies the
/// trailing-break rule.
pub fn render_offsets(offsets: &[usize], font: &BannerFont) -> BannerResult<String> {
    let segments = segment_offsets(offsets);
    let mut result = String::new();
    for segment in &segments {
        match segment {
            Segment::LineBreak => result.push('\n'),
            Segment::GlyphRun(run) => result.push_str(&font.render_rows(run)?),
        }
    }
    if ends_in_blank(&segments) {
        result.push('\n');
    }
    Ok(result)
}

/// Splits one line's offsets into segments. A zero seen while the current
/// run already ends in zero closes the run; the triggering zero is consumed,
/// not appended. A run of exactly one zero is an explicit break, every other
/// run is a glyph run.
pub fn segment_offsets(offsets: &[usize]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run: Vec<usize> = Vec::new();
    for &offset in offsets {
        if offset == 0 && run.last() == Some(&0) {
            segments.push(close_run(run));
            run = Vec::new();
        } else {
            run.push(offset);
        }
    }
    if !run.is_empty() {
        segments.push(close_run(run));
    }
    segments
}

fn close_run(run: Vec<usize>) -> Segment {
    if run.len() == 1 && run[0] == 0 {
        Segment::LineBreak
    } else {
        Segment::GlyphRun(run)
    }
}

// A line that ends with a trailing blank marker gets one extra break; a line
// that is purely a single zero is already handled as a break segment.
fn ends_in_blank(segments: &[Segment]) -> bool {
    match segments.last() {
        Some(Segment::GlyphRun(run)) => run.len() > 1 && run.last() == Some(&0),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BannerError;
    use pretty_assertions::assert_eq;
    use std::io::BufReader;

    fn test_font() -> BannerFont {
        // Header plus glyphs for ' ' (offset 2) and '!' (offset 11).
        let data = "test font\n.1\n.2\n.3\n.4\n.5\n.6\n.7\n.8\n-\n!1\n!2\n!3\n!4\n!5\n!6\n!7\n!8";
        let mut reader = BufReader::new(data.as_bytes());
        BannerFont::read(&mut reader).unwrap()
    }

    #[test]
    fn test_segment_plain_run() {
        assert_eq!(segment_offsets(&[2, 11, 2]), vec![Segment::GlyphRun(vec![2, 11, 2])]);
    }

    #[test]
    fn test_segment_empty() {
        assert_eq!(segment_offsets(&[]), Vec::<Segment>::new());
    }

    #[test]
    fn test_segment_single_zero() {
        assert_eq!(segment_offsets(&[0]), vec![Segment::LineBreak]);
    }

    #[test]
    fn test_segment_double_zero_collapses() {
        // The second zero only closes the run, it is not kept.
        assert_eq!(segment_offsets(&[0, 0]), vec![Segment::LineBreak]);
        assert_eq!(segment_offsets(&[0, 0, 0]), vec![Segment::LineBreak, Segment::LineBreak]);
    }

    #[test]
    fn test_segment_zero_boundary_inside_run() {
        assert_eq!(
            segment_offsets(&[2, 0, 0, 11]),
            vec![Segment::GlyphRun(vec![2, 0]), Segment::GlyphRun(vec![11])]
        );
    }

    #[test]
    fn test_segment_trailing_zero_stays_in_run() {
        assert_eq!(segment_offsets(&[2, 0]), vec![Segment::GlyphRun(vec![2, 0])]);
    }

    #[test]
    fn test_render_offsets_break_segment() {
        let font = test_font();
        assert_eq!(render_offsets(&[0], &font).unwrap(), "\n");
    }

    #[test]
    fn test_render_offsets_trailing_blank_appends_break() {
        let font = test_font();
        let plain = render_offsets(&[2], &font).unwrap();
        let trailing = render_offsets(&[2, 0], &font).unwrap();
        assert_eq!(trailing, format!("{plain}\n"));
    }

    #[test]
    fn test_render_empty_string() {
        let font = test_font();
        assert_eq!(render_text("", &font).unwrap(), "");
    }

    #[test]
    fn test_render_single_char() {
        let font = test_font();
        assert_eq!(render_text("!", &font).unwrap(), "!1\n!2\n!3\n!4\n!5\n!6\n!7\n!8");
    }

    #[test]
    fn test_render_joins_glyph_rows() {
        let font = test_font();
        assert_eq!(
            render_text("! !", &font).unwrap(),
            "!1.1!1\n!2.2!2\n!3.3!3\n!4.4!4\n!5.5!5\n!6.6!6\n!7.7!7\n!8.8!8"
        );
    }

    #[test]
    fn test_render_multi_line_input() {
        let font = test_font();
        let output = render_text("!\n!", &font).unwrap();
        assert_eq!(output.split('\n').count(), 16);
        let block = render_text("!", &font).unwrap();
        assert_eq!(output, format!("{block}\n{block}"));
    }

    #[test]
    fn test_render_blank_input_line() {
        let font = test_font();
        let block = render_text("!", &font).unwrap();
        assert_eq!(render_text("!\n\n!", &font).unwrap(), format!("{block}\n\n{block}"));
    }

    #[test]
    fn test_render_rejects_invalid_char() {
        let font = test_font();
        let err = render_text("! ä", &font).unwrap_err();
        assert!(matches!(err.downcast_ref::<BannerError>(), Some(BannerError::CharacterOutOfRange('ä'))));
    }

    #[test]
    fn test_render_invalid_char_on_later_line() {
        let font = test_font();
        let err = render_text("!\n\u{7}", &font).unwrap_err();
        assert!(matches!(err.downcast_ref::<BannerError>(), Some(BannerError::CharacterOutOfRange('\u{7}'))));
    }

    #[test]
    fn test_short_font_fails_regardless_of_input() {
        let data = "too\nshort";
        let mut reader = BufReader::new(data.as_bytes());
        let font = BannerFont::read(&mut reader).unwrap();
        for text in ["", "!", "!\n!"] {
            let err = render_text(text, &font).unwrap_err();
            assert!(matches!(err.downcast_ref::<BannerError>(), Some(BannerError::NotEnoughLines(2))));
        }
    }

    #[test]
    fn test_render_missing_glyph_fails() {
        let font = test_font();
        // '"' would start at line 20, past this font's 18 lines.
        let err = render_text("\"", &font).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BannerError>(),
            Some(BannerError::LineOutOfRange { line: 20, total: 18 })
        ));
    }

    #[test]
    fn test_render_is_idempotent() {
        let font = test_font();
        let first = render_text("! !\n!", &font).unwrap();
        let second = render_text("! !\n!", &font).unwrap();
        assert_eq!(first, second);
    }
}
