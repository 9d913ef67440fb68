use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::BannerResult;

mod errors;
pub use errors::BannerError;

/// Number of rows every glyph occupies in a banner font file.
pub const GLYPH_HEIGHT: usize = 8;

/// Line stride between two glyph blocks: 8 rows plus one separator line.
pub const GLYPH_STRIDE: usize = GLYPH_HEIGHT + 1;

pub const FIRST_PRINTABLE: char = ' ';
pub const LAST_PRINTABLE: char = '~';

/// 1-based line number of the first glyph row of `ch` in a banner font file.
///
/// Characters outside the printable ASCII range have no glyph and are
/// rejected before any file lookup happens.
pub fn glyph_offset(ch: char) -> BannerResult<usize> {
    if !(FIRST_PRINTABLE..=LAST_PRINTABLE).contains(&ch) {
        return Err(BannerError::CharacterOutOfRange(ch).into());
    }
    Ok((ch as usize - FIRST_PRINTABLE as usize) * GLYPH_STRIDE + 2)
}

/// A banner font: one 8-row glyph per printable ASCII character, stored as
/// flat text with a fixed 9-line stride. Line 1 is a header, one separator
/// line precedes every further glyph block; neither is interpreted.
pub struct BannerFont {
    name: String,
    lines: Vec<String>,
}

impl BannerFont {
    pub fn load(file_name: &Path) -> BannerResult<Self> {
        let f = File::open(file_name)?;
        let mut reader = BufReader::new(f);
        let mut res = BannerFont::read(&mut reader)?;
        if let Some(name) = file_name.file_stem() {
            res.name = name.to_string_lossy().to_string();
        }
        log::debug!("loaded banner font {} ({} lines)", res.name, res.lines.len());
        Ok(res)
    }

    /// Reads a font from any source. No structural validation happens here;
    /// a font that is too short fails at lookup time.
    pub fn read<R: Read>(reader: &mut BufReader<R>) -> BannerResult<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let lines = text.split('\n').map(|line| line.replace('\r', "")).collect();
        Ok(BannerFont {
            name: String::new(),
            lines,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// A glyph lookup needs the header line plus at least one full glyph.
    pub fn check_line_count(&self) -> BannerResult<()> {
        if self.lines.len() < GLYPH_STRIDE {
            return Err(BannerError::NotEnoughLines(self.lines.len()).into());
        }
        Ok(())
    }

    /// Renders one glyph run as [`GLYPH_HEIGHT`] rows joined by `\n`, with no
    /// trailing `\n`.
    ///
    /// Row `k` concatenates font line `o + k` for every non-zero base offset
    /// `o` in order. Zero offsets contribute nothing to any row and are never
    /// dereferenced.
    pub fn render_rows(&self, offsets: &[usize]) -> BannerResult<String> {
        self.check_line_count()?;
        let mut result = String::new();
        for row in 0..GLYPH_HEIGHT {
            if row > 0 {
                result.push('\n');
            }
            for &base in offsets {
                if base == 0 {
                    continue;
                }
                let line = base + row;
                match self.lines.get(line - 1) {
                    Some(text) => result.push_str(text),
                    None => {
                        return Err(BannerError::LineOutOfRange {
                            line,
                            total: self.lines.len(),
                        }
                        .into());
                    }
                }
            }
        }
        Ok(result)
    }
}
