use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum BannerError {
    #[error("character out of range: {0:?}")]
    CharacterOutOfRange(char),

    #[error("banner file does not contain enough lines ({0})")]
    NotEnoughLines(usize),

    #[error("line number out of range: {line} (total lines: {total})")]
    LineOutOfRange { line: usize, total: usize },
}
