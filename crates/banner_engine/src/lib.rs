#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::return_self_not_must_use,
    clippy::uninlined_format_args
)]

mod banner_font;
pub use banner_font::*;

mod render;
pub use render::*;

pub type BannerResult<T> = anyhow::Result<T>;
