use std::{
    fs,
    path::{Path, PathBuf},
};

use banner_engine::render;
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use regex::Regex;

lazy_static::lazy_static! {
    static ref BANNER_NAME: Regex = Regex::new("^[A-Za-z0-9_-]+$").unwrap();
}

#[derive(Parser)]
#[command(version, about = "Renders text as multi-line banner ASCII art.")]
pub struct Cli {
    #[arg(help = "Text to render (printable ASCII).")]
    text: Option<String>,

    #[arg(help = "Name of the banner font.", long, default_value = "standard")]
    font: String,

    #[arg(help = "Directory containing banner font files.", long, default_value = "banners")]
    fonts: PathBuf,

    #[arg(help = "Render with an explicit font file, bypassing name lookup.", long)]
    font_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
enum Commands {
    #[command(about = "Lists the banner fonts in the fonts directory")]
    List,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let _logger = Logger::try_with_env_or_str("warn")?.start()?;

    if let Some(Commands::List) = args.command {
        return list_fonts(&args.fonts);
    }

    let Some(text) = args.text else {
        anyhow::bail!("no text given, nothing to render");
    };
    if text.is_empty() {
        anyhow::bail!("text is empty");
    }

    let font_path = match &args.font_file {
        Some(path) => path.clone(),
        None => resolve_banner_path(&args.fonts, &args.font)?,
    };

    log::info!("rendering {} bytes with {}", text.len(), font_path.display());
    let output = render(&normalize_newlines(&text), &font_path)?;
    println!("{output}");
    Ok(())
}

/// Collapses Windows line endings; the engine only sees `\n`.
fn normalize_newlines(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// Maps a banner name to its font file. Names must be plain identifiers, so
/// a name cannot escape the fonts directory.
fn resolve_banner_path(fonts_dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
    if !BANNER_NAME.is_match(name) {
        anyhow::bail!("invalid banner name: {name}");
    }
    Ok(fonts_dir.join(format!("{name}.txt")))
}

fn list_fonts(fonts_dir: &Path) -> anyhow::Result<()> {
    let mut names = Vec::new();
    for entry in fs::read_dir(fonts_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().to_string());
            }
        }
    }
    names.sort();
    for name in &names {
        println!("{name}");
    }
    Ok(())
}
