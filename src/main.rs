//! xatena CLI - Hatena diary notation to HTML

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;
use xatena::{Converter, Options};

#[derive(Parser)]
#[command(name = "xatena")]
#[command(version)]
#[command(about = "Convert Hatena diary notation to HTML", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided or `-`)
    input: Option<PathBuf>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emulate hatena.ne.jp output (one paragraph per line, bare headings)
    #[arg(long)]
    hatena_compatible: bool,

    /// Append the footnote block after the document
    #[arg(long)]
    footnotes: bool,
}

fn main() -> xatena::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let input = match cli.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut converter = Converter::with_options(Options {
        hatena_compatible: cli.hatena_compatible,
        footnote_section: cli.footnotes,
    });
    let html = converter.to_html(&input);
    info!(
        "converted {} bytes, {} footnotes",
        input.len(),
        converter.footnotes().len()
    );

    match cli.output {
        Some(path) => fs::write(path, html)?,
        None => io::stdout().write_all(html.as_bytes())?,
    }
    Ok(())
}
