use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, LevelFilter};
use miette::IntoDiagnostic;

use markdownify::{MarkdownifyService, Options};

#[derive(Parser, Debug)]
#[command(name = "markdownify")]
#[command(version, about = "Convert HTML to Markdown")]
struct Args {
    /// The HTML file to convert
    file: PathBuf,

    /// Only convert the contents of elements matched by the CSS3 selector
    #[arg(short, long, default_value = "body")]
    selector: String,

    /// Move URLs to the bottom of the output
    #[arg(short = 'l', long)]
    move_links: bool,

    /// Log conversion details to stderr (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let html = markdownify::read_file(&args.file).into_diagnostic()?;
    debug!("read {} bytes from {}", html.len(), args.file.display());

    let options = if args.move_links {
        Options::move_links()
    } else {
        Options::default()
    };
    let mut service = MarkdownifyService::with_options(options);
    let converted = service
        .convert_document(&html, &args.selector)
        .into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    for markdown in converted {
        writeln!(writer, "{markdown}").into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    Ok(())
}
