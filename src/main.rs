use clap::Parser;
use permit_pdf::{DocumentRecord, PermitError, PermitRenderer, RenderOptions};
use std::path::PathBuf;
use std::process::ExitCode;

/// Render a permit record (JSON) to PDF
#[derive(Parser, Debug)]
#[command(name = "permit-pdf", version, about)]
struct Args {
    /// The permit record, as JSON
    input: PathBuf,

    /// Where to write the PDF; defaults to the input path with a .pdf extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Always mark the document as a draft
    #[arg(long, conflicts_with = "final_copy")]
    draft: bool,

    /// Never mark the document as a draft, whatever its status
    #[arg(long = "final")]
    final_copy: bool,

    /// Issuing authority shown at the top of the header
    #[arg(long)]
    jurisdiction: Option<String>,

    /// PNG or JPEG logo for the header
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Leave page content streams uncompressed
    #[arg(long)]
    no_compress: bool,
}

fn run(args: Args) -> Result<(), PermitError> {
    let record = DocumentRecord::from_json(&std::fs::read_to_string(&args.input)?)?;

    let mut options = RenderOptions::default();
    options.compress(!args.no_compress);
    if args.draft {
        options.draft(true);
    } else if args.final_copy {
        options.draft(false);
    }
    if let Some(jurisdiction) = &args.jurisdiction {
        options.jurisdiction(jurisdiction);
    }
    if let Some(logo) = &args.logo {
        options.logo(std::fs::read(logo)?);
    }

    let rendered = PermitRenderer::new(options)?.render(&record)?;
    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("pdf"));
    std::fs::write(&output, &rendered.bytes)?;
    eprintln!(
        "wrote {} page(s), {} bytes, {} warning(s) to {}",
        rendered.page_count,
        rendered.bytes.len(),
        rendered.warnings.len(),
        output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("permit-pdf: {e}");
            ExitCode::FAILURE
        }
    }
}
