use clap::Parser;
use folio::{PipelineBuilder, PipelineError, StatementConfig};
use std::env;
use std::process::ExitCode;

/// Render the statement to HTML and, optionally, PDF.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Also produce the PDF artifact (stylesheets are inlined into the HTML)
    #[arg(long, default_value_t = false)]
    pdf: bool,
}

fn main() -> ExitCode {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "folio=info");
        }
    }
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), PipelineError> {
    let config = StatementConfig::from_env()?;
    let report = PipelineBuilder::new()
        .with_config(config)
        .with_pdf(args.pdf)
        .build()
        .run()?;

    println!("✓ HTML written to {}", report.html_path.display());
    if let Some(pdf) = &report.pdf_path {
        println!("✓ PDF written to {}", pdf.display());
    }
    if let Ok(summary) = serde_json::to_string_pretty(&report) {
        log::debug!("Run report: {}", summary);
    }
    Ok(())
}
