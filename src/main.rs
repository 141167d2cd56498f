use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use pagetable_pdf::input::TableFile;
use pagetable_pdf::{Document, PageSize, PdfDocument, ProbeOptions};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PageFormat {
    A4,
    Letter,
}

impl From<PageFormat> for PageSize {
    fn from(format: PageFormat) -> Self {
        match format {
            PageFormat::A4 => PageSize::A4,
            PageFormat::Letter => PageSize::LETTER,
        }
    }
}

#[derive(Parser)]
#[command(name = "pagetable-pdf")]
#[command(version)]
#[command(about = "Render a JSON table description to a paginated PDF", long_about = None)]
struct Cli {
    /// Input JSON table description
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output PDF (defaults to the input path with a .pdf extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Probe page capacities and draw the table one page at a time
    #[arg(long)]
    by_page: bool,

    /// Print the computed page delimits and capacities as JSON
    #[arg(long)]
    print_delimits: bool,

    #[arg(long, value_enum, default_value = "a4")]
    page_size: PageFormat,
}

fn run(cli: Cli) -> pagetable_pdf::Result<()> {
    let page_size = PageSize::from(cli.page_size);
    let decorated = TableFile::from_path(&cli.input)?.into_decorated()?;
    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("pdf"));

    let mut doc = PdfDocument::new(page_size);
    if cli.by_page || cli.print_delimits {
        let mut session = pagetable_pdf::draw_by_page(
            decorated,
            || PdfDocument::new(page_size),
            &ProbeOptions::default(),
        )?;
        if cli.print_delimits {
            let report = serde_json::json!({
                "pages": session.delimits(),
                "capacities": session.capacities(),
                "probed": session.appearance_capacities(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        if !cli.by_page {
            return Ok(());
        }
        let mut first = true;
        while session.has_more() {
            if !first {
                doc.add_page();
            }
            session.draw_next_page(&mut doc)?;
            first = false;
        }
    } else {
        pagetable_pdf::auto_table_with_text_decorators(&mut doc, decorated)?;
    }

    let pages = doc.page_count();
    doc.write_to(&output)?;
    log::info!("Wrote {} ({} pages)", output.display(), pages);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
