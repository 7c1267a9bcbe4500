use std::io::Write;

use owo_colors::OwoColorize;
use pdf_outline_ingest::{BatchEvent, BatchSummary};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

pub fn print_start(w: &mut dyn Write, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", "Starting processing PDFs".bold())
    } else {
        writeln!(w, "Starting processing PDFs")
    }
}

/// Print a per-file batch event.
pub fn print_event(w: &mut dyn Write, event: &BatchEvent, color: ColorMode) -> std::io::Result<()> {
    match event {
        BatchEvent::NoPdfs => {
            if color.enabled() {
                writeln!(w, "{}", "No PDF files found in input directory".yellow())?;
            } else {
                writeln!(w, "No PDF files found in input directory")?;
            }
        }
        BatchEvent::Processed {
            pdf_name,
            json_name,
            headings,
        } => {
            if color.enabled() {
                writeln!(
                    w,
                    "Processed {} -> {} {}",
                    pdf_name,
                    json_name.green(),
                    format!("({} headings)", headings).dimmed()
                )?;
            } else {
                writeln!(w, "Processed {} -> {}", pdf_name, json_name)?;
            }
        }
        BatchEvent::ExtractionFailed { pdf_name, error }
        | BatchEvent::Failed { pdf_name, error } => {
            if color.enabled() {
                writeln!(
                    w,
                    "{} {}: {}",
                    "Error processing".red(),
                    pdf_name,
                    error
                )?;
            } else {
                writeln!(w, "Error processing {}: {}", pdf_name, error)?;
            }
        }
    }
    Ok(())
}

/// Print the closing line of a batch run.
pub fn print_summary(
    w: &mut dyn Write,
    summary: &BatchSummary,
    color: ColorMode,
) -> std::io::Result<()> {
    if summary.cancelled {
        let msg = format!(
            "Cancelled after {} PDFs ({} failed)",
            summary.processed + summary.failed,
            summary.failed
        );
        if color.enabled() {
            writeln!(w, "{}", msg.yellow())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
        return Ok(());
    }
    if color.enabled() {
        writeln!(w, "{}", "Completed processing PDFs".bold())
    } else {
        writeln!(w, "Completed processing PDFs")
    }
}
