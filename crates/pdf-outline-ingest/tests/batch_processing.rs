//! Integration tests for [`BatchProcessor`].
//!
//! These tests use a text-based backend instead of MuPDF: each "PDF" holds
//! one `size|y0|text` line per box, with `---` separating pages. A file
//! containing `BROKEN` fails to open.

use std::cell::Cell;
use std::path::Path;

use pdf_outline_core::{BackendError, LayoutBackend, Outline, PageLayout, TextBox};
use pdf_outline_ingest::{BatchEvent, BatchProcessor, BatchSummary};
use pdf_outline_parsing::OutlineExtractor;

struct TextBackend;

impl LayoutBackend for TextBackend {
    fn extract_layout(
        &self,
        bytes: &[u8],
        max_pages: usize,
    ) -> Result<Vec<PageLayout>, BackendError> {
        let text =
            std::str::from_utf8(bytes).map_err(|e| BackendError::OpenError(e.to_string()))?;
        if text.contains("BROKEN") {
            return Err(BackendError::OpenError("no objects found".into()));
        }
        let mut pages = Vec::new();
        for (i, page) in text.split("---").take(max_pages).enumerate() {
            let mut boxes = Vec::new();
            for line in page.lines().filter(|l| !l.trim().is_empty()) {
                let mut parts = line.splitn(3, '|');
                let size = parts.next().unwrap_or("0").trim().parse().unwrap_or(0.0);
                let y0 = parts.next().unwrap_or("0").trim().parse().unwrap_or(0.0);
                let text = parts.next().unwrap_or("").trim();
                boxes.push(TextBox::new(text, size, y0));
            }
            pages.push(PageLayout {
                number: i + 1,
                boxes,
            });
        }
        Ok(pages)
    }
}

fn processor() -> BatchProcessor {
    BatchProcessor::new(Box::new(TextBackend), OutlineExtractor::new())
}

fn read_outline(path: &Path) -> Outline {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn writes_one_outline_per_pdf() -> anyhow::Result<()> {
    let input = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;
    let out_dir = output.path().join("nested").join("out");

    std::fs::write(
        input.path().join("alpha.pdf"),
        "20|700|Alpha Paper\n16|600|Introduction\n---\n14|500|Related Work\n",
    )?;
    std::fs::write(input.path().join("beta_notes.pdf"), "10|700|12\n")?;
    std::fs::write(input.path().join("ignored.txt"), "20|700|Nope\n")?;

    let mut events = Vec::new();
    let summary = processor().process_directory(
        input.path(),
        &out_dir,
        &mut |e| events.push(e),
        &|| false,
    )?;

    assert_eq!(
        summary,
        BatchSummary {
            processed: 2,
            failed: 0,
            cancelled: false,
        }
    );
    assert_eq!(
        events,
        vec![
            BatchEvent::Processed {
                pdf_name: "alpha.pdf".into(),
                json_name: "alpha_outline.json".into(),
                headings: 2,
            },
            BatchEvent::Processed {
                pdf_name: "beta_notes.pdf".into(),
                json_name: "beta_notes_outline.json".into(),
                headings: 0,
            },
        ]
    );

    let alpha = read_outline(&out_dir.join("alpha_outline.json"));
    assert_eq!(alpha.title, "Alpha Paper");
    assert_eq!(alpha.outline.len(), 2);
    assert_eq!(alpha.outline[1].text, "Related Work");
    assert_eq!(alpha.outline[1].page, 2);

    let beta = read_outline(&out_dir.join("beta_notes_outline.json"));
    assert_eq!(beta, Outline::empty("Beta Notes"));

    assert!(!out_dir.join("ignored_outline.json").exists());
    Ok(())
}

#[test]
fn broken_pdf_gets_empty_outline_named_after_file() -> anyhow::Result<()> {
    let input = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;
    std::fs::write(input.path().join("bad_scan.pdf"), "BROKEN")?;

    let mut events = Vec::new();
    let summary = processor().process_directory(
        input.path(),
        output.path(),
        &mut |e| events.push(e),
        &|| false,
    )?;

    assert_eq!(summary.processed, 1);
    assert_eq!(
        events,
        vec![
            BatchEvent::ExtractionFailed {
                pdf_name: "bad_scan.pdf".into(),
                error: "backend error: failed to open PDF: no objects found".into(),
            },
            BatchEvent::Processed {
                pdf_name: "bad_scan.pdf".into(),
                json_name: "bad_scan_outline.json".into(),
                headings: 0,
            },
        ]
    );
    let outline = read_outline(&output.path().join("bad_scan_outline.json"));
    assert_eq!(outline, Outline::empty("bad_scan.pdf"));
    Ok(())
}

#[test]
fn empty_or_missing_input_reports_no_pdfs() -> anyhow::Result<()> {
    let input = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;
    let out_dir = output.path().join("created");

    let mut events = Vec::new();
    let summary =
        processor().process_directory(input.path(), &out_dir, &mut |e| events.push(e), &|| false)?;
    assert_eq!(summary, BatchSummary::default());
    assert_eq!(events, vec![BatchEvent::NoPdfs]);
    assert!(out_dir.is_dir());

    let mut events = Vec::new();
    processor().process_directory(
        &input.path().join("missing"),
        &out_dir,
        &mut |e| events.push(e),
        &|| false,
    )?;
    assert_eq!(events, vec![BatchEvent::NoPdfs]);
    Ok(())
}

#[test]
fn cancellation_stops_between_files() -> anyhow::Result<()> {
    let input = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;
    for name in ["a.pdf", "b.pdf", "c.pdf"] {
        std::fs::write(input.path().join(name), "20|700|Some Title\n")?;
    }

    let polls = Cell::new(0);
    let summary = processor().process_directory(input.path(), output.path(), &mut |_| {}, &|| {
        polls.set(polls.get() + 1);
        polls.get() > 1
    })?;

    assert!(summary.cancelled);
    assert_eq!(summary.processed, 1);
    assert!(output.path().join("a_outline.json").exists());
    assert!(!output.path().join("b_outline.json").exists());
    Ok(())
}

#[test]
fn markdown_written_when_enabled() -> anyhow::Result<()> {
    let input = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;
    std::fs::write(
        input.path().join("guide.pdf"),
        "20|700|User Guide\n16|600|Setup\n---\n14|650|Configuration\n",
    )?;

    processor().with_markdown(true).process_directory(
        input.path(),
        output.path(),
        &mut |_| {},
        &|| false,
    )?;

    let md = std::fs::read_to_string(output.path().join("guide_outline.md"))?;
    assert_eq!(
        md,
        "# User Guide\n\n- Setup (Page 1)\n  - Configuration (Page 2)\n"
    );
    Ok(())
}
