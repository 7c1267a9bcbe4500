use pdf_outline_core::Outline;

/// Render the headings as a nested Markdown bullet list.
///
/// Each level indents by two spaces: `"  - Methods (Page 2)"` for an H2.
pub fn render_markdown(outline: &Outline) -> String {
    outline
        .outline
        .iter()
        .map(|entry| {
            format!(
                "{}- {} (Page {})",
                "  ".repeat(entry.level.depth() - 1),
                entry.text,
                entry.page
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
