use crate::page_range;
use crate::pdf::trim::{trim_page, TrimRect};
use crate::pdf::PdfDocument;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    specifiers: &[String],
    trim: Option<&TrimRect>,
    output: Q,
) -> Result<()> {
    let doc = PdfDocument::open(&input)?;
    let total_pages = doc.page_count();

    // Resolution fails before the output document exists, so a bad specifier
    // never leaves a partial file behind.
    let indices = page_range::resolve(specifiers, total_pages)?;

    if indices.is_empty() {
        anyhow::bail!("No pages selected");
    }

    let mut new_doc = doc.extract_pages(&indices)?;

    if let Some(trim) = trim {
        // Kept pages are in ascending source order, so the new document's
        // pages line up with `indices`.
        let mut kept: Vec<_> = new_doc.get_pages().into_iter().collect();
        kept.sort_by_key(|(num, _)| *num);

        for (&index, (_, page_id)) in indices.iter().zip(kept) {
            trim_page(&mut new_doc, page_id, trim)
                .with_context(|| format!("Failed to trim page {}", index + 1))?;
        }
    }

    PdfDocument::save(&mut new_doc, &output)?;

    println!(
        "Extracted {} page(s) to {}",
        indices.len(),
        output.as_ref().display()
    );

    Ok(())
}
