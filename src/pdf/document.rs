use anyhow::{Context, Result};
use lopdf::{Document, ObjectId};
use std::path::Path;

pub struct PdfDocument {
    pub doc: Document,
    #[allow(dead_code)]
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let doc =
            Document::load(&path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        Ok(PdfDocument {
            doc,
            path: path_str,
        })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Extract the pages at the given zero-based indices into a new document.
    /// Pages keep their document order, which matches the ascending order the
    /// resolver produces.
    pub fn extract_pages(&self, indices: &[usize]) -> Result<Document> {
        let mut new_doc = self.doc.clone();
        let all_pages = self.page_ids();
        let total = all_pages.len();

        for &index in indices {
            if index >= total {
                anyhow::bail!(
                    "Page index {} is out of range (document has {} pages)",
                    index,
                    total
                );
            }
        }

        let keep: Vec<u32> = indices.iter().map(|&index| (index + 1) as u32).collect();

        // Delete everything not selected rather than rebuilding the page tree.
        let pages_to_delete: Vec<u32> = all_pages
            .iter()
            .map(|(num, _)| *num)
            .filter(|num| !keep.contains(num))
            .collect();

        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }

        Ok(new_doc)
    }

    /// Save to a file
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        doc.save(&path)
            .with_context(|| format!("Failed to save PDF: {}", path.as_ref().display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testutil::sample_document;

    #[test]
    fn test_page_count() {
        let doc = PdfDocument {
            doc: sample_document(4),
            path: "sample.pdf".to_string(),
        };
        assert_eq!(doc.page_count(), 4);
    }

    #[test]
    fn test_extract_pages_keeps_selection_in_order() {
        let doc = PdfDocument {
            doc: sample_document(5),
            path: "sample.pdf".to_string(),
        };
        let extracted = doc.extract_pages(&[1, 2, 4]).unwrap();
        assert_eq!(extracted.get_pages().len(), 3);
    }

    #[test]
    fn test_extract_pages_rejects_out_of_range_index() {
        let doc = PdfDocument {
            doc: sample_document(2),
            path: "sample.pdf".to_string(),
        };
        assert!(doc.extract_pages(&[2]).is_err());
    }
}
