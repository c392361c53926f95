//! Full-document PDF parsing
//!
//! The page-count resolver treats the parser as a black box: bytes in,
//! total page count out, or an error if the document is malformed.

use crate::document::{DocumentError, Result};

/// Authoritative page counter over a complete document
pub trait FullDocumentParser: Send + Sync {
    /// Parse the whole document and return its total page count
    fn page_count(&self, data: &[u8]) -> Result<u32>;
}

/// [`FullDocumentParser`] backed by lopdf
///
/// Walks the page tree from the document catalog, so it copes with
/// incremental updates and compressed object streams that defeat the
/// trailer heuristic.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfParser;

impl FullDocumentParser for LopdfParser {
    fn page_count(&self, data: &[u8]) -> Result<u32> {
        let document = lopdf::Document::load_mem(data)?;
        let pages = document.get_pages().len();

        if pages == 0 {
            return Err(DocumentError::Parse("document has no pages".to_string()));
        }

        u32::try_from(pages)
            .map_err(|_| DocumentError::Parse(format!("page count {} out of range", pages)))
    }
}

/// PDF builders shared by unit and integration tests
#[doc(hidden)]
pub mod fixtures {
    use lopdf::{dictionary, Document, Object};

    /// Build a minimal, valid PDF with `pages` empty pages
    pub fn build_pdf(pages: usize) -> std::io::Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = (0..pages)
            .map(|_| {
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                })
                .into()
            })
            .collect();

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::build_pdf;
    use super::*;

    #[test]
    fn test_counts_pages() {
        let parser = LopdfParser;
        assert_eq!(parser.page_count(&build_pdf(1).unwrap()).unwrap(), 1);
        assert_eq!(parser.page_count(&build_pdf(9).unwrap()).unwrap(), 9);
    }

    #[test]
    fn test_rejects_garbage() {
        let parser = LopdfParser;
        let result = parser.page_count(b"this is not a pdf");
        assert!(matches!(result, Err(DocumentError::Parse(_))));
    }

    #[test]
    fn test_rejects_empty_input() {
        let parser = LopdfParser;
        assert!(parser.page_count(&[]).is_err());
    }
}
