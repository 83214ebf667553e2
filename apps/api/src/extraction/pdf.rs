use crate::extraction::{BackendError, PagedDocument, PagedDocumentBackend, TextItem};

/// `.pdf` pages through `pdf-extract`. Each non-blank line of a page's text is
/// one text item.
pub struct PdfBackend;

struct PdfPages {
    pages: Vec<String>,
}

impl PagedDocumentBackend for PdfBackend {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PagedDocument>, BackendError> {
        if !bytes.starts_with(b"%PDF-") {
            return Err(BackendError::Pdf("missing %PDF- header".to_string()));
        }
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| BackendError::Pdf(e.to_string()))?;
        Ok(Box::new(PdfPages { pages }))
    }
}

impl PagedDocument for PdfPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn text_items(&self, page_number: usize) -> Result<Vec<TextItem>, BackendError> {
        let page = page_number
            .checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .ok_or(BackendError::MissingPage(page_number))?;

        Ok(page
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| TextItem {
                text: line.to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let err = PdfBackend.open(b"PK\x03\x04").err().unwrap();
        assert!(matches!(err, BackendError::Pdf(_)));
    }

    #[test]
    fn test_page_lines_become_items() {
        let doc = PdfPages {
            pages: vec!["  Jane Doe \n\nEngineer\n".to_string(), String::new()],
        };
        assert_eq!(doc.page_count(), 2);
        let items: Vec<String> = doc
            .text_items(1)
            .unwrap()
            .into_iter()
            .map(|i| i.text)
            .collect();
        assert_eq!(items, vec!["Jane Doe", "Engineer"]);
        assert!(doc.text_items(2).unwrap().is_empty());
        assert!(matches!(doc.text_items(0), Err(BackendError::MissingPage(0))));
        assert!(matches!(doc.text_items(3), Err(BackendError::MissingPage(3))));
    }
}
