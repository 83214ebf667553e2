//! Uploaded file → plain text.
//!
//! The file kind comes from the name's extension. Plain text is decoded in
//! place; `.docx` and `.pdf` go through a backend on the blocking pool. Backends
//! sit behind two narrow traits so the join rules here can be tested without
//! real documents.

pub mod docx;
pub mod pdf;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub use docx::DocxBackend;
pub use pdf::PdfBackend;

// ────────────────────────────────────────────────────────────────────────────
// Kinds and errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// `.txt`, `.md` and anything unrecognized.
    PlainText,
    /// `.docx`
    WordDocument,
    /// `.pdf`
    Pdf,
}

impl FileKind {
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.ends_with(".docx") {
            FileKind::WordDocument
        } else if lower.ends_with(".pdf") {
            FileKind::Pdf
        } else {
            FileKind::PlainText
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::PlainText => "txt",
            FileKind::WordDocument => "docx",
            FileKind::Pdf => "pdf",
        }
    }
}

/// Failure inside a document backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("page {0} does not exist")]
    MissingPage(usize),

    #[error("parser aborted: {0}")]
    Aborted(String),

    #[error("parser did not finish within {0:?}")]
    TimedOut(Duration),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Error reading file. Save it as UTF-8 text or paste the contents instead.")]
    FileRead(#[from] std::str::Utf8Error),

    #[error("Could not read .{extension} file. Try copy-pasting the text instead.")]
    DocumentParse {
        extension: &'static str,
        #[source]
        source: BackendError,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Backend traits
// ────────────────────────────────────────────────────────────────────────────

/// Whole-document text extraction (`.docx`).
pub trait DocumentTextBackend: Send + Sync {
    fn extract_raw_text(&self, bytes: &[u8]) -> Result<String, BackendError>;
}

/// One positioned run of text on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    pub text: String,
}

/// An opened page-oriented document. Pages are numbered from 1.
pub trait PagedDocument {
    fn page_count(&self) -> usize;
    fn text_items(&self, page_number: usize) -> Result<Vec<TextItem>, BackendError>;
}

/// Page-oriented document loading (`.pdf`).
pub trait PagedDocumentBackend: Send + Sync {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PagedDocument>, BackendError>;
}

/// Walks pages first to last. Each item is followed by one space and each
/// page ends with a newline, so `["Jane", "Doe"]`, `["Engineer"]` becomes
/// `"Jane Doe \nEngineer \n"`.
pub fn join_pages(document: &dyn PagedDocument) -> Result<String, BackendError> {
    let mut text = String::new();
    for page_number in 1..=document.page_count() {
        for item in document.text_items(page_number)? {
            text.push_str(&item.text);
            text.push(' ');
        }
        text.push('\n');
    }
    Ok(text)
}

// ────────────────────────────────────────────────────────────────────────────
// Adapter
// ────────────────────────────────────────────────────────────────────────────

/// Default upper bound on one document parse.
pub const DEFAULT_PARSE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct TextExtractor {
    document: Arc<dyn DocumentTextBackend>,
    paged: Arc<dyn PagedDocumentBackend>,
    timeout: Duration,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(Arc::new(DocxBackend), Arc::new(PdfBackend))
    }
}

impl TextExtractor {
    pub fn new(
        document: Arc<dyn DocumentTextBackend>,
        paged: Arc<dyn PagedDocumentBackend>,
    ) -> Self {
        Self {
            document,
            paged,
            timeout: DEFAULT_PARSE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Produces the plain text of an uploaded file. Never touches the resume.
    pub async fn extract(&self, bytes: Bytes, kind: FileKind) -> Result<String, ExtractError> {
        debug!("Extracting {} bytes as {:?}", bytes.len(), kind);
        match kind {
            FileKind::PlainText => {
                let text = std::str::from_utf8(&bytes)?;
                Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
            }
            FileKind::WordDocument => {
                let backend = Arc::clone(&self.document);
                run_blocking(kind, self.timeout, move || backend.extract_raw_text(&bytes)).await
            }
            FileKind::Pdf => {
                let backend = Arc::clone(&self.paged);
                run_blocking(kind, self.timeout, move || {
                    let document = backend.open(&bytes)?;
                    join_pages(document.as_ref())
                })
                .await
            }
        }
    }
}

/// Parsers are CPU-bound and some of them panic or stall on hostile input, so
/// they run on the blocking pool under a deadline. A panic or a missed deadline
/// is reported like any other parse failure. A stalled parser thread is left to
/// finish on its own.
async fn run_blocking<F>(kind: FileKind, timeout: Duration, job: F) -> Result<String, ExtractError>
where
    F: FnOnce() -> Result<String, BackendError> + Send + 'static,
{
    let outcome = match tokio::time::timeout(timeout, tokio::task::spawn_blocking(job)).await {
        Ok(joined) => joined.unwrap_or_else(|e| Err(BackendError::Aborted(e.to_string()))),
        Err(_) => {
            warn!("Parsing .{} gave up after {:?}", kind.extension(), timeout);
            Err(BackendError::TimedOut(timeout))
        }
    };

    outcome.map_err(|source| ExtractError::DocumentParse {
        extension: kind.extension(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePages(Vec<Vec<&'static str>>);

    impl PagedDocument for FakePages {
        fn page_count(&self) -> usize {
            self.0.len()
        }

        fn text_items(&self, page_number: usize) -> Result<Vec<TextItem>, BackendError> {
            let page = self
                .0
                .get(page_number - 1)
                .ok_or(BackendError::MissingPage(page_number))?;
            Ok(page
                .iter()
                .map(|s| TextItem {
                    text: s.to_string(),
                })
                .collect())
        }
    }

    struct FakePdf(Vec<Vec<&'static str>>);

    impl PagedDocumentBackend for FakePdf {
        fn open(&self, _bytes: &[u8]) -> Result<Box<dyn PagedDocument>, BackendError> {
            Ok(Box::new(FakePages(self.0.clone())))
        }
    }

    struct BrokenPages;

    impl PagedDocument for BrokenPages {
        fn page_count(&self) -> usize {
            2
        }

        fn text_items(&self, page_number: usize) -> Result<Vec<TextItem>, BackendError> {
            if page_number == 2 {
                return Err(BackendError::Pdf("bad content stream".to_string()));
            }
            Ok(vec![TextItem {
                text: "ok".to_string(),
            }])
        }
    }

    struct BrokenPdf;

    impl PagedDocumentBackend for BrokenPdf {
        fn open(&self, _bytes: &[u8]) -> Result<Box<dyn PagedDocument>, BackendError> {
            Ok(Box::new(BrokenPages))
        }
    }

    struct PanickingDocx;

    impl DocumentTextBackend for PanickingDocx {
        fn extract_raw_text(&self, _bytes: &[u8]) -> Result<String, BackendError> {
            panic!("malformed input");
        }
    }

    struct StalledDocx;

    impl DocumentTextBackend for StalledDocx {
        fn extract_raw_text(&self, _bytes: &[u8]) -> Result<String, BackendError> {
            std::thread::sleep(Duration::from_millis(500));
            Ok("too late".to_string())
        }
    }

    fn with_pdf(pdf: impl PagedDocumentBackend + 'static) -> TextExtractor {
        TextExtractor::new(Arc::new(DocxBackend), Arc::new(pdf))
    }

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(FileKind::from_file_name("cv.docx"), FileKind::WordDocument);
        assert_eq!(FileKind::from_file_name("CV.PDF"), FileKind::Pdf);
        assert_eq!(FileKind::from_file_name("notes.md"), FileKind::PlainText);
        assert_eq!(FileKind::from_file_name("bio.txt"), FileKind::PlainText);
        assert_eq!(FileKind::from_file_name("data.csv"), FileKind::PlainText);
        assert_eq!(FileKind::from_file_name("README"), FileKind::PlainText);
        assert_eq!(FileKind::from_file_name("old.doc"), FileKind::PlainText);
    }

    #[test]
    fn test_join_pages_exact_whitespace() {
        let doc = FakePages(vec![vec!["Jane", "Doe"], vec!["Engineer"]]);
        assert_eq!(join_pages(&doc).unwrap(), "Jane Doe \nEngineer \n");
    }

    #[test]
    fn test_join_pages_empty_document() {
        let doc = FakePages(vec![]);
        assert_eq!(join_pages(&doc).unwrap(), "");
    }

    #[tokio::test]
    async fn test_plain_text_is_verbatim() {
        let extractor = TextExtractor::default();
        let text = extractor
            .extract(Bytes::from_static(b"  Jane\r\nDoe\t"), FileKind::PlainText)
            .await
            .unwrap();
        assert_eq!(text, "  Jane\r\nDoe\t");
    }

    #[tokio::test]
    async fn test_plain_text_leading_bom_is_dropped() {
        let extractor = TextExtractor::default();
        let text = extractor
            .extract(
                Bytes::from_static("\u{feff}Jane\n\u{feff}Doe".as_bytes()),
                FileKind::PlainText,
            )
            .await
            .unwrap();
        assert_eq!(text, "Jane\n\u{feff}Doe");
    }

    #[tokio::test]
    async fn test_stalled_parser_times_out() {
        let extractor = TextExtractor::new(Arc::new(StalledDocx), Arc::new(PdfBackend))
            .with_timeout(Duration::from_millis(20));
        let err = extractor
            .extract(Bytes::from_static(b"PK"), FileKind::WordDocument)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::DocumentParse {
                extension: "docx",
                source: BackendError::TimedOut(_),
            }
        ));
    }

    #[tokio::test]
    async fn test_plain_text_invalid_utf8_is_file_read_error() {
        let extractor = TextExtractor::default();
        let err = extractor
            .extract(Bytes::from_static(&[0xff, 0xfe, 0x00]), FileKind::PlainText)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::FileRead(_)));
    }

    #[tokio::test]
    async fn test_pdf_goes_through_paged_backend() {
        let extractor = with_pdf(FakePdf(vec![vec!["Jane", "Doe"], vec!["Engineer"]]));
        let text = extractor
            .extract(Bytes::from_static(b"%PDF-"), FileKind::Pdf)
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe \nEngineer \n");
    }

    #[tokio::test]
    async fn test_page_error_is_document_parse_error() {
        let extractor = with_pdf(BrokenPdf);
        let err = extractor
            .extract(Bytes::from_static(b"%PDF-"), FileKind::Pdf)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::DocumentParse {
                extension: "pdf",
                ..
            }
        ));
        assert!(err.to_string().contains("copy-pasting"));
    }

    #[tokio::test]
    async fn test_backend_panic_is_document_parse_error() {
        let extractor = TextExtractor::new(Arc::new(PanickingDocx), Arc::new(PdfBackend));
        let err = extractor
            .extract(Bytes::from_static(b"PK"), FileKind::WordDocument)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not read .docx file. Try copy-pasting the text instead."
        );
    }
}
