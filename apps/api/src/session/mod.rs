//! The single editing session: current resume, source text box, pending
//! flags and the one user-visible error line.
//!
//! Async work follows a begin/finish pair. `begin_*` checks the pending flags
//! and raises one; `finish_*` always lowers it again and records the outcome.
//! A failure leaves the document and the source text exactly as they were.

pub mod handlers;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::ResumeDocument;

#[derive(Debug)]
pub struct Session {
    document: ResumeDocument,
    input: String,
    is_generating: bool,
    is_reading_file: bool,
    error: Option<String>,
    revision: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub revision: u64,
    pub input: String,
    pub is_generating: bool,
    pub is_reading_file: bool,
    pub error: Option<String>,
    pub document: ResumeDocument,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ResumeDocument::seed())
    }
}

impl Session {
    pub fn new(document: ResumeDocument) -> Self {
        Self {
            document,
            input: String::new(),
            is_generating: false,
            is_reading_file: false,
            error: None,
            revision: 0,
        }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Installs the next document snapshot. The revision only moves when the
    /// content actually changed.
    pub fn commit(&mut self, next: ResumeDocument) {
        if next != self.document {
            self.document = next;
            self.revision += 1;
        }
    }

    pub fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub fn reset(&mut self) {
        self.commit(ResumeDocument::seed());
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            revision: self.revision,
            input: self.input.clone(),
            is_generating: self.is_generating,
            is_reading_file: self.is_reading_file,
            error: self.error.clone(),
            document: self.document.clone(),
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Generation
    // ────────────────────────────────────────────────────────────────────────

    /// Returns the source text to send. Blank input is refused here so the
    /// pipeline is never called without text.
    pub fn begin_generation(&mut self) -> Result<String, AppError> {
        if self.input.trim().is_empty() {
            return Err(AppError::Validation(
                "Paste some text or upload a document before generating.".to_string(),
            ));
        }
        if self.is_generating {
            return Err(AppError::Conflict(
                "A resume is already being generated.".to_string(),
            ));
        }
        if self.is_reading_file {
            return Err(AppError::Conflict(
                "Wait for the file to finish reading.".to_string(),
            ));
        }
        self.is_generating = true;
        self.error = None;
        Ok(self.input.clone())
    }

    /// A generated document replaces the current one wholesale.
    pub fn finish_generation(
        &mut self,
        result: Result<ResumeDocument, AppError>,
    ) -> Result<(), AppError> {
        match result {
            Ok(document) => {
                self.is_generating = false;
                self.commit(document);
                Ok(())
            }
            Err(e) => Err(self.fail_generation(e)),
        }
    }

    pub fn fail_generation(&mut self, error: AppError) -> AppError {
        self.is_generating = false;
        self.record(error)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Upload
    // ────────────────────────────────────────────────────────────────────────

    pub fn begin_upload(&mut self) -> Result<(), AppError> {
        if self.is_reading_file {
            return Err(AppError::Conflict(
                "A file is already being read.".to_string(),
            ));
        }
        self.is_reading_file = true;
        self.error = None;
        Ok(())
    }

    /// Extracted text replaces the source text box.
    pub fn finish_upload(&mut self, result: Result<String, AppError>) -> Result<(), AppError> {
        match result {
            Ok(text) => {
                self.is_reading_file = false;
                self.input = text;
                Ok(())
            }
            Err(e) => Err(self.fail_upload(e)),
        }
    }

    pub fn fail_upload(&mut self, error: AppError) -> AppError {
        self.is_reading_file = false;
        self.record(error)
    }

    fn record(&mut self, error: AppError) -> AppError {
        self.error = Some(error.user_message());
        error
    }
}
