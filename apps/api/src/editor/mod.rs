// Resume editor: positional CRUD over the document, one pure function per
// edit, plus the HTTP handlers that commit each result to the session.

pub mod handlers;
pub mod operations;
pub mod patch;
