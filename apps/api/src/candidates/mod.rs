// CV ingestion and excerpt retrieval.
// Uploaded CVs are split into overlapping word windows and kept in an
// in-process index; matching retrieves excerpts and renders the
// multiple-professor prompt. No evaluator is called from here.

pub mod chunking;
pub mod context;
pub mod extract;
pub mod handlers;
pub mod index;
pub mod ingest;
pub mod retrieval;
