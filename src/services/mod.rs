//! Business logic services
//!
//! Thin, storage-backed services shared by the HTTP handlers. Validation of
//! form input happens at the API layer; services enforce the data-model
//! invariants (unique emails, existing parent entries) and stamp timestamps.

mod account_service;
mod comment_service;
mod entry_service;

pub use account_service::AccountService;
pub use comment_service::CommentService;
pub use entry_service::EntryService;
