pub mod error;
pub mod repo;
pub mod service;

pub use error::DomainError;
pub use repo::{AppendOutcome, NotesRepository};
pub use service::Service;
