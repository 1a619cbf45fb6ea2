use crate::contract::error::NotesError;
use crate::domain::error::DomainError;

/// Map internal domain errors onto the stable contract error type.
///
/// Storage integrity problems and database failures collapse into
/// `Internal`; the detail stays in logs, not in the contract.
pub fn to_contract_error(e: DomainError) -> NotesError {
    match e {
        DomainError::NoteNotFound { id } => NotesError::not_found(id),
        DomainError::NotOwner { id } => NotesError::forbidden(id),
        DomainError::StaleRevision {
            current_id,
            current_number,
        } => NotesError::conflict(current_id, current_number),
        DomainError::EmptyTitle => NotesError::validation("title cannot be empty"),
        DomainError::TitleTooLong { len, max } => NotesError::validation(format!(
            "title too long: {len} characters (max {max})"
        )),
        DomainError::MissingRevision { .. } | DomainError::Database { .. } => {
            NotesError::internal()
        }
    }
}
