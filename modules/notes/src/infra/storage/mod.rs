pub mod migrations;
pub mod note;
pub mod revision;
pub mod sea_orm_repo;
