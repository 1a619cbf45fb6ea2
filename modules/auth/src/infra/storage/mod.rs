pub mod migrations;
pub mod sea_orm_repo;
pub mod user;
