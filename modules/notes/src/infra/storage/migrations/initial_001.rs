use sea_orm_migration::prelude::*;

pub struct Migration;

// Auth and notes migrators share one database (and one `seaql_migrations`
// table), so migration names must be unique across modules; the derived
// module-path name collides with auth's `initial_001`.
impl MigrationName for Migration {
    fn name(&self) -> &str {
        "notes_initial_001"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Notes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Notes::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Notes::Title).string().not_null())
                    .col(
                        ColumnDef::new(Notes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notes_owner_id")
                    .table(Notes::Table)
                    .col(Notes::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NoteRevisions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NoteRevisions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NoteRevisions::NoteId).uuid().not_null())
                    .col(
                        ColumnDef::new(NoteRevisions::RevisionNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NoteRevisions::Content).text())
                    .col(
                        ColumnDef::new(NoteRevisions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_note_revisions_note_id")
                            .from(NoteRevisions::Table, NoteRevisions::NoteId)
                            .to(Notes::Table, Notes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One revision number per note; concurrent appends of the same number
        // are decided here.
        manager
            .create_index(
                Index::create()
                    .name("uq_note_revisions_note_id_revision_number")
                    .table(NoteRevisions::Table)
                    .col(NoteRevisions::NoteId)
                    .col(NoteRevisions::RevisionNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NoteRevisions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Notes {
    Table,
    Id,
    OwnerId,
    Title,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum NoteRevisions {
    Table,
    Id,
    NoteId,
    RevisionNumber,
    Content,
    CreatedAt,
}
