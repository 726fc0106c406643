use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Link::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Link::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Link::Url).text().not_null())
                    .col(ColumnDef::new(Link::Hash).string().not_null())
                    .col(
                        ColumnDef::new(Link::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Link::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup path: resolution queries by hash on every request.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_hash")
                    .table(Link::Table)
                    .col(Link::Hash)
                    .to_owned(),
            )
            .await?;

        // Creation path: the pre-insert existence check counts by url.
        // Deliberately NOT unique: duplicate detection stays at the
        // application level, see the creator's documented race.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_url")
                    .table(Link::Table)
                    .col(Link::Url)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_links_url").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_links_hash").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Link::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Link {
    #[sea_orm(iden = "links")]
    Table,
    Id,
    Url,
    Hash,
    CreatedAt,
    Views,
}
