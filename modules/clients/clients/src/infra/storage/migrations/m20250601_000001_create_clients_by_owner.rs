use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClientsByOwner::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ClientsByOwner::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(ClientsByOwner::Id).uuid().not_null())
                    .col(ColumnDef::new(ClientsByOwner::ClientType).string().not_null())
                    .col(ColumnDef::new(ClientsByOwner::Name).string().not_null())
                    .col(ColumnDef::new(ClientsByOwner::Description).text().null())
                    .col(ColumnDef::new(ClientsByOwner::AccessKey).string().not_null())
                    .col(ColumnDef::new(ClientsByOwner::Meta).json().not_null())
                    .primary_key(
                        Index::create()
                            .col(ClientsByOwner::OwnerId)
                            .col(ClientsByOwner::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Ids are globally unique, not just per owner.
        manager
            .create_index(
                Index::create()
                    .name("ux_clients_by_owner_id")
                    .table(ClientsByOwner::Table)
                    .col(ClientsByOwner::Id)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClientsByOwner::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ClientsByOwner {
    Table,
    OwnerId,
    Id,
    #[sea_orm(iden = "type")]
    ClientType,
    Name,
    Description,
    AccessKey,
    Meta,
}
