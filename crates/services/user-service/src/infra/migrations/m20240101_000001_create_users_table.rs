//! Migration: Create users table.

use sea_orm_migration::prelude::*;

use domain::{MAX_FULL_NAME_LENGTH, MAX_PHONE_NO_LENGTH};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::PhoneNo)
                            .string_len(MAX_PHONE_NO_LENGTH as u32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::FullName)
                            .string_len(MAX_FULL_NAME_LENGTH as u32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).binary().not_null())
                    .col(
                        ColumnDef::new(Users::SuccessfulLoginCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    PhoneNo,
    FullName,
    PasswordHash,
    SuccessfulLoginCount,
}
