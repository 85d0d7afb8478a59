use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::{
    operation,
    table::{User, UserLogin},
};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(UserLogin::Table)
        .col(
            ColumnDef::new(UserLogin::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(UserLogin::UserId).integer().not_null())
        .col(
            ColumnDef::new(UserLogin::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_user_login_user")
                .from(UserLogin::Table, UserLogin::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(UserLogin::Table).to_owned()
}

operation!(CreateTable, create_table, drop_table);

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_user_login_user_id")
        .table(UserLogin::Table)
        .col(UserLogin::UserId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_user_login_user_id")
        .table(UserLogin::Table)
        .to_owned()
}

operation!(CreateIdx1, create_idx_1, drop_idx_1);
