use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement,
    IndexDropStatement, Table, TableCreateStatement, TableDropStatement,
};

use crate::{
    operation,
    table::{Subscription, User},
};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Subscription::Table)
        .col(
            ColumnDef::new(Subscription::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Subscription::UserId).integer().not_null())
        .col(ColumnDef::new(Subscription::AuthorId).integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_subscription_user")
                .from(Subscription::Table, Subscription::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_subscription_author")
                .from(Subscription::Table, Subscription::AuthorId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Subscription::Table).to_owned()
}

operation!(CreateTable, create_table, drop_table);

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_subscription_user_author")
        .table(Subscription::Table)
        .unique()
        .col(Subscription::UserId)
        .col(Subscription::AuthorId)
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_subscription_user_author")
        .table(Subscription::Table)
        .to_owned()
}

operation!(CreateUk1, create_uk_1, drop_uk_1);

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_subscription_author_id")
        .table(Subscription::Table)
        .col(Subscription::AuthorId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_subscription_author_id")
        .table(Subscription::Table)
        .to_owned()
}

operation!(CreateIdx1, create_idx_1, drop_idx_1);
