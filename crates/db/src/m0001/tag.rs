use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::{operation, table::Tag};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Tag::Table)
        .col(
            ColumnDef::new(Tag::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Tag::Name)
                .string()
                .not_null()
                .string_len(200),
        )
        .col(ColumnDef::new(Tag::Color).string().not_null().string_len(7))
        .col(
            ColumnDef::new(Tag::Slug)
                .string()
                .not_null()
                .string_len(200),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Tag::Table).to_owned()
}

operation!(CreateTable, create_table, drop_table);

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_tag_name")
        .table(Tag::Table)
        .unique()
        .col(Tag::Name)
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop().name("uk_tag_name").table(Tag::Table).to_owned()
}

operation!(CreateUk1, create_uk_1, drop_uk_1);

fn create_uk_2() -> IndexCreateStatement {
    Index::create()
        .name("uk_tag_color")
        .table(Tag::Table)
        .unique()
        .col(Tag::Color)
        .to_owned()
}

fn drop_uk_2() -> IndexDropStatement {
    Index::drop().name("uk_tag_color").table(Tag::Table).to_owned()
}

operation!(CreateUk2, create_uk_2, drop_uk_2);

fn create_uk_3() -> IndexCreateStatement {
    Index::create()
        .name("uk_tag_slug")
        .table(Tag::Table)
        .unique()
        .col(Tag::Slug)
        .to_owned()
}

fn drop_uk_3() -> IndexDropStatement {
    Index::drop().name("uk_tag_slug").table(Tag::Table).to_owned()
}

operation!(CreateUk3, create_uk_3, drop_uk_3);
