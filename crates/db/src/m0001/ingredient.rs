use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::{operation, table::Ingredient};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Ingredient::Table)
        .col(
            ColumnDef::new(Ingredient::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Ingredient::Name)
                .string()
                .not_null()
                .string_len(200),
        )
        .col(
            ColumnDef::new(Ingredient::MeasurementUnit)
                .string()
                .not_null()
                .string_len(200),
        )
        .col(
            ColumnDef::new(Ingredient::SearchName)
                .string()
                .not_null()
                .string_len(200),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Ingredient::Table).to_owned()
}

operation!(CreateTable, create_table, drop_table);

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_ingredient_name_unit")
        .table(Ingredient::Table)
        .unique()
        .col(Ingredient::Name)
        .col(Ingredient::MeasurementUnit)
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_ingredient_name_unit")
        .table(Ingredient::Table)
        .to_owned()
}

operation!(CreateUk1, create_uk_1, drop_uk_1);

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_ingredient_search_name")
        .table(Ingredient::Table)
        .col(Ingredient::SearchName)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_ingredient_search_name")
        .table(Ingredient::Table)
        .to_owned()
}

operation!(CreateIdx1, create_idx_1, drop_idx_1);
