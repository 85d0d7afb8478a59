use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::{
    operation,
    table::{Recipe, RecipeTag, Tag},
};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeTag::Table)
        .col(ColumnDef::new(RecipeTag::RecipeId).integer().not_null())
        .col(ColumnDef::new(RecipeTag::TagId).integer().not_null())
        .primary_key(
            Index::create()
                .col(RecipeTag::RecipeId)
                .col(RecipeTag::TagId),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_tag_recipe")
                .from(RecipeTag::Table, RecipeTag::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_tag_tag")
                .from(RecipeTag::Table, RecipeTag::TagId)
                .to(Tag::Table, Tag::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipeTag::Table).to_owned()
}

operation!(CreateTable, create_table, drop_table);

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_tag_tag_id")
        .table(RecipeTag::Table)
        .col(RecipeTag::TagId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_tag_tag_id")
        .table(RecipeTag::Table)
        .to_owned()
}

operation!(CreateIdx1, create_idx_1, drop_idx_1);
