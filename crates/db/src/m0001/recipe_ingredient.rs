use sea_query::{
    ColumnDef, Expr, ExprTrait, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement,
    IndexDropStatement, Table, TableCreateStatement, TableDropStatement,
};

use crate::{
    operation,
    table::{Ingredient, Recipe, RecipeIngredient},
};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeIngredient::Table)
        .col(
            ColumnDef::new(RecipeIngredient::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(RecipeIngredient::RecipeId)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(RecipeIngredient::IngredientId)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(RecipeIngredient::Amount)
                .integer()
                .not_null()
                .check(Expr::col(RecipeIngredient::Amount).between(1, 32000)),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_ingredient_recipe")
                .from(RecipeIngredient::Table, RecipeIngredient::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_ingredient_ingredient")
                .from(RecipeIngredient::Table, RecipeIngredient::IngredientId)
                .to(Ingredient::Table, Ingredient::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipeIngredient::Table).to_owned()
}

operation!(CreateTable, create_table, drop_table);

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_recipe_ingredient")
        .table(RecipeIngredient::Table)
        .unique()
        .col(RecipeIngredient::RecipeId)
        .col(RecipeIngredient::IngredientId)
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_recipe_ingredient")
        .table(RecipeIngredient::Table)
        .to_owned()
}

operation!(CreateUk1, create_uk_1, drop_uk_1);
