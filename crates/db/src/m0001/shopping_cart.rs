use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::{
    operation,
    table::{ShoppingCart, Recipe, User},
};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ShoppingCart::Table)
        .col(
            ColumnDef::new(ShoppingCart::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(ShoppingCart::UserId).integer().not_null())
        .col(ColumnDef::new(ShoppingCart::RecipeId).integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_shopping_cart_user")
                .from(ShoppingCart::Table, ShoppingCart::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_shopping_cart_recipe")
                .from(ShoppingCart::Table, ShoppingCart::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ShoppingCart::Table).to_owned()
}

operation!(CreateTable, create_table, drop_table);

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_shopping_cart_user_recipe")
        .table(ShoppingCart::Table)
        .unique()
        .col(ShoppingCart::UserId)
        .col(ShoppingCart::RecipeId)
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_shopping_cart_user_recipe")
        .table(ShoppingCart::Table)
        .to_owned()
}

operation!(CreateUk1, create_uk_1, drop_uk_1);
