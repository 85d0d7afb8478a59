mod favorite;
mod ingredient;
mod recipe;
mod recipe_ingredient;
mod recipe_tag;
mod shopping_cart;
mod subscription;
mod tag;
mod user;
mod user_login;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "foodgram",
    "m0001",
    vec_box![],
    vec_box![
        user::CreateTable,
        user::CreateUk1,
        user::CreateUk2,
        user_login::CreateTable,
        user_login::CreateIdx1,
        subscription::CreateTable,
        subscription::CreateUk1,
        subscription::CreateIdx1,
        tag::CreateTable,
        tag::CreateUk1,
        tag::CreateUk2,
        tag::CreateUk3,
        ingredient::CreateTable,
        ingredient::CreateUk1,
        ingredient::CreateIdx1,
        recipe::CreateTable,
        recipe::CreateIdx1,
        recipe::CreateIdx2,
        recipe_tag::CreateTable,
        recipe_tag::CreateIdx1,
        recipe_ingredient::CreateTable,
        recipe_ingredient::CreateUk1,
        favorite::CreateTable,
        favorite::CreateUk1,
        shopping_cart::CreateTable,
        shopping_cart::CreateUk1
    ]
);
