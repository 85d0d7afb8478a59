use foodgram_recipe::RecipesQuery;
use foodgram_shared::Error;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn favorite_add_and_remove() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let (tags, ingredients) = helpers::seed(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let cmd = foodgram_recipe::Command(state.clone());

    let id = cmd
        .create(
            &john,
            helpers::create_input("pancakes", vec![tags[0]], vec![(ingredients[0], 200)]),
        )
        .await?;

    let summary = cmd.add_favorite(&john, id).await?;
    assert_eq!(summary.id, id);
    assert_eq!(summary.name, "pancakes");
    assert_eq!(summary.cooking_time, 15);

    let err = cmd.add_favorite(&john, id).await.unwrap_err();
    assert_eq!(err.to_string(), "Recipe already added");

    let recipe = helpers::query(&state)
        .find_recipe(id, Some(john.id))
        .await?
        .unwrap();
    assert!(recipe.is_favorited);
    assert!(!recipe.is_in_shopping_cart);

    cmd.remove_favorite(&john, id).await?;

    let err = cmd.remove_favorite(&john, id).await.unwrap_err();
    assert_eq!(err.to_string(), "Recipe is not in the list");

    Ok(())
}

#[tokio::test]
async fn cart_is_independent_from_favorites() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let (tags, ingredients) = helpers::seed(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let albert = helpers::create_user(&state, "albert").await?;
    let cmd = foodgram_recipe::Command(state.clone());

    let id = cmd
        .create(
            &john,
            helpers::create_input("pancakes", vec![tags[0]], vec![(ingredients[0], 200)]),
        )
        .await?;

    cmd.add_to_cart(&albert, id).await?;
    cmd.add_favorite(&albert, id).await?;
    cmd.remove_from_cart(&albert, id).await?;

    let query = helpers::query(&state);
    let recipe = query.find_recipe(id, Some(albert.id)).await?.unwrap();
    assert!(recipe.is_favorited);
    assert!(!recipe.is_in_shopping_cart);

    let recipe = query.find_recipe(id, Some(john.id)).await?.unwrap();
    assert!(!recipe.is_favorited);

    let err = cmd.remove_from_cart(&albert, id).await.unwrap_err();
    assert_eq!(err.to_string(), "Recipe is not in the list");

    Ok(())
}

#[tokio::test]
async fn deleted_recipe_leaves_other_users_lists() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let (tags, ingredients) = helpers::seed(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let albert = helpers::create_user(&state, "albert").await?;
    let cmd = foodgram_recipe::Command(state.clone());

    let pancakes = cmd
        .create(
            &john,
            helpers::create_input("pancakes", vec![tags[0]], vec![(ingredients[0], 200)]),
        )
        .await?;
    let soup = cmd
        .create(
            &john,
            helpers::create_input("soup", vec![tags[1]], vec![(ingredients[1], 300)]),
        )
        .await?;

    cmd.add_favorite(&albert, pancakes).await?;
    cmd.add_to_cart(&albert, pancakes).await?;
    cmd.add_to_cart(&albert, soup).await?;

    cmd.delete(&john, pancakes).await?;

    let query = helpers::query(&state);
    let favorites = query
        .filter_recipes(RecipesQuery {
            is_favorited: true,
            viewer: Some(albert.id),
            ..Default::default()
        })
        .await?;
    assert_eq!(favorites.count, 0);

    let cart = query
        .filter_recipes(RecipesQuery {
            is_in_shopping_cart: true,
            viewer: Some(albert.id),
            ..Default::default()
        })
        .await?;
    assert_eq!(cart.count, 1);
    assert_eq!(cart.results[0].id, soup);

    for table in ["favorite", "shopping_cart", "recipe_tag", "recipe_ingredient"] {
        let (rows,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM {table} WHERE recipe_id = ?1"))
                .bind(pancakes)
                .fetch_one(&state.read_db)
                .await?;
        assert_eq!(rows, 0, "{table} still references the recipe");
    }

    assert!(matches!(
        cmd.add_favorite(&albert, pancakes).await,
        Err(Error::NotFound(_))
    ));

    Ok(())
}

#[tokio::test]
async fn missing_recipe_is_not_found() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let cmd = foodgram_recipe::Command(state.clone());

    assert!(matches!(
        cmd.add_favorite(&john, 42).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        cmd.add_to_cart(&john, 42).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        cmd.remove_from_cart(&john, 42).await,
        Err(Error::NotFound(_))
    ));

    Ok(())
}
