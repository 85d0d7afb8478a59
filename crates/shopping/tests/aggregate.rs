use foodgram_recipe::{CreateInput, IngredientAmountInput, NewIngredient, TagInput};
use foodgram_shopping::ShoppingItem;
use temp_dir::TempDir;

mod helpers;

fn recipe(name: &str, tag: i64, ingredients: &[(i64, i64)]) -> CreateInput {
    CreateInput {
        ingredients: ingredients
            .iter()
            .map(|(id, amount)| IngredientAmountInput {
                id: *id,
                amount: *amount,
            })
            .collect(),
        tags: vec![tag],
        image: format!("recipes/{name}.png"),
        name: name.to_owned(),
        text: "text".to_owned(),
        cooking_time: 10,
    }
}

fn item(name: &str, unit: &str, amount: i64) -> ShoppingItem {
    ShoppingItem {
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
        amount,
    }
}

#[tokio::test]
async fn sums_amounts_across_cart_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let albert = helpers::create_user(&state, "albert").await?;
    let cmd = foodgram_recipe::Command(state.clone());

    let tag = cmd
        .create_tag(TagInput {
            name: "Breakfast".to_owned(),
            color: "#E26C2D".to_owned(),
            slug: "breakfast".to_owned(),
        })
        .await?;
    cmd.load_ingredients(
        [("milk", "ml"), ("flour", "g"), ("salt", "g"), ("salt", "pinch")]
            .into_iter()
            .map(|(name, unit)| NewIngredient {
                name: name.to_owned(),
                measurement_unit: unit.to_owned(),
            })
            .collect(),
    )
    .await?;
    let (milk, flour, salt_g, salt_pinch) = (1, 2, 3, 4);

    let pancakes = cmd
        .create(
            &john,
            recipe("pancakes", tag, &[(milk, 300), (flour, 200), (salt_pinch, 1)]),
        )
        .await?;
    let bread = cmd
        .create(&albert, recipe("bread", tag, &[(flour, 500), (salt_g, 10)]))
        .await?;
    let porridge = cmd
        .create(&albert, recipe("porridge", tag, &[(milk, 250)]))
        .await?;

    cmd.add_to_cart(&john, pancakes).await?;
    cmd.add_to_cart(&john, bread).await?;
    cmd.add_to_cart(&albert, porridge).await?;

    let query = foodgram_shopping::Query(state.read_db.clone());

    let items = query.aggregate(john.id).await?;
    assert_eq!(
        items,
        vec![
            item("flour", "g", 700),
            item("milk", "ml", 300),
            item("salt", "g", 10),
            item("salt", "pinch", 1),
        ]
    );

    let items = query.aggregate(albert.id).await?;
    assert_eq!(items, vec![item("milk", "ml", 250)]);

    Ok(())
}

#[tokio::test]
async fn deleted_recipe_leaves_the_list() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let albert = helpers::create_user(&state, "albert").await?;
    let cmd = foodgram_recipe::Command(state.clone());

    let tag = cmd
        .create_tag(TagInput {
            name: "Lunch".to_owned(),
            color: "#49B64E".to_owned(),
            slug: "lunch".to_owned(),
        })
        .await?;
    cmd.load_ingredients(vec![
        NewIngredient {
            name: "flour".to_owned(),
            measurement_unit: "g".to_owned(),
        },
        NewIngredient {
            name: "milk".to_owned(),
            measurement_unit: "ml".to_owned(),
        },
    ])
    .await?;
    let (flour, milk) = (1, 2);

    let bread = cmd
        .create(&albert, recipe("bread", tag, &[(flour, 500)]))
        .await?;
    let pancakes = cmd
        .create(&albert, recipe("pancakes", tag, &[(flour, 200), (milk, 300)]))
        .await?;

    cmd.add_to_cart(&john, bread).await?;
    cmd.add_to_cart(&john, pancakes).await?;

    let query = foodgram_shopping::Query(state.read_db.clone());
    assert_eq!(
        query.aggregate(john.id).await?,
        vec![item("flour", "g", 700), item("milk", "ml", 300)]
    );

    cmd.delete(&albert, pancakes).await?;

    assert_eq!(query.aggregate(john.id).await?, vec![item("flour", "g", 500)]);

    Ok(())
}

#[tokio::test]
async fn empty_cart_renders_header_only() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;

    let items = foodgram_shopping::Query(state.read_db.clone())
        .aggregate(john.id)
        .await?;
    assert!(items.is_empty());

    assert_eq!(
        foodgram_shopping::render_text("John Doe", &items),
        "Shopping list for John Doe:\n"
    );
    assert!(foodgram_shopping::render_pdf("John Doe", &items)?.starts_with(b"%PDF"));

    Ok(())
}
