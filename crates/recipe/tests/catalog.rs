use foodgram_recipe::{NewIngredient, TagInput};
use foodgram_shared::Error;
use temp_dir::TempDir;

mod helpers;

fn ingredient(name: &str, unit: &str) -> NewIngredient {
    NewIngredient {
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    }
}

#[tokio::test]
async fn tags_are_listed_by_name() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let (tags, _) = helpers::seed(&state).await?;
    let query = helpers::query(&state);

    let names = query
        .tags()
        .await?
        .into_iter()
        .map(|t| t.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Breakfast", "Dinner", "Lunch"]);

    let lunch = query.find_tag(tags[1]).await?.unwrap();
    assert_eq!(lunch.slug, "lunch");
    assert_eq!(lunch.color, "#49B64E");
    assert!(query.find_tag(999).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn tag_uniqueness_and_format() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::seed(&state).await?;
    let cmd = foodgram_recipe::Command(state.clone());

    let field = |err: Error| match err {
        Error::Validate(errors) => errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect::<Vec<_>>(),
        _ => vec![],
    };

    let err = cmd
        .create_tag(TagInput {
            name: "Dessert".to_owned(),
            color: "#e26c2d".to_owned(),
            slug: "dessert".to_owned(),
        })
        .await
        .unwrap_err();
    assert_eq!(field(err), vec!["color"]);

    let err = cmd
        .create_tag(TagInput {
            name: "Dessert".to_owned(),
            color: "red".to_owned(),
            slug: "dessert".to_owned(),
        })
        .await
        .unwrap_err();
    assert_eq!(field(err), vec!["color"]);

    let err = cmd
        .create_tag(TagInput {
            name: "Dessert".to_owned(),
            color: "#000000".to_owned(),
            slug: "sweet dessert".to_owned(),
        })
        .await
        .unwrap_err();
    assert_eq!(field(err), vec!["slug"]);

    let err = cmd
        .create_tag(TagInput {
            name: "Lunch".to_owned(),
            color: "#000000".to_owned(),
            slug: "dessert".to_owned(),
        })
        .await
        .unwrap_err();
    assert_eq!(field(err), vec!["name"]);

    cmd.create_tag(TagInput {
        name: "Dessert".to_owned(),
        color: "#000000".to_owned(),
        slug: "dessert".to_owned(),
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn load_is_get_or_create() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = foodgram_recipe::Command(state.clone());

    let inserted = cmd
        .load_ingredients(vec![ingredient("salt", "g"), ingredient("salt", "pinch")])
        .await?;
    assert_eq!(inserted, 2);

    let inserted = cmd
        .load_ingredients(vec![
            ingredient("salt", "g"),
            ingredient("pepper", "g"),
            ingredient(" ", "g"),
        ])
        .await?;
    assert_eq!(inserted, 1);

    let all = helpers::query(&state).search_ingredients(None).await?;
    assert_eq!(all.len(), 3);

    Ok(())
}

#[tokio::test]
async fn search_prefers_prefix_matches() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = foodgram_recipe::Command(state.clone());
    let query = helpers::query(&state);

    cmd.load_ingredients(vec![
        ingredient("Сахар", "г"),
        ingredient("ванильный сахар", "г"),
        ingredient("сахарная пудра", "г"),
        ingredient("соль", "г"),
        ingredient("100% juice", "ml"),
    ])
    .await?;

    let names = query
        .search_ingredients(Some("сах"))
        .await?
        .into_iter()
        .map(|i| i.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Сахар", "сахарная пудра", "ванильный сахар"]);

    let names = query
        .search_ingredients(Some("%"))
        .await?
        .into_iter()
        .map(|i| i.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["100% juice"]);

    assert!(query.search_ingredients(Some("pepper")).await?.is_empty());
    assert_eq!(query.search_ingredients(Some("  ")).await?.len(), 5);

    Ok(())
}
