use std::{io::Cursor, str::FromStr};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use foodgram::config::{
    Config, DatabaseConfig, JwtConfig, MediaConfig, ObservabilityConfig, PaginationConfig,
    ServerConfig,
};
use foodgram_recipe::{NewIngredient, TagInput};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use temp_dir::TempDir;
use tower::ServiceExt;

pub const PUBLIC_URL: &str = "http://localhost:8000";

pub fn png() -> String {
    let image = image::RgbImage::from_pixel(2, 2, image::Rgb([73, 182, 78]));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageFormat::Png)
        .expect("encode png");

    format!("data:image/png;base64,{}", STANDARD.encode(bytes.into_inner()))
}

pub struct TestApp {
    pub router: Router,
    pub state: foodgram_shared::State,
    pub dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap_or(Value::Null)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.child("db.sqlite3");
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePool::connect_with(opts).await?;
        let mut conn = pool.acquire().await?;
        foodgram_db::migrator()?
            .run(&mut conn, &Plan::apply_all())
            .await?;
        drop(conn);

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_owned(),
                port: 8000,
                public_url: PUBLIC_URL.to_owned(),
            },
            database: DatabaseConfig {
                url: format!("sqlite:{}", path.display()),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: "test_secret_key_minimum_32_characters_long".to_owned(),
                issuer: "foodgram".to_owned(),
                audience: "foodgram-api".to_owned(),
                expiration_days: 1,
            },
            pagination: PaginationConfig {
                page_size: 6,
                max_page_size: 20,
            },
            media: MediaConfig {
                root: dir.child("media").display().to_string(),
            },
            observability: ObservabilityConfig::default(),
        };

        let state = foodgram_shared::State::single(pool);

        Ok(Self {
            router: foodgram::create_app(config, state.clone()),
            state,
            dir,
        })
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<TestResponse> {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Token {token}"));
        }

        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => request.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await?.to_bytes().to_vec();

        Ok(TestResponse {
            status,
            headers,
            bytes,
        })
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> anyhow::Result<TestResponse> {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> anyhow::Result<TestResponse> {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> anyhow::Result<TestResponse> {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// Registers `name` and returns the new user id.
    pub async fn register(&self, name: &str) -> anyhow::Result<i64> {
        let response = self
            .post(
                "/api/users/",
                None,
                json!({
                    "email": format!("{name}@foodgram.localhost"),
                    "username": name,
                    "first_name": capitalize(name),
                    "last_name": "Doe",
                    "password": "my_password",
                }),
            )
            .await?;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());

        Ok(response.json()["id"].as_i64().unwrap_or_default())
    }

    pub async fn login(&self, name: &str) -> anyhow::Result<String> {
        let response = self
            .post(
                "/api/auth/token/login/",
                None,
                json!({
                    "email": format!("{name}@foodgram.localhost"),
                    "password": "my_password",
                }),
            )
            .await?;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());

        Ok(response.json()["auth_token"]
            .as_str()
            .unwrap_or_default()
            .to_owned())
    }

    /// Registers and logs in, returns (id, token).
    pub async fn user(&self, name: &str) -> anyhow::Result<(i64, String)> {
        let id = self.register(name).await?;
        let token = self.login(name).await?;

        Ok((id, token))
    }

    /// Tags `breakfast`, `lunch`, `dinner` and ingredients flour, milk, eggs.
    /// Returns (tag ids, ingredient ids).
    pub async fn seed(&self) -> anyhow::Result<(Vec<i64>, Vec<i64>)> {
        let cmd = foodgram_recipe::Command(self.state.clone());

        let mut tags = vec![];
        for (name, color) in [
            ("Breakfast", "#E26C2D"),
            ("Lunch", "#49B64E"),
            ("Dinner", "#8775D2"),
        ] {
            tags.push(
                cmd.create_tag(TagInput {
                    name: name.to_owned(),
                    color: color.to_owned(),
                    slug: name.to_lowercase(),
                })
                .await?,
            );
        }

        cmd.load_ingredients(
            [("flour", "g"), ("milk", "ml"), ("eggs", "pcs")]
                .into_iter()
                .map(|(name, unit)| NewIngredient {
                    name: name.to_owned(),
                    measurement_unit: unit.to_owned(),
                })
                .collect(),
        )
        .await?;

        let ingredients = sqlx::query_as::<_, (i64,)>("SELECT id FROM ingredient ORDER BY id")
            .fetch_all(&self.state.read_db)
            .await?
            .into_iter()
            .map(|(id,)| id)
            .collect();

        Ok((tags, ingredients))
    }

    /// Creates a recipe through the API and returns its id.
    pub async fn create_recipe(
        &self,
        token: &str,
        name: &str,
        tags: &[i64],
        ingredients: &[(i64, i64)],
    ) -> anyhow::Result<i64> {
        let response = self
            .post("/api/recipes/", Some(token), recipe_body(name, tags, ingredients))
            .await?;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());

        Ok(response.json()["id"].as_i64().unwrap_or_default())
    }
}

pub fn recipe_body(name: &str, tags: &[i64], ingredients: &[(i64, i64)]) -> Value {
    json!({
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| json!({ "id": id, "amount": amount }))
            .collect::<Vec<_>>(),
        "tags": tags,
        "image": png(),
        "name": name,
        "text": format!("How to cook {name}"),
        "cooking_time": 20,
    })
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
