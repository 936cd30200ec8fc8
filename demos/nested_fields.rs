use graphql_builder::{Client, ClientConfig, Selection, Type};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let endpoint = env::var("GRAPHQL_URL")
        .unwrap_or_else(|_| "http://localhost:8000/api/v2/graphql".to_string());
    let person_id: u64 = env::var("GRAPHQL_PERSON_ID")
        .ok()
        .and_then(|id| id.parse().ok())
        .unwrap_or(1);
    let key = env::var("GRAPHQL_API_KEY").expect("GRAPHQL_API_KEY is required");

    let client = Client::new(ClientConfig::new(endpoint).with_auth_key(person_id, key))?;

    let mut query = client.query("GetNews")?;
    query
        .set_operation_args([
            ("$id", Type::id(false)),
            ("$withCategories", Type::boolean(false)),
        ])
        .field(
            "content_get_articles",
            "id: $id",
            Selection::new()
                .leaf("title")
                .include_if("categories", "$withCategories", ["id", "title"]),
        )?;

    let data = query
        .execute(serde_json::json!({ "id": 100, "withCategories": true }))
        .await?;
    println!("data: {data:#}");

    Ok(())
}
