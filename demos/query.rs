use graphql_builder::{Client, ClientConfig, Selection};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let endpoint = env::var("GRAPHQL_URL")
        .unwrap_or_else(|_| "http://localhost:8000/api/v2/graphql".to_string());

    let client = Client::new(ClientConfig::new(endpoint))?;

    let mut query = client.query("GetNews")?;
    query
        .set_operation_args([("$articleId", "ID!")])
        .field(
            "content_get_articles",
            "id: $articleId",
            Selection::new()
                .leaf("title")
                .leaf("content")
                .nested("categories", ["title"]),
        )?;

    println!("{query}");

    let data = query.execute(serde_json::json!({ "articleId": 100 })).await?;
    println!("data: {data}");

    Ok(())
}
