use graphql_builder::{Client, ClientConfig, Transport};
use std::env;

const QUERY: &str = r#"
    query GetNews ($id: ID!) {
        content_get_news(id: $id) {
            title
            content
        }
    }
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let endpoint = env::var("GRAPHQL_URL")
        .unwrap_or_else(|_| "http://localhost:8000/api/v2/graphql".to_string());
    let key = env::var("GRAPHQL_API_KEY").expect("GRAPHQL_API_KEY is required");

    let client = Client::new(ClientConfig::new(endpoint).with_auth_key(1, key))?;
    let data = client.execute(QUERY, serde_json::json!({ "id": 1 })).await?;

    println!("news: {}", data["content_get_news"]);
    Ok(())
}
