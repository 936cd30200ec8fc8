//! graphql query builder
//!
//! describe a query as an operation with variables and a tree of fields,
//! then render it to graphql text. start with [`QueryBuilder`] (or
//! [`Client::query`]), add fields with [`QueryBuilder::field`], and either
//! read the text with [`QueryBuilder::query`] or send it with
//! [`QueryBuilder::execute`].
//!
//! ## quick start
//!
//! ```no_run
//! use graphql_builder::{Client, ClientConfig, Selection, Type};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(
//!     ClientConfig::new("https://helpdesk.example.com/api/v2/graphql").with_auth_key(1, "key"),
//! )?;
//!
//! let mut query = client.query("GetNews")?;
//! query
//!     .set_operation_args([("$id", Type::id(false))])
//!     .field(
//!         "content_get_articles",
//!         "id: $id",
//!         Selection::new().leaf("title").nested("categories", ["id", "title"]),
//!     )?;
//!
//! let data = query.execute(serde_json::json!({"id": 100})).await?;
//! println!("{data}");
//! # Ok(())
//! # }
//! ```
//!
//! ## output format
//!
//! top-level fields are indented by four spaces and always carry an argument
//! list, even when empty. block contents start at twelve spaces and each
//! nested block adds four more:
//!
//! ```text
//! query GetNews ($id: ID!) {
//!     content_get_articles(id: $id) {
//!             title
//!             categories {
//!                 id
//!                 title
//!             }
//!     }
//! }
//! ```

mod builder;
mod client;
mod config;
mod error;
mod graphql;
mod model;
pub mod render;
mod transport;
mod types;

pub use builder::QueryBuilder;
pub use client::Client;
pub use config::{ClientConfig, Credentials};
pub use error::{Error, Result, ValidationError};
pub use graphql::{GraphQlError, GraphQlLocation, GraphQlResponse};
pub use model::{
    is_identifier, Argument, Arguments, Directive, FieldSpec, Operation, Selection, SelectionItem,
    IDENTIFIER_PATTERN,
};
pub use transport::Transport;
pub use types::Type;
