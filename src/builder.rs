//! query builder
//!
//! [`QueryBuilder`] is the chainable front end: it owns one [`Operation`],
//! renders it on demand, caches the text until the next mutation, and hands
//! the text to a [`Transport`] on execute.

use crate::error::{Result, ValidationError};
use crate::model::{Arguments, FieldSpec, Operation, Selection};
use crate::render::render;
use crate::transport::Transport;
use serde::de::DeserializeOwned;
use std::cell::OnceCell;
use std::fmt;
use std::future::Future;

/// fluent builder for a single query operation
///
/// ```
/// use graphql_builder::{QueryBuilder, Selection, Transport, Type};
///
/// struct Offline;
///
/// impl Transport for Offline {
///     async fn execute(
///         &self,
///         _query: &str,
///         _variables: serde_json::Value,
///     ) -> graphql_builder::Result<serde_json::Value> {
///         Ok(serde_json::json!({}))
///     }
/// }
///
/// # fn main() -> Result<(), graphql_builder::Error> {
/// let mut query = QueryBuilder::new(&Offline, "GetNews")?;
/// query
///     .set_operation_args([("$id", Type::id(false))])
///     .field(
///         "content_get_articles",
///         "id: $id",
///         Selection::new().leaf("title").nested("categories", ["id", "title"]),
///     )?;
///
/// assert!(query.query().starts_with("query GetNews ($id: ID!) {"));
/// # Ok(())
/// # }
/// ```
pub struct QueryBuilder<'a, T> {
    transport: &'a T,
    operation: Operation,
    cache: OnceCell<String>,
}

impl<'a, T> QueryBuilder<'a, T> {
    /// create a builder bound to `transport`
    pub fn new(transport: &'a T, name: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            transport,
            operation: Operation::new(name)?,
            cache: OnceCell::new(),
        })
    }

    pub fn operation_name(&self) -> &str {
        self.operation.name()
    }

    /// replace the operation name; rejects names that are not identifiers
    pub fn set_operation_name(
        &mut self,
        name: impl Into<String>,
    ) -> std::result::Result<&mut Self, ValidationError> {
        self.operation.set_name(name)?;
        self.invalidate();
        Ok(self)
    }

    /// declared variables in insertion order
    pub fn operation_args(&self) -> &[(String, String)] {
        self.operation.variables()
    }

    /// replace the declared variables
    ///
    /// names may be given with or without the leading `$`. type expressions
    /// are taken verbatim, see [`crate::Type`] for helpers.
    pub fn set_operation_args<I, K, V>(&mut self, variables: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: fmt::Display,
    {
        self.operation.set_variables(variables);
        self.invalidate();
        self
    }

    /// add a field, declared as `name` or `alias: name`
    ///
    /// names are validated here. `args` and `children` are stored as given
    /// and normalized when the query is rendered.
    pub fn field(
        &mut self,
        declaration: &str,
        args: impl Into<Arguments>,
        children: impl Into<Selection>,
    ) -> std::result::Result<&mut Self, ValidationError> {
        let field = FieldSpec::new(declaration, args, children)?;
        self.operation.push_field(field);
        self.invalidate();
        Ok(self)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        self.operation.fields()
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// the rendered query text, cached until the next mutation
    pub fn query(&self) -> &str {
        self.cache.get_or_init(|| {
            tracing::debug!(
                target: "graphql_builder::builder",
                operation = %self.operation.name(),
                fields = self.operation.fields().len(),
                "rendering query"
            );
            let text = render(&self.operation);
            tracing::trace!(target: "graphql_builder::builder", query = %text, "rendered query");
            text
        })
    }

    fn invalidate(&mut self) {
        self.cache.take();
    }
}

impl<'a, T: Transport> QueryBuilder<'a, T> {
    /// render the query and send it with `variables`
    ///
    /// returns the response `data` payload as produced by the transport.
    pub fn execute(
        &self,
        variables: serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value>> + 'a {
        let query = self.query().to_string();
        let transport = self.transport;
        tracing::debug!(
            target: "graphql_builder::builder",
            operation = %self.operation.name(),
            "executing query"
        );
        async move { transport.execute(&query, variables).await }
    }

    /// like [`QueryBuilder::execute`], deserializing the data into `R`
    pub fn execute_as<R: DeserializeOwned>(
        &self,
        variables: serde_json::Value,
    ) -> impl Future<Output = Result<R>> + 'a {
        let request = self.execute(variables);
        async move {
            let data = request.await?;
            Ok(serde_json::from_value(data)?)
        }
    }
}

impl<T> fmt::Display for QueryBuilder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query())
    }
}

impl<T> fmt::Debug for QueryBuilder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("operation", &self.operation)
            .field("cached", &self.cache.get().is_some())
            .finish()
    }
}
