use graphql_builder::{QueryBuilder, Result, Selection, Transport, Type};
use graphql_parser::query as ast;

struct Offline;

impl Transport for Offline {
    async fn execute(&self, _query: &str, _variables: serde_json::Value) -> Result<serde_json::Value> {
        Ok(serde_json::json!({}))
    }
}

fn top_level_fields<'d, 'a>(
    document: &'d ast::Document<'a, String>,
) -> (&'d ast::Query<'a, String>, Vec<&'d ast::Field<'a, String>>) {
    let query = match document.definitions.as_slice() {
        [ast::Definition::Operation(ast::OperationDefinition::Query(query))] => query,
        other => panic!("expected a single query, got {other:?}"),
    };
    let fields = query
        .selection_set
        .items
        .iter()
        .map(|item| match item {
            ast::Selection::Field(field) => field,
            other => panic!("unexpected selection {other:?}"),
        })
        .collect();
    (query, fields)
}

fn child_names<'d, 'a>(field: &'d ast::Field<'a, String>) -> Vec<&'d str> {
    field
        .selection_set
        .items
        .iter()
        .map(|item| match item {
            ast::Selection::Field(field) => field.name.as_str(),
            other => panic!("unexpected selection {other:?}"),
        })
        .collect()
}

#[test]
fn rendered_news_query_parses() {
    let mut builder = QueryBuilder::new(&Offline, "GetNews").unwrap();
    builder
        .set_operation_args([("id", Type::id(false)), ("$withCategories", Type::boolean(false))])
        .field(
            "content_get_articles",
            "id: $id",
            Selection::new()
                .leaf("title")
                .include_if("categories", "$withCategories", ["id", "title"]),
        )
        .unwrap()
        .field("latest: content_get_articles", "limit: 5, order: \"desc\"", "id title")
        .unwrap();

    let text = builder.query();
    let document = graphql_parser::parse_query::<String>(text).expect("rendered query parses");
    let (query, fields) = top_level_fields(&document);

    assert_eq!(query.name.as_deref(), Some("GetNews"));
    let variables: Vec<&str> = query
        .variable_definitions
        .iter()
        .map(|var| var.name.as_str())
        .collect();
    assert_eq!(variables, vec!["id", "withCategories"]);

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "content_get_articles");
    assert_eq!(fields[0].alias, None);
    assert_eq!(fields[0].arguments.len(), 1);
    assert_eq!(child_names(fields[0]), vec!["title", "categories"]);

    let categories = match &fields[0].selection_set.items[1] {
        ast::Selection::Field(field) => field,
        other => panic!("unexpected selection {other:?}"),
    };
    assert_eq!(categories.directives.len(), 1);
    assert_eq!(categories.directives[0].name, "include");
    assert_eq!(child_names(categories), vec!["id", "title"]);

    assert_eq!(fields[1].alias.as_deref(), Some("latest"));
    assert_eq!(fields[1].arguments.len(), 2);
    assert_eq!(child_names(fields[1]), vec!["id", "title"]);
}

#[test]
fn rendered_deeply_nested_query_parses() {
    let mut builder = QueryBuilder::new(&Offline, "Tree").unwrap();
    builder
        .field(
            "node",
            [("id", "1")],
            Selection::new().nested(
                "children",
                Selection::new().leaf("id").nested("children", Selection::new().leaf("id")),
            ),
        )
        .unwrap();

    let document = graphql_parser::parse_query::<String>(builder.query()).expect("parses");
    let (_, fields) = top_level_fields(&document);
    assert_eq!(child_names(fields[0]), vec!["children"]);
}
