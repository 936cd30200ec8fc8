//! query renderer
//!
//! pure functions from an [`Operation`] to graphql query text. top-level
//! fields sit one level deep; the contents of their blocks start at level
//! three and every nested block adds one more.

use crate::model::{Argument, Arguments, Directive, FieldSpec, Operation, Selection, SelectionItem};

const INDENT_WIDTH: usize = 4;
const FIELD_DEPTH: usize = 1;
const CONTENT_DEPTH: usize = 3;

fn indent(depth: usize) -> String {
    " ".repeat(depth * INDENT_WIDTH)
}

/// render a complete query document
pub fn render(operation: &Operation) -> String {
    let mut body = String::new();
    for field in operation.fields() {
        body.push_str(&render_field(field));
        body.push_str("\n\n");
    }

    format!(
        "query {} {{\n{}\n}}",
        render_header(operation),
        body.trim_end()
    )
}

/// operation name plus the `($var: Type, ...)` declaration list
pub fn render_header(operation: &Operation) -> String {
    if operation.variables().is_empty() {
        return operation.name().to_string();
    }

    let variables: Vec<String> = operation
        .variables()
        .iter()
        .map(|(name, ty)| {
            if name.starts_with('$') {
                format!("{name}: {ty}")
            } else {
                format!("${name}: {ty}")
            }
        })
        .collect();

    format!("{} ({})", operation.name(), variables.join(", "))
}

/// render one top-level field, including its block if it has children
pub fn render_field(field: &FieldSpec) -> String {
    let mut out = indent(FIELD_DEPTH);
    if let Some(alias) = field.alias() {
        out.push_str(alias);
        out.push_str(": ");
    }
    out.push_str(field.name());
    out.push('(');
    out.push_str(&render_arguments(field.args()));
    out.push(')');

    let nested = render_selection(field.children(), CONTENT_DEPTH);
    if !nested.is_empty() {
        out.push_str(&format!(
            " {{\n{}{}\n{}}}",
            indent(CONTENT_DEPTH),
            nested,
            indent(FIELD_DEPTH)
        ));
    }

    out
}

/// `name: value` pairs, comma separated
pub fn render_arguments(args: &Arguments) -> String {
    normalize_arguments(args)
        .into_iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// flatten either argument form into ordered `(name, value)` pairs
pub fn normalize_arguments(args: &Arguments) -> Vec<(&str, &str)> {
    match args {
        Arguments::Raw(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(split_argument)
            .collect(),
        Arguments::List(list) => list
            .iter()
            .map(|argument| match argument {
                Argument::Positional(entry) => split_argument(entry),
                Argument::Named { name, value } => (name.as_str(), value.as_str()),
            })
            .collect(),
    }
}

fn split_argument(entry: &str) -> (&str, &str) {
    match entry.split_once(':') {
        Some((name, value)) => (name.trim(), value.trim()),
        None => (entry.trim(), ""),
    }
}

/// render sibling selections at `depth`; the caller supplies the first indent
pub fn render_selection(selection: &Selection, depth: usize) -> String {
    let entries: Vec<String> = match selection {
        Selection::Raw(raw) => raw.split_whitespace().map(str::to_string).collect(),
        Selection::List(items) => items
            .iter()
            .map(|item| match item {
                SelectionItem::Leaf(name) => name.clone(),
                SelectionItem::Nested {
                    name,
                    directives,
                    children,
                } => format!(
                    "{}{} {{\n{}{}\n{}}}",
                    name,
                    render_directives(directives),
                    indent(depth + 1),
                    render_selection(children, depth + 1),
                    indent(depth)
                ),
            })
            .collect(),
    };

    entries.join(&format!("\n{}", indent(depth)))
}

fn render_directives(directives: &[Directive]) -> String {
    directives
        .iter()
        .map(|directive| match directive {
            Directive::Include(condition) => format!(" @include(if: {})", condition_literal(condition)),
            Directive::Skip(condition) => format!(" @skip(if: {})", condition_literal(condition)),
        })
        .collect()
}

// bare names refer to operation variables
fn condition_literal(condition: &str) -> String {
    let condition = condition.trim();
    match condition {
        "true" | "false" => condition.to_string(),
        _ if condition.starts_with('$') => condition.to_string(),
        _ => format!("${condition}"),
    }
}
