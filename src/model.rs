//! field tree model
//!
//! an [`Operation`] holds the operation name, its declared variables, and an
//! ordered list of [`FieldSpec`]s. names are checked against
//! [`IDENTIFIER_PATTERN`] when they are set; arguments and selections are
//! stored as given and normalized by the renderer.

use crate::error::ValidationError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// pattern every operation name, field name, and alias must match
pub const IDENTIFIER_PATTERN: &str = "^[_a-zA-Z][_a-zA-Z0-9]*$";

fn identifier_regex() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern compiles"))
}

/// true if `name` is a valid graphql name
pub fn is_identifier(name: &str) -> bool {
    identifier_regex().is_match(name)
}

/// field arguments, either a raw `"name: value, ..."` string or a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arguments {
    /// comma-delimited `name: value` pairs
    Raw(String),
    /// structured entries
    List(Vec<Argument>),
}

/// one entry of [`Arguments::List`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// a `"name: value"` string, split on the first colon at render time
    Positional(String),
    /// an already separated pair
    Named {
        /// argument name
        name: String,
        /// value literal, emitted verbatim
        value: String,
    },
}

impl Arguments {
    /// an empty argument list
    pub fn new() -> Self {
        Arguments::List(Vec::new())
    }

    /// append a `name: value` pair
    pub fn arg(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(Argument::Named {
            name: name.into(),
            value: value.into(),
        })
    }

    /// append a `"name: value"` string
    pub fn positional(self, entry: impl Into<String>) -> Self {
        self.push(Argument::Positional(entry.into()))
    }

    fn push(self, argument: Argument) -> Self {
        let mut list = match self {
            Arguments::List(list) => list,
            Arguments::Raw(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(|entry| Argument::Positional(entry.to_string()))
                .collect(),
        };
        list.push(argument);
        Arguments::List(list)
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Arguments {
    fn from(raw: &str) -> Self {
        Arguments::Raw(raw.to_string())
    }
}

impl From<String> for Arguments {
    fn from(raw: String) -> Self {
        Arguments::Raw(raw)
    }
}

impl From<Vec<Argument>> for Arguments {
    fn from(list: Vec<Argument>) -> Self {
        Arguments::List(list)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Arguments {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .fold(Arguments::new(), |args, (name, value)| args.arg(name, value))
    }
}

/// sub-field selection of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// whitespace-delimited leaf field names
    Raw(String),
    /// leaf names and nested blocks in order
    List(Vec<SelectionItem>),
}

/// one entry of [`Selection::List`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionItem {
    /// a bare field name
    Leaf(String),
    /// a field with its own sub-selection
    Nested {
        /// field name
        name: String,
        /// directives placed between the name and the block
        directives: Vec<Directive>,
        /// sub-selection
        children: Selection,
    },
}

/// conditional inclusion directive on a nested block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `@include(if: ...)`
    Include(String),
    /// `@skip(if: ...)`
    Skip(String),
}

impl Selection {
    /// an empty selection
    pub fn new() -> Self {
        Selection::List(Vec::new())
    }

    /// append a leaf field
    pub fn leaf(self, name: impl Into<String>) -> Self {
        self.push(SelectionItem::Leaf(name.into()))
    }

    /// append a nested block
    pub fn nested(self, name: impl Into<String>, children: impl Into<Selection>) -> Self {
        self.push(SelectionItem::Nested {
            name: name.into(),
            directives: Vec::new(),
            children: children.into(),
        })
    }

    /// append a nested block rendered only when `condition` is true
    pub fn include_if(
        self,
        name: impl Into<String>,
        condition: impl Into<String>,
        children: impl Into<Selection>,
    ) -> Self {
        self.push(SelectionItem::Nested {
            name: name.into(),
            directives: vec![Directive::Include(condition.into())],
            children: children.into(),
        })
    }

    /// append a nested block skipped when `condition` is true
    pub fn skip_if(
        self,
        name: impl Into<String>,
        condition: impl Into<String>,
        children: impl Into<Selection>,
    ) -> Self {
        self.push(SelectionItem::Nested {
            name: name.into(),
            directives: vec![Directive::Skip(condition.into())],
            children: children.into(),
        })
    }

    fn push(self, item: SelectionItem) -> Self {
        let mut items = match self {
            Selection::List(items) => items,
            Selection::Raw(raw) => raw
                .split_whitespace()
                .map(|name| SelectionItem::Leaf(name.to_string()))
                .collect(),
        };
        items.push(item);
        Selection::List(items)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        Selection::Raw(raw.to_string())
    }
}

impl From<String> for Selection {
    fn from(raw: String) -> Self {
        Selection::Raw(raw)
    }
}

impl From<Vec<SelectionItem>> for Selection {
    fn from(items: Vec<SelectionItem>) -> Self {
        Selection::List(items)
    }
}

impl From<Vec<&str>> for Selection {
    fn from(names: Vec<&str>) -> Self {
        names.into_iter().fold(Selection::new(), Selection::leaf)
    }
}

impl<const N: usize> From<[&str; N]> for Selection {
    fn from(names: [&str; N]) -> Self {
        names.into_iter().fold(Selection::new(), Selection::leaf)
    }
}

/// one selected field of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    alias: Option<String>,
    name: String,
    args: Arguments,
    children: Selection,
}

impl FieldSpec {
    /// parse a `name` or `alias: name` declaration and validate both parts
    pub fn new(
        declaration: &str,
        args: impl Into<Arguments>,
        children: impl Into<Selection>,
    ) -> Result<Self, ValidationError> {
        let (alias, name) = match declaration.split_once(':') {
            Some((alias, name)) => (Some(alias.trim_end()), name.trim_start()),
            None => (None, declaration),
        };

        if !is_identifier(name) {
            return Err(ValidationError::FieldName {
                value: name.to_string(),
                pattern: IDENTIFIER_PATTERN,
            });
        }
        if let Some(alias) = alias {
            if !is_identifier(alias) {
                return Err(ValidationError::Alias {
                    value: alias.to_string(),
                    pattern: IDENTIFIER_PATTERN,
                });
            }
        }

        Ok(Self {
            alias: alias.map(str::to_string),
            name: name.to_string(),
            args: args.into(),
            children: children.into(),
        })
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &Arguments {
        &self.args
    }

    pub fn children(&self) -> &Selection {
        &self.children
    }
}

/// a named query operation with declared variables and selected fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    name: String,
    variables: Vec<(String, String)>,
    fields: Vec<FieldSpec>,
}

impl Operation {
    /// create an operation with no variables or fields
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let mut operation = Self {
            name: String::new(),
            variables: Vec::new(),
            fields: Vec::new(),
        };
        operation.set_name(name)?;
        Ok(operation)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// replace the operation name
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(ValidationError::OperationName {
                value: name,
                pattern: IDENTIFIER_PATTERN,
            });
        }
        self.name = name;
        Ok(())
    }

    /// declared variables in insertion order
    pub fn variables(&self) -> &[(String, String)] {
        &self.variables
    }

    /// replace the declared variables
    ///
    /// type expressions are stored verbatim. a repeated name keeps its first
    /// position and takes the last type.
    pub fn set_variables<I, K, V>(&mut self, variables: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: fmt::Display,
    {
        self.variables.clear();
        for (name, ty) in variables {
            let name = name.into();
            let ty = ty.to_string();
            match self.variables.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = ty,
                None => self.variables.push((name, ty)),
            }
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn push_field(&mut self, field: FieldSpec) {
        self.fields.push(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        for name in ["GetNews", "_private", "a", "field_2", "A1_b2"] {
            assert!(is_identifier(name), "{name} should be valid");
        }
        for name in ["", "1bad", "bad-name", "has space", "dollar$", "é", "a.b"] {
            assert!(!is_identifier(name), "{name} should be invalid");
        }
    }

    #[test]
    fn test_operation_name_validation() {
        let mut op = Operation::new("GetNews").unwrap();
        assert_eq!(op.name(), "GetNews");

        let err = op.set_name("1bad").unwrap_err();
        assert!(matches!(err, ValidationError::OperationName { ref value, .. } if value == "1bad"));
        assert_eq!(op.name(), "GetNews");

        assert!(Operation::new("").is_err());
    }

    #[test]
    fn test_field_alias_split() {
        let field = FieldSpec::new("a : content_get_articles", "", "").unwrap();
        assert_eq!(field.alias(), Some("a"));
        assert_eq!(field.name(), "content_get_articles");

        let field = FieldSpec::new("title", Arguments::new(), Selection::new()).unwrap();
        assert_eq!(field.alias(), None);
        assert_eq!(field.name(), "title");
    }

    #[test]
    fn test_field_validation_distinguishes_tokens() {
        let err = FieldSpec::new("1bad-name", "", "").unwrap_err();
        assert!(matches!(err, ValidationError::FieldName { .. }));

        let err = FieldSpec::new("bad-alias: title", "", "").unwrap_err();
        assert!(matches!(err, ValidationError::Alias { ref value, .. } if value == "bad-alias"));

        let err = FieldSpec::new("alias: ", "", "").unwrap_err();
        assert!(matches!(err, ValidationError::FieldName { .. }));

        let err = FieldSpec::new(": title", "", "").unwrap_err();
        assert!(matches!(err, ValidationError::Alias { .. }));
    }

    #[test]
    fn test_set_variables_keeps_order_and_replaces_duplicates() {
        let mut op = Operation::new("Q").unwrap();
        op.set_variables([("$b", "Int"), ("$a", "ID!"), ("$b", "String")]);
        assert_eq!(
            op.variables(),
            &[
                ("$b".to_string(), "String".to_string()),
                ("$a".to_string(), "ID!".to_string())
            ]
        );

        op.set_variables(Vec::<(&str, &str)>::new());
        assert!(op.variables().is_empty());
    }

    #[test]
    fn test_selection_builders() {
        let selection = Selection::from("id title").nested("categories", ["id"]);
        assert_eq!(
            selection,
            Selection::List(vec![
                SelectionItem::Leaf("id".to_string()),
                SelectionItem::Leaf("title".to_string()),
                SelectionItem::Nested {
                    name: "categories".to_string(),
                    directives: vec![],
                    children: Selection::from(["id"]),
                },
            ])
        );
    }

    #[test]
    fn test_arguments_builders() {
        let args = Arguments::from([("id", "$id")]).positional("limit: 10");
        assert_eq!(
            args,
            Arguments::List(vec![
                Argument::Named {
                    name: "id".to_string(),
                    value: "$id".to_string(),
                },
                Argument::Positional("limit: 10".to_string()),
            ])
        );
    }
}
