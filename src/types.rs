//! variable type expressions
//!
//! helpers for the type side of an operation's variable declarations.

use std::fmt;

/// a graphql type expression such as `ID!` or `[String]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type(String);

impl Type {
    /// a named type; non-nullable types carry a trailing `!`
    pub fn named(name: impl Into<String>, nullable: bool) -> Self {
        let mut expr = name.into();
        if !nullable {
            expr.push('!');
        }
        Type(expr)
    }

    /// a list of `inner`
    pub fn list(inner: Type, nullable: bool) -> Self {
        Self::named(format!("[{}]", inner.0), nullable)
    }

    pub fn id(nullable: bool) -> Self {
        Self::named("ID", nullable)
    }

    pub fn string(nullable: bool) -> Self {
        Self::named("String", nullable)
    }

    pub fn int(nullable: bool) -> Self {
        Self::named("Int", nullable)
    }

    pub fn float(nullable: bool) -> Self {
        Self::named("Float", nullable)
    }

    pub fn boolean(nullable: bool) -> Self {
        Self::named("Boolean", nullable)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Type> for String {
    fn from(ty: Type) -> Self {
        ty.0
    }
}
