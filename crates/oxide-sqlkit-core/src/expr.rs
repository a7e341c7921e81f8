//! Expression and literal model.
//!
//! Every [`Expr`] renders to exactly one SQL token (or a function call) and
//! consumes at most one bind slot. Literals are written into the SQL text;
//! only [`Expr::Bind`] produces a placeholder.

use crate::value::{IntoValue, Value};

/// A literal written verbatim into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// The dialect's "use the column default" marker.
    Default,
    /// NULL.
    Null,
    /// A string literal, quoted and escaped by the dialect.
    String(String),
    /// An integer literal.
    Integer(i64),
    /// A float literal. Must be finite.
    Float(f64),
    /// A boolean literal.
    Boolean(bool),
    /// The wildcard `*`.
    All,
}

impl Literal {
    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// A column reference, optionally qualified by its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Optional table qualifier.
    pub table: Option<String>,
    /// Column name.
    pub name: String,
}

impl ColumnRef {
    /// Creates an unqualified column reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    /// Creates a qualified column reference.
    #[must_use]
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }
}

/// A scalar expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column reference.
    Column(ColumnRef),
    /// A literal.
    Literal(Literal),
    /// A bound parameter.
    Bind(Value),
    /// A function call, `name(args...)`. The name must be a plain SQL name.
    Function {
        /// Function name.
        name: String,
        /// Arguments in call order.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Creates a column reference. `"*"` becomes the wildcard literal.
    #[must_use]
    pub fn column(name: &str) -> Self {
        if name == "*" {
            Self::Literal(Literal::All)
        } else {
            Self::Column(ColumnRef::new(name))
        }
    }

    /// Creates a function call expression.
    #[must_use]
    pub fn function<I, A>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Self>,
    {
        Self::Function {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the number of bind slots this expression consumes.
    #[must_use]
    pub fn bind_count(&self) -> usize {
        match self {
            Self::Bind(_) => 1,
            Self::Function { args, .. } => args.iter().map(Self::bind_count).sum(),
            Self::Column(_) | Self::Literal(_) => 0,
        }
    }
}

/// Creates a column reference expression.
#[must_use]
pub fn col(name: &str) -> Expr {
    Expr::column(name)
}

/// Creates a bound parameter expression.
#[must_use]
pub fn bind<T: IntoValue>(value: T) -> Expr {
    Expr::Bind(value.into_value())
}

/// Creates a function call expression.
#[must_use]
pub fn func<I, A>(name: &str, args: I) -> Expr
where
    I: IntoIterator<Item = A>,
    A: Into<Expr>,
{
    Expr::function(name, args)
}

/// Conversion into the value side of a statement: a comparison operand or
/// an INSERT value.
///
/// Plain Rust values, strings included, become binds. A column on the value
/// side must be spelled with [`col`] or [`ColumnRef`].
pub trait IntoOperand {
    /// Converts into an expression.
    fn into_operand(self) -> Expr;
}

impl IntoOperand for Expr {
    fn into_operand(self) -> Expr {
        self
    }
}

impl IntoOperand for Literal {
    fn into_operand(self) -> Expr {
        Expr::Literal(self)
    }
}

impl IntoOperand for ColumnRef {
    fn into_operand(self) -> Expr {
        Expr::Column(self)
    }
}

macro_rules! impl_bound_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoOperand for $ty {
                fn into_operand(self) -> Expr {
                    Expr::Bind(self.into_value())
                }
            }
        )*
    };
}

impl_bound_operand!(Value, bool, i64, i32, i16, u32, u16, u8, f64, f32, String, &str, Vec<u8>, &[u8]);

impl<T: IntoValue> IntoOperand for Option<T> {
    fn into_operand(self) -> Expr {
        Expr::Bind(self.into_value())
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Self::column(name)
    }
}

impl From<String> for Expr {
    fn from(name: String) -> Self {
        Self::column(&name)
    }
}

impl From<ColumnRef> for Expr {
    fn from(column: ColumnRef) -> Self {
        Self::Column(column)
    }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Bind(value)
    }
}
