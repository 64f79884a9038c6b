// SPDX-License-Identifier: Unlicense
use crate::{
    ast::{self, BiOpKind, LitKind, NodeKind},
    display,
    error::{Error, Result},
};
use std::{cell::RefCell, fmt, ops};

/// A dynamically typed terminal payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
        }
    }

    fn into_lit(self) -> Result<LitKind> {
        match self {
            Value::Int(i) => Ok(LitKind::Int(i)),
            Value::Float(x) => Ok(LitKind::Float(x)),
            Value::Text(_) => Err(Error::Type {
                expected: "numeric",
                found: "text",
            }),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Owns the node arena while an expression graph is being built.
///
/// Nodes are handed out as [`Expr`] handles, which borrow the builder so that the
/// arithmetic operators can allocate new nodes. Once construction is done,
/// [`Builder::into_arena`] releases the immutable [`ast::Arena`].
#[derive(Debug, Default)]
pub struct Builder {
    arena: RefCell<ast::Arena>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: RefCell::new(ast::Arena::with_capacity(capacity)),
        }
    }

    fn new_node(&self, kind: NodeKind) -> ast::Id {
        let mut arena = self.arena.borrow_mut();
        let id = arena.alloc(ast::Node { kind });
        log::trace!("allocated node {}: {:?}", id.index(), arena[id].kind);
        id
    }

    fn expr(&self, id: ast::Id) -> Expr<'_> {
        Expr { builder: self, id }
    }

    fn lit(&self, lit: LitKind) -> Expr<'_> {
        self.expr(self.new_node(NodeKind::Lit(lit)))
    }

    pub fn int(&self, value: i64) -> Expr<'_> {
        self.lit(LitKind::Int(value))
    }

    pub fn float(&self, value: f64) -> Expr<'_> {
        self.lit(LitKind::Float(value))
    }

    pub fn sym(&self, name: &str) -> Expr<'_> {
        self.expr(self.new_node(NodeKind::Symbol(name.into())))
    }

    /// Creates a number literal, failing with [`Error::Type`] unless `value` is numeric.
    pub fn number(&self, value: impl Into<Value>) -> Result<Expr<'_>> {
        let lit = value.into().into_lit()?;
        Ok(self.lit(lit))
    }

    /// Creates a symbol reference, failing with [`Error::Type`] unless `value` is text.
    pub fn symbol(&self, value: impl Into<Value>) -> Result<Expr<'_>> {
        match value.into() {
            Value::Text(name) => Ok(self.expr(self.new_node(NodeKind::Symbol(name.into())))),
            other => Err(Error::Type {
                expected: "text",
                found: other.type_name(),
            }),
        }
    }

    /// Creates an operator node. Raw numbers on either side become number literals.
    ///
    /// Every arithmetic operator on [`Expr`] ends up here.
    ///
    /// # Panics
    ///
    /// Panics if an [`Expr`] operand was allocated by a different builder.
    pub fn biop<'a>(
        &'a self,
        kind: BiOpKind,
        lhs: impl IntoExpr<'a>,
        rhs: impl IntoExpr<'a>,
    ) -> Expr<'a> {
        let lhs = lhs.into_expr(self);
        let rhs = rhs.into_expr(self);
        self.expr(self.new_node(NodeKind::BiOp(kind, [lhs.id, rhs.id])))
    }

    /// Like [`Builder::biop`], but accepts dynamically typed operands.
    ///
    /// Both operands are checked before anything is allocated, so a text value on
    /// either side fails with [`Error::Type`] and leaves the arena untouched.
    pub fn try_biop<'a>(
        &'a self,
        kind: BiOpKind,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Expr<'a>> {
        let lhs = lhs.into().check()?;
        let rhs = rhs.into().check()?;
        Ok(self.biop(kind, lhs, rhs))
    }

    pub fn pow<'a>(&'a self, lhs: impl IntoExpr<'a>, rhs: impl IntoExpr<'a>) -> Expr<'a> {
        self.biop(BiOpKind::Pow, lhs, rhs)
    }

    /// Borrows the arena for reading.
    ///
    /// # Panics
    ///
    /// Building new nodes while the returned guard is alive panics.
    pub fn arena(&self) -> std::cell::Ref<'_, ast::Arena> {
        self.arena.borrow()
    }

    pub fn len(&self) -> usize {
        self.arena.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_arena(self) -> ast::Arena {
        self.arena.into_inner()
    }
}

/// A node handle tied to the [`Builder`] that allocated it.
///
/// Equality is identity: two handles are equal only if they name the same node.
#[derive(Clone, Copy)]
pub struct Expr<'a> {
    builder: &'a Builder,
    id: ast::Id,
}

impl<'a> Expr<'a> {
    pub fn id(self) -> ast::Id {
        self.id
    }

    pub fn kind(self) -> NodeKind {
        self.builder.arena()[self.id].kind.clone()
    }

    pub fn pow(self, rhs: impl IntoExpr<'a>) -> Expr<'a> {
        self.builder.pow(self, rhs)
    }
}

impl PartialEq for Expr<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.builder, other.builder) && self.id == other.id
    }
}

impl Eq for Expr<'_> {}

impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display::infix(&self.builder.arena(), self.id))
    }
}

impl fmt::Debug for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display::structure(&self.builder.arena(), self.id))
    }
}

/// Anything usable as an operand of an operator node without a type check.
pub trait IntoExpr<'a> {
    fn into_expr(self, builder: &'a Builder) -> Expr<'a>;
}

impl<'a> IntoExpr<'a> for Expr<'a> {
    fn into_expr(self, builder: &'a Builder) -> Expr<'a> {
        assert!(
            std::ptr::eq(self.builder, builder),
            "operand belongs to a different builder"
        );
        self
    }
}

impl<'a> IntoExpr<'a> for i32 {
    fn into_expr(self, builder: &'a Builder) -> Expr<'a> {
        builder.int(self.into())
    }
}

impl<'a> IntoExpr<'a> for i64 {
    fn into_expr(self, builder: &'a Builder) -> Expr<'a> {
        builder.int(self)
    }
}

impl<'a> IntoExpr<'a> for f64 {
    fn into_expr(self, builder: &'a Builder) -> Expr<'a> {
        builder.float(self)
    }
}

/// An operand for [`Builder::try_biop`]: an existing node or a raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<'a> {
    Expr(Expr<'a>),
    Value(Value),
}

impl<'a> Operand<'a> {
    fn check(self) -> Result<Checked<'a>> {
        match self {
            Operand::Expr(e) => Ok(Checked::Expr(e)),
            Operand::Value(v) => v.into_lit().map(Checked::Lit),
        }
    }
}

impl<'a> From<Expr<'a>> for Operand<'a> {
    fn from(e: Expr<'a>) -> Self {
        Operand::Expr(e)
    }
}

macro_rules! impl_value_operand {
    ($($ty:ty),*) => {
        $(
            impl<'a> From<$ty> for Operand<'a> {
                fn from(v: $ty) -> Self {
                    Operand::Value(v.into())
                }
            }
        )*
    };
}

impl_value_operand!(Value, i32, i64, f64, &str, String);

enum Checked<'a> {
    Expr(Expr<'a>),
    Lit(LitKind),
}

impl<'a> IntoExpr<'a> for Checked<'a> {
    fn into_expr(self, builder: &'a Builder) -> Expr<'a> {
        match self {
            Checked::Expr(e) => e.into_expr(builder),
            Checked::Lit(lit) => builder.lit(lit),
        }
    }
}

macro_rules! impl_biop {
    ($trait:ident, $method:ident, $kind:ident) => {
        impl<'a, R: IntoExpr<'a>> ops::$trait<R> for Expr<'a> {
            type Output = Expr<'a>;

            fn $method(self, rhs: R) -> Expr<'a> {
                self.builder.biop(BiOpKind::$kind, self, rhs)
            }
        }

        // one integer type only, so unsuffixed literals on the left infer to it
        impl_biop!(@reversed $trait, $method, $kind, i32, f64);
    };
    (@reversed $trait:ident, $method:ident, $kind:ident, $($prim:ty),*) => {
        $(
            impl<'a> ops::$trait<Expr<'a>> for $prim {
                type Output = Expr<'a>;

                fn $method(self, rhs: Expr<'a>) -> Expr<'a> {
                    rhs.builder.biop(BiOpKind::$kind, self, rhs)
                }
            }
        )*
    };
}

impl_biop!(Add, add, Add);
impl_biop!(Sub, sub, Sub);
impl_biop!(Mul, mul, Mul);
impl_biop!(Div, div, Div);
