// SPDX-License-Identifier: Unlicense
use std::sync::Arc;

/// Precedence of terminals, which never need parentheses.
pub const TERMINAL_PRECEDENCE: u8 = u8::MAX;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LitKind {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BiOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BiOpKind {
    /// Binding strength of the operator; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            BiOpKind::Add | BiOpKind::Sub => 1,
            BiOpKind::Mul | BiOpKind::Div => 2,
            BiOpKind::Pow => 3,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            BiOpKind::Add => "+",
            BiOpKind::Sub => "-",
            BiOpKind::Mul => "*",
            BiOpKind::Div => "/",
            BiOpKind::Pow => "^",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BiOpKind::Add => "Add",
            BiOpKind::Sub => "Sub",
            BiOpKind::Mul => "Mul",
            BiOpKind::Div => "Div",
            BiOpKind::Pow => "Pow",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Lit(LitKind),
    Symbol(Arc<str>),
    /// Operands are stored as `[lhs, rhs]`.
    BiOp(BiOpKind, [Id; 2]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
}

impl Node {
    /// The ordered children of this node: empty for terminals, `[lhs, rhs]` for operators.
    pub fn operands(&self) -> &[Id] {
        match &self.kind {
            NodeKind::BiOp(_, operands) => operands.as_slice(),
            NodeKind::Lit(_) | NodeKind::Symbol(_) => &[],
        }
    }

    pub fn precedence(&self) -> u8 {
        match &self.kind {
            NodeKind::BiOp(kind, _) => kind.precedence(),
            NodeKind::Lit(_) | NodeKind::Symbol(_) => TERMINAL_PRECEDENCE,
        }
    }
}

pub type Id = id_arena::Id<Node>;
pub type Arena = id_arena::Arena<Node>;
