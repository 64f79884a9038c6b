// SPDX-License-Identifier: Unlicense
//! Textual renderings of expression graphs.
//!
//! Both renderings walk the graph with an explicit stack, so they handle the same
//! nesting depths as [`crate::visit::postvisit`]. Shared sub-nodes are written out
//! once per occurrence.
use crate::ast::{Arena, BiOpKind, Id, LitKind, NodeKind};
use std::fmt;

enum Step {
    Node(Id),
    Op(BiOpKind),
    Text(&'static str),
}

impl fmt::Display for LitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LitKind::Int(i) => write!(f, "{i}"),
            // `{:?}` keeps the fractional part, e.g. `2.0`
            LitKind::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// Displays a node in infix notation, e.g. `(x + y) * z`
pub struct Infix<'a> {
    arena: &'a Arena,
    root: Id,
}

pub fn infix(arena: &Arena, root: Id) -> Infix<'_> {
    Infix { arena, root }
}

impl Infix<'_> {
    /// An operand is parenthesized iff it binds strictly looser than its parent.
    fn push_operand(&self, stack: &mut Vec<Step>, operand: Id, parent_precedence: u8) {
        if self.arena[operand].precedence() < parent_precedence {
            stack.push(Step::Text(")"));
            stack.push(Step::Node(operand));
            stack.push(Step::Text("("));
        } else {
            stack.push(Step::Node(operand));
        }
    }
}

impl fmt::Display for Infix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Step::Node(self.root)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Text(text) => f.write_str(text)?,
                Step::Op(kind) => write!(f, " {} ", kind.symbol())?,
                Step::Node(id) => match &self.arena[id].kind {
                    NodeKind::Lit(lit) => write!(f, "{lit}")?,
                    NodeKind::Symbol(name) => f.write_str(name)?,
                    NodeKind::BiOp(kind, [lhs, rhs]) => {
                        let precedence = kind.precedence();
                        self.push_operand(&mut stack, *rhs, precedence);
                        stack.push(Step::Op(*kind));
                        self.push_operand(&mut stack, *lhs, precedence);
                    }
                },
            }
        }
        Ok(())
    }
}

/// Displays a node as its kind and explicit operand list, e.g. `Mul(Add("x", "y"), 2)`
pub struct Structure<'a> {
    arena: &'a Arena,
    root: Id,
}

pub fn structure(arena: &Arena, root: Id) -> Structure<'_> {
    Structure { arena, root }
}

impl fmt::Display for Structure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Step::Node(self.root)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Text(text) => f.write_str(text)?,
                Step::Op(kind) => write!(f, "{}(", kind.name())?,
                Step::Node(id) => match &self.arena[id].kind {
                    NodeKind::Lit(lit) => write!(f, "{lit}")?,
                    NodeKind::Symbol(name) => write!(f, "{name:?}")?,
                    NodeKind::BiOp(kind, [lhs, rhs]) => {
                        stack.push(Step::Text(")"));
                        stack.push(Step::Node(*rhs));
                        stack.push(Step::Text(", "));
                        stack.push(Step::Node(*lhs));
                        stack.push(Step::Op(*kind));
                    }
                },
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use pretty_assertions::assert_eq;

    #[test]
    fn looser_operands_are_parenthesized() {
        let b = Builder::new();
        let (x, y, z) = (b.sym("x"), b.sym("y"), b.sym("z"));

        assert_eq!(((x + y) * z).to_string(), "(x + y) * z");
        assert_eq!((x * y + z).to_string(), "x * y + z");
        assert_eq!((x * (y + z)).to_string(), "x * (y + z)");
        assert_eq!((x - y / z).to_string(), "x - y / z");
    }

    #[test]
    fn power_follows_the_strictly_lower_rule() {
        let b = Builder::new();
        let (x, y, z) = (b.sym("x"), b.sym("y"), b.sym("z"));
        let right = x.pow(y.pow(z));
        let left = x.pow(y).pow(z);

        // equal precedence is never parenthesized, so both groupings print alike
        assert_eq!(right.to_string(), "x ^ y ^ z");
        assert_eq!(left.to_string(), "x ^ y ^ z");
        assert_eq!(format!("{right:?}"), r#"Pow("x", Pow("y", "z"))"#);
        assert_eq!(format!("{left:?}"), r#"Pow(Pow("x", "y"), "z")"#);
    }

    #[test]
    fn equal_precedence_is_not_parenthesized() {
        let b = Builder::new();
        let (x, y, z) = (b.sym("x"), b.sym("y"), b.sym("z"));

        // only strictly lower precedence gets parentheses
        assert_eq!((x - (y - z)).to_string(), "x - y - z");
        assert_eq!((x / (y * z)).to_string(), "x / y * z");
    }

    #[test]
    fn literals_render_plainly() {
        let b = Builder::new();
        assert_eq!((b.sym("x") + 2.0).to_string(), "x + 2.0");
        assert_eq!((3 - b.sym("x") * 0.5).to_string(), "3 - x * 0.5");
        assert_eq!(b.int(-4).to_string(), "-4");
        assert_eq!(b.float(1e20).to_string(), "1e20");
    }

    #[test]
    fn structure_shows_kinds_and_operands() {
        let b = Builder::new();
        let (x, y) = (b.sym("x"), b.sym("y"));

        assert_eq!(format!("{:?}", (x + y) * 2), r#"Mul(Add("x", "y"), 2)"#);
        assert_eq!(format!("{:?}", b.pow(2.5, x - 1)), r#"Pow(2.5, Sub("x", 1))"#);
        assert_eq!(format!("{:?}", x), r#""x""#);
    }

    #[test]
    fn shared_operands_render_at_each_use() {
        let b = Builder::new();
        let s = b.sym("a") + 1;
        let root = (s * s).id();
        let arena = b.into_arena();

        assert_eq!(infix(&arena, root).to_string(), "(a + 1) * (a + 1)");
        assert_eq!(
            structure(&arena, root).to_string(),
            r#"Mul(Add("a", 1), Add("a", 1))"#
        );
    }

    #[test]
    fn deep_chains_render_without_recursion() {
        const DEPTH: usize = 50_000;
        let b = Builder::new();
        let mut root = b.int(1);
        for _ in 1..DEPTH {
            root = b.int(1) + root;
        }
        let text = root.to_string();
        assert_eq!(text.matches('+').count(), DEPTH - 1);
        assert!(!text.contains('('));
    }
}
