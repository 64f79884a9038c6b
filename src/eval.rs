// SPDX-License-Identifier: Unlicense
use crate::{
    ast::{Arena, BiOpKind, Id, LitKind, NodeKind},
    error::{Error, Result},
    visit,
};
use std::collections::HashMap;

/// Evaluates the expression rooted at `root` in floating point.
///
/// Symbols are looked up in `bindings`; a symbol without a binding fails with
/// [`Error::UnboundSymbol`] rather than defaulting to any value.
pub fn evaluate(arena: &Arena, root: Id, bindings: &HashMap<String, f64>) -> Result<f64> {
    visit::postvisit_with(arena, root, bindings, |_, node, operands, bindings| {
        match &node.kind {
            &NodeKind::Lit(LitKind::Int(i)) => Ok(i as f64),
            &NodeKind::Lit(LitKind::Float(x)) => Ok(x),
            NodeKind::Symbol(name) => bindings
                .get(&**name)
                .copied()
                .ok_or_else(|| Error::UnboundSymbol(name.to_string())),
            NodeKind::BiOp(kind, _) => {
                let (lhs, rhs): (f64, f64) = (*operands[0], *operands[1]);
                Ok(match kind {
                    BiOpKind::Add => lhs + rhs,
                    BiOpKind::Sub => lhs - rhs,
                    BiOpKind::Mul => lhs * rhs,
                    BiOpKind::Div => lhs / rhs,
                    BiOpKind::Pow => lhs.powf(rhs),
                })
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    fn bind(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|&(k, v)| (k.to_owned(), v)).collect()
    }

    #[test]
    fn evaluates_numbers() -> anyhow::Result<()> {
        let b = Builder::new();
        let root = (b.int(2) + b.int(3) * b.int(4)).id();
        let arena = b.into_arena();

        assert_eq!(evaluate(&arena, root, &HashMap::new())?, 14.0);
        Ok(())
    }

    #[test]
    fn evaluates_bound_symbols() -> anyhow::Result<()> {
        let b = Builder::new();
        let (x, y) = (b.sym("x"), b.sym("y"));
        let root = ((x - 1).pow(2) / y + 0.5).id();
        let arena = b.into_arena();

        let value = evaluate(&arena, root, &bind(&[("x", 4.0), ("y", 3.0)]))?;
        assert_eq!(value, 3.5);
        Ok(())
    }

    #[test]
    fn non_commutative_operands_keep_their_order() -> anyhow::Result<()> {
        let b = Builder::new();
        let x = b.sym("x");
        let (sub, div, pow) = ((10 - x).id(), (1.0 / x).id(), b.pow(2, x).id());
        let arena = b.into_arena();
        let env = bind(&[("x", 4.0)]);

        assert_eq!(evaluate(&arena, sub, &env)?, 6.0);
        assert_eq!(evaluate(&arena, div, &env)?, 0.25);
        assert_eq!(evaluate(&arena, pow, &env)?, 16.0);
        Ok(())
    }

    #[test]
    fn unbound_symbols_are_reported() {
        let b = Builder::new();
        let root = (b.int(1) + b.sym("x") * b.sym("y")).id();
        let arena = b.into_arena();

        let err = evaluate(&arena, root, &bind(&[("y", 2.0)])).unwrap_err();
        assert_eq!(err, Error::UnboundSymbol("x".to_owned()));
        assert_eq!(err.to_string(), "no value bound to symbol `x`");
    }
}
