// SPDX-License-Identifier: Unlicense
//! Arithmetic expressions as arena-allocated DAGs, folded with a memoized postorder visitor.
//!
//! ```
//! use exprdag::{builder::Builder, eval};
//! use std::collections::HashMap;
//!
//! let b = Builder::new();
//! let x = b.sym("x");
//! let s = x + 1;
//! let root = s * s;
//! assert_eq!(root.to_string(), "(x + 1) * (x + 1)");
//!
//! let root = root.id();
//! let arena = b.into_arena();
//! let bindings = HashMap::from([("x".to_owned(), 2.0)]);
//! assert_eq!(eval::evaluate(&arena, root, &bindings), Ok(9.0));
//! ```
pub mod ast;
pub mod builder;
pub mod display;
pub mod error;
pub mod eval;
pub mod visit;

pub use error::Error;
