// SPDX-License-Identifier: Unlicense
//! Memoized postorder traversal over an expression graph.
//!
//! The traversal is driven by an explicit work stack rather than native recursion, so
//! arbitrarily deep expressions can be folded. Results are memoized by node [`Id`], so a
//! node reachable through several parents is combined exactly once.
//!
//! Graphs built through [`crate::builder::Builder`] are acyclic: every operand is
//! allocated before the operator that refers to it. A cyclic graph would never become
//! ready and is outside the contract of this module.
use crate::ast::{Arena, Id, Node};
use std::collections::HashMap;

/// Folds `f` over the graph rooted at `root` in postorder.
///
/// `f` receives the node's id, the node itself and the results already computed for
/// its operands, in operand order. The first error returned by `f` aborts the
/// traversal and is returned unchanged.
///
/// # Panics
///
/// Panics if `root` or any reachable operand does not belong to `arena`.
pub fn postvisit<R, E, F>(arena: &Arena, root: Id, mut f: F) -> Result<R, E>
where
    F: FnMut(Id, &Node, &[&R]) -> Result<R, E>,
{
    postvisit_with(arena, root, &(), |id, node, operands, _| f(id, node, operands))
}

/// Like [`postvisit`], but threads `aux` unchanged into every call of `f`.
pub fn postvisit_with<A, R, E, F>(arena: &Arena, root: Id, aux: &A, mut f: F) -> Result<R, E>
where
    A: ?Sized,
    F: FnMut(Id, &Node, &[&R], &A) -> Result<R, E>,
{
    let mut visited: HashMap<Id, R> = HashMap::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if visited.contains_key(&id) {
            // already reached through another parent
            continue;
        }

        let node = &arena[id];
        let operands = node.operands();
        debug_assert!(
            operands.iter().all(|operand| operand.index() < id.index()),
            "operand allocated after its parent"
        );

        if operands.iter().all(|operand| visited.contains_key(operand)) {
            let value = {
                let results: Vec<&R> = operands.iter().map(|operand| &visited[operand]).collect();
                f(id, node, &results, aux)?
            };
            log::trace!("combined node {}", id.index());

            if id == root {
                debug_assert!(stack.is_empty());
                log::debug!("postvisit combined {} distinct nodes", visited.len() + 1);
                return Ok(value);
            }
            visited.insert(id, value);
        } else {
            stack.push(id);
            stack.extend(
                operands
                    .iter()
                    .rev()
                    .filter(|operand| !visited.contains_key(*operand)),
            );
        }
    }

    unreachable!("the root is always combined before the work stack drains")
}
