//! The Apply engine: the classical recursive algorithm that lifts `+`, `-`,
//! `*` on integers to operators on EVMDDs, with terminal-case shortcuts,
//! level synchronization, weight normalization, and (in fully-reduced mode)
//! Shannon reduction.
//!
//! Grounded in `apply_rec_st.rs`'s `apply_bin`/`reduce` shape (terminal
//! dispatch, per-child recursion, a memo cache keyed by `(op, operands)`)
//! and in `original_source/evmdd/evmdd.py`'s `Edge._apply`, which this
//! module follows for the exact terminal-case and level-synchronization
//! semantics.

use crate::error::{EvmddError, Result};
use crate::manager::Manager;
use crate::table::{EdgeId, NodeId, NodeRepr, SINK};

/// The three binary operators Apply lifts to EVMDDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    Add,
    Sub,
    Mul,
}

impl Op {
    #[inline]
    fn aggregate(self, w1: i64, w2: i64) -> i64 {
        match self {
            Op::Add => w1 + w2,
            Op::Sub => w1 - w2,
            Op::Mul => w1 * w2,
        }
    }

    /// `+`/`*` are terminal whenever either operand is a sink edge; `-` is
    /// terminal only when the *right* operand is.
    #[inline]
    fn is_terminal(self, sink1: bool, sink2: bool) -> bool {
        match self {
            Op::Add | Op::Mul => sink1 || sink2,
            Op::Sub => sink2,
        }
    }

    /// `+` and `*` are commutative: canonicalizing operand order before
    /// the memo lookup improves the cache hit rate without changing the
    /// result. `-` must never be reordered.
    #[inline]
    fn is_commutative(self) -> bool {
        matches!(self, Op::Add | Op::Mul)
    }
}

/// Apply `op` to `e1 op e2`, returning the (interned, canonical) result
/// edge.
pub(crate) fn apply(manager: &mut Manager, op: Op, e1: EdgeId, e2: EdgeId) -> Result<EdgeId> {
    let (e1, e2) = if op.is_commutative() && e1 > e2 {
        (e2, e1)
    } else {
        (e1, e2)
    };

    if let Some(&cached) = manager.apply_cache.get(&(op, e1, e2)) {
        return Ok(cached);
    }

    let w1 = manager.edge_weight(e1);
    let w2 = manager.edge_weight(e2);
    let succ1 = manager.edge_succ(e1);
    let succ2 = manager.edge_succ(e2);
    let sink1 = succ1 == SINK;
    let sink2 = succ2 == SINK;

    log::trace!("apply {op:?} e1={e1} e2={e2} (terminal={})", op.is_terminal(sink1, sink2));

    let result = if op.is_terminal(sink1, sink2) {
        terminal(manager, op, w1, w2, sink1, succ1, succ2)?
    } else {
        recursive(manager, op, e1, e2)?
    };

    manager.apply_cache.insert((op, e1, e2), result);
    Ok(result)
}

/// Terminal cases: at least one operand is a constant, so the result can
/// be computed without recursing into the other operand's structure,
/// except for `*` against a non-constant branch, which scales that
/// branch's children.
fn terminal(
    manager: &mut Manager,
    op: Op,
    w1: i64,
    w2: i64,
    sink1: bool,
    succ1: NodeId,
    succ2: NodeId,
) -> Result<EdgeId> {
    let result_weight = op.aggregate(w1, w2);
    match op {
        Op::Add | Op::Sub => {
            // The constant side's subgraph is just the sink; the other
            // side's subgraph (possibly also the sink) is preserved as-is.
            let succ = if sink1 { succ2 } else { succ1 };
            Ok(manager.table.get_or_make_edge(result_weight, succ))
        }
        Op::Mul => {
            if succ1 == SINK && succ2 == SINK {
                return Ok(manager.table.get_or_make_edge(result_weight, SINK));
            }
            let (c, other_succ) = if sink1 { (w1, succ2) } else { (w2, succ1) };
            scale_branch(manager, c, other_succ, result_weight)
        }
    }
}

/// Scale every outgoing edge of the branch at `succ` by the constant `c`,
/// recursively, then renormalize and (in fully-reduced mode) Shannon-check
/// the result, folding in `outer_extra` (the part of the product
/// contributed by the constant side's own weight).
fn scale_branch(manager: &mut Manager, c: i64, succ: NodeId, outer_extra: i64) -> Result<EdgeId> {
    let (level, children) = match manager.table.node(succ) {
        NodeRepr::Branch { level, children } => (*level, children.clone()),
        NodeRepr::Sink => {
            return Err(EvmddError::InvariantViolation(
                "scale_branch called on the sink".to_string(),
            ))
        }
    };

    let c_edge = manager.table.get_or_make_edge(c, SINK);
    let mut scaled = Vec::with_capacity(children.len());
    for &child in children.iter() {
        scaled.push(apply(manager, Op::Mul, c_edge, child)?);
    }

    let inner = make_branch(manager, level, scaled)?;
    let inner_repr = manager.table.edge(inner);
    Ok(manager
        .table
        .get_or_make_edge(outer_extra + inner_repr.weight, inner_repr.succ))
}

/// The recursive case: synchronize both operands to the top-most level,
/// recurse per child, then normalize.
fn recursive(manager: &mut Manager, op: Op, e1: EdgeId, e2: EdgeId) -> Result<EdgeId> {
    let succ1 = manager.edge_succ(e1);
    let succ2 = manager.edge_succ(e2);
    let level = manager.table.node_level(succ1).max(manager.table.node_level(succ2));

    let domain_size = manager.domain_size(level).map_err(|_| {
        EvmddError::InvariantViolation(format!("no variable declared at level {level}"))
    })? as usize;

    let children1 = operand_children(manager, e1, level, domain_size);
    let children2 = operand_children(manager, e2, level, domain_size);

    let mut result_children = Vec::with_capacity(domain_size);
    for i in 0..domain_size {
        result_children.push(apply(manager, op, children1[i], children2[i])?);
    }

    make_branch(manager, level, result_children)
}

/// Produce `e`'s children as seen from `level`: if `e`'s own top node is
/// exactly at `level`, its real children (with `e`'s weight pushed down);
/// otherwise (its top is strictly below `level`) `domain_size` copies of
/// `e` itself, implicitly broadcasting it across the skipped level.
fn operand_children(manager: &mut Manager, e: EdgeId, level: u32, domain_size: usize) -> Vec<EdgeId> {
    let succ = manager.edge_succ(e);
    let succ_level = manager.table.node_level(succ);
    if succ_level == level {
        let w = manager.edge_weight(e);
        let raw: Vec<(i64, NodeId)> = match manager.table.node(succ) {
            NodeRepr::Branch { children, .. } => children
                .iter()
                .map(|&c| {
                    let ce = manager.table.edge(c);
                    (ce.weight + w, ce.succ)
                })
                .collect(),
            NodeRepr::Sink => unreachable!("sink has level 0, level is at least 1 here"),
        };
        raw.into_iter()
            .map(|(weight, succ)| manager.table.get_or_make_edge(weight, succ))
            .collect()
    } else {
        debug_assert!(succ_level < level);
        vec![e; domain_size]
    }
}

/// Intern a branch node at `level` with the given (not yet normalized)
/// `children`, normalizing weights so the minimum outgoing edge is zero
/// and, in fully-reduced mode, collapsing the node away if every child now
/// agrees. Always returns an edge, never a bare node, because weight
/// normalization lifts an offset out of the node.
pub(crate) fn make_branch(manager: &mut Manager, level: u32, children: Vec<EdgeId>) -> Result<EdgeId> {
    if children.is_empty() {
        return Err(EvmddError::InvariantViolation(
            "attempted to build a branch node with no children".to_string(),
        ));
    }

    let min_weight = children
        .iter()
        .map(|&c| manager.edge_weight(c))
        .min()
        .expect("non-empty children");

    let normalized: Vec<EdgeId> = children
        .iter()
        .map(|&c| {
            let ce = manager.table.edge(c);
            manager.table.get_or_make_edge(ce.weight - min_weight, ce.succ)
        })
        .collect();

    if manager.mode().is_fully_reduced() {
        let first = manager.table.edge(normalized[0]);
        let all_same = normalized.iter().all(|&c| {
            let ce = manager.table.edge(c);
            ce.weight == 0 && ce.succ == first.succ
        });
        if all_same {
            return Ok(manager.table.get_or_make_edge(min_weight, first.succ));
        }
    }

    let node = manager
        .table
        .get_or_make_node(level, normalized.into_boxed_slice());
    Ok(manager.table.get_or_make_edge(min_weight, node))
}
