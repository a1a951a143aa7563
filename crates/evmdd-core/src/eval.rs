//! Evaluates an EVMDD under a total variable assignment.

use std::collections::HashMap;

use crate::error::{EvmddError, Result};
use crate::manager::Manager;
use crate::node::{Edge, NodeRef};

/// Evaluate `edge` under `assignment`, returning the function's value.
///
/// `assignment` must supply a value for every variable reachable on the
/// path the assignment selects; a missing one is [`EvmddError::MissingValue`],
/// an out-of-range one is [`EvmddError::OutOfDomain`].
pub fn evaluate(manager: &Manager, edge: Edge, assignment: &HashMap<String, i64>) -> Result<i64> {
    let mut acc = manager.weight(edge);
    let mut cur = manager.node_ref(edge);

    while let NodeRef::Branch(node) = cur {
        let var_name = manager.var_name_of(node)?;
        let value = *assignment
            .get(var_name)
            .ok_or_else(|| EvmddError::MissingValue(var_name.to_string()))?;
        let domain_size = manager.node_domain_size(node);
        if value < 0 || value as u32 >= domain_size {
            return Err(EvmddError::OutOfDomain {
                var: var_name.to_string(),
                value,
                domain_size,
            });
        }
        let child = manager.child(node, value as u32);
        acc += manager.weight(child);
        cur = manager.node_ref(child);
    }

    Ok(acc)
}
