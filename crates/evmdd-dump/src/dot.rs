//! Builds the Graphviz/DOT text for an EVMDD: a root weight box, light-grey
//! ovals for branch nodes, a single sink rectangle, and `rank=same` groups
//! per level.
//!
//! Grounded directly in the reference `GraphvizWriter` (same node/edge/rank
//! templates, same `(node-index, level[, domain-index])` naming scheme).

use std::collections::HashMap;

use evmdd_core::{Edge, Manager, Node, NodeRef};

const SINK_NAME: &str = "\"sink\"";

fn var_node_name(index: usize, level: u32) -> String {
    format!("\"s{index}[level={level}]\"")
}

fn weight_node_name(index: usize, level: u32, domain_idx: u32) -> String {
    format!("\"s{index}[level={level}]={domain_idx}\"")
}

/// Render `edge`, rooted in `manager`, as a Graphviz/DOT digraph.
pub fn to_dot(manager: &Manager, edge: Edge) -> String {
    let mut nodes = manager.reachable_nodes(edge);
    nodes.sort_by_key(|n| manager.node_level(*n));
    let index: HashMap<Node, usize> = nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();

    let mut sink_used = manager.node_ref(edge).is_sink();
    let mut lines = vec!["digraph G {".to_string()];

    lines.push("dummyNode [style=invis];".to_string());
    lines.push(format!(
        "constantWeight [shape=box,height=0.25,width=0.5,label=\"{:+}\"];",
        manager.weight(edge)
    ));
    lines.push("dummyNode -> constantWeight [arrowhead=none, label=\"\"];".to_string());
    let root_succ_name = match manager.node_ref(edge) {
        NodeRef::Sink => SINK_NAME.to_string(),
        NodeRef::Branch(n) => var_node_name(index[&n], manager.node_level(n)),
    };
    lines.push(format!("constantWeight -> {root_succ_name};"));

    for &node in &nodes {
        let level = manager.node_level(node);
        let idx = index[&node];
        let name = var_node_name(idx, level);
        let var_name = manager
            .var_name_of(node)
            .expect("node came from reachable_nodes on this same manager");
        lines.push(format!(
            "{name} [style=filled,fillcolor=lightgrey,label=\"{var_name}\"];"
        ));

        for d in 0..manager.node_domain_size(node) {
            let child = manager.child(node, d);
            let w_name = weight_node_name(idx, level, d);
            lines.push(format!(
                "{w_name} [shape=box,height=0.25,width=0.5,label=\"{:+}\"];",
                manager.weight(child)
            ));
            lines.push(format!("{name} -> {w_name} [arrowhead=none, label=\"{d}\"];"));
            let succ_name = match manager.node_ref(child) {
                NodeRef::Sink => {
                    sink_used = true;
                    SINK_NAME.to_string()
                }
                NodeRef::Branch(c) => var_node_name(index[&c], manager.node_level(c)),
            };
            lines.push(format!("{w_name} -> {succ_name};"));
        }
    }

    if sink_used {
        lines.push(format!(
            "{SINK_NAME} [shape=box,height=0.25,width=0.5,rank=sink,label=\"0\"];"
        ));
    }

    let mut by_level: Vec<(u32, Vec<String>)> = Vec::new();
    if sink_used {
        by_level.push((0, vec![SINK_NAME.to_string()]));
    }
    for &node in &nodes {
        let level = manager.node_level(node);
        let name = var_node_name(index[&node], level);
        match by_level.last_mut() {
            Some((l, names)) if *l == level => names.push(name),
            _ => by_level.push((level, vec![name])),
        }
    }
    for (_, names) in &by_level {
        lines.push(format!("{{rank = same; {};}}", names.join(";")));
    }

    lines.push("}".to_string());
    lines.join("\n")
}
