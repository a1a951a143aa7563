//! The manager: binds variable names, levels, and domain sizes for one
//! diagram family, and owns the unique table and Apply memo cache.

use rustc_hash::FxHashMap;

use crate::apply::Op;
use crate::error::{EvmddError, Result};
use crate::mode::Mode;
use crate::node::{Edge, Node, NodeRef};
use crate::table::{EdgeId, NodeId, NodeRepr, UniqueTable, SINK};

/// Owns one diagram family: the variable ordering, domain sizes, reduction
/// mode, unique table, and Apply memo cache.
///
/// A manager never exposes mutation of its variable list; to
/// change variables, construct a new manager.
pub struct Manager {
    var_names: Vec<String>,
    var_domains: Vec<u32>,
    name_to_index: FxHashMap<String, usize>,
    mode: Mode,
    pub(crate) table: UniqueTable,
    pub(crate) apply_cache: FxHashMap<(Op, EdgeId, EdgeId), EdgeId>,
}

impl Manager {
    /// Construct a manager over `var_names` (in root-to-sink order) with
    /// matching `var_domains` (domain *sizes*, not domains themselves).
    pub fn new(var_names: Vec<String>, var_domains: Vec<u32>, mode: Mode) -> Result<Self> {
        if var_names.len() != var_domains.len() {
            return Err(EvmddError::DomainMismatch(format!(
                "{} variable names but {} domain sizes",
                var_names.len(),
                var_domains.len()
            )));
        }
        if let Some(bad) = var_domains.iter().position(|&d| d == 0) {
            return Err(EvmddError::DomainMismatch(format!(
                "variable `{}` has a non-positive domain size",
                var_names[bad]
            )));
        }
        let mut name_to_index = FxHashMap::default();
        for (i, name) in var_names.iter().enumerate() {
            name_to_index.insert(name.clone(), i);
        }
        log::debug!(
            "creating manager with {} variables, mode={:?}",
            var_names.len(),
            mode
        );
        Ok(Manager {
            var_names,
            var_domains,
            name_to_index,
            mode,
            table: UniqueTable::new(),
            apply_cache: FxHashMap::default(),
        })
    }

    /// The reduction mode fixed at construction.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The variable ordering, root-to-sink.
    #[inline]
    pub fn var_names(&self) -> &[String] {
        &self.var_names
    }

    /// Domain sizes, positionally matching [`Manager::var_names`].
    #[inline]
    pub fn var_domains(&self) -> &[u32] {
        &self.var_domains
    }

    /// The number of declared variables, `n`.
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.var_names.len()
    }

    /// `level_of(name) = n - index(name)`.
    pub fn level_of(&self, name: &str) -> Result<u32> {
        let n = self.var_names.len();
        let idx = *self
            .name_to_index
            .get(name)
            .ok_or_else(|| EvmddError::UnknownVariable(name.to_string()))?;
        Ok((n - idx) as u32)
    }

    /// `domain_size(level)` for `level` in `[1, n]`.
    pub fn domain_size(&self, level: u32) -> Result<u32> {
        let n = self.var_names.len() as u32;
        if level < 1 || level > n {
            return Err(EvmddError::InvariantViolation(format!(
                "level {level} out of range [1, {n}]"
            )));
        }
        Ok(self.var_domains[(n - level) as usize])
    }

    /// The variable name at `level`, for `level` in `[1, n]`.
    fn level_to_var_name(&self, level: u32) -> Result<&str> {
        let n = self.var_names.len() as u32;
        if level < 1 || level > n {
            return Err(EvmddError::InvariantViolation(format!(
                "level {level} out of range [1, {n}]"
            )));
        }
        Ok(&self.var_names[(n - level) as usize])
    }

    /// The variable name associated with a branch node's level.
    pub fn var_name_of(&self, node: Node) -> Result<&str> {
        self.level_to_var_name(self.node_level(node))
    }

    // --- Constructors ------------------------------------------------

    /// An EVMDD representing the constant function `k`.
    pub fn const_edge(&mut self, k: i64) -> Edge {
        Edge(self.table.get_or_make_edge(k, SINK))
    }

    /// An EVMDD representing the variable `name`, per its declared domain.
    ///
    /// Fails with [`EvmddError::UnknownVariable`] if `name` is not
    /// registered.
    pub fn var_edge(&mut self, name: &str) -> Result<Edge> {
        let level = self.level_of(name)?;
        let domain_size = self.domain_size(level)?;
        let children: Vec<EdgeId> = (0..domain_size as i64)
            .map(|d| self.table.get_or_make_edge(d, SINK))
            .collect();
        let node = self
            .table
            .get_or_make_node(level, children.into_boxed_slice());
        Ok(Edge(self.table.get_or_make_edge(0, node)))
    }

    // --- Accessors -----------------------------------------------------

    /// The weight carried on `e` itself (not its successor's).
    #[inline]
    pub fn weight(&self, e: Edge) -> i64 {
        self.table.edge(e.0).weight
    }

    /// What `e` points to: the sink, or a branch node.
    #[inline]
    pub fn node_ref(&self, e: Edge) -> NodeRef {
        self.node_ref_of(self.table.edge(e.0).succ)
    }

    fn node_ref_of(&self, id: NodeId) -> NodeRef {
        if id == SINK {
            NodeRef::Sink
        } else {
            NodeRef::Branch(Node(id))
        }
    }

    /// The level of a branch node (its variable's `level_of`).
    #[inline]
    pub fn node_level(&self, n: Node) -> u32 {
        self.table.node_level(n.0)
    }

    /// Number of outgoing edges of a branch node (its variable's domain
    /// size).
    pub fn node_domain_size(&self, n: Node) -> u32 {
        match self.table.node(n.0) {
            NodeRepr::Branch { children, .. } => children.len() as u32,
            NodeRepr::Sink => 0,
        }
    }

    /// The `i`-th outgoing edge of a branch node.
    pub fn child(&self, n: Node, i: u32) -> Edge {
        match self.table.node(n.0) {
            NodeRepr::Branch { children, .. } => Edge(children[i as usize]),
            NodeRepr::Sink => unreachable!("sink has no children"),
        }
    }

    /// All children of a branch node, in domain-value order.
    pub fn children(&self, n: Node) -> Vec<Edge> {
        match self.table.node(n.0) {
            NodeRepr::Branch { children, .. } => children.iter().map(|&e| Edge(e)).collect(),
            NodeRepr::Sink => Vec::new(),
        }
    }

    /// All nodes reachable from `e`, including the sink if reached,
    /// without duplicates. Used by the Graphviz emitter.
    pub fn reachable_nodes(&self, e: Edge) -> Vec<Node> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        let mut stack = vec![self.table.edge(e.0).succ];
        while let Some(id) = stack.pop() {
            if id == SINK || !seen.insert(id) {
                continue;
            }
            out.push(Node(id));
            if let NodeRepr::Branch { children, .. } = self.table.node(id) {
                for &c in children.iter() {
                    stack.push(self.table.edge(c).succ);
                }
            }
        }
        out
    }

    pub(crate) fn edge_succ(&self, e: EdgeId) -> NodeId {
        self.table.edge(e).succ
    }

    pub(crate) fn edge_weight(&self, e: EdgeId) -> i64 {
        self.table.edge(e).weight
    }

    /// Number of distinct interned nodes (including the sink).
    pub fn node_count(&self) -> usize {
        self.table.node_count()
    }

    /// Number of distinct interned edges.
    pub fn edge_count(&self) -> usize {
        self.table.edge_count()
    }

    // --- Arithmetic ------------------------------------------------------

    /// The EVMDD for `a + b`, via Apply.
    pub fn add(&mut self, a: Edge, b: Edge) -> Result<Edge> {
        crate::apply::apply(self, Op::Add, a.0, b.0).map(Edge)
    }

    /// The EVMDD for `a - b`, via Apply.
    pub fn sub(&mut self, a: Edge, b: Edge) -> Result<Edge> {
        crate::apply::apply(self, Op::Sub, a.0, b.0).map(Edge)
    }

    /// The EVMDD for `a * b`, via Apply.
    pub fn mul(&mut self, a: Edge, b: Edge) -> Result<Edge> {
        crate::apply::apply(self, Op::Mul, a.0, b.0).map(Edge)
    }

    /// The EVMDD for `-a`, defined as `0 - a`.
    pub fn neg(&mut self, a: Edge) -> Result<Edge> {
        let zero = self.const_edge(0);
        self.sub(zero, a)
    }

    /// The EVMDD for `a ** k`. Fails with [`EvmddError::NegativeExponent`]
    /// if `k` is negative.
    pub fn pow(&mut self, a: Edge, k: i64) -> Result<Edge> {
        if k < 0 {
            return Err(EvmddError::NegativeExponent(k));
        }
        if k == 0 {
            return Ok(self.const_edge(1));
        }
        let rest = self.pow(a, k - 1)?;
        self.mul(a, rest)
    }
}
