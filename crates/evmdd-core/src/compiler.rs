//! The term compiler: turns an arithmetic term into an EVMDD.
//!
//! Grounded in `original_source/evmdd/parse.py`'s `term_to_evmdd`, which
//! performs the same five steps: parse, collect free variables, resolve the
//! variable ordering, resolve domain sizes, then compile the expression tree
//! recursively through a freshly constructed manager.

use std::collections::BTreeSet;

use crate::error::{EvmddError, Result};
use crate::manager::Manager;
use crate::mode::Mode;
use crate::node::Edge;
use crate::parser::{self, Expr};

/// Optional inputs to [`term_to_evmdd`]. Anything left `None` is defaulted:
/// variable ordering to lexicographic order over the term's free variables,
/// domain sizes to 2, mode to fully reduced.
#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
    /// Explicit variable ordering, root-to-sink. Must be a superset of the
    /// term's free variables; defaults to their lexicographic order.
    pub var_names: Option<Vec<String>>,
    /// Per-variable domain sizes, matching `var_names` positionally.
    /// Defaults to 2 for every variable.
    pub var_domains: Option<Vec<u32>>,
    /// Reduction mode; defaults to fully reduced.
    pub mode: Option<Mode>,
}

fn free_variables(expr: &Expr, out: &mut BTreeSet<String>) {
    match expr {
        Expr::Const(_) => {}
        Expr::Var(name) => {
            out.insert(name.clone());
        }
        Expr::Add(l, r) | Expr::Sub(l, r) | Expr::Mul(l, r) => {
            free_variables(l, out);
            free_variables(r, out);
        }
        Expr::Neg(e) => free_variables(e, out),
    }
}

fn compile_expr(manager: &mut Manager, expr: &Expr) -> Result<Edge> {
    match expr {
        Expr::Const(k) => Ok(manager.const_edge(*k)),
        Expr::Var(name) => manager.var_edge(name),
        Expr::Add(l, r) => {
            let l = compile_expr(manager, l)?;
            let r = compile_expr(manager, r)?;
            manager.add(l, r)
        }
        Expr::Sub(l, r) => {
            let l = compile_expr(manager, l)?;
            let r = compile_expr(manager, r)?;
            manager.sub(l, r)
        }
        Expr::Mul(l, r) => {
            let l = compile_expr(manager, l)?;
            let r = compile_expr(manager, r)?;
            manager.mul(l, r)
        }
        Expr::Neg(e) => {
            let e = compile_expr(manager, e)?;
            manager.neg(e)
        }
    }
}

/// Parse `term`, resolve its variable ordering and domain sizes, and
/// compile it into an EVMDD over a freshly constructed manager.
pub fn term_to_evmdd(term: &str, opts: CompileOptions) -> Result<(Edge, Manager)> {
    let expr = parser::parse(term)?;

    let mut free_vars = BTreeSet::new();
    free_variables(&expr, &mut free_vars);

    let var_names = match opts.var_names {
        Some(names) => {
            let given: BTreeSet<&str> = names.iter().map(String::as_str).collect();
            if let Some(missing) = free_vars.iter().find(|v| !given.contains(v.as_str())) {
                return Err(EvmddError::UnknownVariable(missing.clone()));
            }
            names
        }
        None => free_vars.into_iter().collect(),
    };

    let var_domains = match opts.var_domains {
        Some(domains) => {
            if domains.len() != var_names.len() {
                return Err(EvmddError::DomainMismatch(format!(
                    "{} variables but {} domain sizes",
                    var_names.len(),
                    domains.len()
                )));
            }
            domains
        }
        None => vec![2; var_names.len()],
    };

    let mode = opts.mode.unwrap_or(Mode::FullyReduced);

    let mut manager = Manager::new(var_names, var_domains, mode)?;
    let edge = compile_expr(&mut manager, &expr)?;
    Ok((edge, manager))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_ordering_lexicographically_and_domain_to_two() {
        let (_, manager) = term_to_evmdd("b + a", CompileOptions::default()).unwrap();
        assert_eq!(manager.var_names(), &["a".to_string(), "b".to_string()]);
        assert_eq!(manager.var_domains(), &[2, 2]);
    }

    #[test]
    fn honors_explicit_ordering_and_domains() {
        let opts = CompileOptions {
            var_names: Some(vec!["b".to_string(), "a".to_string()]),
            var_domains: Some(vec![3, 4]),
            mode: None,
        };
        let (_, manager) = term_to_evmdd("a + b", opts).unwrap();
        assert_eq!(manager.var_names(), &["b".to_string(), "a".to_string()]);
        assert_eq!(manager.var_domains(), &[3, 4]);
    }

    #[test]
    fn rejects_explicit_ordering_missing_a_free_variable() {
        let opts = CompileOptions {
            var_names: Some(vec!["a".to_string()]),
            var_domains: None,
            mode: None,
        };
        let err = term_to_evmdd("a + c", opts).unwrap_err();
        assert_eq!(err, EvmddError::UnknownVariable("c".to_string()));
    }

    #[test]
    fn rejects_mismatched_domain_count() {
        let opts = CompileOptions {
            var_names: Some(vec!["a".to_string(), "b".to_string()]),
            var_domains: Some(vec![2]),
            mode: None,
        };
        assert!(term_to_evmdd("a + b", opts).is_err());
    }

    #[test]
    fn rejects_illegal_expressions() {
        assert!(term_to_evmdd("a / b", CompileOptions::default()).is_err());
    }
}
