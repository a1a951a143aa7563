//! Algebraic laws (commutativity, associativity, distributivity, additive
//! and multiplicative identities, mode equivalence, and the `pow` law)
//! exercised over randomly generated small arithmetic expressions, via
//! `proptest`.

use std::collections::HashMap;

use evmdd_core::{evaluate, Edge, Manager, Mode};
use proptest::prelude::*;

const VAR_NAMES: [&str; 3] = ["A", "B", "C"];
const DOMAIN_SIZE: u32 = 4;

#[derive(Clone, Debug)]
enum Expr {
    Const(i64),
    Var(usize),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (-3i64..=3).prop_map(Expr::Const),
        (0usize..VAR_NAMES.len()).prop_map(Expr::Var),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Expr::Add(Box::new(l), Box::new(r))),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Expr::Sub(Box::new(l), Box::new(r))),
            (inner.clone(), inner).prop_map(|(l, r)| Expr::Mul(Box::new(l), Box::new(r))),
        ]
    })
}

fn eval_ref(e: &Expr, vals: &[i64; 3]) -> i64 {
    match e {
        Expr::Const(k) => *k,
        Expr::Var(i) => vals[*i],
        Expr::Add(l, r) => eval_ref(l, vals) + eval_ref(r, vals),
        Expr::Sub(l, r) => eval_ref(l, vals) - eval_ref(r, vals),
        Expr::Mul(l, r) => eval_ref(l, vals) * eval_ref(r, vals),
    }
}

fn compile(manager: &mut Manager, e: &Expr) -> Edge {
    match e {
        Expr::Const(k) => manager.const_edge(*k),
        Expr::Var(i) => manager.var_edge(VAR_NAMES[*i]).unwrap(),
        Expr::Add(l, r) => {
            let l = compile(manager, l);
            let r = compile(manager, r);
            manager.add(l, r).unwrap()
        }
        Expr::Sub(l, r) => {
            let l = compile(manager, l);
            let r = compile(manager, r);
            manager.sub(l, r).unwrap()
        }
        Expr::Mul(l, r) => {
            let l = compile(manager, l);
            let r = compile(manager, r);
            manager.mul(l, r).unwrap()
        }
    }
}

fn fresh_manager(mode: Mode) -> Manager {
    Manager::new(
        VAR_NAMES.iter().map(|s| s.to_string()).collect(),
        vec![DOMAIN_SIZE; VAR_NAMES.len()],
        mode,
    )
    .unwrap()
}

fn assignment_map(vals: &[i64; 3]) -> HashMap<String, i64> {
    VAR_NAMES
        .iter()
        .zip(vals.iter())
        .map(|(name, v)| (name.to_string(), *v))
        .collect()
}

fn assert_invariants(manager: &Manager, edge: Edge) {
    for node in manager.reachable_nodes(edge) {
        let children = manager.children(node);
        let min_weight = children.iter().map(|&c| manager.weight(c)).min().unwrap();
        assert_eq!(min_weight, 0, "minimum outgoing edge weight must be 0");

        if manager.mode().is_fully_reduced() {
            let first = children[0];
            let all_same = children
                .iter()
                .all(|&c| manager.weight(c) == 0 && manager.node_ref(c) == manager.node_ref(first));
            assert!(
                !all_same,
                "fully-reduced branch must not have all-equal children"
            );
        }
    }
}

proptest! {
    #[test]
    fn pointwise_correctness_and_invariants(
        expr in expr_strategy(),
        vals in prop::array::uniform3(0i64..DOMAIN_SIZE as i64),
    ) {
        let mut manager = fresh_manager(Mode::FullyReduced);
        let edge = compile(&mut manager, &expr);
        let expected = eval_ref(&expr, &vals);
        let actual = evaluate(&manager, edge, &assignment_map(&vals)).unwrap();
        prop_assert_eq!(actual, expected);
        assert_invariants(&manager, edge);
    }

    #[test]
    fn mode_equivalence(
        expr in expr_strategy(),
        vals in prop::array::uniform3(0i64..DOMAIN_SIZE as i64),
    ) {
        let mut fully = fresh_manager(Mode::FullyReduced);
        let fully_edge = compile(&mut fully, &expr);
        let mut quasi = fresh_manager(Mode::QuasiReduced);
        let quasi_edge = compile(&mut quasi, &expr);

        let fully_value = evaluate(&fully, fully_edge, &assignment_map(&vals)).unwrap();
        let quasi_value = evaluate(&quasi, quasi_edge, &assignment_map(&vals)).unwrap();
        prop_assert_eq!(fully_value, quasi_value);
        assert_invariants(&quasi, quasi_edge);
    }

    #[test]
    fn commutativity(t in expr_strategy(), u in expr_strategy()) {
        let mut manager = fresh_manager(Mode::FullyReduced);
        let t_edge = compile(&mut manager, &t);
        let u_edge = compile(&mut manager, &u);

        let t_plus_u = manager.add(t_edge, u_edge).unwrap();
        let u_plus_t = manager.add(u_edge, t_edge).unwrap();
        prop_assert_eq!(t_plus_u, u_plus_t);

        let t_times_u = manager.mul(t_edge, u_edge).unwrap();
        let u_times_t = manager.mul(u_edge, t_edge).unwrap();
        prop_assert_eq!(t_times_u, u_times_t);
    }

    #[test]
    fn associativity(t in expr_strategy(), u in expr_strategy(), v in expr_strategy()) {
        let mut manager = fresh_manager(Mode::FullyReduced);
        let t_edge = compile(&mut manager, &t);
        let u_edge = compile(&mut manager, &u);
        let v_edge = compile(&mut manager, &v);

        let tu = manager.add(t_edge, u_edge).unwrap();
        let lhs = manager.add(tu, v_edge).unwrap();
        let uv = manager.add(u_edge, v_edge).unwrap();
        let rhs = manager.add(t_edge, uv).unwrap();
        prop_assert_eq!(lhs, rhs);

        let tu = manager.mul(t_edge, u_edge).unwrap();
        let lhs = manager.mul(tu, v_edge).unwrap();
        let uv = manager.mul(u_edge, v_edge).unwrap();
        let rhs = manager.mul(t_edge, uv).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn distributivity(t in expr_strategy(), u in expr_strategy(), v in expr_strategy()) {
        let mut manager = fresh_manager(Mode::FullyReduced);
        let t_edge = compile(&mut manager, &t);
        let u_edge = compile(&mut manager, &u);
        let v_edge = compile(&mut manager, &v);

        let u_plus_v = manager.add(u_edge, v_edge).unwrap();
        let lhs = manager.mul(t_edge, u_plus_v).unwrap();

        let t_times_u = manager.mul(t_edge, u_edge).unwrap();
        let t_times_v = manager.mul(t_edge, v_edge).unwrap();
        let rhs = manager.add(t_times_u, t_times_v).unwrap();

        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn identities(t in expr_strategy()) {
        let mut manager = fresh_manager(Mode::FullyReduced);
        let t_edge = compile(&mut manager, &t);
        let zero = manager.const_edge(0);
        let one = manager.const_edge(1);

        let t_plus_zero = manager.add(t_edge, zero).unwrap();
        prop_assert_eq!(t_plus_zero, t_edge);

        let t_times_one = manager.mul(t_edge, one).unwrap();
        prop_assert_eq!(t_times_one, t_edge);

        let t_times_zero = manager.mul(t_edge, zero).unwrap();
        prop_assert_eq!(t_times_zero, zero);

        let t_minus_t = manager.sub(t_edge, t_edge).unwrap();
        prop_assert_eq!(t_minus_t, zero);
    }

    #[test]
    fn pow_law(t in expr_strategy(), vals in prop::array::uniform3(0i64..DOMAIN_SIZE as i64), k in 0i64..=3) {
        let mut manager = fresh_manager(Mode::FullyReduced);
        let t_edge = compile(&mut manager, &t);
        let t_value = eval_ref(&t, &vals);

        let powered = manager.pow(t_edge, k).unwrap();
        let actual = evaluate(&manager, powered, &assignment_map(&vals)).unwrap();
        let expected = t_value.pow(k as u32);
        prop_assert_eq!(actual, expected);
    }
}
