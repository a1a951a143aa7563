//! Command-line front-end for compiling an arithmetic term into an EVMDD,
//! evaluating it at a concrete assignment, and optionally rendering it.
//!
//! Grounded in `espresso`'s `clap::Parser` CLI shape (derive struct, short
//! and long flags, `eprintln!`-based error reporting with a nonzero exit
//! code rather than panicking) and in this domain's command-line front-end
//! contract (positional term, optional ordering, optional domain sizes,
//! lexicographic/2-everywhere defaults).

use std::collections::HashMap;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use evmdd_core::{evaluate, term_to_evmdd, CompileOptions, Mode};

/// Compile an arithmetic term into an EVMDD and inspect it.
#[derive(Parser, Debug)]
#[command(name = "evmdd", about = "Compile an arithmetic term into an EVMDD", version)]
struct Args {
    /// The arithmetic term to compile, e.g. "2*x - y + 3".
    term: String,

    /// Comma-separated variable ordering, root-to-sink (defaults to
    /// lexicographic order over the term's free variables).
    #[arg(short = 'o', long = "order", value_delimiter = ',')]
    order: Option<Vec<String>>,

    /// Comma-separated domain sizes matching `--order` (defaults to 2 for
    /// every variable).
    #[arg(short = 'd', long = "domains", value_delimiter = ',')]
    domains: Option<Vec<u32>>,

    /// Use quasi-reduced mode instead of the default fully-reduced mode.
    #[arg(long = "quasi-reduced")]
    quasi_reduced: bool,

    /// Evaluate the compiled EVMDD at this assignment, given as
    /// comma-separated `name=value` pairs, e.g. `x=1,y=0`.
    #[arg(long = "eval", value_delimiter = ',')]
    eval: Option<Vec<String>>,

    /// Write a Graphviz/DOT rendering of the compiled EVMDD to this path.
    #[arg(long = "dot", value_name = "FILE")]
    dot: Option<PathBuf>,

    /// Open a local Graphviz viewer on the compiled EVMDD.
    #[arg(long = "view")]
    view: bool,
}

fn parse_assignment(pairs: &[String]) -> Result<HashMap<String, i64>, String> {
    let mut assignment = HashMap::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("malformed assignment `{pair}`, expected name=value"))?;
        let value: i64 = value
            .parse()
            .map_err(|_| format!("malformed integer in assignment `{pair}`"))?;
        assignment.insert(name.to_string(), value);
    }
    Ok(assignment)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let opts = CompileOptions {
        var_names: args.order.clone(),
        var_domains: args.domains.clone(),
        mode: Some(if args.quasi_reduced {
            Mode::QuasiReduced
        } else {
            Mode::FullyReduced
        }),
    };

    let (edge, manager) = match term_to_evmdd(&args.term, opts) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error compiling term: {e}");
            process::exit(1);
        }
    };

    println!(
        "compiled `{}` over {} variable(s); {} node(s), {} edge(s)",
        args.term,
        manager.num_vars(),
        manager.node_count(),
        manager.edge_count()
    );

    if let Some(pairs) = &args.eval {
        let assignment = match parse_assignment(pairs) {
            Ok(a) => a,
            Err(msg) => {
                eprintln!("error parsing --eval: {msg}");
                process::exit(1);
            }
        };
        match evaluate(&manager, edge, &assignment) {
            Ok(value) => println!("value: {value}"),
            Err(e) => {
                eprintln!("error evaluating term: {e}");
                process::exit(1);
            }
        }
    }

    if let Some(path) = &args.dot {
        let dot = evmdd_dump::to_dot(&manager, edge);
        if let Err(e) = std::fs::write(path, dot) {
            eprintln!("error writing DOT file {}: {e}", path.display());
            process::exit(1);
        }
    }

    if args.view {
        if let Err(e) = evmdd_dump::visualize(&manager, edge, None) {
            eprintln!("error launching viewer: {e}");
            process::exit(1);
        }
    }
}
