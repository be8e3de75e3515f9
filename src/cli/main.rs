mod config;
mod read;

use cnf_ident::context::Context;

use crate::config::{parse_args, CliConfig, Tool};

fn main() {
    let mut args: Vec<String> = std::env::args().collect();

    let mut cli_options = CliConfig::default();
    let cfg = match parse_args(&mut args, &mut cli_options) {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("{e}");
            std::process::exit(1);
        }
    };

    if args.len() < 2 {
        println!("Some path to a CNF formula is required.");
        std::process::exit(1);
    }
    let Some(path) = args.last() else {
        println!("Some path to a CNF formula is required.");
        std::process::exit(1);
    };

    let mut context = Context::from_config(cfg);

    if let Err(e) = read::load_formula(path, &mut context) {
        println!("{e}");
        std::process::exit(1);
    }

    match cli_options.tool {
        Tool::WlHash => println!("{}", context.wl_digest()),

        Tool::Gates => match context.gate_digest() {
            Ok(digest) => println!("{digest}"),
            Err(e) => {
                println!("{e}");
                std::process::exit(1);
            }
        },

        Tool::Sanitize => print!("{}", context.formula.as_dimacs()),
    }
}
