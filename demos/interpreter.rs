//  INTERPRETER.rs
//    by Lut99
//
//  Created:
//    17 Oct 2026, 10:12:40
//  Last edited:
//    18 Oct 2026, 18:02:57
//  Auto updated?
//    Yes
//
//  Description:
//!   Runs the forward-chaining engine on a config file and reports whether
//!   its goal could be derived.
//

use std::path::PathBuf;

use clap::Parser;
use console::style;
use error_trace::toplevel;
use forward_rules::config::Config;
use forward_rules::interpreter::{Functions, KnowledgeBase};
use humanlog::{DebugMode, HumanLogger};
use log::{debug, error, info};


/***** ARGUMENTS *****/
/// Defines arguments to the interpreter.
#[derive(Debug, Parser)]
pub struct Arguments {
    /// If given, enables more verbose logging.
    #[clap(long, global = true)]
    debug: bool,

    /// The path to the config file with the rules, facts and goal to run.
    #[clap(name = "PATH")]
    path: PathBuf,
}





/***** ENTRYPOINT *****/
fn main() {
    // Parse the CLI arguments
    let args = Arguments::parse();

    // Setup the logger
    if let Err(err) = HumanLogger::terminal(if args.debug { DebugMode::Full } else { DebugMode::HumanFriendly }).init() {
        eprintln!("WARNING: Failed to setup logger: {err} (no logging for this session)");
    }
    info!("{} - v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    // Functions that rules may call
    let functions = Functions::new().with("log_call", |rule, args| println!("{} {rule} called log_call({})", style("[CALL]").cyan(), args.join(", ")));

    // Load the knowledge base
    let config: Config = match Config::from_path(&args.path) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", toplevel!(("Failed to load config file '{}'", args.path.display()), err));
            std::process::exit(1);
        },
    };
    let mut kb: KnowledgeBase = match KnowledgeBase::from_config(&config, &functions) {
        Ok(kb) => kb,
        Err(err) => {
            error!("{}", toplevel!(("Failed to build knowledge base from '{}'", args.path.display()), err));
            std::process::exit(1);
        },
    };
    debug!("Loaded {} rule(s) and {} fact(s)", kb.templates().len(), kb.len());

    // Run it
    let reached: bool = match kb.run(&functions) {
        Ok(reached) => reached,
        Err(err) => {
            error!("{}", toplevel!(("Failed to run config file '{}'", args.path.display()), err));
            std::process::exit(1);
        },
    };

    // Report
    if reached {
        println!("Goal {} is {}", style(kb.goal()).bold(), style("derived").green().bold());
    } else {
        println!("Goal {} is {}", style(kb.goal()).bold(), style("NOT derived").red().bold());
    }
    println!();
    println!("{kb}");
}
