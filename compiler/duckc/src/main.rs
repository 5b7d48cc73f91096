//! Duckc CLI
//!
//! Inspect, lower and run the fixture enumerables.

use duckc::commands::{explain, inspect, lower, run, DriverOptions};
use duckc::corpus::{Corpus, FixtureKind};
use duckc::tracing_setup::init_tracing;
use duckc::DriverError;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (options, positional) = match DriverOptions::parse(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(1);
        }
    };

    let Some((&command, rest)) = positional.split_first() else {
        print_usage();
        return;
    };

    match command {
        "inspect" => {
            let kinds = match rest {
                [] | ["all"] => FixtureKind::ALL.to_vec(),
                names => names.iter().map(|name| parse_fixture(name)).collect(),
            };
            print!("{}", inspect(&Corpus::new(), &kinds, &options));
        }
        "lower" => {
            let [name] = rest else {
                eprintln!("Usage: duckc lower <fixture> [--policy=<p>] [--indent=<n>]");
                std::process::exit(1);
            };
            let kind = parse_fixture(name);
            report(lower(&Corpus::new(), kind, &options));
        }
        "run" => {
            let Some((name, values)) = rest.split_first() else {
                eprintln!("Usage: duckc run <fixture> [values...]");
                std::process::exit(1);
            };
            let kind = parse_fixture(name);
            let source: Vec<i64> = values
                .iter()
                .map(|value| {
                    value.parse().unwrap_or_else(|_| {
                        eprintln!("error: '{value}' is not an integer");
                        std::process::exit(1);
                    })
                })
                .collect();
            report(run(&Corpus::new(), kind, &source, &options));
        }
        "explain" => {
            let [code] = rest else {
                eprintln!("Usage: duckc explain <code>");
                std::process::exit(1);
            };
            match explain(code) {
                Some(text) => println!("{text}"),
                None => {
                    eprintln!("Unknown error code: {code}");
                    eprintln!("Codes have the format EXXXX where X is a digit.");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_fixture(name: &str) -> FixtureKind {
    name.parse().unwrap_or_else(|message| {
        eprintln!("error: {message}");
        eprintln!("Valid fixtures: {}", fixture_list());
        std::process::exit(1);
    })
}

fn report(result: Result<String, DriverError>) {
    match result {
        Ok(text) => println!("{text}"),
        Err(error) => {
            eprintln!("{}", error.to_diagnostic());
            std::process::exit(1);
        }
    }
}

fn fixture_list() -> String {
    FixtureKind::ALL.map(FixtureKind::as_str).join(", ")
}

fn print_usage() {
    println!("Duckc - structural enumerable detection and foreach lowering");
    println!();
    println!("Usage: duckc <command> [options]");
    println!();
    println!("Commands:");
    println!("  inspect [fixture...]      Show detected members and disposal");
    println!("  lower <fixture>           Print the lowered sum loop");
    println!("  run <fixture> [values...] Sum the values through the lowered loop");
    println!("  explain <code>            Describe an error code");
    println!();
    println!("Options:");
    println!("  --policy=<p,...>          generic-first, non-generic-first, first-declared, reject");
    println!("  --indent=<n>              Indent width of rendered code (default: 4)");
    println!();
    println!("Fixtures: {}", fixture_list());
    println!();
    println!("Set DUCK_LOG (or RUST_LOG) to enable tracing, e.g. DUCK_LOG=debug.");
}
