//! Command-line interface for strata
//!
//! Usage:
//!   strata parse `<document.json>` --grammar `<grammar.yaml>` [--format `<format>`]
//!   strata grammar `<grammar.yaml>`

use clap::{Arg, ArgAction, Command};
use strata::pipeline::{Processor, RunConfig};
use strata::Document;

fn main() {
    let matches = Command::new("strata")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Merges layered span annotations into a single document parse tree")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging on stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a document against a grammar")
                .arg(
                    Arg::new("document")
                        .help("Path to the document JSON (layer name -> span pairs)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("grammar")
                        .long("grammar")
                        .short('g')
                        .help("Path to the grammar YAML configuration")
                        .required(true),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g. 'treeviz', 'json')")
                        .default_value("treeviz"),
                ),
        )
        .subcommand(
            Command::new("grammar")
                .about("Compile a grammar and print its concrete rules")
                .arg(
                    Arg::new("grammar")
                        .help("Path to the grammar YAML configuration")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let document = parse_matches.get_one::<String>("document").unwrap();
            let grammar = parse_matches.get_one::<String>("grammar").unwrap();
            let format = parse_matches.get_one::<String>("format").unwrap();
            handle_parse_command(document, grammar, format);
        }
        Some(("grammar", grammar_matches)) => {
            let grammar = grammar_matches.get_one::<String>("grammar").unwrap();
            handle_grammar_command(grammar);
        }
        _ => unreachable!(),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    let _ = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
}

/// Handle the parse command
fn handle_parse_command(document_path: &str, grammar_path: &str, format: &str) {
    let processor = load_processor(grammar_path);

    let source = std::fs::read_to_string(document_path).unwrap_or_else(|e| {
        eprintln!("Error reading document: {}", e);
        std::process::exit(1);
    });
    let document = Document::from_json(&source).unwrap_or_else(|e| {
        eprintln!("Error parsing document: {}", e);
        std::process::exit(1);
    });

    let output = processor
        .parse_and_serialize(&document, format)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {}", e);
            std::process::exit(1);
        });

    print!("{}", output);
}

/// Handle the grammar command
fn handle_grammar_command(grammar_path: &str) {
    let processor = load_processor(grammar_path);
    let grammar = processor.grammar();
    print!("{}", grammar);
    println!(
        "Application order: {}",
        grammar.application_order().join(" ")
    );
}

fn load_processor(grammar_path: &str) -> Processor {
    let source = std::fs::read_to_string(grammar_path).unwrap_or_else(|e| {
        eprintln!("Error reading grammar: {}", e);
        std::process::exit(1);
    });
    let config = RunConfig::from_yaml(&source).unwrap_or_else(|e| {
        eprintln!("Error parsing grammar configuration: {}", e);
        std::process::exit(1);
    });
    Processor::from_config(&config).unwrap_or_else(|e| {
        eprintln!("Error compiling grammar: {}", e);
        std::process::exit(1);
    })
}
