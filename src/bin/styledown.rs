//! Command-line interface for styledown
//! This binary runs the two engine passes over a markdown file and prints the result.
//!
//! Usage:
//!   styledown classify `<path>` [--format `<format>`]  - Classify lines only
//!   styledown tokenize `<path>` [--format `<format>`]  - Tokenize body text only
//!   styledown runs `<path>` [--format `<format>`]      - Full pipeline, styled runs per line

use clap::{Arg, Command};
use std::fs;
use std::process;

use styledown::{styled_runs, LineClassifier, MarkdownEngine, Tokenizer};

fn main() {
    let matches = Command::new("styledown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A rule-driven markdown line classifier and inline tokenizer")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("classify")
                .about("Classify each line of a markdown file")
                .arg(path_arg())
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("tokenize")
                .about("Tokenize a file's text without line classification")
                .arg(path_arg())
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("runs")
                .about("Run both passes and print styled runs per line")
                .arg(path_arg())
                .arg(format_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("classify", sub)) => {
            let text = read_input(sub.get_one::<String>("path").unwrap());
            let lines = LineClassifier::markdown().classify(&text);
            match sub.get_one::<String>("format").unwrap().as_str() {
                "json" => print_json(&lines),
                _ => {
                    for line in &lines {
                        println!("{:>4}  {:<16} {}", line.line_number, line.style, line.text);
                    }
                }
            }
        }
        Some(("tokenize", sub)) => {
            let text = read_input(sub.get_one::<String>("path").unwrap());
            let tokenizer = Tokenizer::markdown();
            let tokens: Vec<_> = text.lines().map(|line| tokenizer.tokenize(line)).collect();
            match sub.get_one::<String>("format").unwrap().as_str() {
                "json" => print_json(&tokens),
                _ => {
                    for line_tokens in &tokens {
                        for run in styled_runs(line_tokens) {
                            let styles: Vec<String> =
                                run.styles.iter().map(ToString::to_string).collect();
                            println!("[{}] {:?}", styles.join("+"), run.text);
                        }
                    }
                }
            }
        }
        Some(("runs", sub)) => {
            let text = read_input(sub.get_one::<String>("path").unwrap());
            let lines = MarkdownEngine::markdown().process(&text);
            match sub.get_one::<String>("format").unwrap().as_str() {
                "json" => print_json(&lines),
                _ => {
                    for line in &lines {
                        let rendered: String =
                            line.runs.iter().map(|run| run.text.as_str()).collect();
                        println!("{:>4}  {:<16} {}", line.line_number, line.style, rendered);
                    }
                }
            }
        }
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the markdown file")
        .required(true)
        .index(1)
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format ('text' or 'json')")
        .value_parser(["text", "json"])
        .default_value("text")
}

fn read_input(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
