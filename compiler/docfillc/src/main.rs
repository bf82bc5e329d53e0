//! docfill CLI
//!
//! Fills placeholders in plain-text templates from JSON data.

use docfillc::commands::{
    check_file, eval_expression, explain_code, lex_expression, parse_expression, render_file,
    CliOptions,
};

fn main() {
    docfillc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let (positional, options) = match CliOptions::parse(&args[2..]) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(1);
        }
    };
    let first = positional.first().map(String::as_str);

    match command.as_str() {
        "render" => {
            let Some(path) = first else {
                eprintln!("Usage: docfill render <template> [--data <file.json>] [options]");
                std::process::exit(1);
            };
            render_file(path, &options);
        }
        "check" => {
            let Some(path) = first else {
                eprintln!("Usage: docfill check <template> [--start <marker>] [--end <marker>]");
                std::process::exit(1);
            };
            check_file(path, &options);
        }
        "eval" => {
            let Some(expression) = first else {
                eprintln!("Usage: docfill eval <expression> [--data <file.json>]");
                eprintln!("Example: docfill eval 'price * 2' --data order.json");
                std::process::exit(1);
            };
            eval_expression(expression, &options);
        }
        "lex" => {
            let Some(expression) = first else {
                eprintln!("Usage: docfill lex <expression>");
                std::process::exit(1);
            };
            lex_expression(expression);
        }
        "parse" => {
            let Some(expression) = first else {
                eprintln!("Usage: docfill parse <expression>");
                std::process::exit(1);
            };
            parse_expression(expression);
        }
        "--explain" | "explain" => {
            let Some(code) = first else {
                eprintln!("Usage: docfill explain <ERROR_CODE>");
                eprintln!("Example: docfill explain E2001");
                std::process::exit(1);
            };
            explain_code(code);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("docfill {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("docfill - fill document templates from data");
    println!();
    println!("Usage: docfill <command> [options]");
    println!();
    println!("Commands:");
    println!("  render <template>    Merge a template with data and print it");
    println!("  check <template>     Compile a template without merging");
    println!("  eval <expression>    Evaluate one expression");
    println!("  lex <expression>     Tokenize and display tokens");
    println!("  parse <expression>   Parse and display the expression tree");
    println!("  explain <code>       Explain an error code (e.g., E2001)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --data, -d <file>    JSON object whose members become variables");
    println!("  --start <marker>     Placeholder start delimiter (default: {{)");
    println!("  --end <marker>       Placeholder end delimiter (default: }})");
    println!("  --vertical           Write digits as kanji numerals");
    println!("  --no-builtins        Leave out number and date functions");
    println!("  --json               Print a JSON report");
    println!();
    println!("Template blocks:");
    println!("  {{#each items as item, i}} ... {{/each}}");
    println!("  {{#if condition}} ... {{/if}}");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable logging (e.g., docfill_template=debug)");
    println!("  DOCFILL_LOG_TREE     Log as an indented span tree");
    println!();
    println!("Examples:");
    println!("  docfill render letter.txt --data customer.json");
    println!("  docfill render form.txt --data form.json --start '${{' --end '}}'");
    println!("  docfill eval '1 + 2 * 3'");
    println!("  docfill eval 'date(2024, 1, 31) + 1month'");
    println!("  docfill check invoice.txt");
}
