//! Debug commands: `lex` and `parse` for inspecting expressions.

use docfill_parse::ParseOptions;

/// Tokenize an expression and print the token stream.
pub fn lex_expression(source: &str) {
    match docfill_lexer::tokenize(source) {
        Ok(tokens) => {
            println!("Tokens for `{source}` ({} tokens):", tokens.len());
            for token in &tokens {
                println!("  {token}");
            }
        }
        Err(err) => {
            eprintln!("{}", err.render());
            std::process::exit(1);
        }
    }
}

/// Parse an expression and print its tree before and after folding.
pub fn parse_expression(source: &str) {
    let parsed = ParseOptions::new()
        .without_folding()
        .parse(source)
        .and_then(|raw| Ok((raw, docfill_parse::parse(source)?)));
    match parsed {
        Ok((raw, folded)) => {
            println!("Parse result for `{source}`:");
            println!("  Tree:     {raw}");
            println!("  Folded:   {folded}");
            println!("  Constant: {}", folded.is_constant());
            println!("  Optional: {}", folded.is_optional());
        }
        Err(err) => {
            eprintln!("{}", err.render());
            std::process::exit(1);
        }
    }
}
