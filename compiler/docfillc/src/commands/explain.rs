//! The `explain` command: describe an error code.

use docfill_diagnostic::ErrorCode;

pub fn explain_code(code_str: &str) {
    let Some(code) = ErrorCode::ALL
        .iter()
        .copied()
        .find(|code| code.as_str().eq_ignore_ascii_case(code_str))
    else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit.");
        eprintln!("Examples: E0001, E1001, E2001, E3001");
        std::process::exit(1);
    };
    println!("{code}: {}", code.description());
}
