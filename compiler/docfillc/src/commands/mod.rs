//! Command handlers for the docfill CLI.
//!
//! Each submodule implements one command. The `*_source` functions do the
//! work and return errors; the `*_file`/`*_expression` wrappers used by
//! `main.rs` print results and exit with status 1 on failure.

use serde::Serialize;

use docfill_diagnostic::ExpressionError;
use docfill_eval::{Environment, VariableContext};
use docfill_ir::Value;
use docfill_template::TemplateOptions;

use crate::data::load_bindings;

mod check;
mod debug;
mod eval;
mod explain;
mod render;

pub use check::{check_file, check_source, CheckSummary};
pub use debug::{lex_expression, parse_expression};
pub use eval::{eval_expression, eval_source};
pub use explain::explain_code;
pub use render::{render_file, render_source};

/// Flags shared by the commands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// JSON file with the root bindings.
    pub data: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub vertical: bool,
    /// Leave the number and temporal functions out of the environment.
    pub no_builtins: bool,
    /// Print a JSON report instead of plain text.
    pub json: bool,
}

impl CliOptions {
    /// Split `args` into positional arguments and flags.
    pub fn parse(args: &[String]) -> Result<(Vec<String>, CliOptions), String> {
        let mut options = CliOptions::default();
        let mut positional = Vec::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--data" | "-d" => options.data = Some(flag_value(arg, iter.next())?),
                "--start" => options.start = Some(flag_value(arg, iter.next())?),
                "--end" => options.end = Some(flag_value(arg, iter.next())?),
                "--vertical" => options.vertical = true,
                "--no-builtins" => options.no_builtins = true,
                "--json" => options.json = true,
                _ => {
                    if let Some(path) = arg.strip_prefix("--data=") {
                        options.data = Some(path.to_string());
                    } else if let Some(marker) = arg.strip_prefix("--start=") {
                        options.start = Some(marker.to_string());
                    } else if let Some(marker) = arg.strip_prefix("--end=") {
                        options.end = Some(marker.to_string());
                    } else if arg.starts_with("--") {
                        return Err(format!("unknown option '{arg}'"));
                    } else {
                        positional.push(arg.clone());
                    }
                }
            }
        }
        Ok((positional, options))
    }

    pub fn template_options(&self) -> TemplateOptions {
        let defaults = TemplateOptions::default();
        let start = self.start.clone().unwrap_or_else(|| defaults.delimiters.start.clone());
        let end = self.end.clone().unwrap_or_else(|| defaults.delimiters.end.clone());
        defaults.delimiters(start, end).vertical(self.vertical)
    }

    pub fn environment(&self) -> Environment {
        if self.no_builtins {
            Environment::builder().build()
        } else {
            Environment::standard()
        }
    }
}

fn flag_value(flag: &str, value: Option<&String>) -> Result<String, String> {
    value
        .cloned()
        .ok_or_else(|| format!("'{flag}' needs a value"))
}

/// Root scope with `bindings` applied.
pub(crate) fn root_scope<'e>(env: &'e Environment, bindings: &[(String, Value)]) -> VariableContext<'e> {
    let mut scope = VariableContext::root(env);
    for (name, value) in bindings {
        scope.bind(name.as_str(), value.clone());
    }
    scope
}

/// Load `--data` if given. Exits on failure.
pub(crate) fn bindings_or_exit(options: &CliOptions) -> Vec<(String, Value)> {
    let Some(path) = &options.data else {
        return Vec::new();
    };
    match load_bindings(path) {
        Ok(bindings) => bindings,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Read a file's contents, exiting with a message on failure.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
                std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Outcome of a command, serialized for `--json`.
#[derive(Debug, Serialize)]
pub struct Report {
    pub success: bool,
    pub output: Option<String>,
    pub error: Option<ErrorReport>,
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
    pub offset: Option<usize>,
    pub expression: String,
}

impl From<&ExpressionError> for ErrorReport {
    fn from(err: &ExpressionError) -> Self {
        ErrorReport {
            code: err.code().as_str(),
            message: err.message.clone(),
            offset: err.offset(),
            expression: err.expression.clone(),
        }
    }
}

impl Report {
    pub fn from_result(result: &Result<String, ExpressionError>) -> Self {
        match result {
            Ok(output) => Report {
                success: true,
                output: Some(output.clone()),
                error: None,
            },
            Err(err) => Report {
                success: false,
                output: None,
                error: Some(ErrorReport::from(err)),
            },
        }
    }
}

/// Print `result` as text or JSON; exit with status 1 on error.
pub(crate) fn finish(result: Result<String, ExpressionError>, options: &CliOptions) {
    let failed = result.is_err();
    if options.json {
        let report = Report::from_result(&result);
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("error: cannot serialize report: {e}"),
        }
    } else {
        match result {
            Ok(output) if output.ends_with('\n') => print!("{output}"),
            Ok(output) => println!("{output}"),
            Err(err) => eprintln!("{}", err.render()),
        }
    }
    if failed {
        std::process::exit(1);
    }
}
