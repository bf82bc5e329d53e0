//! The `eval` command: evaluate one expression.

use docfill_diagnostic::ExpressionError;
use docfill_eval::format::display_text;
use docfill_eval::{verticalize, Formats};
use docfill_ir::Value;

use super::{bindings_or_exit, finish, root_scope, CliOptions};

pub fn eval_expression(source: &str, options: &CliOptions) {
    let bindings = bindings_or_exit(options);
    finish(eval_source(source, &bindings, options), options);
}

/// Evaluate `source` and return its text form. Lists and objects, which a
/// template would reject, are shown in their display form.
pub fn eval_source(
    source: &str,
    bindings: &[(String, Value)],
    options: &CliOptions,
) -> Result<String, ExpressionError> {
    let expression = docfill_parse::parse(source)?;
    let env = options.environment();
    let scope = root_scope(&env, bindings);
    let value = match expression.evaluate(&scope) {
        Err(err) if expression.is_optional() && err.is_unresolved_reference() => Value::Null,
        result => result?,
    };
    let text = if value.is_scalar() {
        Formats::default().text(&value)?
    } else {
        display_text(&value)
    };
    Ok(if options.vertical { verticalize(&text) } else { text })
}
