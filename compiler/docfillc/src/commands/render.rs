//! The `render` command: merge a plain-text template with JSON data.

use tracing::debug;

use docfill_diagnostic::ExpressionError;
use docfill_ir::Value;
use docfill_template::compile_text;

use super::{bindings_or_exit, finish, read_file, root_scope, CliOptions};

/// Render the template at `path` and print the result.
pub fn render_file(path: &str, options: &CliOptions) {
    let source = read_file(path);
    let bindings = bindings_or_exit(options);
    debug!(path, bindings = bindings.len(), "rendering");
    finish(render_source(&source, &bindings, options), options);
}

pub fn render_source(
    source: &str,
    bindings: &[(String, Value)],
    options: &CliOptions,
) -> Result<String, ExpressionError> {
    let template = compile_text(source, &options.template_options())?;
    let env = options.environment();
    let scope = root_scope(&env, bindings);
    template.merge_to_string(&scope)
}
