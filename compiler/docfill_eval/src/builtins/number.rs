//! Number formatting and rounding functions.
//!
//! | Function                          | Result                           |
//! |-----------------------------------|----------------------------------|
//! | `formatNumber(n, pattern)`        | text, see [`NumberPattern`]      |
//! | `fixed(n, digits)`                | text with exactly `digits`       |
//! | `grouped(n)`                      | text with thousands separators   |
//! | `currency(n[, symbol[, digits]])` | `$1,234.50` by default           |
//! | `round(n[, digits])`              | number, half away from zero      |
//! | `floor(n)` `ceil(n)` `abs(n)`     | number                           |
//! | `parseNumber(text)`               | number                           |
//!
//! A `null` first argument yields `null`.

use rust_decimal::RoundingStrategy;

use docfill_diagnostic::errors::unparsable_input;
use docfill_diagnostic::Result;
use docfill_ir::Value;

use super::args;
use crate::context::VariableContext;
use crate::number_format::{parse_number_text, NumberPattern};
use crate::resolver::ExpressionResolver;

/// Resolver for the number functions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumberResolver;

impl ExpressionResolver for NumberResolver {
    fn name(&self) -> &str {
        "number"
    }

    fn resolve_function(&self, name: &str, args: &[Value], _scope: &VariableContext<'_>) -> Result<Option<Value>> {
        let arity = match name {
            "formatNumber" | "fixed" => (2, 2),
            "grouped" | "floor" | "ceil" | "abs" | "parseNumber" => (1, 1),
            "currency" => (1, 3),
            "round" => (1, 2),
            _ => return Ok(None),
        };
        args::check_arity(name, args, arity.0, arity.1)?;
        if args.first().is_some_and(Value::is_null) {
            return Ok(Some(Value::Null));
        }

        let value = match name {
            "formatNumber" => {
                let pattern = NumberPattern::parse(args::string(name, args, 1)?)?;
                Value::string(pattern.format(args::number(name, args, 0)?)?)
            }
            "fixed" => {
                let digits = args::digits(name, args, 1)?;
                Value::string(NumberPattern::fixed(digits).format(args::number(name, args, 0)?)?)
            }
            "grouped" => Value::string(NumberPattern::grouped().format(args::number(name, args, 0)?)?),
            "currency" => {
                let symbol = if args.len() > 1 { args::string(name, args, 1)? } else { "$" };
                let digits = if args.len() > 2 { args::digits(name, args, 2)? } else { 2 };
                Value::string(NumberPattern::currency(symbol, digits).format(args::number(name, args, 0)?)?)
            }
            "round" => {
                let digits = if args.len() > 1 { args::digits(name, args, 1)? } else { 0 };
                let n = args::number(name, args, 0)?;
                Value::Number(n.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero))
            }
            "floor" => Value::Number(args::number(name, args, 0)?.floor()),
            "ceil" => Value::Number(args::number(name, args, 0)?.ceil()),
            "abs" => Value::Number(args::number(name, args, 0)?.abs()),
            _ => {
                let text = args::string(name, args, 0)?;
                let n = parse_number_text(text).ok_or_else(|| unparsable_input(text, "number"))?;
                Value::Number(n)
            }
        };
        Ok(Some(value))
    }
}
