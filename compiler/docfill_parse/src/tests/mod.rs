#![allow(clippy::unwrap_used, clippy::expect_used)]

mod fold_tests;

use crate::ParseOptions;

/// Fully parenthesized form of the unfolded tree.
pub(crate) fn shape(source: &str) -> String {
    ParseOptions::new()
        .without_folding()
        .parse(source)
        .unwrap()
        .to_string()
}
