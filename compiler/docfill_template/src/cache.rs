//! Compiled-expression cache.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use docfill_diagnostic::Result;
use docfill_parse::{Expression, ParseOptions};

/// Compiled expressions keyed by source text.
///
/// Templates often repeat the same placeholder (`{customer.name}` in a
/// header and a footer); each distinct source is parsed once. Failed parses
/// are not cached. Safe to share between threads.
pub struct ExpressionCache {
    options: ParseOptions,
    entries: RwLock<FxHashMap<Arc<str>, Arc<Expression>>>,
}

impl ExpressionCache {
    pub fn new(options: ParseOptions) -> Self {
        ExpressionCache {
            options,
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Return the compiled form of `source`, parsing it on first use.
    pub fn get_or_compile(&self, source: &str) -> Result<Arc<Expression>> {
        if let Some(hit) = self.entries.read().get(source) {
            trace!(source, "expression cache hit");
            return Ok(Arc::clone(hit));
        }
        let compiled = Arc::new(self.options.parse(source)?);
        let mut entries = self.entries.write();
        // Another thread may have compiled it meanwhile; keep the first.
        let entry = entries.entry(Arc::from(source)).or_insert(compiled);
        Ok(Arc::clone(entry))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }
}

impl Default for ExpressionCache {
    fn default() -> Self {
        ExpressionCache::new(ParseOptions::default())
    }
}

impl std::fmt::Debug for ExpressionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpressionCache")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}
