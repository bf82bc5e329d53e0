//! Stack growth for deeply nested expressions.
//!
//! Evaluation and constant folding recurse once per tree level. `stacker`
//! grows the stack on demand so pathological inputs like `((((...))))`
//! do not overflow it. WASM has its own stack management and calls through.

/// Run `f` with at least the red zone of stack available.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
