//! Stack growth for recursive tree and type walks.
//!
//! Type canonicalization, substitution, member reconciliation and the
//! bottom-up tree rewrite all recurse on the shape of their input. Generic
//! types nest arbitrarily (`A<B<C<...>>>`) and synthesized concatenation
//! chains grow left-deep, so every recursive entry point goes through
//! [`ensure_sufficient_stack`].
//!
//! - **Native targets**: the stack is grown on demand with `stacker`.
//! - **WASM targets**: the closure is called directly.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::ensure_sufficient_stack;

    /// Depth of a left-nested chain, the shape concatenation desugaring produces.
    fn chain_depth(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { chain_depth(n - 1) + 1 })
    }

    #[test]
    fn shallow_chain() {
        assert_eq!(chain_depth(16), 16);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        assert_eq!(chain_depth(200_000), 200_000);
    }

    #[test]
    fn propagates_results() {
        let r: Result<u8, &str> = ensure_sufficient_stack(|| Err("nope"));
        assert_eq!(r, Err("nope"));
    }
}
