//! The rendering boundary.

use algotrace_core::Step;

/// Draws one step at a time.
///
/// A renderer receives the step, its index and the list length (for
/// progress display). It must not mutate anything or contain algorithm
/// logic; everything it shows is already in the step.
pub trait Renderer<K, S> {
    type Output;

    fn render(&self, step: &Step<K, S>, index: usize, total: usize) -> Self::Output;
}
