use crate::target::FormatTarget;

/// Types that render to a target-specific string.
///
/// Implementations are pure and total: every target, including targets the
/// implementation does not recognize, produces a string.
pub trait Render {
    fn render(&self, target: &FormatTarget) -> String;
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self, target: &FormatTarget) -> String {
        (**self).render(target)
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn render(&self, target: &FormatTarget) -> String {
        (**self).render(target)
    }
}

impl<T: Render> Render for [T] {
    /// Concatenation without separators.
    fn render(&self, target: &FormatTarget) -> String {
        self.iter().map(|item| item.render(target)).collect()
    }
}
