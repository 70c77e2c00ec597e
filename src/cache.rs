use std::cell::Cell;

/// A lazily recomputed value guarded by a validity flag.
///
/// Readers go through [`Cached::get_or_update`], which recomputes only when the
/// cache was invalidated since the last read. Interior mutability keeps the
/// owning query methods `&self`.
#[derive(Debug, Clone)]
pub(crate) struct Cached<T: Copy> {
    value: Cell<T>,
    valid: Cell<bool>,
}

impl<T: Copy + Default> Default for Cached<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Copy> Cached<T> {
    /// Creates a stale cache holding a placeholder value.
    pub(crate) fn new(placeholder: T) -> Self {
        Self {
            value: Cell::new(placeholder),
            valid: Cell::new(false),
        }
    }

    /// Returns the cached value, recomputing it first if stale.
    pub(crate) fn get_or_update(&self, compute: impl FnOnce() -> T) -> T {
        if !self.valid.get() {
            self.value.set(compute());
            self.valid.set(true);
        }
        self.value.get()
    }

    /// Marks the cached value stale.
    pub(crate) fn invalidate(&self) {
        self.valid.set(false);
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.valid.get()
    }
}
