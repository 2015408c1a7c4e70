use std::cell::{OnceCell, RefCell};

/// A memoizing, single-evaluation deferred value.
///
/// Wraps a zero-argument producer. The first call to [`get`](Self::get)
/// invokes the producer and caches the result; every later call returns the
/// cached value without re-invoking it. The cell can be captured and passed
/// around freely before being forced.
///
/// Not thread-safe; registration runs on one initialization thread.
///
/// Forcing policy: the producer is taken out of the cell *before* it runs,
/// so a producer that panics leaves the cell permanently unresolved and any
/// further access panics. Producers are expected to be called once.
///
/// # Examples
///
/// ```
/// use modkit_core::LazyValue;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let calls = Rc::new(Cell::new(0));
/// let counted = Rc::clone(&calls);
/// let lazy = LazyValue::new(move || {
///     counted.set(counted.get() + 1);
///     42
/// });
///
/// assert_eq!(calls.get(), 0);
/// assert_eq!(*lazy.get(), 42);
/// assert_eq!(*lazy.get(), 42);
/// assert_eq!(calls.get(), 1);
/// ```
pub struct LazyValue<T> {
    producer: RefCell<Option<Box<dyn FnOnce() -> T>>>,
    value: OnceCell<T>,
}

impl<T> LazyValue<T> {
    /// Create a lazy cell over the given producer.
    pub fn new(producer: impl FnOnce() -> T + 'static) -> Self {
        Self {
            producer: RefCell::new(Some(Box::new(producer))),
            value: OnceCell::new(),
        }
    }

    /// Create an already-resolved cell.
    pub fn resolved(value: T) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(value);
        Self {
            producer: RefCell::new(None),
            value: cell,
        }
    }

    /// Force the value, invoking the producer on the first call.
    pub fn get(&self) -> &T {
        if self.value.get().is_none() {
            let producer = self.producer.borrow_mut().take();
            if let Some(producer) = producer {
                let _ = self.value.set(producer());
            }
        }
        self.value
            .get()
            .expect("lazy value poisoned by a panicking producer")
    }

    /// Whether the producer has already run.
    pub fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for LazyValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value.get() {
            Some(v) => f.debug_tuple("LazyValue").field(v).finish(),
            None => f.write_str("LazyValue(<unresolved>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn producer_runs_at_most_once() {
        let calls = Rc::new(Cell::new(0u32));
        let counted = Rc::clone(&calls);
        let lazy = LazyValue::new(move || {
            counted.set(counted.get() + 1);
            String::from("value")
        });

        assert!(!lazy.is_resolved());
        for _ in 0..3 {
            assert_eq!(lazy.get(), "value");
        }
        assert!(lazy.is_resolved());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn resolved_never_invokes_anything() {
        let lazy = LazyValue::resolved(7);
        assert!(lazy.is_resolved());
        assert_eq!(*lazy.get(), 7);
    }

    #[test]
    fn shared_across_handles() {
        let lazy = Rc::new(LazyValue::new(|| vec![1, 2, 3]));
        let a = Rc::clone(&lazy);
        let b = Rc::clone(&lazy);
        assert_eq!(a.get(), b.get());
        assert_eq!(a.get().as_ptr(), b.get().as_ptr());
    }
}
