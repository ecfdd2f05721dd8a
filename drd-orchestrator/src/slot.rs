//! Generation-tagged result slot for one kind of request.

/// Identifies the request a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Holds the last accepted result of one request kind plus its loading flag.
///
/// Every `begin` or `invalidate` bumps the generation; `settle` only accepts
/// the generation issued last.
#[derive(Debug, Clone)]
pub struct RequestSlot<T> {
    generation: u64,
    loading: bool,
    value: Option<T>,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            loading: false,
            value: None,
        }
    }
}

impl<T> RequestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding any still in flight.
    pub fn begin(&mut self) -> Generation {
        self.generation += 1;
        self.loading = true;
        Generation(self.generation)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.generation
    }

    /// Mark the request finished. Returns false, changing nothing, for stale tickets.
    pub fn settle(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation) {
            log::info!(
                "discarding stale response (generation {} < {})",
                generation.0,
                self.generation
            );
            return false;
        }
        self.loading = false;
        true
    }

    /// Drop any in-flight request; its response will be ignored.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    /// Invalidate and forget the last result.
    pub fn clear(&mut self) {
        self.invalidate();
        self.value = None;
    }

    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
