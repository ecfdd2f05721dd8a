//! Signal adapter for the workflow drivers.

use dioxus::prelude::*;
use drd_orchestrator::WorkflowCell;

/// A workflow held in a Dioxus signal.
///
/// The write guard lives only for one `update` call, so it is never held
/// across an await point inside a driver.
pub struct SignalCell<W: 'static>(pub Signal<W>);

impl<W: 'static> WorkflowCell<W> for SignalCell<W> {
    fn update<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        let mut signal = self.0;
        signal.with_mut(f)
    }
}
