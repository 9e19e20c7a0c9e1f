//! Debug-only reentrancy check.
//!
//! A map runs user code (`K: Hash`, `K: Eq`, `V: Default`) while its own
//! state is mid-update. Each public entry point opens a `Section`; opening a
//! second one on the same map before the first closes panics in debug
//! builds. In release builds both types are empty and the calls vanish.

#[cfg(debug_assertions)]
use core::cell::Cell;

#[derive(Debug, Default)]
pub(crate) struct ReentrancyCheck {
    #[cfg(debug_assertions)]
    busy: Cell<bool>,
}

impl ReentrancyCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Cell::new(false),
        }
    }

    /// Opens a guarded section that lasts until the returned value drops.
    #[inline]
    pub(crate) fn enter(&self) -> Section<'_> {
        #[cfg(debug_assertions)]
        assert!(
            !self.busy.replace(true),
            "reentrancy detected: map accessed from its own key or value code"
        );
        Section { _check: self }
    }
}

pub(crate) struct Section<'a> {
    _check: &'a ReentrancyCheck,
}

impl Drop for Section<'_> {
    #[inline]
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self._check.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::ReentrancyCheck;

    #[test]
    fn sequential_sections_are_ok() {
        let r = ReentrancyCheck::new();
        {
            let _s = r.enter();
        }
        let _s = r.enter();
    }

    #[cfg(debug_assertions)]
    #[test]
    fn nested_section_panics_in_debug() {
        let r = ReentrancyCheck::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _outer = r.enter();
            let _inner = r.enter();
        }));
        assert!(res.is_err(), "expected nested entry to panic in debug builds");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn nested_section_is_noop_in_release() {
        let r = ReentrancyCheck::new();
        let _outer = r.enter();
        let _inner = r.enter();
    }
}
