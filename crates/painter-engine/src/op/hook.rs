use std::fmt;
use std::sync::Arc;

use crate::surface::Surface;

/// Opaque draw callback carried by [`Operation::Custom`](super::Operation::Custom).
///
/// Runs on the loop's consumer thread against the active surface. Not part of
/// the textual protocol; hosts and tests use it to observe or poke at the
/// surface in queue order.
#[derive(Clone)]
pub struct DrawHook(Arc<dyn Fn(&mut Surface) + Send + Sync>);

impl DrawHook {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Surface) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub(crate) fn call(&self, surface: &mut Surface) {
        (self.0)(surface)
    }
}

impl fmt::Debug for DrawHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DrawHook(..)")
    }
}

/// Hooks compare by identity.
impl PartialEq for DrawHook {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
