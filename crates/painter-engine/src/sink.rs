//! Render sink contract.

use crate::surface::Surface;

/// Consumer of published frames (a window, an encoder, a test probe).
///
/// `publish` runs on the paint loop's consumer thread and receives the frame
/// by shared borrow. The surface is reused as a drawing target once the call
/// returns, so a sink that needs the pixels later must copy them before
/// returning. Keep the call short: the loop applies no operations while it
/// runs.
pub trait RenderSink: Send + Sync {
    fn publish(&self, frame: &Surface);
}

impl<F> RenderSink for F
where
    F: Fn(&Surface) + Send + Sync,
{
    #[inline]
    fn publish(&self, frame: &Surface) {
        self(frame)
    }
}
