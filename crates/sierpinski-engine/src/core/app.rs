use anyhow::Result;
use winit::event::WindowEvent;

use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Call order: `init` once after the window and GPU exist, then `on_frame` per
/// redraw until exit, then `on_exit` once.
pub trait App {
    /// Creates GPU resources. An error aborts startup.
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let _ = gpu;
        Ok(())
    }

    /// Called for window events.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once when the loop stops, before the GPU context is destroyed.
    fn on_exit(&mut self) {}
}
