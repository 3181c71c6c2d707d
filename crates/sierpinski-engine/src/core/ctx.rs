use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::render::RenderFrame;
use crate::time::FrameTime;

use super::app::AppControl;

/// What an [`App`](super::App) sees during one redraw.
///
/// `'a` spans the callback, `'w` is the window borrow held by [`Gpu`].
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
}

impl FrameCtx<'_, '_> {
    /// Runs `draw` against the next swapchain image and presents it.
    ///
    /// A minimized window or a recoverable surface error drops the frame
    /// without calling `draw`. Only an unrecoverable error asks to exit.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&mut RenderFrame<'_>),
    {
        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return AppControl::Continue;
        }

        let mut acquired = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => match self.gpu.handle_surface_error(err) {
                SurfaceErrorAction::Fatal => {
                    log::error!("surface lost for good; closing");
                    return AppControl::Exit;
                }
                SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                    return AppControl::Continue;
                }
            },
        };

        draw(&mut RenderFrame {
            device: self.gpu.device(),
            queue: self.gpu.queue(),
            encoder: &mut acquired.encoder,
            color_view: &acquired.view,
            size: (size.width, size.height),
        });

        self.window.pre_present_notify();
        self.gpu.submit(acquired);
        AppControl::Continue
    }
}
