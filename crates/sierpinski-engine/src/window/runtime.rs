use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// The one window the runtime opens.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "sierpinski".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            resizable: true,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Phase {
    Running,
    /// Terminal; no further frames.
    Closing,
}

/// Drives an [`App`] from the winit event loop.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the GPU and `app`, and redraws
    /// continuously until the app or the user closes the window.
    ///
    /// Returns the first startup error, if any. `App::on_exit` runs exactly
    /// once whether or not startup succeeded.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut driver = Driver {
            config,
            gpu_init,
            app,
            window: None,
            phase: Phase::Running,
            finished: false,
            error: None,
        };

        event_loop
            .run_app(&mut driver)
            .context("winit event loop terminated with error")?;
        driver.finish();

        driver.error.map_or(Ok(()), Err)
    }
}

/// Window plus everything whose lifetime is bound to it.
#[self_referencing]
struct WindowEntry {
    input: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl WindowEntry {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size)
            .with_resizable(config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        WindowEntryTryBuilder {
            input: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn request_redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        log::debug!("resize to {}x{}", size.width, size.height);
        self.with_gpu_mut(|gpu| gpu.resize(size));
        self.request_redraw();
    }

    /// Ticks the clock, runs one `on_frame`, then drops this frame's input edges.
    fn frame(&mut self, app: &mut impl App) -> AppControl {
        self.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                input: fields.input,
                input_frame: fields.input_frame,
                time: fields.clock.tick(),
            };
            let control = app.on_frame(&mut ctx);

            fields.input_frame.clear();
            control
        })
    }
}

struct Driver<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    window: Option<WindowEntry>,
    phase: Phase,
    finished: bool,
    error: Option<anyhow::Error>,
}

impl<A: App + 'static> Driver<A> {
    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if self.phase == Phase::Running {
            log::info!("closing");
            self.phase = Phase::Closing;
        }
        event_loop.exit();
    }

    fn abort(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error.get_or_insert(err);
        self.close(event_loop);
    }

    /// App resources go first, then the GPU, then the window.
    fn finish(&mut self) {
        if std::mem::replace(&mut self.finished, true) {
            return;
        }
        self.app.on_exit();
        self.window = None;
        log::debug!("runtime finished");
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let entry = WindowEntry::open(event_loop, &self.config, self.gpu_init.clone())?;
        entry
            .with_gpu(|gpu| self.app.init(gpu))
            .context("application initialization failed")?;
        Ok(entry)
    }
}

impl<A: App + 'static> ApplicationHandler for Driver<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.phase == Phase::Closing {
            return;
        }

        match self.start(event_loop) {
            Ok(entry) => {
                entry.request_redraw();
                self.window = Some(entry);
            }
            Err(err) => self.abort(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.phase == Phase::Closing {
            event_loop.exit();
            return;
        }

        // Presentation (FIFO) paces the loop.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = &self.window {
            entry.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.phase == Phase::Closing {
            event_loop.exit();
            return;
        }
        let Some(entry) = self.window.as_mut() else {
            return;
        };

        if let Some(ev) = translate_window_event(&event) {
            entry.with_mut(|fields| fields.input.apply_event(fields.input_frame, ev));
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.close(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.close(event_loop),
            WindowEvent::Resized(size) => entry.resize(size),
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.with_window(|w| w.inner_size());
                entry.resize(size);
            }
            WindowEvent::RedrawRequested => {
                if entry.frame(&mut self.app) == AppControl::Exit {
                    self.close(event_loop);
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.finish();
    }
}
