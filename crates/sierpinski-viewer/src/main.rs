mod bindings;
mod scene;
mod state;

use anyhow::Result;

use sierpinski_engine::device::GpuInit;
use sierpinski_engine::logging::{init_logging, LoggingConfig};
use sierpinski_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::scene::{SceneConfig, Viewer};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let runtime = RuntimeConfig {
        title: "3D Sierpinski Triangle and Torus".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
        // Projection aspect is fixed at 800:600.
        resizable: false,
    };

    // Vertex colors are written to the surface as authored.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    let viewer = Viewer::new(SceneConfig::default())?;

    log::info!("controls: Up/Down zoom, Q quit");
    Runtime::run(runtime, gpu_init, viewer)
}
