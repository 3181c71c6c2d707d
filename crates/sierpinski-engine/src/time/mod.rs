//! Frame timing. The runtime owns one [`FrameClock`] and passes each
//! [`FrameTime`] to the app through `FrameCtx::time`.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
