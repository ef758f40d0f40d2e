//! Headless GPU device management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue without a surface
//! - owning an offscreen color target frames are rendered into

mod headless;

pub use headless::{GpuInit, HeadlessGpu, OffscreenTarget};
