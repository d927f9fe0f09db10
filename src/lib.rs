#![allow(clippy::many_single_char_names)]

pub mod camera;
pub mod lighting;
pub mod loader;
pub mod material;
pub mod math;
pub mod object;
pub mod raster;
pub mod scene;
