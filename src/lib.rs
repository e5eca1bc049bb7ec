//! Turns photographs into pixel-art-like images by running a fixed-size RGBA
//! buffer through a sequence of filters:
//!
//! - [`relax`]: stochastic color relaxation that flattens noise into blobs
//! - [`gradient`]: finite-difference normal map and edge map
//! - [`thin`]: hit-or-miss thinning of black/white images
//! - [`sharpen`]: darkens pixels that border clearly darker ones
//!
//! [`pipeline`] sequences them and handles loading, resizing and saving.

pub mod buffer;
pub mod color;
pub mod config;
pub mod error;
pub mod gradient;
pub mod pipeline;
pub mod relax;
pub mod sharpen;
pub mod thin;

pub use buffer::PixelBuffer;
pub use color::{Color, distance, encode};
pub use config::{
    BinarizeParams, EdgeParams, PipelineConfig, RelaxParams, SharpenParams, Stage, ThinParams,
};
pub use error::{Error, Result};
pub use pipeline::Pipeline;
