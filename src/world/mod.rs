//! World module - streamed tile-based world
//!
//! Packed binary world data and the streaming loader around it:
//! - Little-endian blob decoding with magic/version checks
//! - 32x32x32 geometry and collision volumes
//! - Categorized tileset mesh stores
//! - A 3x3 cell grid paged around the viewer

mod blob;
mod collision;
mod geometry;
mod headers;
mod library;
mod matrix;
mod paging;
mod render;
pub mod sample;
mod tileset;

pub use blob::*;
pub use collision::*;
pub use geometry::*;
pub use headers::*;
pub use library::*;
pub use matrix::*;
pub use paging::*;
pub use render::*;
pub use tileset::*;
