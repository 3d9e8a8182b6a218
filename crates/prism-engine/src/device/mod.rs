//! Graphics driver seam.
//!
//! This module is responsible for:
//! - naming the GL requests the shader wrapper issues (`GlDriver`)
//! - forwarding those requests to a loaded `glow::Context`
//! - an in-memory driver for unit tests

mod driver;
mod native;

#[cfg(test)]
pub(crate) mod fake;

pub use driver::{GlDriver, Stage};
