//! Windowed OpenGL exercises built on `prism-engine`.
//!
//! Usage: `prism-lessons [lesson]`. Press ` (grave accent) or close the window to quit.

mod clock;
mod config;
mod lesson;
mod lessons;
mod mesh;
mod runtime;

use anyhow::{Context, Result};
use prism_engine::logging::{init_logging, LoggingConfig};

use crate::config::RuntimeConfig;
use crate::runtime::Runtime;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| lessons::DEFAULT.to_string());
    let lesson = lessons::by_name(&name).with_context(|| {
        format!("unknown lesson {name:?}; available: {}", lessons::NAMES.join(", "))
    })?;

    log::info!("starting lesson {:?}", lesson.name());
    Runtime::run(RuntimeConfig::default().with_title(format!("Learning OpenGL - {name}")), lesson)
}
