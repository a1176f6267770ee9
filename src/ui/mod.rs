//! Terminal interface building blocks: input reading, output rendering,
//! markdown layout, and the settings catalog behind them.

pub mod input;
pub mod markdown;
pub mod render;
pub mod settings;

pub use input::{InputReader, ReadOutcome};
pub use render::{Renderer, Reply, ReplyOrigin};
