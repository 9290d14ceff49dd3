#![forbid(unsafe_code)]

mod rendering;
mod source;

pub use rendering::{init_tracing, write_png, RenderConfig};
pub use source::{respond, synthetic_intensity};
