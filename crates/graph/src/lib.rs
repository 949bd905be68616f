pub mod pipeline;
pub mod rolling;
pub mod window;

pub use pipeline::Pipeline;
pub use rolling::RollingGraph;
pub use window::{Admission, WindowTracker};
