pub mod adaptive;
pub mod compositor;
pub mod finish;

pub use adaptive::{adaptive_boost, boost_factor, enhance_stars};
pub use compositor::{composite_channel, ChannelLayers};
pub use finish::{recombine_stretched, sharpen, stretch_and_sharpen};
