pub mod components;
pub mod morphology;
pub mod stars;
pub mod threshold;

pub use stars::{count_stars, detect_stars, StarMask};
