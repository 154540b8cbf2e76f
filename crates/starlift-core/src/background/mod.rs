pub mod blend;
pub mod estimator;
pub mod tiles;

pub use blend::blend_weights;
pub use estimator::{estimate_background, estimate_background_reported, BackgroundEstimator};
pub use tiles::{tile_grid, Tile};
