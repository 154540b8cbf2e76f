pub mod gaussian_blur;
pub mod levels;
pub mod median;
pub mod stretch;
pub mod unsharp_mask;
