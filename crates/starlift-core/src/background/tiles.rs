/// Rectangular tile `[y0, y1) x [x0, x1)` over a 2-D array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub y0: usize,
    pub y1: usize,
    pub x0: usize,
    pub x1: usize,
}

impl Tile {
    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }
}

/// Tiles covering an `height x width` array.
///
/// Tile origins step by `block_size - overlap` on both axes; each tile spans
/// up to `block_size` pixels and is clipped to the array bound. Callers must
/// ensure `overlap < block_size`.
pub fn tile_grid(height: usize, width: usize, block_size: usize, overlap: usize) -> Vec<Tile> {
    let stride = block_size.saturating_sub(overlap).max(1);
    let mut tiles = Vec::new();

    for y0 in (0..height).step_by(stride) {
        for x0 in (0..width).step_by(stride) {
            tiles.push(Tile {
                y0,
                y1: (y0 + block_size).min(height),
                x0,
                x1: (x0 + block_size).min(width),
            });
        }
    }

    tiles
}
