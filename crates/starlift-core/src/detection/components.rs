use ndarray::Array2;

/// Statistics for a single connected component.
#[derive(Clone, Debug)]
pub struct ComponentStats {
    /// Label of this component in [`Labeling::labels`], starting at 1.
    pub label: u32,
    /// Number of pixels in the component.
    pub area: usize,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
}

/// Result of connected component labeling.
#[derive(Clone, Debug)]
pub struct Labeling {
    /// Per-pixel label; 0 is background, components are numbered 1..=n
    /// in raster order of their first pixel.
    pub labels: Array2<u32>,
    /// One entry per component, indexed by `label - 1`.
    pub components: Vec<ComponentStats>,
}

impl Labeling {
    pub fn count(&self) -> usize {
        self.components.len()
    }
}

/// Label 8-connected components of a binary mask using two-pass labeling
/// with union-find.
pub fn label_components(mask: &Array2<bool>) -> Labeling {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return Labeling {
            labels,
            components: Vec::new(),
        };
    }

    // Index 0 unused; provisional labels start at 1.
    let mut parent: Vec<u32> = vec![0];

    // Pass 1: provisional labels from the already-visited half of the
    // 8-neighbourhood (up-left, up, up-right, left).
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let mut neighbours = [0u32; 4];
            if row > 0 {
                if col > 0 {
                    neighbours[0] = labels[[row - 1, col - 1]];
                }
                neighbours[1] = labels[[row - 1, col]];
                if col + 1 < w {
                    neighbours[2] = labels[[row - 1, col + 1]];
                }
            }
            if col > 0 {
                neighbours[3] = labels[[row, col - 1]];
            }

            let smallest = neighbours.iter().copied().filter(|&l| l > 0).min();
            match smallest {
                None => {
                    let next = parent.len() as u32;
                    parent.push(next);
                    labels[[row, col]] = next;
                }
                Some(min_label) => {
                    labels[[row, col]] = min_label;
                    for &other in neighbours.iter().filter(|&&l| l > 0 && l != min_label) {
                        union(&mut parent, min_label, other);
                    }
                }
            }
        }
    }

    // Map every root to a compact final label.
    let mut compact = vec![0u32; parent.len()];
    let mut components: Vec<ComponentStats> = Vec::new();

    // Pass 2: resolve labels and collect stats.
    for row in 0..h {
        for col in 0..w {
            let provisional = labels[[row, col]];
            if provisional == 0 {
                continue;
            }
            let root = find(&parent, provisional) as usize;
            if compact[root] == 0 {
                components.push(ComponentStats {
                    label: components.len() as u32 + 1,
                    area: 0,
                    bbox: (row, row, col, col),
                });
                compact[root] = components.len() as u32;
            }
            let label = compact[root];
            labels[[row, col]] = label;

            let entry = &mut components[label as usize - 1];
            entry.area += 1;
            entry.bbox.0 = entry.bbox.0.min(row);
            entry.bbox.1 = entry.bbox.1.max(row);
            entry.bbox.2 = entry.bbox.2.min(col);
            entry.bbox.3 = entry.bbox.3.max(col);
        }
    }

    Labeling { labels, components }
}

/// Keep only components with at least `min_area` pixels.
pub fn filter_small_components(mask: &Array2<bool>, min_area: usize) -> Array2<bool> {
    let labeling = label_components(mask);
    labeling.labels.mapv(|label| {
        label > 0 && labeling.components[label as usize - 1].area >= min_area
    })
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root to keep labels consistent.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
