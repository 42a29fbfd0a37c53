use std::path::PathBuf;

use glam::{DVec2, IVec2, UVec2};

/// 8-bit RGB fill color.
pub type Rgb = [u8; 3];

/// Kind-specific geometry carried by a [`SceneNode`](crate::SceneNode).
///
/// Coordinates are node-local: the origin is the node's position and the
/// axes follow the node's rotation. Turning a part into pixels is the
/// renderer's business; the scene only needs enough geometry to hit test.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Part {
    /// Grouping node with nothing to draw. Never hit.
    #[default]
    Empty,

    /// Filled polygon.
    Polygon {
        /// Vertices, in drawing order. The outline is closed implicitly.
        points: Vec<IVec2>,
        color: Rgb,
    },

    /// Bitmap drawn with pixel `center` on the node origin.
    Image {
        path: PathBuf,
        /// Pixel that sits on the node's placed position.
        center: IVec2,
        /// Image dimensions in pixels.
        size: UVec2,
    },
}

impl Part {
    #[must_use]
    pub fn polygon(points: impl Into<Vec<IVec2>>, color: Rgb) -> Self {
        Part::Polygon {
            points: points.into(),
            color,
        }
    }

    #[must_use]
    pub fn image(path: impl Into<PathBuf>, center: IVec2, size: UVec2) -> Self {
        Part::Image {
            path: path.into(),
            center,
            size,
        }
    }

    /// The point in part coordinates that lands on the node origin.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> IVec2 {
        match self {
            Part::Image { center, .. } => *center,
            Part::Empty | Part::Polygon { .. } => IVec2::ZERO,
        }
    }

    /// Whether a node-local point lies inside the part.
    #[must_use]
    pub fn contains(&self, local: DVec2) -> bool {
        match self {
            Part::Empty => false,
            Part::Polygon { points, .. } => polygon_contains(points, local),
            Part::Image { center, size, .. } => {
                let pixel = local + center.as_dvec2();
                pixel.x >= 0.0
                    && pixel.y >= 0.0
                    && pixel.x < f64::from(size.x)
                    && pixel.y < f64::from(size.y)
            }
        }
    }
}

/// Even-odd point-in-polygon test.
fn polygon_contains(points: &[IVec2], p: DVec2) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for (i, a) in points.iter().enumerate() {
        let a = a.as_dvec2();
        let b = points[j].as_dvec2();
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
