//! Geometric primitives: pose transforms, oriented boxes and segment tests.

use geo::{Line, Point};
use serde::{Deserialize, Serialize};

/// A vehicle pose: world position plus clockwise rotation in degrees.
///
/// A vehicle at rotation zero drives towards negative y (the top of the
/// image), so the forward direction in world space is `rotation + 270`
/// degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World-space position of the body centre.
    pub position: Point<f32>,
    /// Clockwise rotation in degrees.
    pub rotation: f32,
}

impl Pose {
    /// Creates a pose from a position and a rotation in degrees.
    pub fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self {
            position: Point::new(x, y),
            rotation,
        }
    }

    /// The forward direction of travel, in radians.
    #[inline]
    pub fn heading_radians(&self) -> f32 {
        (self.rotation + 270.0).to_radians()
    }

    /// Rotates the pose by `degrees` (positive is clockwise).
    pub fn rotate(&mut self, degrees: f32) {
        self.rotation += degrees;
    }

    /// Moves the pose `distance` units along its heading.
    pub fn translate_along_heading(&mut self, distance: f32) {
        let heading = self.heading_radians();
        self.position = Point::new(
            self.position.x() + distance * heading.cos(),
            self.position.y() + distance * heading.sin(),
        );
    }
}

/// The local-frame shape of a vehicle body: size plus track scale.
///
/// Local coordinates run from `(0, 0)` at the top-left of the body to
/// `(width, height)` at the bottom-right; the top edge is the front.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyFrame {
    /// Body width in local units.
    pub width: f32,
    /// Body height in local units.
    pub height: f32,
    /// Per-axis scale applied when mapping into world space.
    pub scale: (f32, f32),
}

impl BodyFrame {
    /// Maps a local-frame point into world space under a pose.
    ///
    /// The body rotates about its centre, so the local point is re-centred,
    /// scaled, rotated and finally translated to the pose position.
    #[inline]
    pub fn transform_point(&self, pose: &Pose, local_x: f32, local_y: f32) -> Point<f32> {
        let cx = (local_x - self.width * 0.5) * self.scale.0;
        let cy = (local_y - self.height * 0.5) * self.scale.1;
        let theta = pose.rotation.to_radians();
        let (sin, cos) = theta.sin_cos();
        Point::new(
            pose.position.x() + cx * cos - cy * sin,
            pose.position.y() + cx * sin + cy * cos,
        )
    }
}

/// The world-space sample points of a vehicle's oriented bounding box.
///
/// Eight points: the four corners plus the midpoint of each edge. The corner
/// indices double as edge endpoints for waypoint-intersection tests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrientedBox {
    /// Sample points in the order: top-left, top-mid, top-right,
    /// bottom-left, bottom-mid, bottom-right, left-mid, right-mid.
    pub points: [Point<f32>; 8],
}

impl OrientedBox {
    /// Computes the box for a pose and body frame.
    pub fn compute(pose: &Pose, frame: &BodyFrame) -> Self {
        let w = frame.width;
        let h = frame.height;
        let at = |x: f32, y: f32| frame.transform_point(pose, x, y);
        Self {
            points: [
                at(0.0, 0.0),
                at(w * 0.5, 0.0),
                at(w, 0.0),
                at(0.0, h),
                at(w * 0.5, h),
                at(w, h),
                at(0.0, h * 0.5),
                at(w, h * 0.5),
            ],
        }
    }

    /// The four box edges: top, left, right, bottom.
    pub fn edges(&self) -> [Line<f32>; 4] {
        let p = &self.points;
        [
            Line::new(p[0], p[2]),
            Line::new(p[0], p[3]),
            Line::new(p[2], p[5]),
            Line::new(p[3], p[5]),
        ]
    }
}

/// Tests whether two line segments intersect.
///
/// Parametric line-line intersection. Parallel and degenerate (zero-length)
/// segments make the denominator zero and report no intersection; the
/// division is never evaluated in that case, so no NaN can be mistaken for
/// a hit.
pub fn segments_intersect(a: &Line<f32>, b: &Line<f32>) -> bool {
    let (p1, p2) = (a.start, a.end);
    let (p3, p4) = (b.start, b.end);

    let denominator = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if denominator == 0.0 {
        return false;
    }

    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denominator;
    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denominator;

    (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
}
