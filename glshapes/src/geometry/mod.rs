//! Planar geometry: orientation predicates, a circular vertex list and polygon triangulation.
//!
//! Every predicate takes `f32` points (what ends up on the GPU) and evaluates in `f64`. A difference of two `f32`
//! is exact in `f64`, and so is the product of two such differences, so the sign of [`cross`] is only subject to the
//! rounding of its final subtraction. That is enough for the ear test to be reliable on the inputs we care about
//! without bringing in adaptive-precision arithmetic.

use cgmath::Point2;

pub mod earclip;
pub mod parse;
pub mod ring;

pub use earclip::{classify, triangulate, Classification, TriangulationError};
pub use parse::{parse_polygon, ParsePolygonError};
pub use ring::VertexRing;

/// Orientation of a closed polygon.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Winding {
  CounterClockwise,
  Clockwise,
}

impl Winding {
  /// Sign to multiply a [`cross`] product with so that convex turns come out positive.
  pub fn sign(self) -> f64 {
    match self {
      Winding::CounterClockwise => 1.,
      Winding::Clockwise => -1.,
    }
  }
}

/// Z component of `(b - a) × (c - a)`.
///
/// Positive when `a`, `b`, `c` turn counter-clockwise, negative when they turn clockwise and zero when they are
/// collinear.
pub fn cross(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> f64 {
  let (ax, ay) = (f64::from(a.x), f64::from(a.y));
  let abx = f64::from(b.x) - ax;
  let aby = f64::from(b.y) - ay;
  let acx = f64::from(c.x) - ax;
  let acy = f64::from(c.y) - ay;

  abx * acy - aby * acx
}

/// Signed area of a closed polygon (shoelace formula); positive for counter-clockwise vertices.
pub fn signed_area(points: &[Point2<f32>]) -> f64 {
  if points.len() < 3 {
    return 0.;
  }

  let twice = points
    .iter()
    .zip(points.iter().cycle().skip(1))
    .map(|(p, q)| f64::from(p.x) * f64::from(q.y) - f64::from(q.x) * f64::from(p.y))
    .sum::<f64>();

  twice * 0.5
}

/// Winding of a closed polygon, or `None` if it has no area.
pub fn winding(points: &[Point2<f32>]) -> Option<Winding> {
  let area = signed_area(points);

  if area > 0. {
    Some(Winding::CounterClockwise)
  } else if area < 0. {
    Some(Winding::Clockwise)
  } else {
    None
  }
}

/// Unsigned area of a triangle.
pub fn triangle_area(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> f64 {
  cross(a, b, c).abs() * 0.5
}

/// Whether `cur` is a strictly convex corner of a polygon with the given winding.
///
/// Collinear corners are neither convex nor reflex for the purpose of ear clipping; they are reported as not convex.
pub fn is_convex(prev: Point2<f32>, cur: Point2<f32>, next: Point2<f32>, winding: Winding) -> bool {
  cross(prev, cur, next) * winding.sign() > 0.
}

/// Whether `p` lies inside the triangle `a b c` or on its boundary.
///
/// The triangle can be given in either winding. A degenerate triangle only contains the points lying on it.
pub fn point_in_triangle(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>, p: Point2<f32>) -> bool {
  let d0 = cross(a, b, p);
  let d1 = cross(b, c, p);
  let d2 = cross(c, a, p);

  let has_neg = d0 < 0. || d1 < 0. || d2 < 0.;
  let has_pos = d0 > 0. || d1 > 0. || d2 > 0.;

  if has_neg && has_pos {
    return false;
  }

  if has_neg || has_pos {
    return true;
  }

  // all three are zero: the triangle is flat, p must lie on one of its edges
  on_segment(a, b, p) || on_segment(b, c, p) || on_segment(c, a, p)
}

// p is assumed collinear with a and b
fn on_segment(a: Point2<f32>, b: Point2<f32>, p: Point2<f32>) -> bool {
  p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}
