//! Ear-clipping triangulation of simple polygons.
//!
//! A vertex is an _ear_ when it is a convex corner and the triangle it forms with its two neighbors contains no
//! other vertex of the polygon. Clipping an ear (emitting its triangle and unlinking the vertex) leaves a simple
//! polygon with one vertex less, and every simple polygon with more than three vertices has at least two ears, so
//! repeatedly clipping ears triangulates the whole polygon in O(n²).
//!
//! Only reflex (or flat) vertices are tested against a candidate ear: if any vertex lies inside a convex corner’s
//! triangle, a reflex one does too.

use cgmath::Point2;
use std::{error, fmt};

use super::{cross, is_convex, point_in_triangle, ring::VertexRing, Winding};

/// Errors that can occur while classifying or triangulating a polygon.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TriangulationError {
  /// Fewer than three distinct vertices.
  TooFewVertices(usize),

  /// A coordinate is NaN or infinite; the index of the first offending vertex is given.
  NonFinite(usize),

  /// The polygon has no area.
  Degenerate,

  /// No ear could be found while vertices remained, which happens for self-intersecting input.
  NotSimple { remaining: usize },
}

impl fmt::Display for TriangulationError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      TriangulationError::TooFewVertices(n) => {
        write!(f, "a polygon needs at least 3 distinct vertices, got {}", n)
      }
      TriangulationError::NonFinite(i) => write!(f, "vertex {} has a non-finite coordinate", i),
      TriangulationError::Degenerate => f.write_str("polygon has no area"),
      TriangulationError::NotSimple { remaining } => write!(
        f,
        "polygon is not simple: no ear left among the {} remaining vertices",
        remaining
      ),
    }
  }
}

impl error::Error for TriangulationError {}

/// Per-vertex classification of a polygon.
///
/// All lists hold indices into the classified slice, in increasing order. Consecutive duplicates of a vertex are not
/// classified; only their first occurrence is.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Classification {
  pub convex: Vec<usize>,
  pub reflex: Vec<usize>,
  /// Vertices lying on the straight line joining their neighbors.
  pub collinear: Vec<usize>,
  /// Convex vertices that can be clipped right away. This is a subset of [`Classification::convex`].
  pub ears: Vec<usize>,
}

/// Classify every vertex of a polygon as convex, reflex or collinear, and find its ears.
pub fn classify(points: &[Point2<f32>]) -> Result<Classification, TriangulationError> {
  let (ring, winding) = prepare(points)?;
  let mut classification = Classification::default();

  for i in ring.iter() {
    let corner = turn(points, &ring, i, winding);

    if corner > 0. {
      classification.convex.push(i);

      if is_ear(points, &ring, i, winding) {
        classification.ears.push(i);
      }
    } else if corner < 0. {
      classification.reflex.push(i);
    } else {
      classification.collinear.push(i);
    }
  }

  Ok(classification)
}

/// Triangulate a simple polygon.
///
/// The polygon can be given in either winding; the returned triangles index into `points` and keep that winding.
/// Collinear vertices are dropped without emitting a triangle, so a polygon of n vertices yields at most n - 2
/// triangles, exactly n - 2 when no three of its vertices are collinear. The areas of the triangles always add up
/// to the area of the polygon.
pub fn triangulate(points: &[Point2<f32>]) -> Result<Vec<[u32; 3]>, TriangulationError> {
  let (mut ring, winding) = prepare(points)?;
  drop_collinear(points, &mut ring);

  let mut triangles = Vec::with_capacity(ring.len().saturating_sub(2));
  let mut cursor = ring.first().ok_or(TriangulationError::TooFewVertices(0))?;
  // number of vertices visited since the last one got removed
  let mut stalled = 0;

  while ring.len() > 3 {
    let prev = ring.prev(cursor);
    let next = ring.next(cursor);

    if turn(points, &ring, cursor, winding) == 0. {
      ring.remove(cursor);
      cursor = next;
      stalled = 0;
      continue;
    }

    if is_ear(points, &ring, cursor, winding) {
      triangles.push([prev as u32, cursor as u32, next as u32]);
      ring.remove(cursor);
      cursor = next;
      stalled = 0;
      continue;
    }

    cursor = next;
    stalled += 1;

    if stalled >= ring.len() {
      log::debug!("no ear found, {} vertices left", ring.len());
      return Err(TriangulationError::NotSimple {
        remaining: ring.len(),
      });
    }
  }

  let a = cursor;
  let b = ring.next(a);
  let c = ring.next(b);
  if cross(points[a], points[b], points[c]) != 0. {
    triangles.push([a as u32, b as u32, c as u32]);
  }

  Ok(triangles)
}

// Validate the input and link its distinct vertices in a ring.
fn prepare(points: &[Point2<f32>]) -> Result<(VertexRing, Winding), TriangulationError> {
  if points.len() < 3 {
    return Err(TriangulationError::TooFewVertices(points.len()));
  }

  if let Some(i) = points
    .iter()
    .position(|p| !p.x.is_finite() || !p.y.is_finite())
  {
    return Err(TriangulationError::NonFinite(i));
  }

  let mut kept: Vec<usize> = Vec::with_capacity(points.len());
  for (i, p) in points.iter().enumerate() {
    if kept.last().map_or(true, |&j| points[j] != *p) {
      kept.push(i);
    }
  }

  while kept.len() > 1 && points[kept[0]] == points[kept[kept.len() - 1]] {
    kept.pop();
  }

  if kept.len() < 3 {
    return Err(TriangulationError::TooFewVertices(kept.len()));
  }

  let distinct: Vec<_> = kept.iter().map(|&i| points[i]).collect();
  let winding = super::winding(&distinct).ok_or(TriangulationError::Degenerate)?;

  Ok((VertexRing::from_indices(&kept), winding))
}

// Cross product at i, positive for a convex corner whatever the winding.
fn turn(points: &[Point2<f32>], ring: &VertexRing, i: usize, winding: Winding) -> f64 {
  cross(points[ring.prev(i)], points[i], points[ring.next(i)]) * winding.sign()
}

fn drop_collinear(points: &[Point2<f32>], ring: &mut VertexRing) {
  let mut changed = true;

  while changed && ring.len() > 3 {
    changed = false;

    let lap: Vec<_> = ring.iter().collect();
    for i in lap {
      if ring.len() <= 3 {
        break;
      }

      if cross(points[ring.prev(i)], points[i], points[ring.next(i)]) == 0. {
        ring.remove(i);
        changed = true;
      }
    }
  }
}

fn is_ear(points: &[Point2<f32>], ring: &VertexRing, i: usize, winding: Winding) -> bool {
  let prev = ring.prev(i);
  let next = ring.next(i);
  let (a, b, c) = (points[prev], points[i], points[next]);

  if !is_convex(a, b, c, winding) {
    return false;
  }

  for j in ring.iter() {
    if j == prev || j == i || j == next {
      continue;
    }

    let p = points[j];

    // a vertex touching a corner of the ear does not block it
    if p == a || p == b || p == c {
      continue;
    }

    if is_convex(points[ring.prev(j)], p, points[ring.next(j)], winding) {
      continue;
    }

    if point_in_triangle(a, b, c, p) {
      return false;
    }
  }

  true
}
