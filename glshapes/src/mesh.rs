//! CPU-side geometry of the shapes, ready to be uploaded as indexed triangles.

use cgmath::Point2;
use std::{error, f32::consts::PI, fmt};

use crate::{
  geometry::{self, TriangulationError},
  vertex::{Vertex, VertexColor, VertexIndex, VertexPosition},
};

/// Error raised when the parameters of a shape make no sense.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshError {
  /// A circle needs at least three sides.
  TooFewSides(u32),

  /// A circle radius must be strictly positive and finite.
  InvalidRadius(f32),

  /// The polygon could not be triangulated.
  Triangulation(TriangulationError),
}

impl fmt::Display for MeshError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      MeshError::TooFewSides(n) => write!(f, "a circle needs at least 3 sides, got {}", n),
      MeshError::InvalidRadius(r) => write!(f, "invalid circle radius: {}", r),
      MeshError::Triangulation(ref e) => write!(f, "cannot triangulate polygon: {}", e),
    }
  }
}

impl error::Error for MeshError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      MeshError::Triangulation(e) => Some(e),
      _ => None,
    }
  }
}

impl From<TriangulationError> for MeshError {
  fn from(e: TriangulationError) -> Self {
    MeshError::Triangulation(e)
  }
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
  pub positions: Vec<[f32; 2]>,
  pub colors: Vec<[f32; 3]>,
  /// Three indices per triangle.
  pub indices: Vec<VertexIndex>,
}

impl Mesh {
  /// A single triangle.
  pub fn triangle(positions: [[f32; 2]; 3], colors: [[f32; 3]; 3]) -> Self {
    Mesh {
      positions: positions.to_vec(),
      colors: colors.to_vec(),
      indices: vec![0, 1, 2],
    }
  }

  /// A quad made of two triangles.
  ///
  /// Corners are expected in that order: top left, top right, bottom right, bottom left.
  pub fn quad(corners: [[f32; 2]; 4], colors: [[f32; 3]; 4]) -> Self {
    Mesh {
      positions: corners.to_vec(),
      colors: colors.to_vec(),
      indices: vec![0, 1, 3, 1, 2, 3],
    }
  }

  /// A regular polygon approximating a circle, as a fan around its center.
  ///
  /// Vertex 0 is the center; the `sides` next ones lie on the circle, counter-clockwise from angle 0.
  pub fn circle(
    center: [f32; 2],
    radius: f32,
    sides: u32,
    color: [f32; 3],
  ) -> Result<Self, MeshError> {
    if sides < 3 {
      return Err(MeshError::TooFewSides(sides));
    }

    if !(radius.is_finite() && radius > 0.) {
      return Err(MeshError::InvalidRadius(radius));
    }

    let [cx, cy] = center;
    let step = 2. * PI / sides as f32;

    let mut positions = Vec::with_capacity(sides as usize + 1);
    positions.push(center);
    positions.extend((0..sides).map(|i| {
      let angle = i as f32 * step;
      [cx + radius * angle.cos(), cy + radius * angle.sin()]
    }));

    let indices = (0..sides)
      .flat_map(|i| [0, i + 1, (i + 1) % sides + 1])
      .collect();

    Ok(Mesh {
      colors: vec![color; positions.len()],
      positions,
      indices,
    })
  }

  /// An arbitrary simple polygon, triangulated by ear clipping.
  pub fn polygon(points: &[Point2<f32>], color: [f32; 3]) -> Result<Self, MeshError> {
    let triangles = geometry::triangulate(points)?;

    Ok(Mesh {
      positions: points.iter().map(|p| [p.x, p.y]).collect(),
      colors: vec![color; points.len()],
      indices: triangles.into_iter().flatten().collect(),
    })
  }

  /// Number of triangles.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Interleaved vertices, as expected by the shape shader.
  pub fn vertices(&self) -> Vec<Vertex> {
    self
      .positions
      .iter()
      .zip(&self.colors)
      .map(|(&pos, &rgb)| Vertex::new(VertexPosition::new(pos), VertexColor::new(rgb)))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const BLUE: [f32; 3] = [0., 0.5, 1.];

  #[test]
  fn triangle_mesh() {
    let mesh = Mesh::triangle([[0., 0.5], [0.5, -0.5], [-0.5, -0.5]], [BLUE; 3]);

    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.vertices().len(), 3);
  }

  #[test]
  fn quad_mesh_shares_the_diagonal() {
    let mesh = Mesh::quad(
      [[-0.5, 0.5], [0.5, 0.5], [0.5, -0.5], [-0.5, -0.5]],
      [BLUE; 4],
    );

    assert_eq!(mesh.indices, vec![0, 1, 3, 1, 2, 3]);
    assert_eq!(mesh.triangle_count(), 2);
  }

  #[test]
  fn circle_is_centered() {
    let mesh = Mesh::circle([0.25, -0.5], 0.5, 4, BLUE).unwrap();

    assert_eq!(mesh.positions.len(), 5);
    assert_eq!(mesh.positions[0], [0.25, -0.5]);
    assert_eq!(mesh.positions[1], [0.75, -0.5]);

    for &[x, y] in &mesh.positions[1..] {
      let (dx, dy) = (x - 0.25, y + 0.5);
      assert!(((dx * dx + dy * dy).sqrt() - 0.5).abs() < 1e-6);
    }
  }

  #[test]
  fn circle_fan_closes() {
    let mesh = Mesh::circle([0., 0.], 1., 6, BLUE).unwrap();

    assert_eq!(mesh.triangle_count(), 6);
    assert_eq!(&mesh.indices[..3], &[0, 1, 2]);
    assert_eq!(&mesh.indices[15..], &[0, 6, 1]);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
  }

  #[test]
  fn circle_rejects_bad_parameters() {
    assert_eq!(
      Mesh::circle([0., 0.], 1., 2, BLUE),
      Err(MeshError::TooFewSides(2))
    );
    assert_eq!(
      Mesh::circle([0., 0.], 0., 8, BLUE),
      Err(MeshError::InvalidRadius(0.))
    );
    assert!(Mesh::circle([0., 0.], f32::NAN, 8, BLUE).is_err());
  }

  #[test]
  fn polygon_mesh_keeps_all_positions() {
    let points = [
      Point2::new(0., 0.),
      Point2::new(2., 1.),
      Point2::new(0., 2.),
      Point2::new(1., 1.),
    ];
    let mesh = Mesh::polygon(&points, BLUE).unwrap();

    assert_eq!(mesh.positions.len(), 4);
    assert_eq!(mesh.colors.len(), 4);
    assert_eq!(mesh.triangle_count(), 2);
  }

  #[test]
  fn polygon_mesh_forwards_triangulation_errors() {
    let points = [Point2::new(0., 0.), Point2::new(1., 0.)];

    assert_eq!(
      Mesh::polygon(&points, BLUE),
      Err(MeshError::Triangulation(TriangulationError::TooFewVertices(2)))
    );
  }
}
