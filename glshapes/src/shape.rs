//! Shapes living on the GPU and the way they move around.

use cgmath::{Matrix4, Vector2, Vector3, Zero as _};
use luminance_front::{
  context::GraphicsContext,
  tess::{Mode, Tess, TessError},
  Backend,
};

use crate::{
  mesh::Mesh,
  vertex::{Vertex, VertexIndex},
};

/// Direction a shape can be moved towards.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
  Up,
  Down,
  Left,
  Right,
}

impl Direction {
  pub const ALL: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
  ];

  /// Unit vector pointing towards that direction, in normalized device coordinates.
  pub fn unit(self) -> Vector2<f32> {
    match self {
      Direction::Up => Vector2::new(0., 1.),
      Direction::Down => Vector2::new(0., -1.),
      Direction::Left => Vector2::new(-1., 0.),
      Direction::Right => Vector2::new(1., 0.),
    }
  }

  fn bit(self) -> u8 {
    match self {
      Direction::Up => 1,
      Direction::Down => 2,
      Direction::Left => 4,
      Direction::Right => 8,
    }
  }
}

/// Translation of a shape from where its mesh was defined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
  pub offset: Vector2<f32>,
}

impl Default for Placement {
  fn default() -> Self {
    Placement {
      offset: Vector2::zero(),
    }
  }
}

impl Placement {
  pub fn move_up(&mut self, distance: f32) {
    self.translate(Direction::Up, distance);
  }

  pub fn move_down(&mut self, distance: f32) {
    self.translate(Direction::Down, distance);
  }

  pub fn move_left(&mut self, distance: f32) {
    self.translate(Direction::Left, distance);
  }

  pub fn move_right(&mut self, distance: f32) {
    self.translate(Direction::Right, distance);
  }

  pub fn translate(&mut self, direction: Direction, distance: f32) {
    self.offset += direction.unit() * distance;
  }

  /// Matrix to feed the `transform` uniform with.
  pub fn transform(&self) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(self.offset.x, self.offset.y, 0.))
  }
}

/// Directions currently held down.
///
/// Keyboards only report transitions, so the state is tracked here and applied once per frame, scaled by the time
/// the frame took.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Motion {
  held: u8,
}

impl Motion {
  pub fn press(&mut self, direction: Direction) {
    self.held |= direction.bit();
  }

  pub fn release(&mut self, direction: Direction) {
    self.held &= !direction.bit();
  }

  pub fn clear(&mut self) {
    self.held = 0;
  }

  pub fn is_held(&self, direction: Direction) -> bool {
    self.held & direction.bit() != 0
  }

  pub fn is_idle(&self) -> bool {
    self.held == 0
  }

  /// Move `placement` by `speed * dt` towards every held direction.
  pub fn step(&self, placement: &mut Placement, speed: f32, dt: f32) {
    let distance = speed * dt;

    for direction in Direction::ALL {
      if self.is_held(direction) {
        placement.translate(direction, distance);
      }
    }
  }
}

/// A mesh uploaded to the GPU, along with its placement.
pub struct Shape {
  pub tess: Tess<Vertex, VertexIndex>,
  pub placement: Placement,
}

impl Shape {
  /// Upload a mesh.
  pub fn new(
    context: &mut impl GraphicsContext<Backend = Backend>,
    mesh: &Mesh,
  ) -> Result<Self, TessError> {
    let vertices = mesh.vertices();
    let tess = context
      .new_tess()
      .set_vertices(&vertices[..])
      .set_indices(&mesh.indices[..])
      .set_mode(Mode::Triangle)
      .build()?;

    log::debug!(
      "uploaded shape: {} vertices, {} triangles",
      vertices.len(),
      mesh.triangle_count()
    );

    Ok(Shape {
      tess,
      placement: Placement::default(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use cgmath::{Point3, Transform as _};

  #[test]
  fn moves_accumulate() {
    let mut placement = Placement::default();

    placement.move_up(0.5);
    placement.move_right(0.25);
    placement.move_down(0.125);
    placement.move_left(1.);

    assert_eq!(placement.offset, Vector2::new(-0.75, 0.375));
  }

  #[test]
  fn transform_translates_points() {
    let mut placement = Placement::default();
    placement.translate(Direction::Right, 0.5);
    placement.translate(Direction::Down, 0.25);

    let moved = placement.transform().transform_point(Point3::new(0., 0.5, 0.));
    assert_eq!(moved, Point3::new(0.5, 0.25, 0.));
  }

  #[test]
  fn default_transform_is_identity() {
    use cgmath::SquareMatrix as _;

    assert_eq!(Placement::default().transform(), Matrix4::identity());
  }

  #[test]
  fn motion_tracks_held_directions() {
    let mut motion = Motion::default();
    assert!(motion.is_idle());

    motion.press(Direction::Left);
    motion.press(Direction::Up);
    motion.press(Direction::Up);
    assert!(motion.is_held(Direction::Left));
    assert!(motion.is_held(Direction::Up));
    assert!(!motion.is_held(Direction::Right));

    motion.release(Direction::Up);
    assert!(!motion.is_held(Direction::Up));
    assert!(motion.is_held(Direction::Left));

    motion.clear();
    assert!(motion.is_idle());
  }

  #[test]
  fn motion_is_scaled_by_frame_time() {
    let mut motion = Motion::default();
    motion.press(Direction::Right);
    motion.press(Direction::Up);

    let mut placement = Placement::default();
    motion.step(&mut placement, 2., 0.25);
    motion.step(&mut placement, 2., 0.25);

    assert_eq!(placement.offset, Vector2::new(1., 1.));
  }

  #[test]
  fn opposite_directions_cancel_out() {
    let mut motion = Motion::default();
    motion.press(Direction::Left);
    motion.press(Direction::Right);

    let mut placement = Placement::default();
    motion.step(&mut placement, 1., 0.5);

    assert_eq!(placement.offset, Vector2::new(0., 0.));
  }
}
