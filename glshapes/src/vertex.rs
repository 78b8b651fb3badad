//! Vertex layout shared by every shape.
//!
//! The attribute names must match the inputs of the shape vertex shader, including user-provided ones.

use luminance::{Semantics, Vertex};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Semantics)]
pub enum Semantics {
  // 2D position, in normalized device coordinates before the transform
  #[sem(name = "co", repr = "[f32; 2]", wrapper = "VertexPosition")]
  Position,
  // linear RGB, interpolated across triangles
  #[sem(name = "color", repr = "[f32; 3]", wrapper = "VertexColor")]
  Color,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Vertex)]
#[vertex(sem = "Semantics")]
pub struct Vertex {
  pub pos: VertexPosition,
  pub rgb: VertexColor,
}

// Polygons loaded from files can be large, so indices are 32-bit.
pub type VertexIndex = u32;
