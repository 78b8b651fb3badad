//! The shading pipeline used by every shape.
//!
//! Shapes are shaded with a single program: vertices bring a 2D position (`co`) and a color (`color`), and the
//! `transform` uniform places the shape on screen. The built-in GLSL is embedded in the binary; platforms can
//! provide their own sources instead, which also enables reloading them while the application runs.

use luminance::shader::types::Mat44;
use luminance::UniformInterface;
use luminance_front::{
  context::GraphicsContext,
  shader::{BuiltProgram, Program, Uniform},
  Backend,
};

use crate::{shape::Placement, vertex::Semantics};

pub use luminance_front::shader::ProgramError;

const VS: &str = include_str!("shaders/shape-vs.glsl");
const FS: &str = include_str!("shaders/shape-fs.glsl");

/// Uniforms of the shape program.
#[derive(Debug, UniformInterface)]
pub struct ShapeInterface {
  // custom shaders are allowed to ignore the placement
  #[uniform(unbound)]
  pub transform: Uniform<Mat44<f32>>,
}

pub type ShapeProgram = Program<Semantics, (), ShapeInterface>;

/// GLSL sources of the shape program, without any `#version` directive.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShaderSources {
  pub vertex: String,
  pub fragment: String,
}

impl ShaderSources {
  /// Sources shipped with the crate.
  pub fn builtin() -> Self {
    ShaderSources {
      vertex: VS.to_owned(),
      fragment: FS.to_owned(),
    }
  }
}

/// Compile and link the shape program.
///
/// Warnings (typically unused uniforms) do not prevent the program from being used; they are logged.
pub fn build_program(
  context: &mut impl GraphicsContext<Backend = Backend>,
  sources: &ShaderSources,
) -> Result<ShapeProgram, ProgramError> {
  let BuiltProgram { program, warnings } = context
    .new_shader_program::<Semantics, (), ShapeInterface>()
    .from_strings(&sources.vertex, None, None, &sources.fragment)?;

  for warning in warnings {
    log::warn!("shape program: {}", warning);
  }

  Ok(program)
}

/// Rebuild `program` from `sources`.
///
/// The current program is kept if the new one fails to build, so that a typo in a shader being edited does not
/// bring the application down. Returns whether the program was replaced.
pub fn reload_program(
  context: &mut impl GraphicsContext<Backend = Backend>,
  program: &mut ShapeProgram,
  sources: &ShaderSources,
) -> bool {
  match build_program(context, sources) {
    Ok(reloaded) => {
      *program = reloaded;
      log::info!("shape program reloaded");
      true
    }

    Err(e) => {
      log::error!("cannot reload shape program, keeping the current one: {}", e);
      false
    }
  }
}

/// Value of the `transform` uniform for a placement.
pub fn transform_uniform(placement: &Placement) -> Mat44<f32> {
  Mat44::new(placement.transform())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_sources_match_vertex_semantics() {
    let sources = ShaderSources::builtin();

    assert!(sources.vertex.contains("in vec2 co;"));
    assert!(sources.vertex.contains("in vec3 color;"));
    assert!(sources.vertex.contains("uniform mat4 transform;"));
    assert!(sources.fragment.contains("out vec4"));
  }

  #[test]
  fn builtin_sources_leave_version_to_the_backend() {
    let sources = ShaderSources::builtin();

    assert!(!sources.vertex.contains("#version"));
    assert!(!sources.fragment.contains("#version"));
  }

  #[test]
  fn transform_uniform_is_column_major() {
    let mut placement = Placement::default();
    placement.move_right(0.5);
    placement.move_up(0.25);

    let m: [[f32; 4]; 4] = transform_uniform(&placement).into();
    assert_eq!(m[3], [0.5, 0.25, 0., 1.]);
    assert_eq!(m[0], [1., 0., 0., 0.]);
  }
}
