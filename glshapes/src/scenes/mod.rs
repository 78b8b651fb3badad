//! The scenes, and what they have in common.

use luminance_front::{
  context::GraphicsContext,
  framebuffer::Framebuffer,
  pipeline::{PipelineError, PipelineState},
  render_state::RenderState,
  texture::Dim2,
  Backend,
};

use crate::{
  shader::{self, ShapeProgram},
  shape::Shape,
  PlatformServices, SceneError,
};

pub mod polygon;
pub mod shapes;
pub mod triangle;

/// Color the back buffer is cleared with.
pub const BACKGROUND: [f32; 4] = [0.8, 0.8, 1., 1.];

/// Fetch the shader sources from the platform and build the shape program out of them.
pub(crate) fn load_program(
  platform: &mut impl PlatformServices,
  context: &mut impl GraphicsContext<Backend = Backend>,
) -> Result<ShapeProgram, SceneError> {
  let sources = platform
    .fetch_shader_sources()
    .map_err(SceneError::fetch)?;

  Ok(shader::build_program(context, &sources)?)
}

/// Fetch the shader sources again and swap the program if they build.
pub(crate) fn reload_program(
  platform: &mut impl PlatformServices,
  context: &mut impl GraphicsContext<Backend = Backend>,
  program: &mut ShapeProgram,
) {
  match platform.fetch_shader_sources() {
    Ok(sources) => {
      shader::reload_program(context, program, &sources);
    }

    Err(e) => log::error!("cannot fetch shader sources, keeping the current program: {}", e),
  }
}

/// Clear the back buffer and draw `shapes` in order, later ones on top of earlier ones.
pub(crate) fn draw(
  context: &mut impl GraphicsContext<Backend = Backend>,
  back_buffer: &Framebuffer<Dim2, (), ()>,
  program: &mut ShapeProgram,
  shapes: &[&Shape],
) -> Result<(), PipelineError> {
  let pipeline_state = PipelineState::default().set_clear_color(BACKGROUND);
  // every shape lies at z = 0, so depth testing would only hide the ones drawn last
  let render_state = RenderState::default().set_depth_test(None);

  context
    .new_pipeline_gate()
    .pipeline(back_buffer, &pipeline_state, |_, mut shd_gate| {
      shd_gate.shade(program, |mut iface, uni, mut rdr_gate| {
        for shape in shapes {
          iface.set(
            &uni.transform,
            shader::transform_uniform(&shape.placement),
          );

          rdr_gate.render(&render_state, |mut tess_gate| tess_gate.render(&shape.tess))?;
        }

        Ok(())
      })
    })
    .assume()
    .into_result()
}
