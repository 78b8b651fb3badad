//! A single triangle you can move around.
//!
//! Hold the <up>, <down>, <left> and <right> actions to move the triangle; the speed does not depend on the frame
//! rate. Request a shader reload to rebuild the program from the platform’s shader sources.
//! Press <escape> to quit or close the window.

use luminance_front::{context::GraphicsContext, framebuffer::Framebuffer, texture::Dim2, Backend};

use crate::{
  mesh::Mesh,
  scenes,
  shader::ShapeProgram,
  shape::{Motion, Shape},
  timing::FrameClock,
  InputAction, LoopFeedback, PlatformServices, Scene, SceneConfig, SceneError,
};

const TRI_POSITIONS: [[f32; 2]; 3] = [[0., 0.5], [0.5, -0.5], [-0.5, -0.5]];

const TRI_COLORS: [[f32; 3]; 3] = [[0., 0.5, 1.], [0.3, 0.5, 1.], [0., 0.8, 1.]];

pub struct LocalScene {
  program: ShapeProgram,
  triangle: Shape,
  motion: Motion,
  clock: FrameClock,
  speed: f32,
}

impl Scene for LocalScene {
  fn bootstrap(
    config: &SceneConfig,
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> Result<Self, SceneError> {
    let program = scenes::load_program(platform, context)?;
    let triangle = Shape::new(context, &Mesh::triangle(TRI_POSITIONS, TRI_COLORS))?;

    Ok(Self {
      program,
      triangle,
      motion: Motion::default(),
      clock: FrameClock::new(),
      speed: config.speed,
    })
  }

  fn render_frame(
    mut self,
    t: f32,
    back_buffer: Framebuffer<Dim2, (), ()>,
    actions: impl Iterator<Item = InputAction>,
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> LoopFeedback<Self> {
    for action in actions {
      match action {
        InputAction::Quit => return LoopFeedback::Exit,
        InputAction::StartMoving(direction) => self.motion.press(direction),
        InputAction::StopMoving(direction) => self.motion.release(direction),
        InputAction::ReloadShaders => scenes::reload_program(platform, context, &mut self.program),
        _ => (),
      }
    }

    let dt = self.clock.tick(t);
    self
      .motion
      .step(&mut self.triangle.placement, self.speed, dt);

    let render = scenes::draw(context, &back_buffer, &mut self.program, &[&self.triangle]);

    match render {
      Ok(()) => LoopFeedback::Continue(self),
      Err(e) => {
        log::error!("cannot render frame: {}", e);
        LoopFeedback::Exit
      }
    }
  }
}
