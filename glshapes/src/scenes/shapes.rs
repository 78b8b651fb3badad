//! A triangle, a quad and a circle sharing the screen.
//!
//! Only one shape is controlled at a time: the direction actions move it, and the <cycle> action hands control
//! over to the next shape. Shapes are drawn in order, so the circle always ends up on top.
//!
//! Press <escape> to quit or close the window.

use luminance_front::{context::GraphicsContext, framebuffer::Framebuffer, texture::Dim2, Backend};

use crate::{
  mesh::Mesh,
  scenes,
  shader::ShapeProgram,
  shape::{Motion, Placement, Shape},
  timing::FrameClock,
  InputAction, LoopFeedback, PlatformServices, Scene, SceneConfig, SceneError,
};

const TRI_POSITIONS: [[f32; 2]; 3] = [[0., 0.25], [0.25, -0.25], [-0.25, -0.25]];
const TRI_COLORS: [[f32; 3]; 3] = [[0., 0.5, 1.], [0.3, 0.5, 1.], [0., 0.8, 1.]];

const QUAD_CORNERS: [[f32; 2]; 4] = [[-0.2, 0.2], [0.2, 0.2], [0.2, -0.2], [-0.2, -0.2]];
const QUAD_COLORS: [[f32; 3]; 4] = [[1., 0.5, 0.], [1., 0.7, 0.], [1., 0.3, 0.], [1., 0.5, 0.2]];

const CIRCLE_RADIUS: f32 = 0.2;
const CIRCLE_COLOR: [f32; 3] = [0.2, 0.8, 0.3];

/// Where the shapes start, in drawing order.
const START_OFFSETS: [[f32; 2]; 3] = [[-0.5, 0.], [0., 0.], [0.5, 0.]];

pub struct LocalScene {
  program: ShapeProgram,
  shapes: Vec<Shape>,
  selected: usize,
  motion: Motion,
  clock: FrameClock,
  speed: f32,
}

impl LocalScene {
  fn cycle(&mut self) {
    self.selected = next_selected(self.selected, self.shapes.len());
    // keys held for the previous shape must not drag the new one along
    self.motion.clear();
    log::info!("now moving shape #{}", self.selected);
  }
}

/// Index of the shape taking control after `selected`.
fn next_selected(selected: usize, count: usize) -> usize {
  if count == 0 {
    0
  } else {
    (selected + 1) % count
  }
}

impl Scene for LocalScene {
  fn bootstrap(
    config: &SceneConfig,
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> Result<Self, SceneError> {
    let program = scenes::load_program(platform, context)?;

    let meshes = [
      Mesh::triangle(TRI_POSITIONS, TRI_COLORS),
      Mesh::quad(QUAD_CORNERS, QUAD_COLORS),
      Mesh::circle([0., 0.], CIRCLE_RADIUS, config.circle_sides, CIRCLE_COLOR)?,
    ];

    let shapes = meshes
      .iter()
      .zip(START_OFFSETS)
      .map(|(mesh, [x, y])| {
        let mut shape = Shape::new(context, mesh)?;
        shape.placement = Placement {
          offset: [x, y].into(),
        };
        Ok::<_, SceneError>(shape)
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      program,
      shapes,
      selected: 0,
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
        InputAction::CycleShape => self.cycle(),
        InputAction::ReloadShaders => scenes::reload_program(platform, context, &mut self.program),
        _ => (),
      }
    }

    let dt = self.clock.tick(t);
    if let Some(shape) = self.shapes.get_mut(self.selected) {
      self.motion.step(&mut shape.placement, self.speed, dt);
    }

    let shapes = self.shapes.iter().collect::<Vec<_>>();
    let render = scenes::draw(context, &back_buffer, &mut self.program, &shapes);

    match render {
      Ok(()) => LoopFeedback::Continue(self),
      Err(e) => {
        log::error!("cannot render frame: {}", e);
        LoopFeedback::Exit
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn selection_wraps_around() {
    assert_eq!(next_selected(0, 3), 1);
    assert_eq!(next_selected(1, 3), 2);
    assert_eq!(next_selected(2, 3), 0);
  }

  #[test]
  fn selection_without_shapes() {
    assert_eq!(next_selected(0, 0), 0);
  }
}
