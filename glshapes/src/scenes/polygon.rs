//! An arbitrary simple polygon, triangulated by ear clipping.
//!
//! The polygon comes from the platform when it has one to offer (on desktop, a file passed on the command line);
//! otherwise a five-pointed star is used. The polygon is scaled to fit the view, triangulated once at bootstrap
//! and then moved around like any other shape.
//!
//! Press <escape> to quit or close the window.

use cgmath::Point2;
use luminance_front::{context::GraphicsContext, framebuffer::Framebuffer, texture::Dim2, Backend};
use std::f32::consts::{FRAC_PI_2, PI};

use crate::{
  geometry,
  mesh::{Mesh, MeshError},
  scenes,
  shader::ShapeProgram,
  shape::{Motion, Shape},
  timing::FrameClock,
  InputAction, LoopFeedback, PlatformServices, Scene, SceneConfig, SceneError,
};

const POLYGON_COLOR: [f32; 3] = [0.9, 0.3, 0.5];

/// Half-extent of the square a polygon is fitted into, in normalized device coordinates.
const VIEW_EXTENT: f32 = 0.9;

const STAR_BRANCHES: usize = 5;
const STAR_OUTER_RADIUS: f32 = 0.8;
const STAR_INNER_RADIUS: f32 = 0.35;

pub struct LocalScene {
  program: ShapeProgram,
  polygon: Shape,
  motion: Motion,
  clock: FrameClock,
  speed: f32,
}

/// Star with its first branch pointing up, vertices in counter-clockwise order.
fn star() -> Vec<Point2<f32>> {
  let step = PI / STAR_BRANCHES as f32;

  (0..2 * STAR_BRANCHES)
    .map(|i| {
      let radius = if i % 2 == 0 {
        STAR_OUTER_RADIUS
      } else {
        STAR_INNER_RADIUS
      };
      let angle = FRAC_PI_2 + i as f32 * step;

      Point2::new(radius * angle.cos(), radius * angle.sin())
    })
    .collect()
}

/// Center `points` on the origin and scale them uniformly so that they fit in the view.
///
/// Polygons with no extent are only centered.
fn fit_to_view(points: &[Point2<f32>]) -> Vec<Point2<f32>> {
  let mut min = Point2::new(f32::INFINITY, f32::INFINITY);
  let mut max = Point2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);

  for p in points {
    min.x = min.x.min(p.x);
    min.y = min.y.min(p.y);
    max.x = max.x.max(p.x);
    max.y = max.y.max(p.y);
  }

  let center = Point2::new((min.x + max.x) * 0.5, (min.y + max.y) * 0.5);
  let half_extent = (max.x - min.x).max(max.y - min.y) * 0.5;
  let scale = if half_extent > 0. {
    VIEW_EXTENT / half_extent
  } else {
    1.
  };

  points
    .iter()
    .map(|p| Point2::new((p.x - center.x) * scale, (p.y - center.y) * scale))
    .collect()
}

impl Scene for LocalScene {
  fn bootstrap(
    config: &SceneConfig,
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> Result<Self, SceneError> {
    let program = scenes::load_program(platform, context)?;

    let points = match platform.fetch_polygon().map_err(SceneError::fetch)? {
      Some(points) => fit_to_view(&points),
      None => {
        log::info!("no polygon provided, using a star");
        star()
      }
    };

    let classification = geometry::classify(&points).map_err(MeshError::from)?;
    log::info!(
      "polygon: {} vertices, {} convex, {} reflex, {} collinear, {} ears",
      points.len(),
      classification.convex.len(),
      classification.reflex.len(),
      classification.collinear.len(),
      classification.ears.len()
    );

    let mesh = Mesh::polygon(&points, POLYGON_COLOR)?;
    log::info!("polygon triangulated into {} triangles", mesh.triangle_count());

    let polygon = Shape::new(context, &mesh)?;

    Ok(Self {
      program,
      polygon,
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
    self.motion.step(&mut self.polygon.placement, self.speed, dt);

    match scenes::draw(context, &back_buffer, &mut self.program, &[&self.polygon]) {
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
  use crate::geometry::{signed_area, triangulate};

  #[test]
  fn star_is_counter_clockwise() {
    let star = star();

    assert_eq!(star.len(), 10);
    assert!(signed_area(&star) > 0.);
    assert!((star[0].x).abs() < 1e-6);
    assert!((star[0].y - STAR_OUTER_RADIUS).abs() < 1e-6);
  }

  #[test]
  fn star_classification() {
    let classification = geometry::classify(&star()).unwrap();

    assert_eq!(classification.convex, vec![0, 2, 4, 6, 8]);
    assert_eq!(classification.reflex, vec![1, 3, 5, 7, 9]);
    assert!(classification.collinear.is_empty());
    assert_eq!(classification.ears, classification.convex);
  }

  #[test]
  fn star_triangulates() {
    let star = star();
    let triangles = triangulate(&star).unwrap();

    assert_eq!(triangles.len(), 8);
  }

  #[test]
  fn fit_to_view_centers_and_scales() {
    let points = [
      Point2::new(10., 10.),
      Point2::new(14., 10.),
      Point2::new(14., 12.),
      Point2::new(10., 12.),
    ];
    let fitted = fit_to_view(&points);

    assert_eq!(fitted[0], Point2::new(-VIEW_EXTENT, -VIEW_EXTENT * 0.5));
    assert_eq!(fitted[2], Point2::new(VIEW_EXTENT, VIEW_EXTENT * 0.5));
  }

  #[test]
  fn fit_to_view_keeps_flat_input_finite() {
    let points = [Point2::new(3., 3.), Point2::new(3., 3.)];

    assert_eq!(fit_to_view(&points), vec![Point2::new(0., 0.); 2]);
  }
}
