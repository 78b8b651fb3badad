//! Simple 2D shapes rendered with luminance.
//!
//! This crate provides a small set of scenes drawing triangles, quads, circles and arbitrary simple
//! polygons that can be moved around with the keyboard. Scenes are platform-agnostic on purpose:
//! they do not know about windows or system events. Whenever a scene needs user interaction or
//! assets, it goes through the abstract types exposed here ([`InputAction`], [`PlatformServices`]),
//! which are implemented by the platform code running the scene.
//!
//! # Scene architecture
//!
//! Scenes are simple modules exposed from [`scenes`]. Each scene allocates its luminance resources
//! in [`Scene::bootstrap`] and is then stepped once per frame with [`Scene::render_frame`], which
//! hands the scene back to the executor via [`LoopFeedback`].
//!
//! # Geometry
//!
//! Arbitrary polygons are turned into triangles by the ear-clipping triangulator living in
//! [`geometry`]. It does not depend on any graphics concept and can be used on its own.

use luminance_front::{context::GraphicsContext, framebuffer::Framebuffer, texture::Dim2, Backend};
use std::{error::Error, fmt};

pub mod geometry;
pub mod mesh;
pub mod scenes;
pub mod shader;
pub mod shape;
pub mod timing;
pub mod vertex;

use cgmath::Point2;
use shape::Direction;

/// Scene interface.
pub trait Scene: Sized {
  /// Bootstrap the scene.
  fn bootstrap(
    config: &SceneConfig,
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> Result<Self, SceneError>;

  /// Render a frame of the scene.
  ///
  /// `time` is the number of seconds elapsed since the scene was bootstrapped.
  fn render_frame(
    self,
    time: f32,
    back_buffer: Framebuffer<Dim2, (), ()>,
    actions: impl Iterator<Item = InputAction>,
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> LoopFeedback<Self>;
}

/// Tunables shared by all scenes.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
  /// Movement speed, in normalized device coordinates per second.
  pub speed: f32,

  /// Number of perimeter vertices used to approximate circles.
  pub circle_sides: u32,
}

impl Default for SceneConfig {
  fn default() -> Self {
    SceneConfig {
      speed: 1.,
      circle_sides: 64,
    }
  }
}

/// A type used to pass “inputs” to scenes.
#[derive(Clone, Debug, PartialEq)]
pub enum InputAction {
  /// Quit the application.
  Quit,

  /// A direction key went down.
  StartMoving(Direction),

  /// A direction key went up.
  StopMoving(Direction),

  /// Switch to the next shape to move, in scenes having several of them.
  CycleShape,

  /// Rebuild the shader program from freshly fetched sources.
  ReloadShaders,

  /// Framebuffer size changed.
  Resized { width: u32, height: u32 },
}

/// Feedback returned by a scene once a frame is rendered.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LoopFeedback<T> {
  Continue(T),
  Exit,
}

/// Services the platform provides to scenes.
pub trait PlatformServices {
  type FetchError: Error + 'static;

  /// Fetch the shader sources used to shade shapes.
  ///
  /// This is called at bootstrap and every time a reload is requested, so implementations should not cache
  /// sources they read from disk.
  fn fetch_shader_sources(&mut self) -> Result<shader::ShaderSources, Self::FetchError>;

  /// Fetch a user-provided polygon, if any.
  fn fetch_polygon(&mut self) -> Result<Option<Vec<Point2<f32>>>, Self::FetchError>;
}

/// Errors that prevent a scene from bootstrapping.
#[derive(Debug)]
pub enum SceneError {
  /// The platform could not provide an asset.
  Fetch(Box<dyn Error>),

  /// The shader program could not be built.
  Program(shader::ProgramError),

  /// A tessellation could not be created on the GPU.
  Tess(luminance_front::tess::TessError),

  /// The CPU-side geometry of a shape is invalid.
  Mesh(mesh::MeshError),
}

impl SceneError {
  pub fn fetch<E>(e: E) -> Self
  where
    E: Error + 'static,
  {
    SceneError::Fetch(Box::new(e))
  }
}

impl fmt::Display for SceneError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      SceneError::Fetch(ref e) => write!(f, "cannot fetch asset: {}", e),
      SceneError::Program(ref e) => write!(f, "cannot build shader program: {}", e),
      SceneError::Tess(ref e) => write!(f, "cannot create tessellation: {}", e),
      SceneError::Mesh(ref e) => write!(f, "invalid shape: {}", e),
    }
  }
}

impl Error for SceneError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      SceneError::Fetch(e) => Some(e.as_ref()),
      SceneError::Program(e) => Some(e),
      SceneError::Tess(e) => Some(e),
      SceneError::Mesh(e) => Some(e),
    }
  }
}

impl From<shader::ProgramError> for SceneError {
  fn from(e: shader::ProgramError) -> Self {
    SceneError::Program(e)
  }
}

impl From<luminance_front::tess::TessError> for SceneError {
  fn from(e: luminance_front::tess::TessError) -> Self {
    SceneError::Tess(e)
  }
}

impl From<mesh::MeshError> for SceneError {
  fn from(e: mesh::MeshError) -> Self {
    SceneError::Mesh(e)
  }
}
