mod platform;

use glfw::{Action, Context as _, Key, SwapInterval, WindowEvent, WindowMode};
use glshapes::{
  shape::Direction,
  timing::{fps_title, FpsCounter},
  InputAction, LoopFeedback, Scene, SceneConfig, SceneError,
};
use luminance::{context::GraphicsContext as _, framebuffer::FramebufferError};
use luminance_glfw::{GL33Context, GlfwSurface, GlfwSurfaceError};
use platform::DesktopPlatformServices;
use std::{error::Error, fmt, iter, path::PathBuf, process, time::Instant};
use structopt::StructOpt;

/// Scene run when none is given on the command line.
const DEFAULT_SCENE: &str = "triangle";

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(short, long)]
  /// List available scenes.
  list_scenes: bool,

  #[structopt(long)]
  /// Directory where to pick shape-vs.glsl and shape-fs.glsl from, instead of the built-in shaders.
  shaders: Option<PathBuf>,

  #[structopt(short, long)]
  /// File holding the polygon of the polygon scene, one “x y” vertex per line.
  polygon: Option<PathBuf>,

  #[structopt(long, default_value = "800")]
  /// Window width.
  width: u32,

  #[structopt(long, default_value = "800")]
  /// Window height.
  height: u32,

  #[structopt(short, long, default_value = "1.0")]
  /// Speed of the moved shape, in screen halves per second.
  speed: f32,

  #[structopt(long, default_value = "64")]
  /// Number of sides of circles.
  circle_sides: u32,

  /// Scene to run.
  scene: Option<String>,
}

/// Error raised when GLFW cannot open the window.
#[derive(Debug)]
pub struct WindowCreationError;

impl fmt::Display for WindowCreationError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("cannot create window")
  }
}

impl Error for WindowCreationError {}

#[derive(Debug)]
pub enum AppError {
  UnknownScene(String),
  Surface(GlfwSurfaceError<WindowCreationError>),
  Scene(SceneError),
  BackBuffer(FramebufferError),
}

impl fmt::Display for AppError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      AppError::UnknownScene(ref name) => write!(f, "no scene named {}", name),
      AppError::Surface(ref e) => write!(f, "cannot create GLFW surface: {}", e),
      AppError::Scene(ref e) => write!(f, "cannot bootstrap scene: {}", e),
      AppError::BackBuffer(ref e) => write!(f, "cannot get back buffer: {}", e),
    }
  }
}

impl Error for AppError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      AppError::UnknownScene(_) => None,
      AppError::Surface(e) => Some(e),
      AppError::Scene(e) => Some(e),
      AppError::BackBuffer(e) => Some(e),
    }
  }
}

impl From<GlfwSurfaceError<WindowCreationError>> for AppError {
  fn from(e: GlfwSurfaceError<WindowCreationError>) -> Self {
    AppError::Surface(e)
  }
}

impl From<SceneError> for AppError {
  fn from(e: SceneError) -> Self {
    AppError::Scene(e)
  }
}

impl From<FramebufferError> for AppError {
  fn from(e: FramebufferError) -> Self {
    AppError::BackBuffer(e)
  }
}

/// Macro to declaratively add scenes.
macro_rules! scenes {
  ($($name:literal, $module:ident),* $(,)?) => {
    fn show_available_scenes() {
      println!("available scenes:");
      $( println!("  - {}", $name); )*
    }

    // create a function that will run a scene based on its name
    fn pick_and_run_scene(cli_opts: CLIOpts) -> Result<(), AppError> {
      let scene_name = cli_opts
        .scene
        .clone()
        .unwrap_or_else(|| DEFAULT_SCENE.to_owned());

      match scene_name.as_str() {
        $(
          $name => run_scene::<glshapes::scenes::$module::LocalScene>(cli_opts, $name),
        )*

        _ => {
          show_available_scenes();
          Err(AppError::UnknownScene(scene_name))
        }
      }
    }
  }
}

// Run a scene.
fn run_scene<S>(cli_opts: CLIOpts, name: &str) -> Result<(), AppError>
where
  S: Scene,
{
  let config = SceneConfig {
    speed: cli_opts.speed,
    circle_sides: cli_opts.circle_sides,
  };
  let mut platform = DesktopPlatformServices::new(&cli_opts);

  let (width, height) = (cli_opts.width, cli_opts.height);
  let surface = GlfwSurface::new(|glfw| {
    let (mut window, events) = match glfw.create_window(width, height, name, WindowMode::Windowed) {
      Some(created) => created,
      None => return Err(GlfwSurfaceError::UserError(WindowCreationError)),
    };

    window.make_current();
    window.set_key_polling(true);
    window.set_framebuffer_size_polling(true);
    window.set_close_polling(true);
    glfw.set_swap_interval(SwapInterval::Sync(1));

    Ok((window, events))
  })?;
  let mut context = surface.context;
  let events = surface.events_rx;

  log_backend_info(&mut context);

  let scene = S::bootstrap(&config, &mut platform, &mut context)?;
  let start_t = Instant::now();
  let mut fps = FpsCounter::new(context.window.glfw.get_time());

  // render a first frame carrying the initial framebuffer size
  let (fb_w, fb_h) = context.window.get_framebuffer_size();
  let back_buffer = context.back_buffer()?;
  let feedback = scene.render_frame(
    0.,
    back_buffer,
    iter::once(InputAction::Resized {
      width: fb_w as _,
      height: fb_h as _,
    }),
    &mut platform,
    &mut context,
  );
  let mut scene = match feedback {
    LoopFeedback::Exit => return Ok(()),
    LoopFeedback::Continue(scene) => scene,
  };
  context.window.swap_buffers();

  'app: loop {
    // handle events
    context.window.glfw.poll_events();
    let actions = glfw::flush_messages(&events).flat_map(|(_, event)| adapt_events(event));

    let t = start_t.elapsed().as_secs_f32();
    let back_buffer = context.back_buffer()?;
    let feedback = scene.render_frame(t, back_buffer, actions, &mut platform, &mut context);

    if let LoopFeedback::Continue(stepped) = feedback {
      scene = stepped;
      context.window.swap_buffers();

      if let Some(rate) = fps.tick(context.window.glfw.get_time()) {
        context.window.set_title(&fps_title(name, rate));
      }
    } else {
      break 'app;
    }
  }

  Ok(())
}

fn log_backend_info(context: &mut GL33Context) {
  let q = context.query();

  let describe = |info: Result<String, _>| match info {
    Ok(info) => info,
    Err(e) => format!("unknown ({})", e),
  };

  log::info!("backend: {}", describe(q.backend_name()));
  log::info!("backend version: {}", describe(q.backend_version()));
  log::info!(
    "shading language version: {}",
    describe(q.backend_shading_lang_version())
  );
}

fn direction_of(key: Key) -> Option<Direction> {
  match key {
    Key::W | Key::Up => Some(Direction::Up),
    Key::S | Key::Down => Some(Direction::Down),
    Key::A | Key::Left => Some(Direction::Left),
    Key::D | Key::Right => Some(Direction::Right),
    _ => None,
  }
}

fn adapt_events(event: WindowEvent) -> Option<InputAction> {
  match event {
    WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Release, _) => {
      Some(InputAction::Quit)
    }

    WindowEvent::Key(Key::Tab, _, Action::Press, _) => Some(InputAction::CycleShape),

    WindowEvent::Key(Key::F5, _, Action::Press, _) => Some(InputAction::ReloadShaders),

    WindowEvent::Key(key, _, Action::Press, _) => {
      log::debug!("key press: {:?}", key);
      direction_of(key).map(InputAction::StartMoving)
    }

    WindowEvent::Key(key, _, Action::Release, _) => direction_of(key).map(InputAction::StopMoving),

    WindowEvent::FramebufferSize(width, height) => Some(InputAction::Resized {
      width: width as _,
      height: height as _,
    }),

    _ => None,
  }
}

scenes! {
  "triangle", triangle,
  "shapes", shapes,
  "polygon", polygon,
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  if cli_opts.list_scenes {
    show_available_scenes();
    return;
  }

  let status = exit_status(pick_and_run_scene(cli_opts));
  if status != 0 {
    process::exit(status);
  }
}

/// Log a fatal error, if any, and turn it into the process exit status.
fn exit_status(result: Result<(), AppError>) -> i32 {
  match result {
    Ok(()) => 0,
    Err(e) => {
      log::error!("{}", e);
      1
    }
  }
}
