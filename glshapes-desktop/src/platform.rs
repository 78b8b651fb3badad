//! Platform services implementation.

use crate::CLIOpts;
use cgmath::Point2;
use glshapes::{
  geometry::{parse_polygon, ParsePolygonError},
  shader::ShaderSources,
  PlatformServices,
};
use std::{
  error::Error,
  fmt, fs, io,
  path::{Path, PathBuf},
};

/// File name of the vertex shader, in the shader directory.
pub const VERTEX_SHADER_FILE: &str = "shape-vs.glsl";

/// File name of the fragment shader, in the shader directory.
pub const FRAGMENT_SHADER_FILE: &str = "shape-fs.glsl";

/// Desktop implementation of the [`PlatformServices`] API.
///
/// Files are read every time they are fetched, so that shaders edited on disk are picked up on reload.
#[derive(Debug)]
pub struct DesktopPlatformServices {
  shaders: Option<PathBuf>,
  polygon: Option<PathBuf>,
}

impl DesktopPlatformServices {
  pub fn new(cli_opts: &CLIOpts) -> Self {
    Self {
      shaders: cli_opts.shaders.clone(),
      polygon: cli_opts.polygon.clone(),
    }
  }
}

#[derive(Debug)]
pub enum DesktopFetchError {
  Io { path: PathBuf, source: io::Error },
  Parse { path: PathBuf, source: ParsePolygonError },
}

impl fmt::Display for DesktopFetchError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      DesktopFetchError::Io { ref path, ref source } => {
        write!(f, "cannot read {}: {}", path.display(), source)
      }
      DesktopFetchError::Parse { ref path, ref source } => {
        write!(f, "cannot parse polygon {}: {}", path.display(), source)
      }
    }
  }
}

impl Error for DesktopFetchError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      DesktopFetchError::Io { source, .. } => Some(source),
      DesktopFetchError::Parse { source, .. } => Some(source),
    }
  }
}

fn read(path: &Path) -> Result<String, DesktopFetchError> {
  fs::read_to_string(path).map_err(|source| DesktopFetchError::Io {
    path: path.to_owned(),
    source,
  })
}

impl PlatformServices for DesktopPlatformServices {
  type FetchError = DesktopFetchError;

  fn fetch_shader_sources(&mut self) -> Result<ShaderSources, Self::FetchError> {
    match self.shaders {
      Some(ref dir) => {
        log::debug!("reading shaders from {}", dir.display());

        Ok(ShaderSources {
          vertex: read(&dir.join(VERTEX_SHADER_FILE))?,
          fragment: read(&dir.join(FRAGMENT_SHADER_FILE))?,
        })
      }

      None => Ok(ShaderSources::builtin()),
    }
  }

  fn fetch_polygon(&mut self) -> Result<Option<Vec<Point2<f32>>>, Self::FetchError> {
    let path = match self.polygon {
      Some(ref path) => path,
      None => return Ok(None),
    };

    let points = parse_polygon(&read(path)?).map_err(|source| DesktopFetchError::Parse {
      path: path.clone(),
      source,
    })?;
    log::info!("loaded {} vertices from {}", points.len(), path.display());

    Ok(Some(points))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::env;

  fn scratch_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("glshapes-desktop-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
  }

  #[test]
  fn builtin_shaders_without_directory() {
    let mut platform = DesktopPlatformServices {
      shaders: None,
      polygon: None,
    };

    assert_eq!(
      platform.fetch_shader_sources().unwrap(),
      ShaderSources::builtin()
    );
    assert_eq!(platform.fetch_polygon().unwrap(), None);
  }

  #[test]
  fn shaders_are_read_on_every_fetch() {
    let dir = scratch_dir("shaders");
    fs::write(dir.join(VERTEX_SHADER_FILE), "vs 1").unwrap();
    fs::write(dir.join(FRAGMENT_SHADER_FILE), "fs 1").unwrap();

    let mut platform = DesktopPlatformServices {
      shaders: Some(dir.clone()),
      polygon: None,
    };
    assert_eq!(platform.fetch_shader_sources().unwrap().vertex, "vs 1");

    fs::write(dir.join(VERTEX_SHADER_FILE), "vs 2").unwrap();
    assert_eq!(platform.fetch_shader_sources().unwrap().vertex, "vs 2");

    fs::remove_dir_all(dir).unwrap();
  }

  #[test]
  fn missing_shader_is_an_io_error() {
    let dir = scratch_dir("missing");
    let mut platform = DesktopPlatformServices {
      shaders: Some(dir.clone()),
      polygon: None,
    };

    match platform.fetch_shader_sources() {
      Err(DesktopFetchError::Io { path, .. }) => assert_eq!(path, dir.join(VERTEX_SHADER_FILE)),
      other => panic!("unexpected result: {:?}", other),
    }

    fs::remove_dir_all(dir).unwrap();
  }

  #[test]
  fn polygon_file_is_parsed() {
    let dir = scratch_dir("polygon");
    let path = dir.join("square.txt");
    fs::write(&path, "# unit square\n0 0\n1, 0\n1 1\n0 1\n").unwrap();

    let mut platform = DesktopPlatformServices {
      shaders: None,
      polygon: Some(path),
    };
    let points = platform.fetch_polygon().unwrap().unwrap();

    assert_eq!(points.len(), 4);
    assert_eq!(points[2], Point2::new(1., 1.));

    fs::remove_dir_all(dir).unwrap();
  }

  #[test]
  fn broken_polygon_file_is_a_parse_error() {
    let dir = scratch_dir("broken");
    let path = dir.join("broken.txt");
    fs::write(&path, "0 0\n1\n").unwrap();

    let mut platform = DesktopPlatformServices {
      shaders: None,
      polygon: Some(path),
    };

    assert!(matches!(
      platform.fetch_polygon(),
      Err(DesktopFetchError::Parse { .. })
    ));

    fs::remove_dir_all(dir).unwrap();
  }
}
