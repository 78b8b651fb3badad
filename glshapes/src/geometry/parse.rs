//! Text format for user polygons.
//!
//! One vertex per line, as two numbers separated by whitespace and/or a comma. Blank lines are ignored, and so is
//! everything following a `#`.
//!
//! ```text
//! # a unit square
//! 0 0
//! 1, 0
//! 1 1
//! 0 1
//! ```

use cgmath::Point2;
use std::{error, fmt, num::ParseFloatError};

/// Error that can happen while parsing a polygon.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsePolygonError {
  /// A line does not hold exactly two coordinates.
  WrongArity { line: usize, found: usize },

  /// A coordinate is not a number.
  InvalidNumber {
    line: usize,
    token: String,
    source: ParseFloatError,
  },
}

impl fmt::Display for ParsePolygonError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      ParsePolygonError::WrongArity { line, found } => write!(
        f,
        "line {}: expected 2 coordinates, found {}",
        line, found
      ),
      ParsePolygonError::InvalidNumber {
        line,
        ref token,
        ref source,
      } => write!(f, "line {}: invalid coordinate {:?}: {}", line, token, source),
    }
  }
}

impl error::Error for ParsePolygonError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ParsePolygonError::InvalidNumber { source, .. } => Some(source),
      _ => None,
    }
  }
}

/// Parse a polygon, one vertex per line.
pub fn parse_polygon(text: &str) -> Result<Vec<Point2<f32>>, ParsePolygonError> {
  let mut points = Vec::new();

  for (i, raw) in text.lines().enumerate() {
    let line = i + 1;
    let content = raw.split('#').next().unwrap_or("");

    let tokens: Vec<_> = content
      .split(|c: char| c == ',' || c.is_whitespace())
      .filter(|t| !t.is_empty())
      .collect();

    match tokens[..] {
      [] => continue,
      [x, y] => points.push(Point2::new(coordinate(line, x)?, coordinate(line, y)?)),
      _ => {
        return Err(ParsePolygonError::WrongArity {
          line,
          found: tokens.len(),
        })
      }
    }
  }

  Ok(points)
}

fn coordinate(line: usize, token: &str) -> Result<f32, ParsePolygonError> {
  token
    .parse()
    .map_err(|source| ParsePolygonError::InvalidNumber {
      line,
      token: token.to_owned(),
      source,
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_with_comments_and_commas() {
    let text = "\
# a unit square
0 0
1, 0   # bottom right

1 1
0,1
";
    let points = parse_polygon(text).unwrap();

    assert_eq!(
      points,
      vec![
        Point2::new(0., 0.),
        Point2::new(1., 0.),
        Point2::new(1., 1.),
        Point2::new(0., 1.),
      ]
    );
  }

  #[test]
  fn empty_input() {
    assert_eq!(parse_polygon("").unwrap(), vec![]);
    assert_eq!(parse_polygon("# nothing\n\n").unwrap(), vec![]);
  }

  #[test]
  fn negative_and_scientific_coordinates() {
    let points = parse_polygon("-0.5 1e-1\n").unwrap();
    assert_eq!(points, vec![Point2::new(-0.5, 0.1)]);
  }

  #[test]
  fn wrong_arity_reports_line() {
    assert_eq!(
      parse_polygon("0 0\n1 2 3\n"),
      Err(ParsePolygonError::WrongArity { line: 2, found: 3 })
    );
    assert_eq!(
      parse_polygon("\n\n4\n"),
      Err(ParsePolygonError::WrongArity { line: 3, found: 1 })
    );
  }

  #[test]
  fn invalid_number_reports_token() {
    match parse_polygon("0 0\n1 zero\n") {
      Err(ParsePolygonError::InvalidNumber { line, token, .. }) => {
        assert_eq!(line, 2);
        assert_eq!(token, "zero");
      }
      other => panic!("unexpected result: {:?}", other),
    }
  }
}
