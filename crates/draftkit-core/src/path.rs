//! SVG path data helpers.
//!
//! Builders for the partially rounded rectangles used by segmented shapes
//! (button bars, tab headers) and a bounding-box estimate for arbitrary path
//! data. Paths are written in absolute item-local coordinates.

use std::fmt::Write as _;

use svg::node::element::path::{Command, Data, Position};
use thiserror::Error;

use crate::geometry::{Bounds, Point};

#[derive(Debug, Error)]
pub enum PathError {
    #[error("invalid path data: {0}")]
    Parse(String),

    #[error("path command `{command}` has an incomplete parameter list")]
    Parameters { command: char },
}

/// Rounded corners on the left side only.
pub fn rounded_rectangle_left(bounds: Bounds, radius: f32) -> String {
    let r = clamp_radius(bounds, radius);
    let (x, y, right, bottom) = edges(bounds);

    let mut path = String::new();
    let _ = write!(path, "M{},{} ", x + r, y);
    let _ = write!(path, "L{},{} ", right, y);
    let _ = write!(path, "L{},{} ", right, bottom);
    let _ = write!(path, "L{},{} ", x + r, bottom);
    push_arc(&mut path, r, x, bottom - r);
    let _ = write!(path, "L{},{} ", x, y + r);
    push_arc(&mut path, r, x + r, y);
    path.push('Z');
    path
}

/// Rounded corners on the right side only.
pub fn rounded_rectangle_right(bounds: Bounds, radius: f32) -> String {
    let r = clamp_radius(bounds, radius);
    let (x, y, right, bottom) = edges(bounds);

    let mut path = String::new();
    let _ = write!(path, "M{},{} ", x, y);
    let _ = write!(path, "L{},{} ", right - r, y);
    push_arc(&mut path, r, right, y + r);
    let _ = write!(path, "L{},{} ", right, bottom - r);
    push_arc(&mut path, r, right - r, bottom);
    let _ = write!(path, "L{},{} ", x, bottom);
    path.push('Z');
    path
}

/// Rounded corners on the top side only.
pub fn rounded_rectangle_top(bounds: Bounds, radius: f32) -> String {
    let r = clamp_radius(bounds, radius);
    let (x, y, right, bottom) = edges(bounds);

    let mut path = String::new();
    let _ = write!(path, "M{},{} ", x, bottom);
    let _ = write!(path, "L{},{} ", x, y + r);
    push_arc(&mut path, r, x + r, y);
    let _ = write!(path, "L{},{} ", right - r, y);
    push_arc(&mut path, r, right, y + r);
    let _ = write!(path, "L{},{} ", right, bottom);
    path.push('Z');
    path
}

/// Rounded corners on the bottom side only.
pub fn rounded_rectangle_bottom(bounds: Bounds, radius: f32) -> String {
    let r = clamp_radius(bounds, radius);
    let (x, y, right, bottom) = edges(bounds);

    let mut path = String::new();
    let _ = write!(path, "M{},{} ", x, y);
    let _ = write!(path, "L{},{} ", right, y);
    let _ = write!(path, "L{},{} ", right, bottom - r);
    push_arc(&mut path, r, right - r, bottom);
    let _ = write!(path, "L{},{} ", x + r, bottom);
    push_arc(&mut path, r, x, bottom - r);
    path.push('Z');
    path
}

fn clamp_radius(bounds: Bounds, radius: f32) -> f32 {
    radius
        .min(bounds.width() / 2.0)
        .min(bounds.height() / 2.0)
        .max(0.0)
}

fn edges(bounds: Bounds) -> (f32, f32, f32, f32) {
    (bounds.x(), bounds.y(), bounds.right(), bounds.bottom())
}

// Clockwise quarter arc ending at (x, y)
fn push_arc(path: &mut String, r: f32, x: f32, y: f32) {
    let _ = write!(path, "A{r},{r} 0 0 1 {x},{y} ");
}

/// Estimates the bounds of SVG path data.
///
/// The result is the box around every end point and control point, so curves
/// are never clipped. Elliptical arcs contribute a box of their largest
/// radius around the chord midpoint. Empty data yields [`Bounds::EMPTY`].
///
/// # Errors
///
/// Returns [`PathError`] when the data cannot be parsed.
pub fn path_bounds(d: &str) -> Result<Bounds, PathError> {
    let data = Data::parse(d).map_err(|err| PathError::Parse(err.to_string()))?;

    let mut tracer = HullTracer::default();
    for command in data.iter() {
        tracer.visit(command)?;
    }

    Ok(Bounds::from_points(tracer.points).unwrap_or(Bounds::EMPTY))
}

#[derive(Default)]
struct HullTracer {
    current: Point,
    subpath_start: Point,
    points: Vec<Point>,
}

impl HullTracer {
    fn visit(&mut self, command: &Command) -> Result<(), PathError> {
        match command {
            Command::Move(position, params) => {
                let pairs = pairs(params, 'M')?;
                for (i, point) in pairs.into_iter().enumerate() {
                    let point = self.resolve(position, point);
                    if i == 0 {
                        self.subpath_start = point;
                    }
                    self.push_end(point);
                }
            }
            Command::Line(position, params) => {
                for point in pairs(params, 'L')? {
                    let point = self.resolve(position, point);
                    self.push_end(point);
                }
            }
            Command::HorizontalLine(position, params) => {
                for &x in params.iter() {
                    let x = match position {
                        Position::Absolute => x,
                        Position::Relative => self.current.x() + x,
                    };
                    self.push_end(Point::new(x, self.current.y()));
                }
            }
            Command::VerticalLine(position, params) => {
                for &y in params.iter() {
                    let y = match position {
                        Position::Absolute => y,
                        Position::Relative => self.current.y() + y,
                    };
                    self.push_end(Point::new(self.current.x(), y));
                }
            }
            Command::QuadraticCurve(position, params) => {
                self.visit_segments(position, &pairs(params, 'Q')?, 2);
            }
            Command::SmoothQuadraticCurve(position, params) => {
                self.visit_segments(position, &pairs(params, 'T')?, 1);
            }
            Command::CubicCurve(position, params) => {
                self.visit_segments(position, &pairs(params, 'C')?, 3);
            }
            Command::SmoothCubicCurve(position, params) => {
                self.visit_segments(position, &pairs(params, 'S')?, 2);
            }
            Command::EllipticalArc(position, params) => {
                if params.len() % 7 != 0 {
                    return Err(PathError::Parameters { command: 'A' });
                }
                for arc in params.chunks_exact(7) {
                    let radius = arc[0].abs().max(arc[1].abs());
                    let start = self.current;
                    let end = self.resolve(position, Point::new(arc[5], arc[6]));
                    let middle = Point::new((start.x() + end.x()) / 2.0, (start.y() + end.y()) / 2.0);
                    self.points.push(Point::new(middle.x() - radius, middle.y() - radius));
                    self.points.push(Point::new(middle.x() + radius, middle.y() + radius));
                    self.push_end(end);
                }
            }
            Command::Close => {
                self.current = self.subpath_start;
            }
        }
        Ok(())
    }

    /// Visits curve segments of `per_segment` points each; relative points
    /// are measured from the segment's start.
    fn visit_segments(&mut self, position: &Position, points: &[Point], per_segment: usize) {
        for segment in points.chunks(per_segment) {
            let origin = self.current;
            for (i, &point) in segment.iter().enumerate() {
                let point = match position {
                    Position::Absolute => point,
                    Position::Relative => origin.add_point(point),
                };
                if i + 1 == segment.len() {
                    self.push_end(point);
                } else {
                    self.points.push(point);
                }
            }
        }
    }

    fn resolve(&self, position: &Position, point: Point) -> Point {
        match position {
            Position::Absolute => point,
            Position::Relative => self.current.add_point(point),
        }
    }

    fn push_end(&mut self, point: Point) {
        self.current = point;
        self.points.push(point);
    }
}

fn pairs(params: &[f32], command: char) -> Result<Vec<Point>, PathError> {
    if params.len() % 2 != 0 {
        return Err(PathError::Parameters { command });
    }
    Ok(params
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}
