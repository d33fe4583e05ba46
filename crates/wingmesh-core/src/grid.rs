//! Structured point grids for aerodynamic meshes
//!
//! A grid is indexed `[chordwise, spanwise]`: row `i` is a chord station
//! (leading edge first), column `j` is a span station. Storage is row-major.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::transform::rotation_matrix;

/// Coordinate plane used for mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorPlane {
    XY,
    XZ,
    YZ,
}

impl fmt::Display for MirrorPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorPlane::XY => f.write_str("XY"),
            MirrorPlane::XZ => f.write_str("XZ"),
            MirrorPlane::YZ => f.write_str("YZ"),
        }
    }
}

impl FromStr for MirrorPlane {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XY" | "xy" => Ok(MirrorPlane::XY),
            "XZ" | "xz" => Ok(MirrorPlane::XZ),
            "YZ" | "yz" => Ok(MirrorPlane::YZ),
            _ => Err(GeometryError::UnknownMirrorPlane(s.to_string())),
        }
    }
}

/// 2-D array of 3-D points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridFields")]
pub struct Grid {
    n_chord: usize,
    n_span: usize,
    points: Vec<DVec3>,
}

#[derive(Deserialize)]
struct GridFields {
    n_chord: usize,
    n_span: usize,
    points: Vec<DVec3>,
}

impl TryFrom<GridFields> for Grid {
    type Error = GeometryError;

    fn try_from(fields: GridFields) -> GeometryResult<Self> {
        Grid::from_points(fields.points, fields.n_chord, fields.n_span)
    }
}

impl Grid {
    /// Create a grid from row-major points
    pub fn from_points(points: Vec<DVec3>, n_chord: usize, n_span: usize) -> GeometryResult<Self> {
        let expected = n_chord * n_span;
        if points.len() != expected {
            return Err(GeometryError::ShapeMismatch {
                expected,
                actual: points.len(),
            });
        }
        Ok(Self {
            n_chord,
            n_span,
            points,
        })
    }

    /// Create a grid by evaluating `f(i, j)` at every station
    pub fn from_fn(n_chord: usize, n_span: usize, mut f: impl FnMut(usize, usize) -> DVec3) -> Self {
        let mut points = Vec::with_capacity(n_chord * n_span);
        for i in 0..n_chord {
            for j in 0..n_span {
                points.push(f(i, j));
            }
        }
        Self {
            n_chord,
            n_span,
            points,
        }
    }

    /// (chordwise points, spanwise points)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_chord, self.n_span)
    }

    pub fn n_chord_points(&self) -> usize {
        self.n_chord
    }

    pub fn n_span_points(&self) -> usize {
        self.n_span
    }

    pub fn get(&self, i: usize, j: usize) -> DVec3 {
        self.points[i * self.n_span + j]
    }

    pub fn set(&mut self, i: usize, j: usize, point: DVec3) {
        self.points[i * self.n_span + j] = point;
    }

    /// Row-major point list
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    pub fn into_points(self) -> Vec<DVec3> {
        self.points
    }

    /// Points of one chord station, root to tip
    pub fn row(&self, i: usize) -> &[DVec3] {
        &self.points[i * self.n_span..(i + 1) * self.n_span]
    }

    /// Points of one span station, leading to trailing edge
    pub fn column(&self, j: usize) -> Vec<DVec3> {
        (0..self.n_chord).map(|i| self.get(i, j)).collect()
    }

    /// Overwrite one span station
    pub fn set_column(&mut self, j: usize, column: &[DVec3]) -> GeometryResult<()> {
        if column.len() != self.n_chord {
            return Err(GeometryError::ShapeMismatch {
                expected: self.n_chord,
                actual: column.len(),
            });
        }
        for (i, &point) in column.iter().enumerate() {
            self.set(i, j, point);
        }
        Ok(())
    }

    fn component(&self, f: impl Fn(DVec3) -> f64) -> Vec<Vec<f64>> {
        (0..self.n_chord)
            .map(|i| self.row(i).iter().map(|&p| f(p)).collect())
            .collect()
    }

    /// X coordinates as a `[chordwise][spanwise]` array
    pub fn xx(&self) -> Vec<Vec<f64>> {
        self.component(|p| p.x)
    }

    /// Y coordinates as a `[chordwise][spanwise]` array
    pub fn yy(&self) -> Vec<Vec<f64>> {
        self.component(|p| p.y)
    }

    /// Z coordinates as a `[chordwise][spanwise]` array
    pub fn zz(&self) -> Vec<Vec<f64>> {
        self.component(|p| p.z)
    }

    /// Rows from `start` (inclusive) to the trailing edge
    pub fn rows_from(&self, start: usize) -> GeometryResult<Grid> {
        let start = start.min(self.n_chord);
        Grid::from_points(
            self.points[start * self.n_span..].to_vec(),
            self.n_chord - start,
            self.n_span,
        )
    }

    /// Overwrite rows from `start` with the rows of `sub`
    pub fn splice_rows(&mut self, start: usize, sub: &Grid) -> GeometryResult<()> {
        if sub.n_span != self.n_span || start + sub.n_chord > self.n_chord {
            return Err(GeometryError::ShapeMismatch {
                expected: (self.n_chord - start.min(self.n_chord)) * self.n_span,
                actual: sub.points.len(),
            });
        }
        let offset = start * self.n_span;
        self.points[offset..offset + sub.points.len()].copy_from_slice(&sub.points);
        Ok(())
    }

    pub fn translate(&self, translation: DVec3) -> Grid {
        Grid {
            n_chord: self.n_chord,
            n_span: self.n_span,
            points: self.points.iter().map(|&p| p + translation).collect(),
        }
    }

    /// Rotate every point about `axis` passing through `center`
    pub fn rotate(&self, axis: DVec3, center: DVec3, angle: f64) -> GeometryResult<Grid> {
        let rotation = rotation_matrix(axis, angle)?;
        Ok(Grid {
            n_chord: self.n_chord,
            n_span: self.n_span,
            points: self
                .points
                .iter()
                .map(|&p| rotation * (p - center) + center)
                .collect(),
        })
    }

    /// Reflect about a coordinate plane
    ///
    /// The array order is reversed along the direction that was reflected so
    /// rows still run leading to trailing edge, columns run in increasing
    /// span coordinate, and panel winding is preserved.
    pub fn mirror(&self, plane: MirrorPlane) -> Grid {
        let (n_chord, n_span) = (self.n_chord, self.n_span);
        match plane {
            MirrorPlane::XY => Grid::from_fn(n_chord, n_span, |i, j| {
                let p = self.get(i, j);
                DVec3::new(p.x, p.y, -p.z)
            }),
            MirrorPlane::XZ => Grid::from_fn(n_chord, n_span, |i, j| {
                let p = self.get(i, n_span - 1 - j);
                DVec3::new(p.x, -p.y, p.z)
            }),
            MirrorPlane::YZ => Grid::from_fn(n_chord, n_span, |i, j| {
                let p = self.get(n_chord - 1 - i, j);
                DVec3::new(-p.x, p.y, p.z)
            }),
        }
    }

    /// Join grids side by side along the span
    ///
    /// When the first column of a grid coincides with the last column of the
    /// previous one (within `tolerance`), it is emitted only once.
    pub fn concat_span(grids: &[Grid], tolerance: f64) -> GeometryResult<Grid> {
        let Some(first) = grids.first() else {
            return Ok(Grid::from_fn(0, 0, |_, _| DVec3::ZERO));
        };
        let n_chord = first.n_chord;

        let mut columns: Vec<Vec<DVec3>> = Vec::new();
        for grid in grids {
            if grid.n_chord != n_chord {
                return Err(GeometryError::ShapeMismatch {
                    expected: n_chord * grid.n_span,
                    actual: grid.points.len(),
                });
            }
            for j in 0..grid.n_span {
                let column = grid.column(j);
                let shared = j == 0
                    && columns.last().is_some_and(|last: &Vec<DVec3>| {
                        last.iter()
                            .zip(&column)
                            .all(|(a, b)| a.distance(*b) <= tolerance)
                    });
                if !shared {
                    columns.push(column);
                }
            }
        }

        let n_span = columns.len();
        Ok(Grid::from_fn(n_chord, n_span, |i, j| columns[j][i]))
    }
}
