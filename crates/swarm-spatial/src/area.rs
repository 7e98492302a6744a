//! `SurveyArea`: the validated survey polygon.
//!
//! # Validation
//!
//! Rejection sampling only terminates if the polygon covers a meaningful
//! share of its bounding box, so [`SurveyArea::new`] refuses anything the
//! sampler could hang on:
//!
//! - fewer than 3 distinct vertices,
//! - non-finite coordinates,
//! - zero or near-zero area (relative to the bounding box),
//! - two non-adjacent edges that touch or cross.
//!
//! Consecutive duplicate vertices, and a closing vertex equal to the first,
//! are dropped before the checks.
//!
//! # Containment
//!
//! [`SurveyArea::contains`] is the even-odd ray-casting rule with boundary
//! points excluded, so every accepted sample lies strictly inside.

use swarm_core::Point;

use crate::{SpatialError, SpatialResult};

/// Polygons whose area is below this fraction of their bounding box are
/// rejected as degenerate.
pub const MIN_AREA_RATIO: f64 = 1e-9;

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// Axis-aligned bounding rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Smallest box enclosing every point in `points`.
    ///
    /// Returns `None` for an empty slice.
    pub fn enclosing(points: &[Point]) -> Option<BoundingBox> {
        let first = *points.first()?;
        let mut bbox = BoundingBox { min: first, max: first };
        for p in &points[1..] {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Inclusive containment check.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

// ── SurveyArea ────────────────────────────────────────────────────────────────

/// A simple polygon with positive area, validated once and shared read-only
/// for the whole run.
#[derive(Clone, Debug)]
pub struct SurveyArea {
    vertices: Vec<Point>,
    bbox:     BoundingBox,
    area:     f64,
}

impl SurveyArea {
    /// Validate `vertices` and build the survey area.
    pub fn new(vertices: impl Into<Vec<Point>>) -> SpatialResult<SurveyArea> {
        let mut vertices: Vec<Point> = vertices.into();

        if let Some(index) = vertices.iter().position(|p| !p.is_finite()) {
            return Err(SpatialError::NonFiniteVertex { index });
        }

        vertices.dedup();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(SpatialError::TooFewVertices(vertices.len()));
        }

        let bbox = BoundingBox::enclosing(&vertices)
            .ok_or(SpatialError::TooFewVertices(0))?;
        let area = shoelace_area(&vertices);
        if area <= 0.0 || area <= MIN_AREA_RATIO * bbox.area() {
            return Err(SpatialError::DegenerateArea { area });
        }

        if let Some((first, second)) = find_self_intersection(&vertices) {
            return Err(SpatialError::SelfIntersecting { first, second });
        }

        Ok(SurveyArea { vertices, bbox, area })
    }

    /// The polygon's vertices in order (without a repeated closing vertex).
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Enclosed area (always positive).
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Expected fraction of bounding-box candidates the sampler accepts.
    #[inline]
    pub fn acceptance_ratio(&self) -> f64 {
        self.area / self.bbox.area()
    }

    /// `true` if `p` lies strictly inside the polygon.
    pub fn contains(&self, p: Point) -> bool {
        if !self.bbox.contains(p) || self.on_boundary(p) {
            return false;
        }

        let v = &self.vertices;
        let mut inside = false;
        let mut j = v.len() - 1;
        for i in 0..v.len() {
            let (a, b) = (v[i], v[j]);
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    fn on_boundary(&self, p: Point) -> bool {
        self.edges().any(|(a, b)| cross(a, b, p) == 0.0 && within_span(a, b, p))
    }

    /// Iterate edges as `(start, end)` pairs, closing back to vertex 0.
    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

fn shoelace_area(v: &[Point]) -> f64 {
    let n = v.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let (a, b) = (v[i], v[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice.abs() * 0.5
}

/// Z component of `(b - a) × (p - a)`.  Positive when `p` is left of `a→b`.
#[inline]
fn cross(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// For `p` collinear with `a→b`: is it within the segment's extent?
#[inline]
fn within_span(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Closed-segment intersection test (touching counts).
fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_span(q1, q2, p1))
        || (d2 == 0.0 && within_span(q1, q2, p2))
        || (d3 == 0.0 && within_span(p1, p2, q1))
        || (d4 == 0.0 && within_span(p1, p2, q2))
}

/// First pair of non-adjacent edges that intersect, if any.  O(n²), run
/// once at startup.
fn find_self_intersection(v: &[Point]) -> Option<(usize, usize)> {
    let n = v.len();
    for i in 0..n {
        let (a1, a2) = (v[i], v[(i + 1) % n]);
        for j in (i + 2)..n {
            // Edge n-1 closes onto vertex 0 and is adjacent to edge 0.
            if i == 0 && j == n - 1 {
                continue;
            }
            let (b1, b2) = (v[j], v[(j + 1) % n]);
            if segments_intersect(a1, a2, b1, b2) {
                return Some((i, j));
            }
        }
    }
    None
}
