//! # Geometry Values and Bounding Boxes
//!
//! Minimal geometry support for spatial index keys: a geometry is indexed
//! by the Z-cell covering its axis-aligned bounding box, so this module
//! only needs points, boxes, and bounding-box derivation for compound
//! shapes. Full geometry semantics (validity, predicates, WKT) belong to
//! the SQL layer.

/// A 2-D point with `f64` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The degenerate box containing only `p`.
    pub fn of_point(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    pub fn min_corner(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn max_corner(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Grows the box to cover `p`.
    pub fn expand_to(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    fn covering<'a, I: Iterator<Item = &'a Point>>(mut points: I) -> Self {
        let Some(first) = points.next() else {
            return Self::default();
        };
        let mut bbox = Self::of_point(*first);
        for p in points {
            bbox.expand_to(*p);
        }
        bbox
    }
}

/// The geometry values a spatial index can key on.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    /// An ordered sequence of vertices.
    LineString(Vec<Point>),
    /// An exterior ring followed by any interior rings.
    Polygon(Vec<Vec<Point>>),
}

impl Geometry {
    /// The axis-aligned bounding box of the geometry. Interior rings lie
    /// inside the exterior ring, so only the exterior contributes.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Geometry::Point(p) => BoundingBox::of_point(*p),
            Geometry::LineString(points) => BoundingBox::covering(points.iter()),
            Geometry::Polygon(rings) => match rings.first() {
                Some(exterior) => BoundingBox::covering(exterior.iter()),
                None => BoundingBox::default(),
            },
        }
    }
}

impl From<Point> for Geometry {
    fn from(p: Point) -> Self {
        Geometry::Point(p)
    }
}
