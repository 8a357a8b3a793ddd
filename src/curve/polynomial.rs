//! Closed-form algebraic curves: bivariate polynomials in x and y.

use crate::aabb::Aabb;
use crate::errors::GeometryError;
use crate::float_types::{EPSILON, Real};
use hashbrown::HashMap;
use nalgebra::{Point2, Vector2};
use std::sync::OnceLock;

/// Exponent tuple `(i, j)` identifying the term `x^i · y^j`.
pub type Exponents = (u32, u32);

/// Orientation of a first-degree curve, read from its coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `b·y + c = 0`
    Horizontal,
    /// `a·x + c = 0`
    Vertical,
    Oblique,
}

/// What a polynomial's coefficients say about its zero-set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolynomialShape {
    /// `a·x + b·y + c = 0`
    Line { a: Real, b: Real, c: Real, kind: LineKind },
    Circle { center: Point2<Real>, radius: Real },
    /// Axis-aligned ellipse.
    Ellipse { center: Point2<Real>, semi_axes: Vector2<Real> },
    General,
}

/// Sparse bivariate polynomial.
///
/// Coefficients are keyed by the exponent tuple of each term, so
/// `coefficient((1, 0))` is the coefficient of `x`. Partial derivatives are
/// built on first use and cached.
#[derive(Debug, Clone)]
pub struct Polynomial {
    terms: HashMap<Exponents, Real>,
    derivatives: OnceLock<Box<(Polynomial, Polynomial)>>,
}

impl Polynomial {
    /// Builds a polynomial from `(exponents, coefficient)` pairs; repeated
    /// exponents are summed and zero coefficients dropped.
    ///
    /// ## Errors
    /// [`GeometryError::InvalidExpression`] when a coefficient is not finite or
    /// every coefficient is zero.
    pub fn new(
        terms: impl IntoIterator<Item = (Exponents, Real)>,
    ) -> Result<Self, GeometryError> {
        let mut map: HashMap<Exponents, Real> = HashMap::new();
        for (exponents, coefficient) in terms {
            if !coefficient.is_finite() {
                return Err(GeometryError::InvalidExpression(format!(
                    "coefficient of x^{} y^{} is not finite",
                    exponents.0, exponents.1
                )));
            }
            *map.entry(exponents).or_insert(0.0) += coefficient;
        }
        map.retain(|_, c| *c != 0.0);
        if map.is_empty() {
            return Err(GeometryError::InvalidExpression(
                "polynomial has no non-zero terms".into(),
            ));
        }
        Ok(Self::from_map(map))
    }

    fn from_map(terms: HashMap<Exponents, Real>) -> Self {
        Self {
            terms,
            derivatives: OnceLock::new(),
        }
    }

    /// Coefficient of `x^i · y^j`, zero when the term is absent.
    #[inline]
    pub fn coefficient(&self, exponents: Exponents) -> Real {
        self.terms.get(&exponents).copied().unwrap_or(0.0)
    }

    /// Terms sorted by exponent tuple.
    pub fn terms(&self) -> Vec<(Exponents, Real)> {
        let mut terms: Vec<_> = self.terms.iter().map(|(e, c)| (*e, *c)).collect();
        terms.sort_by_key(|(e, _)| *e);
        terms
    }

    /// Total degree.
    pub fn degree(&self) -> u32 {
        self.terms.keys().map(|(i, j)| i + j).max().unwrap_or(0)
    }

    pub fn value(&self, x: Real, y: Real) -> Real {
        self.terms
            .iter()
            .map(|(&(i, j), &c)| c * powu(x, i) * powu(y, j))
            .sum()
    }

    pub fn gradient(&self, x: Real, y: Real) -> Vector2<Real> {
        let (dx, dy) = self.derivatives();
        Vector2::new(dx.value(x, y), dy.value(x, y))
    }

    /// `(∂/∂x, ∂/∂y)`, computed once.
    pub fn derivatives(&self) -> (&Polynomial, &Polynomial) {
        let pair = self.derivatives.get_or_init(|| {
            Box::new((self.differentiate(Axis::X), self.differentiate(Axis::Y)))
        });
        (&pair.0, &pair.1)
    }

    fn differentiate(&self, axis: Axis) -> Polynomial {
        let mut map = HashMap::new();
        for (&(i, j), &c) in &self.terms {
            match axis {
                Axis::X if i > 0 => {
                    *map.entry((i - 1, j)).or_insert(0.0) += c * i as Real;
                },
                Axis::Y if j > 0 => {
                    *map.entry((i, j - 1)).or_insert(0.0) += c * j as Real;
                },
                _ => {},
            }
        }
        Self::from_map(map)
    }

    /// Classifies the zero-set by inspecting coefficients.
    pub fn shape(&self) -> PolynomialShape {
        match self.degree() {
            1 => {
                let a = self.coefficient((1, 0));
                let b = self.coefficient((0, 1));
                let c = self.coefficient((0, 0));
                let scale = a.abs().max(b.abs());
                let kind = if b.abs() <= EPSILON * scale {
                    LineKind::Vertical
                } else if a.abs() <= EPSILON * scale {
                    LineKind::Horizontal
                } else {
                    LineKind::Oblique
                };
                PolynomialShape::Line { a, b, c, kind }
            },
            2 => self.conic_shape(),
            _ => PolynomialShape::General,
        }
    }

    fn conic_shape(&self) -> PolynomialShape {
        const CONIC: [Exponents; 6] = [(2, 0), (0, 2), (1, 1), (1, 0), (0, 1), (0, 0)];
        if self.terms.keys().any(|e| !CONIC.contains(e)) {
            return PolynomialShape::General;
        }
        let a = self.coefficient((2, 0));
        let c = self.coefficient((0, 2));
        let d = self.coefficient((1, 0));
        let e = self.coefficient((0, 1));
        let f = self.coefficient((0, 0));
        let scale = a.abs().max(c.abs());
        if self.coefficient((1, 1)).abs() > EPSILON * scale || a * c <= 0.0 {
            return PolynomialShape::General;
        }

        let center = Point2::new(-d / (2.0 * a), -e / (2.0 * c));
        // a(x-cx)² + c(y-cy)² = a·cx² + c·cy² - f
        let rhs = a * center.x * center.x + c * center.y * center.y - f;
        let (rx2, ry2) = (rhs / a, rhs / c);
        if rx2 <= 0.0 || ry2 <= 0.0 {
            return PolynomialShape::General;
        }
        if (a - c).abs() <= EPSILON * scale {
            PolynomialShape::Circle {
                center,
                radius: rx2.sqrt(),
            }
        } else {
            PolynomialShape::Ellipse {
                center,
                semi_axes: Vector2::new(rx2.sqrt(), ry2.sqrt()),
            }
        }
    }

    /// Conservative extent of the zero-set.
    pub fn bounding_box(&self) -> Aabb {
        match self.shape() {
            PolynomialShape::Line { a, b, c, kind } => match kind {
                LineKind::Vertical => {
                    let x = -c / a;
                    Aabb::new(
                        Point2::new(x, Real::NEG_INFINITY),
                        Point2::new(x, Real::INFINITY),
                    )
                },
                LineKind::Horizontal => {
                    let y = -c / b;
                    Aabb::new(
                        Point2::new(Real::NEG_INFINITY, y),
                        Point2::new(Real::INFINITY, y),
                    )
                },
                LineKind::Oblique => Aabb::infinite(),
            },
            PolynomialShape::Circle { center, radius } => Aabb::new(
                center - Vector2::new(radius, radius),
                center + Vector2::new(radius, radius),
            ),
            PolynomialShape::Ellipse { center, semi_axes } => {
                Aabb::new(center - semi_axes, center + semi_axes)
            },
            PolynomialShape::General => Aabb::infinite(),
        }
    }

    /// Lower bound on `|∇f|` wherever `f > 0`, for lines and for conics whose
    /// positive side is the outside. A point with `0 < f <= t` then lies
    /// within `t / slope` of the zero-set.
    pub fn exterior_slope(&self) -> Option<Real> {
        let slope = match self.shape() {
            PolynomialShape::Line { a, b, .. } => a.hypot(b),
            PolynomialShape::Circle { radius, .. } => {
                2.0 * self.coefficient((2, 0)) * radius
            },
            PolynomialShape::Ellipse { semi_axes, .. } => {
                let kx = self.coefficient((2, 0)) * semi_axes.x;
                let ky = self.coefficient((0, 2)) * semi_axes.y;
                2.0 * kx.min(ky)
            },
            PolynomialShape::General => return None,
        };
        (slope.is_finite() && slope > 0.0).then_some(slope)
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

#[inline]
fn powu(base: Real, exp: u32) -> Real {
    match exp {
        0 => 1.0,
        1 => base,
        2 => base * base,
        _ => base.powi(exp as i32),
    }
}
