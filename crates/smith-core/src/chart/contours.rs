//! Constant-resistance and constant-reactance contours
//!
//! All geometry lives in the Γ plane and is returned as shape descriptors
//! (centers, radii, angular bounds). Consumers decide how to draw them.
//!
//! Reactance arcs are clipped analytically. For a normalized reactance x the
//! circle has center (1, 1/x) and radius 1/|x|; it meets the unit circle at
//! Γ = 1 and at a second point found θ_max = 2·atan(1/|x|) away from the pole
//! of the circle opposite Γ = 1. The portion inside the disk therefore sweeps
//! π - θ_max radians and always ends at Γ = 1.

use std::f64::consts::FRAC_PI_2;

use log::trace;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, Result, SmithError};
use crate::math::conversions::round_to;
use crate::math::transforms::validate_z0;

/// A point in the Γ plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the chart origin
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Circular arc clipped to the unit disk
///
/// Angles are measured counter-clockwise at `center` from the +x direction;
/// the arc runs from `start_angle` to `end_angle` with `start_angle < end_angle`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcGeometry {
    pub center: Point,
    pub radius: f64,
    /// Angle between the far pole and the unit-circle intersection
    pub theta_max: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ArcGeometry {
    /// Arc of the constant-reactance circle for a non-zero normalized x
    fn for_reactance(x: f64) -> Self {
        let inv = 1.0 / x;
        let theta_max = 2.0 * (1.0 / x.abs()).atan();
        // Γ = 1 sits at 3π/2 for x > 0 and at π/2 for x < 0
        let (start_angle, end_angle) = if x > 0.0 {
            (FRAC_PI_2 + theta_max, 3.0 * FRAC_PI_2)
        } else {
            (FRAC_PI_2, 3.0 * FRAC_PI_2 - theta_max)
        };
        Self {
            center: Point::new(1.0, inv),
            radius: inv.abs(),
            theta_max,
            start_angle,
            end_angle,
        }
    }

    /// Angular extent of the retained arc
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }

    /// Evenly spaced points along the clipped arc, both ends included
    pub fn sample(&self, npoints: usize) -> Vec<Point> {
        match npoints {
            0 => Vec::new(),
            1 => vec![self.start_point()],
            n => Array1::linspace(self.start_angle, self.end_angle, n)
                .iter()
                .map(|&a| self.point_at(a))
                .collect(),
        }
    }
}

/// A single piece of chart geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Contour {
    /// The |Γ| = 1 rim
    Boundary,
    ResistanceCircle { r: f64, center: Point, radius: f64 },
    /// r = 0 collapses to the short-circuit point
    ResistancePoint { point: Point },
    ReactanceArc { x: f64, arc: ArcGeometry },
    /// x = 0 is the real-axis diameter
    ReactanceDiameter { start: Point, end: Point },
    /// Constant |Γ| (return loss / VSWR) circle centered on the origin
    GammaCircle { magnitude: f64 },
}

impl Contour {
    /// Constant-resistance contour for a normalized r ≥ 0
    pub fn resistance(r: f64) -> Result<Self> {
        ensure_finite("r", r)?;
        if r < 0.0 {
            return Err(SmithError::InvalidInput(format!(
                "normalized resistance must be non-negative, got {}",
                r
            )));
        }
        if r == 0.0 {
            return Ok(Contour::ResistancePoint {
                point: Point::new(-1.0, 0.0),
            });
        }
        Ok(Contour::ResistanceCircle {
            r,
            center: Point::new(r / (1.0 + r), 0.0),
            radius: 1.0 / (1.0 + r),
        })
    }

    /// Constant-reactance contour for a single signed x
    pub fn reactance(x: f64) -> Result<Self> {
        ensure_finite("x", x)?;
        if x == 0.0 {
            return Ok(Contour::ReactanceDiameter {
                start: Point::new(-1.0, 0.0),
                end: Point::new(1.0, 0.0),
            });
        }
        Ok(Contour::ReactanceArc {
            x,
            arc: ArcGeometry::for_reactance(x),
        })
    }

    /// Constant-|Γ| circle; magnitudes above 1 are off the chart
    pub fn gamma_circle(magnitude: f64) -> Result<Self> {
        ensure_finite("|Γ|", magnitude)?;
        if !(0.0..=1.0).contains(&magnitude) {
            return Err(SmithError::OutOfRange(format!(
                "|Γ| circle radius must lie in [0, 1], got {}",
                magnitude
            )));
        }
        Ok(Contour::GammaCircle { magnitude })
    }

    /// Zero-radius or zero-width shapes
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Contour::ResistancePoint { .. } | Contour::ReactanceDiameter { .. }
        )
    }

    /// Center and radius for the contours that are full circles
    pub fn circle(&self) -> Option<(Point, f64)> {
        match *self {
            Contour::Boundary => Some((Point::new(0.0, 0.0), 1.0)),
            Contour::ResistanceCircle { center, radius, .. } => Some((center, radius)),
            Contour::ResistancePoint { point } => Some((point, 0.0)),
            Contour::GammaCircle { magnitude } => Some((Point::new(0.0, 0.0), magnitude)),
            Contour::ReactanceArc { .. } | Contour::ReactanceDiameter { .. } => None,
        }
    }

    /// Chart label in ohms for a reference impedance, e.g. `"25 Ω"` or `"-j50 Ω"`
    pub fn label(&self, z0: f64) -> Option<String> {
        match *self {
            Contour::Boundary => None,
            Contour::ResistanceCircle { r, .. } => Some(format!("{} Ω", ohms(r * z0))),
            Contour::ResistancePoint { .. } => Some("0 Ω".to_string()),
            Contour::ReactanceArc { x, .. } if x > 0.0 => Some(format!("j{} Ω", ohms(x * z0))),
            Contour::ReactanceArc { x, .. } => Some(format!("-j{} Ω", ohms(-x * z0))),
            Contour::ReactanceDiameter { .. } => Some("j0 Ω".to_string()),
            Contour::GammaCircle { magnitude } => Some(format!("|Γ| = {:.2}", magnitude)),
        }
    }
}

fn ohms(value: f64) -> f64 {
    round_to(value, 2)
}

/// Resistance contours in input order
pub fn resistance_contours(resistances: &[f64]) -> Result<Vec<Contour>> {
    resistances.iter().map(|&r| Contour::resistance(r)).collect()
}

/// Reactance contours in input order
///
/// Every non-zero value yields the arc for +|x| followed by its mirror for
/// -|x|; values whose magnitude was already seen are skipped. x = 0 yields the
/// diameter once.
pub fn reactance_contours(reactances: &[f64]) -> Result<Vec<Contour>> {
    let mut seen: Vec<f64> = Vec::with_capacity(reactances.len());
    let mut contours = Vec::with_capacity(2 * reactances.len());

    for &x in reactances {
        ensure_finite("x", x)?;
        let mag = x.abs();
        if seen.contains(&mag) {
            continue;
        }
        seen.push(mag);

        if mag == 0.0 {
            contours.push(Contour::reactance(0.0)?);
        } else {
            contours.push(Contour::reactance(mag)?);
            contours.push(Contour::reactance(-mag)?);
        }
    }

    Ok(contours)
}

/// A full chart grid for one reference impedance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourSet {
    pub z0: f64,
    pub contours: Vec<Contour>,
}

impl ContourSet {
    /// Labels paired with their contours, skipping unlabelled ones
    pub fn labels(&self) -> Vec<(String, &Contour)> {
        self.contours
            .iter()
            .filter_map(|c| c.label(self.z0).map(|l| (l, c)))
            .collect()
    }

    /// Reactance arcs sampled into polylines
    pub fn arc_polylines(&self, npoints: usize) -> Vec<(f64, Vec<Point>)> {
        self.contours
            .iter()
            .filter_map(|c| match c {
                Contour::ReactanceArc { x, arc } => Some((*x, arc.sample(npoints))),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

/// Generate the boundary, resistance and reactance contours for a chart
pub fn generate_contours(z0: f64, resistances: &[f64], reactances: &[f64]) -> Result<ContourSet> {
    let z0 = validate_z0(z0)?;

    let mut contours = vec![Contour::Boundary];
    contours.extend(resistance_contours(resistances)?);
    contours.extend(reactance_contours(reactances)?);

    for c in &contours {
        trace!("contour {:?}", c);
    }

    Ok(ContourSet { z0, contours })
}
