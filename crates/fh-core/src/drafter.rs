//! Profile drafter
//!
//! Draws dimensioned circle and hexagon outlines around a reference point.
//! Every outline is fully constrained once the host solves the sketch.

use std::f32::consts::FRAC_PI_3;

use fh_cad::{DraftingHost, SketchConstraint, SketchId, SketchPointRef};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::constants::HEXAGON_SIDES;
use crate::error::FastenerResult;

/// A circle drafted around a reference point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftedCircle {
    /// Sketch the circle lives in
    pub sketch: SketchId,
    /// The reference point as seen from this sketch
    pub center: Uuid,
    /// Circle curve
    pub circle: Uuid,
    /// Diameter dimension
    pub diameter_dimension: Uuid,
    /// Where the dimension label sits
    pub witness: Vec2,
}

impl DraftedCircle {
    /// Curves expected to bound the outer loop
    pub fn outer_curves(&self) -> Vec<Uuid> {
        vec![self.circle]
    }
}

/// A regular hexagon drafted around a reference point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftedHexagon {
    pub sketch: SketchId,
    /// Vertices in placement order, 60° apart starting at local +Y
    pub points: [Uuid; HEXAGON_SIDES],
    /// Edge `i` runs from vertex `i` to vertex `i - 1`
    pub lines: [Uuid; HEXAGON_SIDES],
    /// Construction circle through the vertices
    pub construction: DraftedCircle,
    /// Angle dimension between edges 0 and 1
    pub angle_dimension: Uuid,
}

impl DraftedHexagon {
    /// Curves expected to bound the outer loop
    pub fn outer_curves(&self) -> Vec<Uuid> {
        self.lines.to_vec()
    }
}

/// Label position: a quarter diameter from the center along `direction`
pub fn witness_point(center: Vec2, diameter: f32, direction: Vec2) -> Vec2 {
    center + direction.normalize_or_zero() * (diameter / 4.0)
}

/// Use the reference point directly when it already lives in `sketch`,
/// otherwise project it.
fn sketch_center(
    host: &mut dyn DraftingHost,
    sketch: SketchId,
    center: SketchPointRef,
) -> FastenerResult<Uuid> {
    if center.sketch == sketch {
        Ok(center.point)
    } else {
        Ok(host.project_point(sketch, center)?)
    }
}

/// Draft a circle of `diameter` centered on `center`.
///
/// The circle center is made coincident with the projected point and the
/// size is held by a diameter dimension labelled at the witness point.
pub fn draft_circle(
    host: &mut dyn DraftingHost,
    sketch: SketchId,
    center: SketchPointRef,
    diameter: f32,
    direction: Vec2,
) -> FastenerResult<DraftedCircle> {
    let projected = sketch_center(host, sketch, center)?;
    let origin = host.point_position(sketch, projected)?;
    let witness = witness_point(origin, diameter, direction);

    let (circle, circle_center) = host.add_circle(sketch, origin, diameter / 2.0)?;
    host.add_constraint(sketch, SketchConstraint::coincident(circle_center, projected))?;
    let diameter_dimension =
        host.add_constraint(sketch, SketchConstraint::diameter(circle, diameter, witness))?;

    debug!("Drafted circle d={} at {:?} in {}", diameter, origin, sketch);
    Ok(DraftedCircle {
        sketch,
        center: projected,
        circle,
        diameter_dimension,
        witness,
    })
}

/// Draft a regular hexagon inscribed in a circle of `diameter`.
///
/// A construction circle of the same diameter carries the size; edge 0 is
/// vertical, edges 1..5 are equal to edge 0 and tangent to the construction
/// circle, and an angle dimension between edges 0 and 1 fixes the rotation.
///
/// Vertices are placed on the construction circle, 60° apart from local +Y.
/// That starting layout does not satisfy the vertical and tangent
/// constraints; the host's solver moves the vertices. A degree-of-freedom
/// count of zero says the outline is fully determined, not that the
/// drafted positions already satisfy it.
pub fn draft_hexagon(
    host: &mut dyn DraftingHost,
    sketch: SketchId,
    center: SketchPointRef,
    diameter: f32,
    direction: Vec2,
) -> FastenerResult<DraftedHexagon> {
    let construction = draft_circle(host, sketch, center, diameter, direction)?;
    host.set_construction(sketch, construction.circle, true)?;

    let origin = host.point_position(sketch, construction.center)?;
    let first = Vec2::new(0.0, diameter / 2.0);

    let mut positions = [Vec2::ZERO; HEXAGON_SIDES];
    let mut points = [Uuid::nil(); HEXAGON_SIDES];
    for i in 0..HEXAGON_SIDES {
        positions[i] = origin + Vec2::from_angle(i as f32 * FRAC_PI_3).rotate(first);
        points[i] = host.add_point(sketch, positions[i])?;
    }

    let mut lines = [Uuid::nil(); HEXAGON_SIDES];
    for i in 0..HEXAGON_SIDES {
        let previous = (i + HEXAGON_SIDES - 1) % HEXAGON_SIDES;
        lines[i] = host.add_line(sketch, points[i], points[previous])?;
    }

    host.add_constraint(sketch, SketchConstraint::vertical(lines[0]))?;
    for &line in &lines[1..] {
        host.add_constraint(sketch, SketchConstraint::equal_length(lines[0], line))?;
    }

    // Edges 0 and 1 meet at vertex 0
    let interior = interior_angle(
        positions[HEXAGON_SIDES - 1] - positions[0],
        positions[1] - positions[0],
    );
    let angle_dimension = host.add_constraint(
        sketch,
        SketchConstraint::angle(lines[0], lines[1], interior, construction.witness),
    )?;

    for &line in &lines[1..] {
        host.add_constraint(sketch, SketchConstraint::tangent(line, construction.circle))?;
    }

    debug!("Drafted hexagon d={} at {:?} in {}", diameter, origin, sketch);
    Ok(DraftedHexagon {
        sketch,
        points,
        lines,
        construction,
        angle_dimension,
    })
}

/// Unsigned angle between two vectors, in radians
fn interior_angle(a: Vec2, b: Vec2) -> f32 {
    a.normalize_or_zero()
        .dot(b.normalize_or_zero())
        .clamp(-1.0, 1.0)
        .acos()
}
