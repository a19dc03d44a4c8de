//! Cut planner
//!
//! Turns a reference point, a terminating face and a size into the
//! extrusion parameters of the bore, head and anchor cuts.
//!
//! The bore always runs from the point plane through to the face. The head
//! and anchor pockets sit at opposite ends: without `invert` the head
//! starts at the point and the anchor at the face, with `invert` they swap.

use std::fmt;

use fh_cad::{
    BooleanOp, ExtentDefinition, ExtentEntity, ExtrudeDirection, ExtrudeInput, FaceId, ProfileId,
    SketchId, SketchPointRef, StartExtent,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::SizeSpec;
use crate::constants::{
    ANCHOR_DIMENSION_DIRECTION, BORE_DIMENSION_DIRECTION, HEAD_DIMENSION_DIRECTION,
};

/// The three cuts of a fastener hole, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CutKind {
    Bore,
    Head,
    Anchor,
}

impl CutKind {
    pub const ALL: [CutKind; 3] = [CutKind::Bore, CutKind::Head, CutKind::Anchor];

    /// Profile diameter for this cut
    pub fn diameter(self, spec: &SizeSpec) -> f32 {
        match self {
            CutKind::Bore => spec.bore_diameter,
            CutKind::Head => spec.socket_diameter,
            CutKind::Anchor => spec.hex_nut_diameter,
        }
    }

    /// Direction of the dimension label from the profile center
    pub fn dimension_direction(self) -> Vec2 {
        match self {
            CutKind::Bore => BORE_DIMENSION_DIRECTION,
            CutKind::Head => HEAD_DIMENSION_DIRECTION,
            CutKind::Anchor => ANCHOR_DIMENSION_DIRECTION,
        }
    }
}

impl fmt::Display for CutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            CutKind::Bore => "bore",
            CutKind::Head => "head",
            CutKind::Anchor => "anchor",
        })
    }
}

/// Where a cut starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartReference {
    /// Plane of the sketch holding the reference point
    PointPlane(SketchId),
    /// The terminating face
    Face(FaceId),
}

/// How a cut ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Termination {
    /// Up to the face, chaining through tangent faces
    ToFace(FaceId),
    /// A fixed depth
    Distance(f32),
}

/// Extrusion parameters of one cut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPlan {
    pub kind: CutKind,
    pub start: StartReference,
    /// Offset from the start reference, always zero for fastener cuts
    pub offset: f32,
    pub direction: ExtrudeDirection,
    pub termination: Termination,
    pub operation: BooleanOp,
    /// Feature name
    pub name: String,
}

impl CutPlan {
    fn new(
        kind: CutKind,
        start: StartReference,
        direction: ExtrudeDirection,
        termination: Termination,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            start,
            offset: 0.0,
            direction,
            termination,
            operation: BooleanOp::Cut,
            name: name.into(),
        }
    }

    /// Depth along the start normal for fixed-depth cuts, signed by direction
    pub fn signed_distance(&self) -> Option<f32> {
        match self.termination {
            Termination::Distance(d) => Some(d * self.direction.sign()),
            Termination::ToFace(_) => None,
        }
    }

    /// Whether the cut starts on the terminating face
    pub fn starts_at_face(&self) -> bool {
        matches!(self.start, StartReference::Face(_))
    }

    /// Host input for extruding `profile` with this plan
    pub fn to_extrude_input(&self, profile: ProfileId) -> ExtrudeInput {
        let entity = match self.start {
            StartReference::PointPlane(sketch) => ExtentEntity::SketchPlane(sketch),
            StartReference::Face(face) => ExtentEntity::Face(face),
        };
        let extent = match self.termination {
            Termination::ToFace(face) => ExtentDefinition::ToEntity {
                face,
                chained: true,
            },
            Termination::Distance(d) => ExtentDefinition::Distance(d),
        };

        ExtrudeInput::new(self.name.clone(), profile, self.operation, extent)
            .with_start(StartExtent::FromEntity {
                entity,
                offset: self.offset,
            })
            .with_direction(self.direction)
    }
}

/// Derives cut plans for one point/face pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutPlanner {
    pub point: SketchPointRef,
    pub face: FaceId,
    pub spec: SizeSpec,
    pub invert: bool,
}

impl CutPlanner {
    pub fn new(point: SketchPointRef, face: FaceId, spec: SizeSpec, invert: bool) -> Self {
        Self {
            point,
            face,
            spec,
            invert,
        }
    }

    /// Clearance hole from the point plane through to the face
    pub fn bore(&self, name: impl Into<String>) -> CutPlan {
        CutPlan::new(
            CutKind::Bore,
            StartReference::PointPlane(self.point.sketch),
            ExtrudeDirection::Positive,
            Termination::ToFace(self.face),
            name,
        )
    }

    /// Socket-head counterbore, at the point unless inverted
    pub fn head(&self, name: impl Into<String>) -> CutPlan {
        self.pocket(CutKind::Head, self.invert, self.spec.socket_length, name)
    }

    /// Hex-nut pocket, at the face unless inverted
    pub fn anchor(&self, name: impl Into<String>) -> CutPlan {
        self.pocket(CutKind::Anchor, !self.invert, self.spec.hex_nut_length, name)
    }

    /// Plan for `kind`
    pub fn plan(&self, kind: CutKind, name: impl Into<String>) -> CutPlan {
        match kind {
            CutKind::Bore => self.bore(name),
            CutKind::Head => self.head(name),
            CutKind::Anchor => self.anchor(name),
        }
    }

    /// A fixed-depth pocket that either starts on the face and cuts back
    /// toward the point, or starts at the point plane and cuts into the part
    fn pocket(
        &self,
        kind: CutKind,
        at_face: bool,
        depth: f32,
        name: impl Into<String>,
    ) -> CutPlan {
        let (start, direction) = if at_face {
            (StartReference::Face(self.face), ExtrudeDirection::Positive)
        } else {
            (
                StartReference::PointPlane(self.point.sketch),
                ExtrudeDirection::Negative,
            )
        };
        CutPlan::new(kind, start, direction, Termination::Distance(depth), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SizeCatalog, SizeKey};
    use approx::assert_relative_eq;
    use uuid::Uuid;

    fn planner(invert: bool) -> CutPlanner {
        let spec = SizeCatalog::builtin().lookup(&SizeKey::from("M3")).unwrap();
        CutPlanner::new(
            SketchPointRef::new(SketchId::new_v4(), Uuid::new_v4()),
            FaceId::new(Uuid::new_v4(), 0),
            spec,
            invert,
        )
    }

    #[test]
    fn test_bore_spans_point_to_face() {
        for invert in [false, true] {
            let p = planner(invert);
            let bore = p.bore("cut-bore");
            assert_eq!(bore.start, StartReference::PointPlane(p.point.sketch));
            assert_eq!(bore.termination, Termination::ToFace(p.face));
            assert_eq!(bore.direction, ExtrudeDirection::Positive);
            assert_eq!(bore.operation, BooleanOp::Cut);
            assert_eq!(bore.signed_distance(), None);
        }
    }

    #[test]
    fn test_not_inverted() {
        let p = planner(false);
        let head = p.head("head-cut");
        assert_eq!(head.start, StartReference::PointPlane(p.point.sketch));
        assert_relative_eq!(head.signed_distance().unwrap(), -3.0);

        let anchor = p.anchor("anchor-cut");
        assert_eq!(anchor.start, StartReference::Face(p.face));
        assert_relative_eq!(anchor.signed_distance().unwrap(), 2.4);
    }

    #[test]
    fn test_inverted() {
        let p = planner(true);
        let head = p.head("head-cut");
        assert_eq!(head.start, StartReference::Face(p.face));
        assert_relative_eq!(head.signed_distance().unwrap(), 3.0);

        let anchor = p.anchor("anchor-cut");
        assert_eq!(anchor.start, StartReference::PointPlane(p.point.sketch));
        assert_relative_eq!(anchor.signed_distance().unwrap(), -2.4);
    }

    #[test]
    fn test_head_and_anchor_opposite() {
        for invert in [false, true] {
            let p = planner(invert);
            let head = p.head("h");
            let anchor = p.anchor("a");
            assert_ne!(head.starts_at_face(), anchor.starts_at_face());
            assert_eq!(head.starts_at_face(), invert);
        }
    }

    #[test]
    fn test_to_extrude_input() {
        let p = planner(false);
        let profile = ProfileId::new(SketchId::new_v4(), 2);

        let input = p.bore("cut-bore").to_extrude_input(profile);
        assert_eq!(input.profile, profile);
        assert_eq!(input.name, "cut-bore");
        assert_eq!(input.operation, BooleanOp::Cut);
        assert_eq!(
            input.start,
            StartExtent::FromEntity {
                entity: ExtentEntity::SketchPlane(p.point.sketch),
                offset: 0.0,
            }
        );
        assert_eq!(
            input.extent,
            ExtentDefinition::ToEntity {
                face: p.face,
                chained: true,
            }
        );

        let input = p.anchor("anchor-cut").to_extrude_input(profile);
        assert_eq!(input.extent, ExtentDefinition::Distance(2.4));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_kind_lookups() {
        let spec = planner(false).spec;
        assert_relative_eq!(CutKind::Head.diameter(&spec), 5.5);
        assert_eq!(CutKind::Anchor.dimension_direction(), Vec2::NEG_Y);
        assert_eq!(CutKind::Bore.to_string(), "bore");
    }
}
