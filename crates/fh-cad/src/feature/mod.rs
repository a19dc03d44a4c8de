//! Extrude Feature Inputs
//!
//! Describes an extrusion the host should create from a sketch profile:
//! where it starts, which way it grows, how it terminates and how it
//! combines with the existing body.

use serde::{Deserialize, Serialize};

use crate::host::{FaceId, FeatureId, ProfileId, SketchId};

/// Direction of extrusion relative to the start plane normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtrudeDirection {
    /// Extrude along the start plane normal
    #[default]
    Positive,
    /// Extrude against the start plane normal
    Negative,
}

impl ExtrudeDirection {
    /// Sign applied to the start plane normal
    pub fn sign(self) -> f32 {
        match self {
            ExtrudeDirection::Positive => 1.0,
            ExtrudeDirection::Negative => -1.0,
        }
    }
}

/// Boolean operation applied against the component's body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanOp {
    /// Remove from existing body
    Cut,
}

/// Geometry an extrusion can start from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtentEntity {
    /// The reference plane a sketch is drawn on
    SketchPlane(SketchId),
    /// A body face
    Face(FaceId),
}

/// Where an extrusion starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StartExtent {
    /// Start on the profile's own sketch plane
    ProfilePlane,
    /// Start on another entity, optionally offset along its normal
    FromEntity {
        /// Start entity
        entity: ExtentEntity,
        /// Offset from the entity
        offset: f32,
    },
}

/// How an extrusion terminates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExtentDefinition {
    /// Run until the given face
    ToEntity {
        /// Terminating face
        face: FaceId,
        /// Whether to extend across tangent-chained faces
        chained: bool,
    },
    /// Run a fixed distance
    Distance(f32),
}

/// Everything the host needs to create one extrude feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtrudeInput {
    /// Profile region to extrude
    pub profile: ProfileId,
    /// Boolean combination with the component's body
    pub operation: BooleanOp,
    /// Start condition
    pub start: StartExtent,
    /// Termination condition
    pub extent: ExtentDefinition,
    /// Direction relative to the start plane
    pub direction: ExtrudeDirection,
    /// Feature name shown in the history
    pub name: String,
}

impl ExtrudeInput {
    /// Create an input starting on the profile plane
    pub fn new(
        name: impl Into<String>,
        profile: ProfileId,
        operation: BooleanOp,
        extent: ExtentDefinition,
    ) -> Self {
        Self {
            profile,
            operation,
            start: StartExtent::ProfilePlane,
            extent,
            direction: ExtrudeDirection::Positive,
            name: name.into(),
        }
    }

    /// Set the start condition
    pub fn with_start(mut self, start: StartExtent) -> Self {
        self.start = start;
        self
    }

    /// Set the direction
    pub fn with_direction(mut self, direction: ExtrudeDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Check the numeric parts of the input
    pub fn validate(&self) -> Result<(), String> {
        if let ExtentDefinition::Distance(distance) = self.extent
            && !(distance.is_finite() && distance > 0.0)
        {
            return Err(format!("Extrude distance must be positive, got {}", distance));
        }
        if let StartExtent::FromEntity { offset, .. } = self.start
            && !offset.is_finite()
        {
            return Err(format!("Start offset must be finite, got {}", offset));
        }
        Ok(())
    }
}

/// An extrude feature created by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtrudeFeature {
    /// Unique identifier
    pub id: FeatureId,
    /// The input the feature was created from
    pub input: ExtrudeInput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn profile() -> ProfileId {
        ProfileId::new(SketchId(Uuid::new_v4()), 0)
    }

    #[test]
    fn test_direction() {
        assert_eq!(ExtrudeDirection::Positive.sign(), 1.0);
        assert_eq!(ExtrudeDirection::Negative.sign(), -1.0);
    }

    #[test]
    fn test_validate_distance() {
        let input = ExtrudeInput::new(
            "cut",
            profile(),
            BooleanOp::Cut,
            ExtentDefinition::Distance(2.4),
        );
        assert!(input.validate().is_ok());

        let input = ExtrudeInput::new(
            "cut",
            profile(),
            BooleanOp::Cut,
            ExtentDefinition::Distance(0.0),
        );
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_offset() {
        let input = ExtrudeInput::new(
            "cut",
            profile(),
            BooleanOp::Cut,
            ExtentDefinition::Distance(1.0),
        )
        .with_start(StartExtent::FromEntity {
            entity: ExtentEntity::Face(FaceId::new(Uuid::new_v4(), 0)),
            offset: f32::INFINITY,
        });
        assert!(input.validate().is_err());
    }
}
