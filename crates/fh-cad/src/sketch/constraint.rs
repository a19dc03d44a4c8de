//! Sketch Constraints
//!
//! Geometric constraints and driving dimensions that a drafted profile
//! places on its sketch entities.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A constraint or dimension between sketch entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SketchConstraint {
    // ============== Geometric Constraints ==============
    /// Two points are at the same location
    Coincident {
        /// Unique identifier
        id: Uuid,
        /// First point
        point1: Uuid,
        /// Second point
        point2: Uuid,
    },

    /// A line is vertical (parallel to the sketch Y axis)
    Vertical {
        /// Unique identifier
        id: Uuid,
        /// Line to constrain
        line: Uuid,
    },

    /// A curve is tangent to another curve
    Tangent {
        /// Unique identifier
        id: Uuid,
        /// First curve
        curve1: Uuid,
        /// Second curve
        curve2: Uuid,
    },

    /// Two lines have equal length
    EqualLength {
        /// Unique identifier
        id: Uuid,
        /// First line
        line1: Uuid,
        /// Second line
        line2: Uuid,
    },

    // ============== Dimensions ==============
    /// Diameter of a circle
    Diameter {
        /// Unique identifier
        id: Uuid,
        /// Circle to constrain
        circle: Uuid,
        /// Required diameter
        value: f32,
        /// Where the dimension text is anchored
        text_position: Vec2,
    },

    /// Angle between two lines
    Angle {
        /// Unique identifier
        id: Uuid,
        /// First line
        line1: Uuid,
        /// Second line
        line2: Uuid,
        /// Angle in radians
        value: f32,
        /// Where the dimension text is anchored
        text_position: Vec2,
    },
}

impl SketchConstraint {
    /// Get the unique ID of this constraint
    pub fn id(&self) -> Uuid {
        match self {
            SketchConstraint::Coincident { id, .. } => *id,
            SketchConstraint::Vertical { id, .. } => *id,
            SketchConstraint::Tangent { id, .. } => *id,
            SketchConstraint::EqualLength { id, .. } => *id,
            SketchConstraint::Diameter { id, .. } => *id,
            SketchConstraint::Angle { id, .. } => *id,
        }
    }

    /// Get the type name of this constraint
    pub fn type_name(&self) -> &'static str {
        match self {
            SketchConstraint::Coincident { .. } => "Coincident",
            SketchConstraint::Vertical { .. } => "Vertical",
            SketchConstraint::Tangent { .. } => "Tangent",
            SketchConstraint::EqualLength { .. } => "Equal Length",
            SketchConstraint::Diameter { .. } => "Diameter",
            SketchConstraint::Angle { .. } => "Angle",
        }
    }

    /// Get all entity IDs referenced by this constraint
    pub fn referenced_entities(&self) -> Vec<Uuid> {
        match self {
            SketchConstraint::Coincident { point1, point2, .. } => vec![*point1, *point2],
            SketchConstraint::Vertical { line, .. } => vec![*line],
            SketchConstraint::Tangent { curve1, curve2, .. } => vec![*curve1, *curve2],
            SketchConstraint::EqualLength { line1, line2, .. } => vec![*line1, *line2],
            SketchConstraint::Diameter { circle, .. } => vec![*circle],
            SketchConstraint::Angle { line1, line2, .. } => vec![*line1, *line2],
        }
    }

    /// Check if this constraint references a specific entity
    pub fn references_entity(&self, entity_id: Uuid) -> bool {
        self.referenced_entities().contains(&entity_id)
    }

    /// Get the number of equations this constraint adds to the system
    pub fn equation_count(&self) -> usize {
        match self {
            SketchConstraint::Coincident { .. } => 2, // x and y must match
            SketchConstraint::Vertical { .. } => 1,   // dx = 0
            SketchConstraint::Tangent { .. } => 1,    // distance to center = radius
            SketchConstraint::EqualLength { .. } => 1, // len1 = len2
            SketchConstraint::Diameter { .. } => 1,   // diameter = value
            SketchConstraint::Angle { .. } => 1,      // angle = value
        }
    }

    /// Whether this is a dimension (has a driving value)
    pub fn is_dimensional(&self) -> bool {
        matches!(
            self,
            SketchConstraint::Diameter { .. } | SketchConstraint::Angle { .. }
        )
    }

    /// Get the driving value if this is a dimension
    pub fn value(&self) -> Option<f32> {
        match self {
            SketchConstraint::Diameter { value, .. } => Some(*value),
            SketchConstraint::Angle { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Get the text anchor if this is a dimension
    pub fn text_position(&self) -> Option<Vec2> {
        match self {
            SketchConstraint::Diameter { text_position, .. } => Some(*text_position),
            SketchConstraint::Angle { text_position, .. } => Some(*text_position),
            _ => None,
        }
    }

    // ============== Factory Methods ==============

    /// Create a coincident constraint
    pub fn coincident(point1: Uuid, point2: Uuid) -> Self {
        SketchConstraint::Coincident {
            id: Uuid::new_v4(),
            point1,
            point2,
        }
    }

    /// Create a vertical constraint
    pub fn vertical(line: Uuid) -> Self {
        SketchConstraint::Vertical {
            id: Uuid::new_v4(),
            line,
        }
    }

    /// Create a tangent constraint
    pub fn tangent(curve1: Uuid, curve2: Uuid) -> Self {
        SketchConstraint::Tangent {
            id: Uuid::new_v4(),
            curve1,
            curve2,
        }
    }

    /// Create an equal length constraint
    pub fn equal_length(line1: Uuid, line2: Uuid) -> Self {
        SketchConstraint::EqualLength {
            id: Uuid::new_v4(),
            line1,
            line2,
        }
    }

    /// Create a diameter dimension
    pub fn diameter(circle: Uuid, value: f32, text_position: Vec2) -> Self {
        SketchConstraint::Diameter {
            id: Uuid::new_v4(),
            circle,
            value,
            text_position,
        }
    }

    /// Create an angular dimension
    pub fn angle(line1: Uuid, line2: Uuid, value: f32, text_position: Vec2) -> Self {
        SketchConstraint::Angle {
            id: Uuid::new_v4(),
            line1,
            line2,
            value,
            text_position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::{Sketch, SketchPlane};

    #[test]
    fn test_constraint_id() {
        let mut sketch = Sketch::new("ids", SketchPlane::xy());
        let a = sketch.add_point(Vec2::ZERO, true);
        let b = sketch.add_point(Vec2::new(0.0, 2.0), false);
        let line = sketch.add_line(a, b).unwrap();

        let vertical = SketchConstraint::vertical(line);
        let SketchConstraint::Vertical { id: created, .. } = vertical else {
            panic!("expected vertical constraint");
        };
        assert_eq!(vertical.id(), created);

        let added = sketch.add_constraint(vertical).unwrap();
        assert_eq!(added, created);
        let stored: Vec<Uuid> = sketch.constraints_on(line).map(|c| c.id()).collect();
        assert_eq!(stored, vec![created]);

        let other = sketch
            .add_constraint(SketchConstraint::coincident(a, b))
            .unwrap();
        assert_ne!(other, added);
    }

    #[test]
    fn test_references() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let c = SketchConstraint::coincident(p1, p2);

        assert!(c.references_entity(p1));
        assert!(c.references_entity(p2));
        assert!(!c.references_entity(Uuid::new_v4()));
        assert_eq!(c.equation_count(), 2);
    }

    #[test]
    fn test_dimensional() {
        let c = SketchConstraint::diameter(Uuid::new_v4(), 3.0, Vec2::new(0.0, 0.75));
        assert!(c.is_dimensional());
        assert_eq!(c.value(), Some(3.0));
        assert_eq!(c.text_position(), Some(Vec2::new(0.0, 0.75)));

        let c2 = SketchConstraint::tangent(Uuid::new_v4(), Uuid::new_v4());
        assert!(!c2.is_dimensional());
        assert_eq!(c2.value(), None);
        assert_eq!(c2.text_position(), None);
    }
}
