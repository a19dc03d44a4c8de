//! 2D Sketch Model
//!
//! Sketches live on a plane in model space and hold points, lines and
//! circles together with the constraints and dimensions placed on them.

mod constraint;
mod regions;

pub use constraint::SketchConstraint;
pub use regions::{SketchRegion, find_regions};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Sketch-related errors
#[derive(Debug, Clone, Error)]
pub enum SketchError {
    #[error("Entity not found: {0}")]
    EntityNotFound(Uuid),

    #[error("Entity {id} is not a {expected}")]
    WrongEntityKind { id: Uuid, expected: &'static str },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// A plane in model space that a sketch is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchPlane {
    /// Origin of the plane
    pub origin: Vec3,
    /// Local X axis (normalized)
    pub x_axis: Vec3,
    /// Local Y axis (normalized)
    pub y_axis: Vec3,
    /// Plane normal (x_axis cross y_axis)
    pub normal: Vec3,
}

impl Default for SketchPlane {
    fn default() -> Self {
        Self::xy()
    }
}

impl SketchPlane {
    /// Create a plane from an origin and two in-plane axes
    pub fn new(origin: Vec3, x_axis: Vec3, y_axis: Vec3) -> Self {
        let x_axis = x_axis.normalize();
        let y_axis = y_axis.normalize();
        Self {
            origin,
            x_axis,
            y_axis,
            normal: x_axis.cross(y_axis).normalize(),
        }
    }

    /// XY plane at the origin
    pub fn xy() -> Self {
        Self::new(Vec3::ZERO, Vec3::X, Vec3::Y)
    }

    /// XY plane offset along Z
    pub fn xy_at(z: f32) -> Self {
        Self::new(Vec3::new(0.0, 0.0, z), Vec3::X, Vec3::Y)
    }

    /// Map a local sketch coordinate into model space
    pub fn to_world(&self, local: Vec2) -> Vec3 {
        self.origin + self.x_axis * local.x + self.y_axis * local.y
    }

    /// Orthogonally project a model-space point onto the plane
    pub fn to_local(&self, world: Vec3) -> Vec2 {
        let d = world - self.origin;
        Vec2::new(d.dot(self.x_axis), d.dot(self.y_axis))
    }

    /// Signed distance of a model-space point from the plane
    pub fn distance_to(&self, world: Vec3) -> f32 {
        (world - self.origin).dot(self.normal)
    }
}

/// A sketch entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SketchEntity {
    /// A point
    Point {
        /// Unique identifier
        id: Uuid,
        /// Position in sketch coordinates
        position: Vec2,
        /// Fixed points (projections) carry no degrees of freedom
        fixed: bool,
    },

    /// A line segment between two points
    Line {
        /// Unique identifier
        id: Uuid,
        /// Start point entity
        start: Uuid,
        /// End point entity
        end: Uuid,
        /// Reference-only geometry
        construction: bool,
    },

    /// A circle
    Circle {
        /// Unique identifier
        id: Uuid,
        /// Center point entity
        center: Uuid,
        /// Radius
        radius: f32,
        /// Reference-only geometry
        construction: bool,
    },
}

impl SketchEntity {
    /// Get the unique ID of this entity
    pub fn id(&self) -> Uuid {
        match self {
            SketchEntity::Point { id, .. } => *id,
            SketchEntity::Line { id, .. } => *id,
            SketchEntity::Circle { id, .. } => *id,
        }
    }

    /// Get the type name of this entity
    pub fn type_name(&self) -> &'static str {
        match self {
            SketchEntity::Point { .. } => "Point",
            SketchEntity::Line { .. } => "Line",
            SketchEntity::Circle { .. } => "Circle",
        }
    }

    /// Whether this entity is reference-only
    pub fn is_construction(&self) -> bool {
        match self {
            SketchEntity::Point { .. } => false,
            SketchEntity::Line { construction, .. } => *construction,
            SketchEntity::Circle { construction, .. } => *construction,
        }
    }
}

/// A 2D sketch on a plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sketch {
    /// Unique identifier
    pub id: Uuid,
    /// Name of the sketch
    pub name: String,
    /// Plane the sketch is drawn on
    pub plane: SketchPlane,
    /// Entities in creation order
    entities: Vec<SketchEntity>,
    /// Constraints and dimensions in creation order
    constraints: Vec<SketchConstraint>,
}

impl Sketch {
    /// Create an empty sketch
    pub fn new(name: impl Into<String>, plane: SketchPlane) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            plane,
            entities: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Add a point and return its ID
    pub fn add_point(&mut self, position: Vec2, fixed: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.entities.push(SketchEntity::Point {
            id,
            position,
            fixed,
        });
        id
    }

    /// Add a line between two existing points
    pub fn add_line(&mut self, start: Uuid, end: Uuid) -> Result<Uuid, SketchError> {
        self.point_position(start)?;
        self.point_position(end)?;
        if start == end {
            return Err(SketchError::InvalidGeometry(
                "Line endpoints must be distinct".into(),
            ));
        }

        let id = Uuid::new_v4();
        self.entities.push(SketchEntity::Line {
            id,
            start,
            end,
            construction: false,
        });
        Ok(id)
    }

    /// Add a circle with its own center point; returns (circle, center point)
    pub fn add_circle(&mut self, center: Vec2, radius: f32) -> Result<(Uuid, Uuid), SketchError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SketchError::InvalidGeometry(format!(
                "Circle radius must be positive, got {}",
                radius
            )));
        }

        let center_id = self.add_point(center, false);
        let id = Uuid::new_v4();
        self.entities.push(SketchEntity::Circle {
            id,
            center: center_id,
            radius,
            construction: false,
        });
        Ok((id, center_id))
    }

    /// Mark a curve as construction (reference-only) geometry
    pub fn set_construction(&mut self, id: Uuid, value: bool) -> Result<(), SketchError> {
        match self.get_entity_mut(id) {
            Some(SketchEntity::Line { construction, .. })
            | Some(SketchEntity::Circle { construction, .. }) => {
                *construction = value;
                Ok(())
            }
            Some(_) => Err(SketchError::WrongEntityKind {
                id,
                expected: "curve",
            }),
            None => Err(SketchError::EntityNotFound(id)),
        }
    }

    /// Add a constraint whose referenced entities all exist
    pub fn add_constraint(&mut self, constraint: SketchConstraint) -> Result<Uuid, SketchError> {
        if let Some(missing) = constraint
            .referenced_entities()
            .into_iter()
            .find(|id| self.get_entity(*id).is_none())
        {
            return Err(SketchError::EntityNotFound(missing));
        }

        let id = constraint.id();
        self.constraints.push(constraint);
        Ok(id)
    }

    /// Get an entity by ID
    pub fn get_entity(&self, id: Uuid) -> Option<&SketchEntity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Get a mutable entity by ID
    pub fn get_entity_mut(&mut self, id: Uuid) -> Option<&mut SketchEntity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Position of a point entity
    pub fn point_position(&self, id: Uuid) -> Result<Vec2, SketchError> {
        match self.get_entity(id) {
            Some(SketchEntity::Point { position, .. }) => Ok(*position),
            Some(_) => Err(SketchError::WrongEntityKind {
                id,
                expected: "point",
            }),
            None => Err(SketchError::EntityNotFound(id)),
        }
    }

    /// Iterate over entities in creation order
    pub fn entities_iter(&self) -> impl Iterator<Item = &SketchEntity> {
        self.entities.iter()
    }

    /// Iterate over constraints in creation order
    pub fn constraints_iter(&self) -> impl Iterator<Item = &SketchConstraint> {
        self.constraints.iter()
    }

    /// Constraints that reference an entity
    pub fn constraints_on(&self, id: Uuid) -> impl Iterator<Item = &SketchConstraint> {
        self.constraints.iter().filter(move |c| c.references_entity(id))
    }

    /// Remaining degrees of freedom: free variables minus constraint equations.
    ///
    /// Every non-fixed point contributes two variables and every circle its
    /// radius. Zero means the sketch is fully constrained, negative means
    /// over-constrained.
    pub fn degrees_of_freedom(&self) -> i32 {
        let n_vars: usize = self
            .entities
            .iter()
            .map(|e| match e {
                SketchEntity::Point { fixed: false, .. } => 2,
                SketchEntity::Circle { .. } => 1,
                _ => 0,
            })
            .sum();
        let n_equations: usize = self.constraints.iter().map(|c| c.equation_count()).sum();
        n_vars as i32 - n_equations as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_round_trip() {
        let plane = SketchPlane::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, Vec3::Z);
        assert_relative_eq!(plane.normal.x, 1.0);

        let local = Vec2::new(4.0, -2.5);
        let world = plane.to_world(local);
        let back = plane.to_local(world);
        assert_relative_eq!(back.x, local.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, local.y, epsilon = 1e-5);
        assert_relative_eq!(plane.distance_to(world), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_projection_drops_normal_component() {
        let plane = SketchPlane::xy_at(10.0);
        let local = plane.to_local(Vec3::new(3.0, 4.0, -7.0));
        assert_eq!(local, Vec2::new(3.0, 4.0));
        assert_relative_eq!(plane.distance_to(Vec3::new(3.0, 4.0, -7.0)), -17.0);
    }

    #[test]
    fn test_circle_dof() {
        let mut sketch = Sketch::new("Test", SketchPlane::xy());
        let anchor = sketch.add_point(Vec2::ZERO, true);
        let (circle, center) = sketch.add_circle(Vec2::ZERO, 1.5).unwrap();
        assert_eq!(sketch.degrees_of_freedom(), 3);

        sketch
            .add_constraint(SketchConstraint::coincident(center, anchor))
            .unwrap();
        sketch
            .add_constraint(SketchConstraint::diameter(circle, 3.0, Vec2::Y))
            .unwrap();
        assert_eq!(sketch.degrees_of_freedom(), 0);
    }

    #[test]
    fn test_constraint_on_missing_entity() {
        let mut sketch = Sketch::new("Test", SketchPlane::xy());
        let missing = Uuid::new_v4();
        let result = sketch.add_constraint(SketchConstraint::vertical(missing));
        assert!(matches!(result, Err(SketchError::EntityNotFound(id)) if id == missing));
    }

    #[test]
    fn test_invalid_circle() {
        let mut sketch = Sketch::new("Test", SketchPlane::xy());
        assert!(sketch.add_circle(Vec2::ZERO, 0.0).is_err());
        assert!(sketch.add_circle(Vec2::ZERO, f32::NAN).is_err());
    }

    #[test]
    fn test_set_construction() {
        let mut sketch = Sketch::new("Test", SketchPlane::xy());
        let (circle, center) = sketch.add_circle(Vec2::ZERO, 1.0).unwrap();
        sketch.set_construction(circle, true).unwrap();
        assert!(sketch.get_entity(circle).unwrap().is_construction());
        assert!(sketch.set_construction(center, true).is_err());
    }
}
