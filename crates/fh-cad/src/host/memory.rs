//! In-memory drafting host
//!
//! A deterministic host that keeps sketches, faces, features and the change
//! history in plain collections. Used for tests and offline planning; it
//! records extrusions but does not evaluate solids.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use tracing::debug;
use uuid::Uuid;

use super::traits::*;
use crate::feature::{ExtentDefinition, ExtentEntity, ExtrudeFeature, ExtrudeInput, StartExtent};
use crate::sketch::{Sketch, SketchConstraint, SketchPlane, find_regions};
use crate::timeline::{Timeline, TimelineEntryKind, TimelineGroup};

/// A component and what it owns
#[derive(Debug, Clone)]
pub struct ComponentRecord {
    /// Unique identifier
    pub id: ComponentId,
    /// Display name
    pub name: String,
    /// Owning component (None for the root)
    pub parent: Option<ComponentId>,
    /// Sketches in creation order
    pub sketches: Vec<SketchId>,
    /// Features in creation order
    pub features: Vec<FeatureId>,
}

impl ComponentRecord {
    fn new(name: impl Into<String>, parent: Option<ComponentId>) -> Self {
        Self {
            id: ComponentId::new_v4(),
            name: name.into(),
            parent,
            sketches: Vec::new(),
            features: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct SketchRecord {
    component: ComponentId,
    sketch: Sketch,
}

/// In-memory implementation of [`DraftingHost`]
#[derive(Debug, Clone)]
pub struct MemoryHost {
    root: ComponentId,
    components: HashMap<ComponentId, ComponentRecord>,
    sketches: HashMap<SketchId, SketchRecord>,
    faces: HashMap<FaceId, FaceInfo>,
    features: Vec<ExtrudeFeature>,
    timeline: Timeline,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Create a host with an empty root component
    pub fn new() -> Self {
        let root = ComponentRecord::new("root", None);
        let root_id = root.id;
        Self {
            root: root_id,
            components: HashMap::from([(root_id, root)]),
            sketches: HashMap::new(),
            faces: HashMap::new(),
            features: Vec::new(),
            timeline: Timeline::new(),
        }
    }

    /// The root component
    pub fn root_component(&self) -> ComponentId {
        self.root
    }

    /// Register a body face that cuts can start from or terminate on
    pub fn add_face(&mut self, solid_id: Uuid, center: Vec3, normal: Vec3, area: f32) -> FaceId {
        let index = self.faces.keys().filter(|f| f.solid_id == solid_id).count() as u32;
        let id = FaceId::new(solid_id, index);
        self.faces.insert(id, FaceInfo::new(id, center, normal, area));
        id
    }

    /// Get a face by ID
    pub fn face(&self, id: FaceId) -> Option<&FaceInfo> {
        self.faces.get(&id)
    }

    /// Get a sketch by ID
    pub fn sketch(&self, id: SketchId) -> Option<&Sketch> {
        self.sketches.get(&id).map(|r| &r.sketch)
    }

    /// Find a sketch by name within a component
    pub fn find_sketch(&self, component: ComponentId, name: &str) -> Option<SketchId> {
        self.components.get(&component)?.sketches.iter().copied().find(|id| {
            self.sketch(*id).is_some_and(|s| s.name == name)
        })
    }

    /// Get a component by ID
    pub fn component(&self, id: ComponentId) -> Option<&ComponentRecord> {
        self.components.get(&id)
    }

    /// Child components of `parent`
    pub fn child_components(&self, parent: ComponentId) -> Vec<&ComponentRecord> {
        let mut children: Vec<&ComponentRecord> = self
            .components
            .values()
            .filter(|c| c.parent == Some(parent))
            .collect();
        children.sort_by_key(|c| self.timeline.index_of(c.id.0));
        children
    }

    /// All recorded features in creation order
    pub fn features(&self) -> impl Iterator<Item = &ExtrudeFeature> {
        self.features.iter()
    }

    /// Get a feature by ID
    pub fn feature(&self, id: FeatureId) -> Option<&ExtrudeFeature> {
        self.features().find(|f| f.id == id)
    }

    /// The change history
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// History groups
    pub fn groups(&self) -> &[TimelineGroup] {
        self.timeline.groups()
    }

    fn record(&self, id: SketchId) -> HostResult<&SketchRecord> {
        self.sketches.get(&id).ok_or(HostError::SketchNotFound(id))
    }

    fn sketch_mut(&mut self, id: SketchId) -> HostResult<&mut Sketch> {
        self.sketches
            .get_mut(&id)
            .map(|r| &mut r.sketch)
            .ok_or(HostError::SketchNotFound(id))
    }

    fn check_face(&self, face: FaceId) -> HostResult<()> {
        if self.faces.contains_key(&face) {
            Ok(())
        } else {
            Err(HostError::FaceNotFound(face))
        }
    }
}

impl DraftingHost for MemoryHost {
    fn name(&self) -> &str {
        "memory"
    }

    fn timeline_position(&self) -> usize {
        self.timeline.marker()
    }

    fn timeline_len(&self) -> usize {
        self.timeline.len()
    }

    fn set_timeline_position(&mut self, position: usize) -> HostResult<()> {
        self.timeline
            .set_marker(position)
            .ok_or(HostError::InvalidTimelinePosition {
                position,
                len: self.timeline.len(),
            })
    }

    fn group_timeline(
        &mut self,
        start: usize,
        end: usize,
        name: &str,
    ) -> HostResult<TimelineGroupId> {
        let len = self.timeline.len();
        let group = self
            .timeline
            .add_group(start, end, name)
            .ok_or(HostError::InvalidTimelineRange { start, end, len })?;
        debug!("Grouped timeline entries {}..={} as '{}'", start, end, name);
        Ok(group.id)
    }

    fn sketch_component(&self, sketch: SketchId) -> HostResult<ComponentId> {
        Ok(self.record(sketch)?.component)
    }

    fn create_component(&mut self, parent: ComponentId, name: &str) -> HostResult<ComponentId> {
        if !self.components.contains_key(&parent) {
            return Err(HostError::ComponentNotFound(parent));
        }

        let component = ComponentRecord::new(name, Some(parent));
        let id = component.id;
        self.components.insert(id, component);
        self.timeline
            .insert(id.0, TimelineEntryKind::Component, name);
        debug!("Created component '{}' ({})", name, id);
        Ok(id)
    }

    fn sketch_plane(&self, sketch: SketchId) -> HostResult<SketchPlane> {
        Ok(self.record(sketch)?.sketch.plane)
    }

    fn create_sketch(
        &mut self,
        component: ComponentId,
        plane: SketchPlane,
        name: &str,
    ) -> HostResult<SketchId> {
        let owner = self
            .components
            .get_mut(&component)
            .ok_or(HostError::ComponentNotFound(component))?;

        let sketch = Sketch::new(name, plane);
        let id = SketchId(sketch.id);
        owner.sketches.push(id);
        self.sketches.insert(id, SketchRecord { component, sketch });
        let index = self.timeline.insert(id.0, TimelineEntryKind::Sketch, name);
        debug!("Created sketch '{}' at timeline index {}", name, index);
        Ok(id)
    }

    fn project_point(&mut self, sketch: SketchId, point: SketchPointRef) -> HostResult<Uuid> {
        let source = &self.record(point.sketch)?.sketch;
        let world = source.plane.to_world(source.point_position(point.point)?);
        let target = self.sketch_mut(sketch)?;
        let local = target.plane.to_local(world);
        Ok(target.add_point(local, true))
    }

    fn point_position(&self, sketch: SketchId, point: Uuid) -> HostResult<Vec2> {
        Ok(self.record(sketch)?.sketch.point_position(point)?)
    }

    fn add_point(&mut self, sketch: SketchId, position: Vec2) -> HostResult<Uuid> {
        Ok(self.sketch_mut(sketch)?.add_point(position, false))
    }

    fn add_circle(
        &mut self,
        sketch: SketchId,
        center: Vec2,
        radius: f32,
    ) -> HostResult<(Uuid, Uuid)> {
        Ok(self.sketch_mut(sketch)?.add_circle(center, radius)?)
    }

    fn add_line(&mut self, sketch: SketchId, start: Uuid, end: Uuid) -> HostResult<Uuid> {
        Ok(self.sketch_mut(sketch)?.add_line(start, end)?)
    }

    fn set_construction(
        &mut self,
        sketch: SketchId,
        curve: Uuid,
        construction: bool,
    ) -> HostResult<()> {
        Ok(self.sketch_mut(sketch)?.set_construction(curve, construction)?)
    }

    fn add_constraint(
        &mut self,
        sketch: SketchId,
        constraint: SketchConstraint,
    ) -> HostResult<Uuid> {
        Ok(self.sketch_mut(sketch)?.add_constraint(constraint)?)
    }

    fn profiles(&self, sketch: SketchId) -> HostResult<Vec<ProfileRegion>> {
        let regions = find_regions(&self.record(sketch)?.sketch);
        Ok(regions
            .into_iter()
            .enumerate()
            .map(|(index, region)| {
                let mut loops = vec![ProfileLoop {
                    is_outer: true,
                    curves: region.outer,
                }];
                loops.extend(region.inner.into_iter().map(|curves| ProfileLoop {
                    is_outer: false,
                    curves,
                }));
                ProfileRegion {
                    id: ProfileId::new(sketch, index as u32),
                    loops,
                }
            })
            .collect())
    }

    fn extrude(&mut self, component: ComponentId, input: &ExtrudeInput) -> HostResult<FeatureId> {
        if !self.components.contains_key(&component) {
            return Err(HostError::ComponentNotFound(component));
        }
        input.validate().map_err(HostError::InvalidGeometry)?;

        let profile_count = self.profiles(input.profile.sketch)?.len();
        if input.profile.index as usize >= profile_count {
            return Err(HostError::ProfileNotFound(input.profile));
        }

        if let StartExtent::FromEntity { entity, .. } = input.start {
            match entity {
                ExtentEntity::SketchPlane(sketch) => {
                    self.record(sketch)?;
                }
                ExtentEntity::Face(face) => self.check_face(face)?,
            }
        }
        if let ExtentDefinition::ToEntity { face, .. } = input.extent {
            self.check_face(face)?;
        }

        let id = FeatureId::new_v4();
        self.features.push(ExtrudeFeature {
            id,
            input: input.clone(),
        });
        if let Some(owner) = self.components.get_mut(&component) {
            owner.features.push(id);
        }
        self.timeline
            .insert(id.0, TimelineEntryKind::Feature, &input.name);
        debug!("Created extrude '{}' from profile {}", input.name, input.profile);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{BooleanOp, ExtrudeDirection};
    use approx::assert_relative_eq;

    #[test]
    fn test_project_point_between_planes() {
        let mut host = MemoryHost::new();
        let root = host.root_component();
        let base = host
            .create_sketch(root, SketchPlane::xy_at(5.0), "base")
            .unwrap();
        let point = host.add_point(base, Vec2::new(2.0, -1.0)).unwrap();

        let target = host.create_sketch(root, SketchPlane::xy(), "target").unwrap();
        let projected = host
            .project_point(target, SketchPointRef::new(base, point))
            .unwrap();

        let position = host.point_position(target, projected).unwrap();
        assert_relative_eq!(position.x, 2.0);
        assert_relative_eq!(position.y, -1.0);
        assert_eq!(host.sketch(target).unwrap().degrees_of_freedom(), 0);
    }

    #[test]
    fn test_profiles_report_outer_and_inner_loops() {
        let mut host = MemoryHost::new();
        let root = host.root_component();
        let sketch = host.create_sketch(root, SketchPlane::xy(), "rings").unwrap();
        let (outer, _) = host.add_circle(sketch, Vec2::ZERO, 4.0).unwrap();
        let (inner, _) = host.add_circle(sketch, Vec2::ZERO, 1.0).unwrap();

        let profiles = host.profiles(sketch).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].id, ProfileId::new(sketch, 0));

        let ring = &profiles[0];
        assert_eq!(ring.outer_loops().next().unwrap().curves, vec![outer]);
        assert_eq!(ring.inner_loops().next().unwrap().curves, vec![inner]);
        assert_eq!(profiles[1].loops.len(), 1);
    }

    #[test]
    fn test_extrude_validation() {
        let mut host = MemoryHost::new();
        let root = host.root_component();
        let sketch = host.create_sketch(root, SketchPlane::xy(), "s").unwrap();
        host.add_circle(sketch, Vec2::ZERO, 1.0).unwrap();
        let face = host.add_face(Uuid::new_v4(), Vec3::new(0.0, 0.0, -10.0), Vec3::NEG_Z, 100.0);

        let good = ExtrudeInput::new(
            "cut",
            ProfileId::new(sketch, 0),
            BooleanOp::Cut,
            ExtentDefinition::ToEntity {
                face,
                chained: true,
            },
        )
        .with_direction(ExtrudeDirection::Positive);
        let id = host.extrude(root, &good).unwrap();
        assert_eq!(host.feature(id).unwrap().input, good);
        assert_eq!(host.timeline_len(), 2);

        let missing_profile = ExtrudeInput {
            profile: ProfileId::new(sketch, 3),
            ..good.clone()
        };
        assert!(matches!(
            host.extrude(root, &missing_profile),
            Err(HostError::ProfileNotFound(_))
        ));

        let missing_face = ExtrudeInput {
            extent: ExtentDefinition::ToEntity {
                face: FaceId::new(Uuid::new_v4(), 0),
                chained: true,
            },
            ..good
        };
        assert!(matches!(
            host.extrude(root, &missing_face),
            Err(HostError::FaceNotFound(_))
        ));
        assert_eq!(host.features().count(), 1);
    }

    #[test]
    fn test_components_and_groups() {
        let mut host = MemoryHost::new();
        let root = host.root_component();
        let child = host.create_component(root, "facet").unwrap();
        host.create_sketch(child, SketchPlane::xy(), "a").unwrap();

        assert_eq!(host.child_components(root).len(), 1);
        assert!(host.find_sketch(child, "a").is_some());
        assert!(host.create_component(ComponentId::new_v4(), "orphan").is_err());

        assert!(host.group_timeline(0, 2, "too far").is_err());
        host.group_timeline(0, 1, "all").unwrap();
        assert_eq!(host.groups()[0].len(), 2);
    }
}
