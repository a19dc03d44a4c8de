//! Profile resolver
//!
//! Finds the one profile region of a sketch whose outer loop is bounded by
//! exactly the drafted curves. Curves are compared as a multiset of entity
//! IDs, so loop order and winding do not matter.

use std::collections::HashMap;

use fh_cad::{DraftingHost, ProfileRegion, SketchId};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::{FastenerError, FastenerResult};

/// What to do when more than one region matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResolvePolicy {
    /// Take the first match in host order
    #[default]
    FirstMatch,
    /// Fail with `AmbiguousProfile` unless exactly one region matches
    Unique,
}

fn curve_counts(curves: impl IntoIterator<Item = Uuid>) -> HashMap<Uuid, usize> {
    let mut counts = HashMap::new();
    for curve in curves {
        *counts.entry(curve).or_insert(0) += 1;
    }
    counts
}

/// Whether any single outer loop of the region is bounded by exactly `expected`
fn outer_loop_matches(region: &ProfileRegion, expected: &HashMap<Uuid, usize>) -> bool {
    region
        .outer_loops()
        .any(|l| curve_counts(l.curves.iter().copied()) == *expected)
}

/// Resolve the region whose outer loop is bounded by exactly `expected_curves`
pub fn resolve_outer_profile(
    host: &dyn DraftingHost,
    sketch: SketchId,
    expected_curves: &[Uuid],
    policy: ResolvePolicy,
) -> FastenerResult<ProfileRegion> {
    select_outer_profile(host.profiles(sketch)?, sketch, expected_curves, policy)
}

/// Pick the matching region out of `regions`, in the order given
pub fn select_outer_profile(
    regions: Vec<ProfileRegion>,
    sketch: SketchId,
    expected_curves: &[Uuid],
    policy: ResolvePolicy,
) -> FastenerResult<ProfileRegion> {
    let expected = curve_counts(expected_curves.iter().copied());
    let mut matches = regions
        .into_iter()
        .filter(|region| outer_loop_matches(region, &expected));

    let Some(first) = matches.next() else {
        return Err(FastenerError::ProfileNotFound { sketch });
    };

    let extra = matches.count();
    if extra > 0 {
        match policy {
            ResolvePolicy::FirstMatch => {
                warn!(
                    "{} profiles in sketch {} match; using {}",
                    extra + 1,
                    sketch,
                    first.id
                );
            }
            ResolvePolicy::Unique => {
                return Err(FastenerError::AmbiguousProfile {
                    sketch,
                    count: extra + 1,
                });
            }
        }
    }

    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafter::{draft_circle, draft_hexagon};
    use fh_cad::{MemoryHost, ProfileId, ProfileLoop, SketchPlane, SketchPointRef};
    use glam::Vec2;

    fn setup() -> (MemoryHost, SketchPointRef, SketchId) {
        let mut host = MemoryHost::new();
        let root = host.root_component();
        let base = host.create_sketch(root, SketchPlane::xy(), "base").unwrap();
        let point = host.add_point(base, Vec2::ZERO).unwrap();
        let target = host.create_sketch(root, SketchPlane::xy(), "target").unwrap();
        (host, SketchPointRef::new(base, point), target)
    }

    fn region(sketch: SketchId, index: u32, outer: Vec<Uuid>) -> ProfileRegion {
        ProfileRegion {
            id: ProfileId::new(sketch, index),
            loops: vec![ProfileLoop {
                is_outer: true,
                curves: outer,
            }],
        }
    }

    #[test]
    fn test_resolve_circle_inside_hexagon() {
        let (mut host, point, target) = setup();
        let hex = draft_hexagon(&mut host, target, point, 8.0, Vec2::NEG_Y).unwrap();
        let bore = draft_circle(&mut host, target, point, 3.0, Vec2::Y).unwrap();

        let outer = resolve_outer_profile(&host, target, &hex.outer_curves(), ResolvePolicy::Unique)
            .unwrap();
        assert_eq!(outer.inner_loops().count(), 1);

        let inner = resolve_outer_profile(&host, target, &bore.outer_curves(), ResolvePolicy::Unique)
            .unwrap();
        assert_ne!(inner.id, outer.id);
    }

    #[test]
    fn test_resolve_ignores_order() {
        let (mut host, point, target) = setup();
        let hex = draft_hexagon(&mut host, target, point, 8.0, Vec2::NEG_Y).unwrap();
        let mut curves = hex.outer_curves();
        curves.reverse();
        assert!(resolve_outer_profile(&host, target, &curves, ResolvePolicy::FirstMatch).is_ok());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (mut host, point, target) = setup();
        let hex = draft_hexagon(&mut host, target, point, 8.0, Vec2::NEG_Y).unwrap();
        let first = resolve_outer_profile(&host, target, &hex.outer_curves(), ResolvePolicy::default())
            .unwrap();
        let second = resolve_outer_profile(&host, target, &hex.outer_curves(), ResolvePolicy::default())
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stray_construction_line() {
        let (mut host, point, target) = setup();
        let hex = draft_hexagon(&mut host, target, point, 8.0, Vec2::NEG_Y).unwrap();

        let a = host.add_point(target, Vec2::new(-10.0, 0.0)).unwrap();
        let b = host.add_point(target, Vec2::new(10.0, 0.0)).unwrap();
        let stray = host.add_line(target, a, b).unwrap();
        host.set_construction(target, stray, true).unwrap();

        let region = resolve_outer_profile(&host, target, &hex.outer_curves(), ResolvePolicy::Unique)
            .unwrap();
        assert!(!region.outer_loops().any(|l| l.curves.contains(&stray)));
    }

    #[test]
    fn test_missing_curve() {
        let (mut host, point, target) = setup();
        let hex = draft_hexagon(&mut host, target, point, 8.0, Vec2::NEG_Y).unwrap();
        let partial = &hex.outer_curves()[..5];
        assert!(matches!(
            resolve_outer_profile(&host, target, partial, ResolvePolicy::FirstMatch),
            Err(FastenerError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_counts_matter() {
        let sketch = SketchId::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let expected = curve_counts([a, b]);
        assert!(outer_loop_matches(&region(sketch, 0, vec![b, a]), &expected));
        assert!(!outer_loop_matches(&region(sketch, 0, vec![a, b, b]), &expected));
    }

    #[test]
    fn test_ambiguous_regions() {
        let sketch = SketchId::new_v4();
        let circle = Uuid::new_v4();
        let regions = vec![
            region(sketch, 0, vec![Uuid::new_v4()]),
            region(sketch, 1, vec![circle]),
            region(sketch, 2, vec![circle]),
        ];

        let first =
            select_outer_profile(regions.clone(), sketch, &[circle], ResolvePolicy::FirstMatch)
                .unwrap();
        assert_eq!(first.id.index, 1);
        assert!(matches!(
            select_outer_profile(regions, sketch, &[circle], ResolvePolicy::Unique),
            Err(FastenerError::AmbiguousProfile { count: 2, .. })
        ));
    }

    #[test]
    fn test_inner_loops_not_compared() {
        let sketch = SketchId::new_v4();
        let (outer, hole) = (Uuid::new_v4(), Uuid::new_v4());
        let mut ring = region(sketch, 0, vec![outer]);
        ring.loops.push(ProfileLoop {
            is_outer: false,
            curves: vec![hole],
        });
        let found = select_outer_profile(vec![ring.clone()], sketch, &[outer], ResolvePolicy::Unique)
            .unwrap();
        assert_eq!(found, ring);
        assert!(
            select_outer_profile(vec![ring], sketch, &[outer, hole], ResolvePolicy::Unique).is_err()
        );
    }

    #[test]
    fn test_outer_loops_compared_one_at_a_time() {
        let sketch = SketchId::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut pair = region(sketch, 0, vec![a]);
        pair.loops.push(ProfileLoop {
            is_outer: true,
            curves: vec![b],
        });

        let found =
            select_outer_profile(vec![pair.clone()], sketch, &[a], ResolvePolicy::Unique).unwrap();
        assert_eq!(found.id, pair.id);
        assert!(select_outer_profile(vec![pair], sketch, &[a, b], ResolvePolicy::FirstMatch).is_err());
    }

    #[test]
    fn test_region_without_outer_loop_never_matches() {
        let sketch = SketchId::new_v4();
        let empty = ProfileRegion {
            id: ProfileId::new(sketch, 0),
            loops: Vec::new(),
        };
        assert!(matches!(
            select_outer_profile(vec![empty], sketch, &[], ResolvePolicy::FirstMatch),
            Err(FastenerError::ProfileNotFound { .. })
        ));
    }
}
