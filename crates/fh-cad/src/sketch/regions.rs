//! Region detection for closed sketch loops.
//!
//! Computes profile regions from sketch entities by:
//! 1. Dropping construction geometry
//! 2. Treating every circle as a self-contained loop
//! 3. Walking connected line sets where every point joins exactly two lines
//! 4. Building a containment hierarchy so enclosed loops become inner loops
//!
//! Curves are not split at intersections; overlapping loops are reported
//! as independent regions.

use std::collections::{HashMap, HashSet};
use std::f32::consts::PI;

use glam::Vec2;
use uuid::Uuid;

use super::{Sketch, SketchEntity};

const AREA_EPSILON: f32 = 1e-9;

/// A closed region found in a sketch
#[derive(Debug, Clone, PartialEq)]
pub struct SketchRegion {
    /// Curve entity IDs bounding the region from outside, in loop order
    pub outer: Vec<Uuid>,
    /// Curve entity IDs of each directly enclosed loop
    pub inner: Vec<Vec<Uuid>>,
    /// Area enclosed by the outer loop
    pub area: f32,
}

#[derive(Debug, Clone)]
enum Boundary {
    Circle { center: Vec2, radius: f32 },
    Polygon(Vec<Vec2>),
}

impl Boundary {
    fn area(&self) -> f32 {
        match self {
            Boundary::Circle { radius, .. } => PI * radius * radius,
            Boundary::Polygon(points) => polygon_area(points).abs(),
        }
    }

    fn sample_point(&self) -> Vec2 {
        match self {
            Boundary::Circle { center, .. } => *center,
            Boundary::Polygon(points) => {
                points.iter().copied().sum::<Vec2>() / points.len().max(1) as f32
            }
        }
    }

    fn contains(&self, p: Vec2) -> bool {
        match self {
            Boundary::Circle { center, radius } => p.distance(*center) < *radius,
            Boundary::Polygon(points) => point_in_polygon(p, points),
        }
    }
}

#[derive(Debug, Clone)]
struct RawLoop {
    curves: Vec<Uuid>,
    boundary: Boundary,
    area: f32,
}

/// Find all closed regions in the sketch
pub fn find_regions(sketch: &Sketch) -> Vec<SketchRegion> {
    let loops = find_loops(sketch);

    // Sort by area descending so every potential parent precedes its children
    let mut by_area: Vec<usize> = (0..loops.len()).collect();
    by_area.sort_by(|a, b| {
        loops[*b]
            .area
            .partial_cmp(&loops[*a].area)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut parents: Vec<Option<usize>> = vec![None; loops.len()];
    for (rank, &i) in by_area.iter().enumerate() {
        let sample = loops[i].boundary.sample_point();
        // Closest enclosing loop is the smallest larger loop containing the sample
        parents[i] = by_area[..rank]
            .iter()
            .rev()
            .copied()
            .find(|&j| loops[j].area > loops[i].area && loops[j].boundary.contains(sample));
    }

    loops
        .iter()
        .enumerate()
        .map(|(i, l)| SketchRegion {
            outer: l.curves.clone(),
            inner: (0..loops.len())
                .filter(|&k| parents[k] == Some(i))
                .map(|k| loops[k].curves.clone())
                .collect(),
            area: l.area,
        })
        .collect()
}

/// Collect closed loops in entity creation order
fn find_loops(sketch: &Sketch) -> Vec<RawLoop> {
    let lines: Vec<(Uuid, Uuid, Uuid)> = sketch
        .entities_iter()
        .filter_map(|e| match e {
            SketchEntity::Line {
                id,
                start,
                end,
                construction: false,
            } => Some((*id, *start, *end)),
            _ => None,
        })
        .collect();

    let mut incident: HashMap<Uuid, Vec<usize>> = HashMap::new();
    for (index, (_, start, end)) in lines.iter().enumerate() {
        incident.entry(*start).or_default().push(index);
        incident.entry(*end).or_default().push(index);
    }

    let line_index: HashMap<Uuid, usize> = lines
        .iter()
        .enumerate()
        .map(|(index, (id, _, _))| (*id, index))
        .collect();

    let mut loops = Vec::new();
    let mut visited: HashSet<usize> = HashSet::new();

    for entity in sketch.entities_iter() {
        match entity {
            SketchEntity::Circle {
                id,
                center,
                radius,
                construction: false,
            } => {
                let Ok(center) = sketch.point_position(*center) else {
                    continue;
                };
                let boundary = Boundary::Circle {
                    center,
                    radius: *radius,
                };
                loops.push(RawLoop {
                    curves: vec![*id],
                    area: boundary.area(),
                    boundary,
                });
            }
            SketchEntity::Line {
                id,
                construction: false,
                ..
            } => {
                let Some(&start_index) = line_index.get(id) else {
                    continue;
                };
                if visited.contains(&start_index) {
                    continue;
                }
                let component = collect_component(start_index, &lines, &incident);
                visited.extend(component.iter().copied());

                if let Some(raw) = walk_cycle(sketch, &component, &lines, &incident) {
                    loops.push(raw);
                }
            }
            _ => {}
        }
    }

    loops
}

/// All lines connected to `start_index` through shared points
fn collect_component(
    start_index: usize,
    lines: &[(Uuid, Uuid, Uuid)],
    incident: &HashMap<Uuid, Vec<usize>>,
) -> Vec<usize> {
    let mut seen = HashSet::from([start_index]);
    let mut stack = vec![start_index];
    let mut component = Vec::new();

    while let Some(index) = stack.pop() {
        component.push(index);
        let (_, start, end) = lines[index];
        for point in [start, end] {
            for &next in incident.get(&point).map(Vec::as_slice).unwrap_or_default() {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
    }

    component.sort_unstable();
    component
}

/// Walk a connected line set as a simple cycle; `None` if it is open or branched
fn walk_cycle(
    sketch: &Sketch,
    component: &[usize],
    lines: &[(Uuid, Uuid, Uuid)],
    incident: &HashMap<Uuid, Vec<usize>>,
) -> Option<RawLoop> {
    if component.len() < 3 {
        return None;
    }

    let points: HashSet<Uuid> = component
        .iter()
        .flat_map(|&i| [lines[i].1, lines[i].2])
        .collect();
    if points.len() != component.len() || points.iter().any(|p| incident[p].len() != 2) {
        return None;
    }

    let first = component[0];
    let (_, origin, mut point) = lines[first];
    let mut current = first;
    let mut curves = vec![lines[first].0];
    let mut polygon = vec![sketch.point_position(origin).ok()?];

    while point != origin {
        polygon.push(sketch.point_position(point).ok()?);
        current = *incident[&point].iter().find(|&&l| l != current)?;
        let (id, start, end) = lines[current];
        curves.push(id);
        point = if start == point { end } else { start };
    }

    let boundary = Boundary::Polygon(polygon);
    let area = boundary.area();
    if area <= AREA_EPSILON {
        return None;
    }

    Some(RawLoop {
        curves,
        boundary,
        area,
    })
}

/// Signed shoelace area (positive = CCW)
fn polygon_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}

/// Even-odd ray casting test
fn point_in_polygon(p: Vec2, points: &[Vec2]) -> bool {
    let n = points.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
