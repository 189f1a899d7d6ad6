//! Static level geometry with a sphere-vs-static slide resolver.
//!
//! [`StaticLevel`] is a small [`SlideMover`] for hosts without a physics
//! engine: the character is a sphere, the level is a set of half-spaces
//! (floors, slopes) and axis-aligned boxes. The step is split into substeps
//! that move the sphere no further than its radius, so a fast body cannot
//! pass the midpoint of a wall between checks. After each substep the sphere
//! is pushed out of the deepest contact up to `max_bounces` times. Every push removes the velocity component heading into
//! the surface, which is what keeps a grounded body from sinking under the
//! gravity the controller applies every tick.

use glam::Vec3;
use smallvec::SmallVec;

use crate::resources::collision::{SlideMover, SlideOutcome, SlideRequest};

/// Penetration below this is treated as resting contact.
const CONTACT_EPSILON: f32 = 1e-5;
/// Tolerance on the floor-angle test.
const FLOOR_ANGLE_EPSILON: f32 = 1e-4;
/// Shortest substep, for spheres with (near) zero radius.
const MIN_SUBSTEP_LENGTH: f32 = 0.05;
/// Upper bound on substeps per call.
const MAX_SUBSTEPS: u32 = 256;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StaticShape {
    /// Solid region `normal · p < offset`; `normal` is unit length.
    HalfSpace { normal: Vec3, offset: f32 },
    /// Solid axis-aligned box.
    Box(Aabb),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contact {
    /// Surface normal pointing out of the obstacle.
    pub normal: Vec3,
    /// Penetration depth along `normal`.
    pub depth: f32,
}

/// Level geometry plus the radius of the character sphere moving through it.
#[derive(Clone, Debug)]
pub struct StaticLevel {
    pub body_radius: f32,
    pub shapes: Vec<StaticShape>,
}

impl Default for StaticLevel {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl StaticLevel {
    /// Empty level for a sphere of `body_radius`.
    pub fn new(body_radius: f32) -> Self {
        Self {
            body_radius: body_radius.max(0.0),
            shapes: Vec::new(),
        }
    }

    /// Flat infinite floor with its surface at `height`.
    pub fn with_floor(mut self, height: f32) -> Self {
        self.add_half_space(Vec3::Y, Vec3::new(0.0, height, 0.0));
        self
    }

    /// Solid half-space whose surface passes through `point`.
    ///
    /// A zero `normal` is ignored.
    pub fn add_half_space(&mut self, normal: Vec3, point: Vec3) {
        let normal = normal.normalize_or_zero();
        if normal == Vec3::ZERO {
            return;
        }
        self.shapes.push(StaticShape::HalfSpace {
            normal,
            offset: normal.dot(point),
        });
    }

    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3) {
        self.shapes
            .push(StaticShape::Box(Aabb::from_center_half_extents(center, half_extents)));
    }

    pub fn with_box(mut self, center: Vec3, half_extents: Vec3) -> Self {
        self.add_box(center, half_extents);
        self
    }

    /// Boxes in the level, for hosts that draw them.
    pub fn boxes(&self) -> impl Iterator<Item = &Aabb> {
        self.shapes.iter().filter_map(|s| match s {
            StaticShape::Box(aabb) => Some(aabb),
            StaticShape::HalfSpace { .. } => None,
        })
    }

    /// Walled courtyard with a few crates and a raised platform.
    pub fn demo() -> Self {
        let mut level = StaticLevel::new(0.5).with_floor(0.0);
        // Perimeter walls
        level.add_box(Vec3::new(0.0, 2.0, -30.0), Vec3::new(30.0, 2.0, 0.5));
        level.add_box(Vec3::new(0.0, 2.0, 30.0), Vec3::new(30.0, 2.0, 0.5));
        level.add_box(Vec3::new(-30.0, 2.0, 0.0), Vec3::new(0.5, 2.0, 30.0));
        level.add_box(Vec3::new(30.0, 2.0, 0.0), Vec3::new(0.5, 2.0, 30.0));
        // Crates
        level.add_box(Vec3::new(5.0, 0.75, -8.0), Vec3::splat(0.75));
        level.add_box(Vec3::new(-6.0, 1.0, -12.0), Vec3::splat(1.0));
        level.add_box(Vec3::new(-2.0, 0.5, 6.0), Vec3::new(3.0, 0.5, 1.0));
        // Platform reachable with a jump
        level.add_box(Vec3::new(12.0, 1.25, 10.0), Vec3::new(4.0, 1.25, 4.0));
        level
    }

    /// All penetrating contacts for a sphere centred at `center`.
    pub fn contacts(&self, center: Vec3) -> SmallVec<[Contact; 8]> {
        let mut out = SmallVec::new();
        for shape in &self.shapes {
            let hit = match *shape {
                StaticShape::HalfSpace { normal, offset } => {
                    sphere_vs_half_space(center, self.body_radius, normal, offset)
                }
                StaticShape::Box(aabb) => sphere_vs_aabb(center, self.body_radius, &aabb),
            };
            if let Some(c) = hit {
                out.push(c);
            }
        }
        out
    }
}

impl StaticLevel {
    /// Number of substeps needed so no substep moves the sphere further than
    /// its radius.
    fn substeps(&self, displacement: f32) -> u32 {
        let max_step = self.body_radius.max(MIN_SUBSTEP_LENGTH);
        ((displacement / max_step).ceil() as u32).clamp(1, MAX_SUBSTEPS)
    }
}

impl SlideMover for StaticLevel {
    fn slide_move(&self, position: Vec3, dt: f32, request: &SlideRequest) -> SlideOutcome {
        let up = match request.up.try_normalize() {
            Some(up) => up,
            None => Vec3::Y,
        };
        let floor_cos = request.max_slope_radians.cos();
        // Pure fall (no lateral intent): the only case slope-stopping applies to.
        let falling_only = (request.velocity.normalize_or_zero() + up).length() < 0.01;

        let mut velocity = request.velocity;
        let mut pos = position;
        let mut on_floor = false;

        let substeps = self.substeps((velocity * dt).length());
        let sub_dt = dt / substeps as f32;

        for _ in 0..substeps {
            pos += velocity * sub_dt;

            for _ in 0..request.max_bounces {
                let contacts = self.contacts(pos);
                let Some(deepest) = contacts
                    .iter()
                    .copied()
                    .max_by(|a, b| a.depth.total_cmp(&b.depth))
                else {
                    break;
                };
                if deepest.depth <= CONTACT_EPSILON {
                    break;
                }

                let up_dot = deepest.normal.dot(up);
                let is_floor = up_dot >= floor_cos - FLOOR_ANGLE_EPSILON;
                if is_floor {
                    on_floor = true;
                }

                if is_floor && request.stop_on_slope && falling_only && up_dot > 0.0 {
                    // Lift straight out instead of sliding downhill.
                    pos += up * (deepest.depth / up_dot);
                    velocity = Vec3::ZERO;
                    continue;
                }

                pos += deepest.normal * deepest.depth;
                let into = velocity.dot(deepest.normal);
                if into < 0.0 {
                    velocity -= deepest.normal * into;
                }
            }
        }

        SlideOutcome {
            velocity,
            position: pos,
            on_floor,
        }
    }
}

fn sphere_vs_half_space(center: Vec3, radius: f32, normal: Vec3, offset: f32) -> Option<Contact> {
    let distance = normal.dot(center) - offset;
    let depth = radius - distance;
    (depth > 0.0).then_some(Contact { normal, depth })
}

fn sphere_vs_aabb(center: Vec3, radius: f32, aabb: &Aabb) -> Option<Contact> {
    let closest = center.clamp(aabb.min, aabb.max);
    let delta = center - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > 1e-12 {
        if dist_sq >= radius * radius {
            return None;
        }
        let dist = dist_sq.sqrt();
        return Some(Contact {
            normal: delta / dist,
            depth: radius - dist,
        });
    }

    // Centre inside the box: leave through the nearest face.
    let to_min = center - aabb.min;
    let to_max = aabb.max - center;
    let mut best = Contact {
        normal: Vec3::NEG_X,
        depth: to_min.x,
    };
    let candidates = [
        (Vec3::X, to_max.x),
        (Vec3::NEG_Y, to_min.y),
        (Vec3::Y, to_max.y),
        (Vec3::NEG_Z, to_min.z),
        (Vec3::Z, to_max.z),
    ];
    for (normal, depth) in candidates {
        if depth < best.depth {
            best = Contact { normal, depth };
        }
    }
    best.depth += radius;
    Some(best)
}
