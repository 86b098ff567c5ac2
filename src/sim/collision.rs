//! Collision detection and response for circular bodies
//!
//! Detection is a plain circle-circle overlap. Response is a 2D collision along
//! the line of centers: normal components are exchanged according to the masses
//! and the restitution coefficient, tangential components are left alone.

use glam::DVec2;

use super::object::SpaceObject;

/// Result of an overlap check between two bodies
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the bodies touch or overlap
    pub hit: bool,
    /// Unit vector from the first center toward the second (zero if centers coincide)
    pub normal: DVec2,
    /// Overlap depth (negative when apart)
    pub penetration: f64,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: DVec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between two bodies
pub fn circle_collision(a: &SpaceObject, b: &SpaceObject) -> CollisionResult {
    let delta = DVec2::new(b.center.x - a.center.x, b.center.y - a.center.y);
    let distance = delta.length();
    let penetration = a.radius + b.radius - distance;

    if penetration < 0.0 {
        return CollisionResult {
            penetration,
            ..CollisionResult::miss()
        };
    }

    CollisionResult {
        hit: true,
        normal: delta.normalize_or_zero(),
        penetration,
    }
}

/// True when the distance between centers is at most the sum of radii
#[inline]
pub fn impacts(a: &SpaceObject, b: &SpaceObject) -> bool {
    a.center.distance(b.center) <= a.radius + b.radius
}

/// Resolve a collision between two overlapping bodies, updating both
/// velocities in place.
///
/// `restitution` of 1.0 is perfectly elastic, 0.0 perfectly inelastic along the
/// normal. Returns false without touching either body when there is nothing to
/// resolve: no overlap, coincident centers, zero combined mass, or bodies that
/// are already separating.
pub fn collide_with(a: &mut SpaceObject, b: &mut SpaceObject, restitution: f64) -> bool {
    let contact = circle_collision(a, b);
    if !contact.hit || contact.normal == DVec2::ZERO {
        return false;
    }

    let (ma, mb) = (a.mass, b.mass);
    let total_mass = ma + mb;
    if total_mass <= 0.0 {
        return false;
    }

    let normal = contact.normal;
    let tangent = normal.perp();
    let va = DVec2::from(a.velocity);
    let vb = DVec2::from(b.velocity);

    let van = va.dot(normal);
    let vbn = vb.dot(normal);
    // Separating already; resolving again would pull them back together
    if vbn - van >= 0.0 {
        return false;
    }

    let vat = va.dot(tangent);
    let vbt = vb.dot(tangent);

    let van_new = (restitution * mb * (vbn - van) + ma * van + mb * vbn) / total_mass;
    let vbn_new = (restitution * ma * (van - vbn) + ma * van + mb * vbn) / total_mass;

    a.velocity = (van_new * normal + vat * tangent).into();
    b.velocity = (vbn_new * normal + vbt * tangent).into();
    true
}
