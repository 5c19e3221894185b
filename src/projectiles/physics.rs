//! Physics layers and the spatial query seam.
//!
//! Projectile code never talks to Rapier directly. It asks a
//! [`SpatialQuery`] to cast rays and gather overlaps, which keeps the
//! combat rules testable with an in-memory world.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::Deserialize;

/// Collision layers used by the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Layer {
    Player,
    Enemy,
    World,
    Projectile,
}

impl Layer {
    /// Rapier group bit for this layer.
    pub fn group(self) -> Group {
        match self {
            Layer::Player => Group::GROUP_1,
            Layer::Enemy => Group::GROUP_2,
            Layer::World => Group::GROUP_3,
            Layer::Projectile => Group::GROUP_4,
        }
    }

    /// Combine several layers into one query mask.
    pub fn mask(layers: &[Layer]) -> Group {
        layers
            .iter()
            .fold(Group::NONE, |mask, layer| mask | layer.group())
    }

    /// Collision groups for a collider living on this layer.
    pub fn collision_groups(self) -> CollisionGroups {
        CollisionGroups::new(self.group(), Group::ALL)
    }
}

/// Result of a successful ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    pub normal: Vec3,
    /// Layers the hit collider belongs to
    pub layers: Group,
}

/// An entity found by an overlap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub position: Vec3,
}

/// The two physics primitives the combat core consumes.
pub trait SpatialQuery {
    /// Cast a ray and return the first collider on `mask` that is not in `exclude`.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: Group,
        exclude: &[Entity],
    ) -> Option<RayHit>;

    /// Every collider on `mask` overlapping the sphere.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: Group) -> Vec<Candidate>;
}

/// Cast along the segment a projectile travelled this frame.
pub fn cast_segment(
    spatial: &impl SpatialQuery,
    from: Vec3,
    to: Vec3,
    mask: Group,
    exclude: &[Entity],
) -> Option<RayHit> {
    let delta = to - from;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        return None;
    }
    spatial.raycast(from, delta / distance, distance, mask, exclude)
}

/// Per-collider data needed to answer spatial queries.
pub type BodyItem = (&'static GlobalTransform, Option<&'static CollisionGroups>);

/// [`SpatialQuery`] backed by the Rapier query pipeline.
pub struct RapierSpatialQuery<'a, 'w, 's> {
    context: &'a RapierContext,
    bodies: &'a Query<'w, 's, BodyItem>,
}

impl<'a, 'w, 's> RapierSpatialQuery<'a, 'w, 's> {
    pub fn new(context: &'a RapierContext, bodies: &'a Query<'w, 's, BodyItem>) -> Self {
        Self { context, bodies }
    }

    fn layers_of(&self, entity: Entity) -> Group {
        self.bodies
            .get(entity)
            .ok()
            .and_then(|(_, groups)| groups.copied())
            .map_or(Group::ALL, |groups| groups.memberships)
    }
}

impl SpatialQuery for RapierSpatialQuery<'_, '_, '_> {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: Group,
        exclude: &[Entity],
    ) -> Option<RayHit> {
        let not_excluded = |entity: Entity| !exclude.contains(&entity);
        let filter = QueryFilter::new()
            .groups(CollisionGroups::new(Group::ALL, mask))
            .predicate(&not_excluded);

        let (entity, intersection) =
            self.context
                .cast_ray_and_get_normal(origin, direction, max_distance, true, filter)?;

        Some(RayHit {
            entity,
            point: intersection.point,
            normal: intersection.normal,
            layers: self.layers_of(entity),
        })
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: Group) -> Vec<Candidate> {
        let shape = Collider::ball(radius);
        let filter = QueryFilter::new().groups(CollisionGroups::new(Group::ALL, mask));
        let mut found = Vec::new();

        self.context
            .intersections_with_shape(center, Quat::IDENTITY, &shape, filter, |entity| {
                if let Ok((transform, _)) = self.bodies.get(entity) {
                    found.push(Candidate {
                        entity,
                        position: transform.translation(),
                    });
                }
                true // Keep collecting
            });

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask_combines_groups() {
        let mask = Layer::mask(&[Layer::Enemy, Layer::World]);
        assert!(mask.contains(Group::GROUP_2));
        assert!(mask.contains(Group::GROUP_3));
        assert!(!mask.intersects(Layer::Player.group()));
    }

    #[test]
    fn test_empty_mask() {
        assert_eq!(Layer::mask(&[]), Group::NONE);
    }

    struct RecordingQuery;

    impl SpatialQuery for RecordingQuery {
        fn raycast(
            &self,
            origin: Vec3,
            direction: Vec3,
            max_distance: f32,
            _mask: Group,
            _exclude: &[Entity],
        ) -> Option<RayHit> {
            Some(RayHit {
                entity: Entity::PLACEHOLDER,
                point: origin + direction * max_distance,
                normal: -direction,
                layers: Group::ALL,
            })
        }

        fn overlap_sphere(&self, _center: Vec3, _radius: f32, _mask: Group) -> Vec<Candidate> {
            Vec::new()
        }
    }

    #[test]
    fn test_cast_segment_uses_unit_direction_and_length() {
        let hit = cast_segment(
            &RecordingQuery,
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 4.0),
            Group::ALL,
            &[],
        )
        .unwrap();
        assert!((hit.point - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-5);
        assert!((hit.normal - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_cast_segment_skips_zero_length() {
        assert!(cast_segment(&RecordingQuery, Vec3::ONE, Vec3::ONE, Group::ALL, &[]).is_none());
    }
}
