//! Transform propagation for parent-child entity hierarchies.
//!
//! Computes [`GlobalTransform3d`] for every entity participating in a hierarchy
//! (root parents with [`Children`] and descendants with [`ChildOf`]).
//!
//! # Schedule position
//!
//! Runs once **before** the input sampler, so the camera basis reflects the
//! latest mouse-look, and once **after** the integrator, so the host reads
//! world-space camera poses that match the body's new position.

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;

use crate::components::globaltransform3d::GlobalTransform3d;
use crate::components::transform3d::Transform3d;

/// Propagate transforms from root parents down through the hierarchy.
///
/// For each root entity (has [`Children`] but no [`ChildOf`]):
/// 1. Copy its local [`Transform3d`] into its [`GlobalTransform3d`].
/// 2. Recursively traverse children, composing transforms at each level.
///
/// Entities that already have a `GlobalTransform3d` are updated in place.
/// Entities missing the component get it inserted via deferred [`Commands`]
/// (visible next tick).
pub fn propagate_transforms(
    roots: Query<(Entity, &Transform3d, &Children), Without<ChildOf>>,
    children_query: Query<(&Transform3d, Option<&Children>), With<ChildOf>>,
    mut globals: Query<&mut GlobalTransform3d>,
    mut commands: Commands,
) {
    for (root_entity, local, children) in roots.iter() {
        let root_gt = GlobalTransform3d {
            translation: local.translation,
            rotation: local.rotation,
        };

        if let Ok(mut gt) = globals.get_mut(root_entity) {
            *gt = root_gt;
        } else {
            commands.entity(root_entity).insert(root_gt);
        }

        propagate_children(
            &root_gt,
            children,
            &children_query,
            &mut globals,
            &mut commands,
        );
    }
}

fn propagate_children(
    parent_gt: &GlobalTransform3d,
    children: &Children,
    children_query: &Query<(&Transform3d, Option<&Children>), With<ChildOf>>,
    globals: &mut Query<&mut GlobalTransform3d>,
    commands: &mut Commands,
) {
    for child_entity in children.iter() {
        let Ok((local, maybe_grandchildren)) = children_query.get(child_entity) else {
            continue;
        };

        let child_gt = parent_gt.mul_local(local.translation, local.rotation);

        if let Ok(mut gt) = globals.get_mut(child_entity) {
            *gt = child_gt;
        } else {
            commands.entity(child_entity).insert(child_gt);
        }

        if let Some(grandchildren) = maybe_grandchildren {
            propagate_children(&child_gt, grandchildren, children_query, globals, commands);
        }
    }
}
