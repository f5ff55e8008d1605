use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::entities::{InstanceRef, Model, ShapeRegistry};
use crate::geometry::primitives::SPolygon;

/// Outcome of projecting a [`Model`] onto the bed plane
#[derive(Clone, Debug, Default)]
pub struct Projection {
    pub registry: ShapeRegistry,
    /// Instances that were not projected, in traversal order
    pub skipped: Vec<SkippedInstance>,
}

/// An instance slot (or a whole object slot) that did not yield a silhouette
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedInstance {
    pub object: usize,
    /// `None` when the whole object slot is empty
    pub instance: Option<usize>,
    pub reason: SkipReason,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// The object slot is empty
    MissingObject,
    /// The instance slot is empty
    MissingInstance,
    /// The object has no mesh to project
    MissingMesh,
    /// The silhouette has no area (e.g. a flat or vertical sliver)
    DegenerateHull,
}

/// Projects every instance of `model` from the top onto the bed plane.
///
/// Each silhouette is the convex hull of the instance's transformed mesh, as a closed clockwise ring.
/// The registry follows the object/instance traversal order.
/// Absent objects, instances or meshes and degenerate hulls are recorded in [`Projection::skipped`].
pub fn project_model_from_top(model: &Model) -> Projection {
    let mut registry = ShapeRegistry::with_capacity(model.n_instance_slots());
    let mut skipped = vec![];

    for (obj_idx, object) in model.objects.iter().enumerate() {
        let Some(object) = object else {
            skipped.push(SkippedInstance {
                object: obj_idx,
                instance: None,
                reason: SkipReason::MissingObject,
            });
            continue;
        };
        let raw_mesh = object.raw_mesh();

        for (inst_idx, instance) in object.instances.iter().enumerate() {
            let skip = |reason| SkippedInstance {
                object: obj_idx,
                instance: Some(inst_idx),
                reason,
            };
            let (Some(instance), Some(raw_mesh)) = (instance, raw_mesh) else {
                let reason = match instance {
                    None => SkipReason::MissingInstance,
                    Some(_) => SkipReason::MissingMesh,
                };
                skipped.push(skip(reason));
                continue;
            };

            let mut mesh = raw_mesh.clone();
            instance.transform_mesh(&mut mesh);

            match SPolygon::new(mesh.convex_hull_2d()) {
                Ok(shape) => {
                    let iref = InstanceRef::new(obj_idx, inst_idx);
                    let idx = registry.register(iref, shape);
                    debug!("[ARR] projected {iref} ({}) as item {idx}", object.name);
                }
                Err(_) => skipped.push(skip(SkipReason::DegenerateHull)),
            }
        }
    }

    for s in skipped.iter() {
        warn!(
            "[ARR] skipped object {} instance {:?}: {:?}",
            s.object, s.instance, s.reason
        );
    }

    Projection { registry, skipped }
}
