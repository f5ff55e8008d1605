use std::fmt::Display;

use anyhow::{Result, ensure};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::geometry::convex_hull::convex_hull_from_points;
use crate::geometry::primitives::{Point, Pointf, Rect};
use crate::geometry::scale_;

/// Triangle mesh of a printable object, in real-world units
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<[f64; 3]>,
    /// Indices into `vertices`, three per triangle
    pub facets: Vec<[u32; 3]>,
}

impl TriangleMesh {
    pub fn new(vertices: Vec<[f64; 3]>, facets: Vec<[u32; 3]>) -> Self {
        Self { vertices, facets }
    }

    /// Rotates the mesh around the z-axis (radians), then translates it in the xy-plane.
    pub fn transform(&mut self, rotation: f64, offset: Pointf) -> &mut Self {
        let (sin, cos) = rotation.sin_cos();
        for v in self.vertices.iter_mut() {
            let (x, y) = (v[0], v[1]);
            if rotation != 0.0 {
                v[0] = cos * x - sin * y;
                v[1] = sin * x + cos * y;
            }
            v[0] += offset.0;
            v[1] += offset.1;
        }
        self
    }

    /// Top-down convex silhouette of the mesh on the internal integer grid.
    ///
    /// Counterclockwise and open, as returned by [`convex_hull_from_points`].
    /// Contains fewer than 3 points if the mesh has no footprint.
    pub fn convex_hull_2d(&self) -> Vec<Point> {
        convex_hull_from_points(
            self.vertices
                .iter()
                .map(|v| Point(scale_(v[0]), scale_(v[1]))),
        )
    }

    /// Bounding box of the mesh projected on the xy-plane
    pub fn bounding_box(&self) -> Option<BoundingBoxf> {
        BoundingBoxf::from_points(self.vertices.iter().map(|v| Pointf(v[0], v[1])))
    }
}

/// Placement of a [`ModelObject`] on the bed
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInstance {
    /// Rotation around the z-axis in radians
    pub rotation: f64,
    /// Translation in the xy-plane
    pub offset: Pointf,
}

impl ModelInstance {
    pub fn new(rotation: f64, offset: Pointf) -> Self {
        Self { rotation, offset }
    }

    /// Applies this instance's placement to `mesh`
    pub fn transform_mesh(&self, mesh: &mut TriangleMesh) {
        mesh.transform(self.rotation, self.offset);
    }
}

/// Printable object, one mesh with any number of instances.
///
/// Instance slots can be empty, the index of every other instance stays stable.
#[derive(Clone, Debug, Default)]
pub struct ModelObject {
    pub name: String,
    pub mesh: Option<TriangleMesh>,
    pub instances: Vec<Option<ModelInstance>>,
    bbox_cache: Option<BoundingBoxf>,
}

impl ModelObject {
    pub fn new(name: impl Into<String>, mesh: Option<TriangleMesh>) -> Self {
        Self {
            name: name.into(),
            mesh,
            instances: vec![],
            bbox_cache: None,
        }
    }

    /// Adds an instance and returns its index
    pub fn add_instance(&mut self, instance: ModelInstance) -> usize {
        self.instances.push(Some(instance));
        self.invalidate_bounding_box();
        self.instances.len() - 1
    }

    /// The untransformed mesh shared by all instances
    pub fn raw_mesh(&self) -> Option<&TriangleMesh> {
        self.mesh.as_ref()
    }

    pub fn instance(&self, idx: usize) -> Option<&ModelInstance> {
        self.instances.get(idx)?.as_ref()
    }

    pub fn instance_mut(&mut self, idx: usize) -> Option<&mut ModelInstance> {
        self.instances.get_mut(idx)?.as_mut()
    }

    /// Bounding box of all instances on the bed. Computed once and cached until invalidated.
    pub fn bounding_box(&mut self) -> Option<BoundingBoxf> {
        if self.bbox_cache.is_none() {
            self.bbox_cache = self.calculate_bounding_box();
        }
        self.bbox_cache
    }

    /// The cached bounding box, if any, without recomputing it
    pub fn cached_bounding_box(&self) -> Option<&BoundingBoxf> {
        self.bbox_cache.as_ref()
    }

    pub fn invalidate_bounding_box(&mut self) {
        self.bbox_cache = None;
    }

    fn calculate_bounding_box(&self) -> Option<BoundingBoxf> {
        let mesh = self.raw_mesh()?;
        self.instances
            .iter()
            .flatten()
            .filter_map(|inst| {
                let mut m = mesh.clone();
                inst.transform_mesh(&mut m);
                m.bounding_box()
            })
            .reduce(BoundingBoxf::merge)
    }
}

/// Arena of printable objects.
///
/// Empty slots stand in for objects that were removed from the host's model.
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub objects: Vec<Option<ModelObject>>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object and returns its index
    pub fn add_object(&mut self, object: ModelObject) -> usize {
        self.objects.push(Some(object));
        self.objects.len() - 1
    }

    pub fn object(&self, idx: usize) -> Option<&ModelObject> {
        self.objects.get(idx)?.as_ref()
    }

    pub fn object_mut(&mut self, idx: usize) -> Option<&mut ModelObject> {
        self.objects.get_mut(idx)?.as_mut()
    }

    pub fn instance(&self, iref: InstanceRef) -> Option<&ModelInstance> {
        self.object(iref.object)?.instance(iref.instance)
    }

    pub fn instance_mut(&mut self, iref: InstanceRef) -> Option<&mut ModelInstance> {
        self.object_mut(iref.object)?.instance_mut(iref.instance)
    }

    /// Number of instance slots over all present objects, empty slots included
    pub fn n_instance_slots(&self) -> usize {
        self.objects
            .iter()
            .flatten()
            .map(|o| o.instances.len())
            .sum()
    }

    pub fn invalidate_bounding_boxes(&mut self) {
        self.objects
            .iter_mut()
            .flatten()
            .for_each(|o| o.invalidate_bounding_box());
    }
}

/// Index of a [`ModelInstance`] inside a [`Model`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceRef {
    pub object: usize,
    pub instance: usize,
}

impl InstanceRef {
    pub fn new(object: usize, instance: usize) -> Self {
        Self { object, instance }
    }
}

impl Display for InstanceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "obj {} / inst {}", self.object, self.instance)
    }
}

/// Axis-aligned bounding box in real-world units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBoxf {
    pub min: Pointf,
    pub max: Pointf,
}

impl BoundingBoxf {
    pub fn new(min: Pointf, max: Pointf) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: impl IntoIterator<Item = Pointf>) -> Option<Self> {
        let points = points.into_iter().collect_vec();
        if points.is_empty() {
            return None;
        }
        let min = points
            .iter()
            .fold(Pointf(f64::INFINITY, f64::INFINITY), |acc, p| {
                Pointf(acc.0.min(p.0), acc.1.min(p.1))
            });
        let max = points
            .iter()
            .fold(Pointf(f64::NEG_INFINITY, f64::NEG_INFINITY), |acc, p| {
                Pointf(acc.0.max(p.0), acc.1.max(p.1))
            });
        Some(Self { min, max })
    }

    /// Whether the box spans a finite, non-empty area
    pub fn is_defined(&self) -> bool {
        [self.min.0, self.min.1, self.max.0, self.max.1]
            .iter()
            .all(|v| v.is_finite())
            && self.min.0 < self.max.0
            && self.min.1 < self.max.1
    }

    pub fn width(&self) -> f64 {
        self.max.0 - self.min.0
    }

    pub fn height(&self) -> f64 {
        self.max.1 - self.min.1
    }

    pub fn merge(self, other: BoundingBoxf) -> BoundingBoxf {
        BoundingBoxf {
            min: Pointf(self.min.0.min(other.min.0), self.min.1.min(other.min.1)),
            max: Pointf(self.max.0.max(other.max.0), self.max.1.max(other.max.1)),
        }
    }

    /// Scales the box onto the internal integer grid
    pub fn scaled(&self) -> Result<Rect> {
        ensure!(self.is_defined(), "bounding box is not defined: {self:?}");
        Rect::from_diagonal_corners(self.min.scaled(), self.max.scaled())
    }
}
