use bednest::entities::{BoundingBoxf, Model, ModelInstance, ModelObject, TriangleMesh};
use bednest::geometry::primitives::Pointf;
use bednest::projection::SkippedInstance;
use bednest::util::NestConfig;
use serde::{Deserialize, Serialize};

/// Default spacing between two arranged objects, in millimetres
pub const DEFAULT_CLEARANCE: f64 = 6.0;

/// A scene to arrange: a set of objects and the bed they have to fit on
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtModel {
    /// Object slots, `null` for a removed object
    pub objects: Vec<Option<ExtObject>>,
    /// Printable area of the bed, if absent the largest object's footprint is used
    #[serde(default)]
    pub bed: Option<ExtBed>,
    /// Minimum spacing between any two objects
    #[serde(default = "default_clearance")]
    pub clearance: f64,
}

fn default_clearance() -> f64 {
    DEFAULT_CLEARANCE
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtObject {
    #[serde(default)]
    pub name: String,
    /// Untransformed mesh, shared by all instances
    #[serde(default)]
    pub mesh: Option<ExtMesh>,
    /// Instance slots, `null` for a removed instance
    pub instances: Vec<Option<ExtInstance>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtMesh {
    pub vertices: Vec<[f64; 3]>,
    /// Indices into `vertices`
    pub facets: Vec<[u32; 3]>,
}

/// Placement of one copy of an object on the bed
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct ExtInstance {
    /// Rotation around the z-axis in radians
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub offset: [f64; 2],
}

/// Axis-aligned bed area
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtBed {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

/// Result of an arrange run, written next to the arranged scene
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtArrangeOutput {
    #[serde(flatten)]
    /// The scene with the updated instance placements
    pub model: ExtModel,
    /// Whether every instance fits on the bed
    pub success: bool,
    pub n_groups: usize,
    /// Registry indices per pack group
    pub groups: Vec<Vec<usize>>,
    /// Instances that were left untouched
    pub skipped: Vec<SkippedInstance>,
    /// The time it took to arrange the scene, in milliseconds
    pub run_time_ms: u64,
    pub config: NestConfig,
}

impl From<&ExtBed> for BoundingBoxf {
    fn from(bed: &ExtBed) -> Self {
        BoundingBoxf::new(
            Pointf(bed.min[0], bed.min[1]),
            Pointf(bed.max[0], bed.max[1]),
        )
    }
}

/// Builds the in-memory [`Model`], keeping every empty slot in place.
pub fn import_model(ext_model: &ExtModel) -> Model {
    let mut model = Model::new();
    for ext_obj in ext_model.objects.iter() {
        let Some(ext_obj) = ext_obj else {
            model.objects.push(None);
            continue;
        };
        let mesh = ext_obj
            .mesh
            .as_ref()
            .map(|m| TriangleMesh::new(m.vertices.clone(), m.facets.clone()));
        let mut obj = ModelObject::new(ext_obj.name.clone(), mesh);
        obj.instances = ext_obj
            .instances
            .iter()
            .map(|inst| {
                inst.map(|i| ModelInstance::new(i.rotation, Pointf(i.offset[0], i.offset[1])))
            })
            .collect();
        model.add_object(obj);
    }
    model
}

/// Writes the instance placements of `model` back into a copy of `ext_model`.
///
/// Meshes are not modified by arranging and are taken from `ext_model` as is.
pub fn export_model(ext_model: &ExtModel, model: &Model) -> ExtModel {
    let objects = ext_model
        .objects
        .iter()
        .enumerate()
        .map(|(o_idx, ext_obj)| {
            let ext_obj = ext_obj.as_ref()?;
            let instances = ext_obj
                .instances
                .iter()
                .enumerate()
                .map(|(i_idx, ext_inst)| {
                    ext_inst.map(|ext_inst| {
                        match model.object(o_idx).and_then(|o| o.instance(i_idx)) {
                            Some(inst) => ExtInstance {
                                rotation: inst.rotation,
                                offset: [inst.offset.0, inst.offset.1],
                            },
                            None => ext_inst,
                        }
                    })
                })
                .collect();
            Some(ExtObject {
                instances,
                ..ext_obj.clone()
            })
        })
        .collect();

    ExtModel {
        objects,
        ..ext_model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bednest::entities::InstanceRef;

    const SCENE: &str = r#"{
        "objects": [
            {
                "name": "plate",
                "mesh": {
                    "vertices": [[0, 0, 0], [10, 0, 0], [10, 5, 0], [0, 5, 0]],
                    "facets": [[0, 1, 2], [0, 2, 3]]
                },
                "instances": [{"rotation": 0.5, "offset": [1, 2]}, null]
            },
            null,
            {"instances": [{}]}
        ],
        "bed": {"min": [0, 0], "max": [200, 150]}
    }"#;

    #[test]
    fn scene_is_parsed_with_defaults() {
        let ext: ExtModel = serde_json::from_str(SCENE).unwrap();
        assert_eq!(ext.clearance, DEFAULT_CLEARANCE);
        assert_eq!(ext.objects.len(), 3);
        assert!(ext.objects[1].is_none());
        let third = ext.objects[2].as_ref().unwrap();
        assert!(third.mesh.is_none());
        assert_eq!(third.instances[0], Some(ExtInstance::default()));

        let bed = BoundingBoxf::from(ext.bed.as_ref().unwrap());
        assert!(bed.is_defined());
        assert_eq!(bed.width(), 200.0);
    }

    #[test]
    fn import_keeps_slots() {
        let ext: ExtModel = serde_json::from_str(SCENE).unwrap();
        let model = import_model(&ext);
        assert_eq!(model.objects.len(), 3);
        assert!(model.object(1).is_none());
        let inst = model.instance(InstanceRef::new(0, 0)).unwrap();
        assert_eq!(inst.rotation, 0.5);
        assert_eq!(inst.offset, Pointf(1.0, 2.0));
        assert!(model.instance(InstanceRef::new(0, 1)).is_none());
        assert_eq!(model.object(0).unwrap().name, "plate");
    }

    #[test]
    fn export_reflects_moved_instances() {
        let ext: ExtModel = serde_json::from_str(SCENE).unwrap();
        let mut model = import_model(&ext);
        model.instance_mut(InstanceRef::new(0, 0)).unwrap().offset = Pointf(30.0, 40.0);

        let exported = export_model(&ext, &model);
        let inst = exported.objects[0].as_ref().unwrap().instances[0].unwrap();
        assert_eq!(inst.offset, [30.0, 40.0]);
        assert_eq!(inst.rotation, 0.5);
        assert!(exported.objects[0].as_ref().unwrap().instances[1].is_none());
        assert!(exported.objects[1].is_none());
        assert_eq!(exported.bed, ext.bed);
    }
}
