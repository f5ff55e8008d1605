mod bin;
mod item;
mod model;
mod pack_group;
mod registry;

#[doc(inline)]
pub use bin::Bin;

#[doc(inline)]
pub use item::Item;

#[doc(inline)]
pub use model::BoundingBoxf;

#[doc(inline)]
pub use model::InstanceRef;

#[doc(inline)]
pub use model::Model;

#[doc(inline)]
pub use model::ModelInstance;

#[doc(inline)]
pub use model::ModelObject;

#[doc(inline)]
pub use model::TriangleMesh;

#[doc(inline)]
pub use pack_group::PackGroup;

#[doc(inline)]
pub use registry::ShapeRegistry;
