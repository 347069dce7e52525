pub mod attribute;
pub mod component;
pub mod domain;
pub mod mask;
pub mod normals;
pub mod providers;
pub mod varray;

pub use attribute::{
    AttributeInit, Erasable, ReadAttribute, ReadAttributeLookup, WriteAttribute,
    WriteAttributeLookup,
};
pub use component::{CurveComponent, RenderCurve};
pub use domain::{adapt_domain, AttrDomain};
pub use mask::IndexMask;
pub use normals::curve_normals;
pub use providers::{
    curve_attribute_providers, AttributeMeta, BuiltinAttributeProvider, DynamicAttributesProvider,
};
pub use varray::{PointSpanAccessor, VArray, VMutArray};
