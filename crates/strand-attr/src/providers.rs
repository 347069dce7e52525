//! Attribute providers: named descriptors that build virtual arrays bound to
//! live curve data.
//!
//! Builtin providers cover the well-known attributes with fixed capability
//! flags; dynamic providers handle arbitrary user-named layers. All
//! providers are constructed once and shared process-wide.

use std::collections::HashMap;
use std::sync::OnceLock;

use glam::DVec3;
use strand_core::{with_attr_type, AttrType};
use strand_curve::{Curve, Spline, SplineKind};

use crate::attribute::{
    AttributeInit, Erasable, ReadAttribute, ReadAttributeLookup, WriteAttribute,
    WriteAttributeLookup,
};
use crate::domain::AttrDomain;
use crate::varray::{PointSpanAccessor, VArray, VMutArray};

/// A fixed, well-known attribute descriptor.
pub trait BuiltinAttributeProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn domain(&self) -> AttrDomain;
    fn data_type(&self) -> AttrType;
    fn creatable(&self) -> bool;
    fn writable(&self) -> bool;
    fn deletable(&self) -> bool;
    fn try_get_for_read<'a>(&self, curve: &'a Curve) -> Option<ReadAttribute<'a>>;
    fn try_get_for_write<'a>(&self, curve: &'a mut Curve) -> Option<WriteAttributeLookup<'a>>;
    fn try_create(&self, curve: &mut Curve, init: AttributeInit) -> bool;
    fn try_delete(&self, curve: &mut Curve) -> bool;
    fn exists(&self, curve: &Curve) -> bool;
}

/// Name, granularity and type of one attribute layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMeta {
    pub name: String,
    pub domain: AttrDomain,
    pub data_type: AttrType,
}

/// A descriptor family for user-named attribute layers.
pub trait DynamicAttributesProvider: Send + Sync {
    fn domain(&self) -> AttrDomain;
    fn exists(&self, curve: &Curve, name: &str) -> bool;
    fn try_get_for_read<'a>(&self, curve: &'a Curve, name: &str)
        -> Option<ReadAttributeLookup<'a>>;
    fn try_get_for_write<'a>(
        &self,
        curve: &'a mut Curve,
        name: &str,
    ) -> Option<WriteAttributeLookup<'a>>;
    fn try_create(
        &self,
        curve: &mut Curve,
        name: &str,
        domain: AttrDomain,
        ty: AttrType,
        init: AttributeInit,
    ) -> bool;
    fn try_delete(&self, curve: &mut Curve, name: &str) -> bool;
    fn list(&self, curve: &Curve, out: &mut Vec<AttributeMeta>);
}

// --- Derived spline attributes (resolution, cyclic) ---

fn spline_resolution(spline: &Spline) -> i32 {
    match spline {
        Spline::Bezier(bezier) => bezier.resolution,
        Spline::Nurbs(nurbs) => nurbs.resolution,
        _ => 1,
    }
}

fn set_spline_resolution(spline: &mut Spline, resolution: i32) {
    let resolution = resolution.max(1);
    let changed = match spline {
        Spline::Bezier(bezier) if bezier.resolution != resolution => {
            bezier.resolution = resolution;
            true
        }
        Spline::Nurbs(nurbs) if nurbs.resolution != resolution => {
            nurbs.resolution = resolution;
            true
        }
        _ => false,
    };
    if changed {
        spline.mark_cache_invalid();
    }
}

fn spline_cyclic(spline: &Spline) -> bool {
    spline.is_cyclic()
}

fn set_spline_cyclic(spline: &mut Spline, cyclic: bool) {
    if spline.is_cyclic() != cyclic {
        spline.set_cyclic(cyclic);
        spline.mark_cache_invalid();
    }
}

fn resolution_read(curve: &Curve) -> ReadAttribute<'_> {
    ReadAttribute::Int(VArray::SplineDerived {
        splines: curve.splines(),
        get: spline_resolution,
    })
}

fn resolution_write(curve: &mut Curve) -> WriteAttribute<'_> {
    WriteAttribute::Int(VMutArray::SplineDerived {
        splines: curve.splines_mut(),
        get: spline_resolution,
        set: set_spline_resolution,
    })
}

fn cyclic_read(curve: &Curve) -> ReadAttribute<'_> {
    ReadAttribute::Bool(VArray::SplineDerived {
        splines: curve.splines(),
        get: spline_cyclic,
    })
}

fn cyclic_write(curve: &mut Curve) -> WriteAttribute<'_> {
    WriteAttribute::Bool(VMutArray::SplineDerived {
        splines: curve.splines_mut(),
        get: spline_cyclic,
        set: set_spline_cyclic,
    })
}

/// A spline-granularity attribute computed through a get/set function pair.
pub struct BuiltinSplineProvider {
    name: &'static str,
    data_type: AttrType,
    writable: bool,
    read_fn: for<'a> fn(&'a Curve) -> ReadAttribute<'a>,
    write_fn: for<'a> fn(&'a mut Curve) -> WriteAttribute<'a>,
}

impl BuiltinAttributeProvider for BuiltinSplineProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn domain(&self) -> AttrDomain {
        AttrDomain::Spline
    }

    fn data_type(&self) -> AttrType {
        self.data_type
    }

    fn creatable(&self) -> bool {
        false
    }

    fn writable(&self) -> bool {
        self.writable
    }

    fn deletable(&self) -> bool {
        false
    }

    fn try_get_for_read<'a>(&self, curve: &'a Curve) -> Option<ReadAttribute<'a>> {
        Some((self.read_fn)(curve))
    }

    fn try_get_for_write<'a>(&self, curve: &'a mut Curve) -> Option<WriteAttributeLookup<'a>> {
        if !self.writable {
            return None;
        }
        Some(WriteAttributeLookup {
            attribute: (self.write_fn)(curve),
            domain: AttrDomain::Spline,
        })
    }

    fn try_create(&self, _curve: &mut Curve, _init: AttributeInit) -> bool {
        false
    }

    fn try_delete(&self, _curve: &mut Curve) -> bool {
        false
    }

    fn exists(&self, curve: &Curve) -> bool {
        curve.spline_count() != 0
    }
}

// --- Point attribute span accessors ---

fn invalidate_spline_cache(spline: &mut Spline) {
    spline.mark_cache_invalid();
}

fn position_span(spline: &Spline) -> &[DVec3] {
    spline.positions()
}

fn position_span_mut(spline: &mut Spline) -> Option<&mut [DVec3]> {
    Some(spline.base_mut().positions.as_mut_slice())
}

fn radius_span(spline: &Spline) -> &[f64] {
    spline.radii()
}

fn radius_span_mut(spline: &mut Spline) -> Option<&mut [f64]> {
    Some(spline.base_mut().radii.as_mut_slice())
}

fn tilt_span(spline: &Spline) -> &[f64] {
    spline.tilts()
}

fn tilt_span_mut(spline: &mut Spline) -> Option<&mut [f64]> {
    Some(spline.base_mut().tilts.as_mut_slice())
}

fn id_span(spline: &Spline) -> &[i32] {
    spline
        .attributes()
        .get("id")
        .and_then(|layer| layer.as_slice())
        .unwrap_or(&[])
}

fn id_span_mut(spline: &mut Spline) -> Option<&mut [i32]> {
    spline.attributes_mut().get_mut("id")?.as_mut_slice()
}

fn handle_left_span(spline: &Spline) -> &[DVec3] {
    match spline {
        Spline::Bezier(bezier) => &bezier.handles_left,
        _ => &[],
    }
}

fn handle_left_span_mut(spline: &mut Spline) -> Option<&mut [DVec3]> {
    match spline {
        Spline::Bezier(bezier) => Some(bezier.handles_left.as_mut_slice()),
        _ => None,
    }
}

fn handle_right_span(spline: &Spline) -> &[DVec3] {
    match spline {
        Spline::Bezier(bezier) => &bezier.handles_right,
        _ => &[],
    }
}

fn handle_right_span_mut(spline: &mut Spline) -> Option<&mut [DVec3]> {
    match spline {
        Spline::Bezier(bezier) => Some(bezier.handles_right.as_mut_slice()),
        _ => None,
    }
}

// Writing positions or tilts invalidates the owning spline's evaluated data;
// radii and ids do not feed evaluation.
const POSITION_ACCESSOR: PointSpanAccessor<DVec3> = PointSpanAccessor {
    get: position_span,
    get_mut: position_span_mut,
    update_on_write: Some(invalidate_spline_cache),
};

const RADIUS_ACCESSOR: PointSpanAccessor<f64> = PointSpanAccessor {
    get: radius_span,
    get_mut: radius_span_mut,
    update_on_write: None,
};

const TILT_ACCESSOR: PointSpanAccessor<f64> = PointSpanAccessor {
    get: tilt_span,
    get_mut: tilt_span_mut,
    update_on_write: Some(invalidate_spline_cache),
};

const ID_ACCESSOR: PointSpanAccessor<i32> = PointSpanAccessor {
    get: id_span,
    get_mut: id_span_mut,
    update_on_write: None,
};

const HANDLE_LEFT_ACCESSOR: PointSpanAccessor<DVec3> = PointSpanAccessor {
    get: handle_left_span,
    get_mut: handle_left_span_mut,
    update_on_write: Some(invalidate_spline_cache),
};

const HANDLE_RIGHT_ACCESSOR: PointSpanAccessor<DVec3> = PointSpanAccessor {
    get: handle_right_span,
    get_mut: handle_right_span_mut,
    update_on_write: Some(invalidate_spline_cache),
};

/// A point-granularity attribute stored as one span per spline.
pub struct BuiltinPointProvider<T: Erasable> {
    name: &'static str,
    creatable: bool,
    deletable: bool,
    /// Backed by a named layer in each spline's attribute set rather than a
    /// dedicated field; `exists` then also requires the layer.
    stored_in_custom_data: bool,
    accessor: PointSpanAccessor<T>,
}

impl<T: Erasable> BuiltinAttributeProvider for BuiltinPointProvider<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn domain(&self) -> AttrDomain {
        AttrDomain::Point
    }

    fn data_type(&self) -> AttrType {
        T::TYPE
    }

    fn creatable(&self) -> bool {
        self.creatable
    }

    fn writable(&self) -> bool {
        true
    }

    fn deletable(&self) -> bool {
        self.deletable
    }

    fn try_get_for_read<'a>(&self, curve: &'a Curve) -> Option<ReadAttribute<'a>> {
        if !self.exists(curve) {
            return None;
        }
        let splines = curve.splines();
        if splines.len() == 1 {
            return Some(T::wrap_read(VArray::Span((self.accessor.get)(&splines[0]))));
        }
        let offsets = curve.point_offsets();
        let spans = splines
            .iter()
            .map(|spline| (self.accessor.get)(spline))
            .collect();
        Some(T::wrap_read(VArray::Spans { spans, offsets }))
    }

    fn try_get_for_write<'a>(&self, curve: &'a mut Curve) -> Option<WriteAttributeLookup<'a>> {
        if !self.exists(curve) {
            return None;
        }
        let offsets = curve.point_offsets();
        let attribute = T::wrap_write(VMutArray::SplineSpans {
            splines: curve.splines_mut(),
            offsets,
            accessor: self.accessor,
        });
        Some(WriteAttributeLookup {
            attribute,
            domain: AttrDomain::Point,
        })
    }

    fn try_create(&self, curve: &mut Curve, init: AttributeInit) -> bool {
        if !self.creatable {
            return false;
        }
        create_point_attribute(curve, self.name, T::TYPE, init)
    }

    fn try_delete(&self, curve: &mut Curve) -> bool {
        if !self.deletable {
            return false;
        }
        remove_point_attribute(curve, self.name)
    }

    fn exists(&self, curve: &Curve) -> bool {
        let splines = curve.splines();
        if splines.is_empty() {
            return false;
        }
        if self.stored_in_custom_data && !splines[0].attributes().contains(self.name) {
            return false;
        }
        splines.iter().any(|spline| spline.size() != 0)
    }
}

/// Handle positions only exist on Bezier splines; other kinds read zero and
/// ignore writes.
pub struct BezierHandleProvider {
    right: bool,
}

impl BezierHandleProvider {
    fn accessor(&self) -> PointSpanAccessor<DVec3> {
        if self.right {
            HANDLE_RIGHT_ACCESSOR
        } else {
            HANDLE_LEFT_ACCESSOR
        }
    }
}

impl BuiltinAttributeProvider for BezierHandleProvider {
    fn name(&self) -> &'static str {
        if self.right {
            "handle_right"
        } else {
            "handle_left"
        }
    }

    fn domain(&self) -> AttrDomain {
        AttrDomain::Point
    }

    fn data_type(&self) -> AttrType {
        AttrType::Vec3
    }

    fn creatable(&self) -> bool {
        false
    }

    fn writable(&self) -> bool {
        true
    }

    fn deletable(&self) -> bool {
        false
    }

    fn try_get_for_read<'a>(&self, curve: &'a Curve) -> Option<ReadAttribute<'a>> {
        if !curve.has_spline_with_kind(SplineKind::Bezier) {
            return None;
        }
        let accessor = self.accessor();
        let offsets = curve.point_offsets();
        let spans = curve
            .splines()
            .iter()
            .map(|spline| (accessor.get)(spline))
            .collect();
        Some(DVec3::wrap_read(VArray::Spans { spans, offsets }))
    }

    fn try_get_for_write<'a>(&self, curve: &'a mut Curve) -> Option<WriteAttributeLookup<'a>> {
        if !curve.has_spline_with_kind(SplineKind::Bezier) {
            return None;
        }
        let offsets = curve.point_offsets();
        let attribute = DVec3::wrap_write(VMutArray::SplineSpans {
            splines: curve.splines_mut(),
            offsets,
            accessor: self.accessor(),
        });
        Some(WriteAttributeLookup {
            attribute,
            domain: AttrDomain::Point,
        })
    }

    fn try_create(&self, _curve: &mut Curve, _init: AttributeInit) -> bool {
        false
    }

    fn try_delete(&self, _curve: &mut Curve) -> bool {
        false
    }

    fn exists(&self, curve: &Curve) -> bool {
        curve.has_spline_with_kind(SplineKind::Bezier) && curve.point_count() != 0
    }
}

// --- Shared point-layer create/delete policy ---

/// Allocate a named point layer on every spline and fill it from `init`.
///
/// With a single spline and provided values the column is adopted without a
/// copy. If allocation fails partway through multiple splines, the layers
/// created so far are not rolled back; that state breaks the
/// layer-consistency invariant and is treated as unreachable.
pub(crate) fn create_point_attribute(
    curve: &mut Curve,
    name: &str,
    ty: AttrType,
    init: AttributeInit,
) -> bool {
    if curve.spline_count() == 0 {
        return false;
    }
    if curve.splines()[0].attributes().contains(name) {
        return false;
    }
    if let AttributeInit::Array(array) = &init {
        if array.data_type() != ty || array.len() != curve.point_count() {
            return false;
        }
    }

    match init {
        AttributeInit::Array(array) if curve.spline_count() == 1 => curve.splines_mut()[0]
            .attributes_mut()
            .insert_array(name, array)
            .is_ok(),
        init => {
            for spline in curve.splines_mut() {
                let size = spline.size();
                if !spline.attributes_mut().create(name, ty, size) {
                    debug_assert!(
                        false,
                        "Point attribute '{}' already present while creating",
                        name
                    );
                    return false;
                }
            }
            let AttributeInit::Array(array) = init else {
                return true;
            };
            // Scatter the contiguous source through the fresh write adapter.
            let Some(mut lookup) = DynamicPointProvider.try_get_for_write(curve, name) else {
                debug_assert!(false, "Attribute '{}' must exist after creation", name);
                return false;
            };
            let ok = lookup.attribute.set_all_array(&array);
            debug_assert!(ok, "Created layer must accept its source values");
            lookup.attribute.finish();
            ok
        }
    }
}

/// Remove a named point layer from every spline; reports whether any spline
/// carried it.
pub(crate) fn remove_point_attribute(curve: &mut Curve, name: &str) -> bool {
    let mut any = false;
    for spline in curve.splines_mut() {
        any |= spline.attributes_mut().remove(name);
    }
    any
}

// --- Dynamic providers ---

/// User-named point attributes, stored identically on every spline.
pub struct DynamicPointProvider;

/// The stored type of a point layer, verified across all splines.
///
/// Any disagreement in presence or type fails closed: partial data is never
/// returned. Such disagreement breaks a structural invariant and is
/// additionally debug-asserted.
fn point_layer_type(curve: &Curve, name: &str) -> Option<AttrType> {
    let splines = curve.splines();
    let first = splines.first()?.attributes().get(name)?;
    let ty = first.data_type();
    for spline in &splines[1..] {
        match spline.attributes().get(name) {
            Some(layer) if layer.data_type() == ty => {}
            Some(_) => {
                debug_assert!(
                    false,
                    "Point attribute '{}' has mismatched types across splines",
                    name
                );
                return None;
            }
            None => {
                debug_assert!(false, "Point attribute '{}' is missing on a spline", name);
                return None;
            }
        }
    }
    Some(ty)
}

impl DynamicAttributesProvider for DynamicPointProvider {
    fn domain(&self) -> AttrDomain {
        AttrDomain::Point
    }

    fn exists(&self, curve: &Curve, name: &str) -> bool {
        curve
            .splines()
            .first()
            .is_some_and(|spline| spline.attributes().contains(name))
    }

    fn try_get_for_read<'a>(
        &self,
        curve: &'a Curve,
        name: &str,
    ) -> Option<ReadAttributeLookup<'a>> {
        let ty = point_layer_type(curve, name)?;
        let splines = curve.splines();
        with_attr_type!(ty, T => {
            if splines.len() == 1 {
                let span = splines[0].attributes().get(name)?.as_slice::<T>()?;
                return Some(ReadAttributeLookup {
                    attribute: T::wrap_read(VArray::Span(span)),
                    domain: AttrDomain::Point,
                });
            }
            let mut spans = Vec::with_capacity(splines.len());
            for spline in splines {
                spans.push(spline.attributes().get(name)?.as_slice::<T>()?);
            }
            Some(ReadAttributeLookup {
                attribute: T::wrap_read(VArray::Spans {
                    spans,
                    offsets: curve.point_offsets(),
                }),
                domain: AttrDomain::Point,
            })
        })
    }

    fn try_get_for_write<'a>(
        &self,
        curve: &'a mut Curve,
        name: &str,
    ) -> Option<WriteAttributeLookup<'a>> {
        let ty = point_layer_type(curve, name)?;
        let offsets = curve.point_offsets();
        with_attr_type!(ty, T => {
            if curve.spline_count() == 1 {
                let span = curve.splines_mut()[0]
                    .attributes_mut()
                    .get_mut(name)?
                    .as_mut_slice::<T>()?;
                return Some(WriteAttributeLookup {
                    attribute: T::wrap_write(VMutArray::Span(span)),
                    domain: AttrDomain::Point,
                });
            }
            let mut spans = Vec::with_capacity(offsets.spline_count());
            for spline in curve.splines_mut() {
                spans.push(spline.attributes_mut().get_mut(name)?.as_mut_slice::<T>()?);
            }
            Some(WriteAttributeLookup {
                attribute: T::wrap_write(VMutArray::Spans { spans, offsets }),
                domain: AttrDomain::Point,
            })
        })
    }

    fn try_create(
        &self,
        curve: &mut Curve,
        name: &str,
        domain: AttrDomain,
        ty: AttrType,
        init: AttributeInit,
    ) -> bool {
        if domain != AttrDomain::Point {
            return false;
        }
        create_point_attribute(curve, name, ty, init)
    }

    fn try_delete(&self, curve: &mut Curve, name: &str) -> bool {
        remove_point_attribute(curve, name)
    }

    fn list(&self, curve: &Curve, out: &mut Vec<AttributeMeta>) {
        let Some(first) = curve.splines().first() else {
            return;
        };
        curve.assert_valid_point_attributes();
        // The first spline stands in for all of them.
        for layer in first.attributes().iter() {
            out.push(AttributeMeta {
                name: layer.name().to_owned(),
                domain: AttrDomain::Point,
                data_type: layer.data().data_type(),
            });
        }
    }
}

/// User-named spline attributes, stored contiguously on the curve.
pub struct DynamicSplineProvider;

impl DynamicAttributesProvider for DynamicSplineProvider {
    fn domain(&self) -> AttrDomain {
        AttrDomain::Spline
    }

    fn exists(&self, curve: &Curve, name: &str) -> bool {
        curve.attributes.contains(name)
    }

    fn try_get_for_read<'a>(
        &self,
        curve: &'a Curve,
        name: &str,
    ) -> Option<ReadAttributeLookup<'a>> {
        let layer = curve.attributes.get(name)?;
        with_attr_type!(layer.data_type(), T => {
            Some(ReadAttributeLookup {
                attribute: T::wrap_read(VArray::Span(layer.as_slice::<T>()?)),
                domain: AttrDomain::Spline,
            })
        })
    }

    fn try_get_for_write<'a>(
        &self,
        curve: &'a mut Curve,
        name: &str,
    ) -> Option<WriteAttributeLookup<'a>> {
        let layer = curve.attributes.get_mut(name)?;
        with_attr_type!(layer.data_type(), T => {
            Some(WriteAttributeLookup {
                attribute: T::wrap_write(VMutArray::Span(layer.as_mut_slice::<T>()?)),
                domain: AttrDomain::Spline,
            })
        })
    }

    fn try_create(
        &self,
        curve: &mut Curve,
        name: &str,
        domain: AttrDomain,
        ty: AttrType,
        init: AttributeInit,
    ) -> bool {
        if domain != AttrDomain::Spline || curve.attributes.contains(name) {
            return false;
        }
        match init {
            AttributeInit::Default => curve.attributes.create(name, ty, curve.spline_count()),
            AttributeInit::Array(array) => {
                if array.data_type() != ty || array.len() != curve.spline_count() {
                    return false;
                }
                curve.attributes.insert_array(name, array).is_ok()
            }
        }
    }

    fn try_delete(&self, curve: &mut Curve, name: &str) -> bool {
        curve.attributes.remove(name)
    }

    fn list(&self, curve: &Curve, out: &mut Vec<AttributeMeta>) {
        for layer in curve.attributes.iter() {
            out.push(AttributeMeta {
                name: layer.name().to_owned(),
                domain: AttrDomain::Spline,
                data_type: layer.data().data_type(),
            });
        }
    }
}

// --- Registry ---

/// All providers for curve components, built once per process.
pub struct ComponentAttributeProviders {
    builtin: HashMap<&'static str, Box<dyn BuiltinAttributeProvider>>,
    dynamic: Vec<Box<dyn DynamicAttributesProvider>>,
}

impl ComponentAttributeProviders {
    pub fn builtin(&self, name: &str) -> Option<&dyn BuiltinAttributeProvider> {
        self.builtin.get(name).map(|provider| provider.as_ref())
    }

    pub fn builtins(&self) -> impl Iterator<Item = &dyn BuiltinAttributeProvider> {
        self.builtin.values().map(|provider| provider.as_ref())
    }

    pub fn dynamic(&self) -> &[Box<dyn DynamicAttributesProvider>] {
        &self.dynamic
    }
}

pub fn curve_attribute_providers() -> &'static ComponentAttributeProviders {
    static REGISTRY: OnceLock<ComponentAttributeProviders> = OnceLock::new();
    REGISTRY.get_or_init(build_curve_providers)
}

fn build_curve_providers() -> ComponentAttributeProviders {
    let mut builtin: HashMap<&'static str, Box<dyn BuiltinAttributeProvider>> = HashMap::new();

    builtin.insert(
        "position",
        Box::new(BuiltinPointProvider {
            name: "position",
            creatable: false,
            deletable: false,
            stored_in_custom_data: false,
            accessor: POSITION_ACCESSOR,
        }),
    );
    builtin.insert(
        "radius",
        Box::new(BuiltinPointProvider {
            name: "radius",
            creatable: false,
            deletable: false,
            stored_in_custom_data: false,
            accessor: RADIUS_ACCESSOR,
        }),
    );
    builtin.insert(
        "tilt",
        Box::new(BuiltinPointProvider {
            name: "tilt",
            creatable: false,
            deletable: false,
            stored_in_custom_data: false,
            accessor: TILT_ACCESSOR,
        }),
    );
    builtin.insert(
        "id",
        Box::new(BuiltinPointProvider {
            name: "id",
            creatable: true,
            deletable: true,
            stored_in_custom_data: true,
            accessor: ID_ACCESSOR,
        }),
    );
    builtin.insert(
        "handle_left",
        Box::new(BezierHandleProvider { right: false }),
    );
    builtin.insert(
        "handle_right",
        Box::new(BezierHandleProvider { right: true }),
    );
    builtin.insert(
        "resolution",
        Box::new(BuiltinSplineProvider {
            name: "resolution",
            data_type: AttrType::Int,
            writable: true,
            read_fn: resolution_read,
            write_fn: resolution_write,
        }),
    );
    builtin.insert(
        "cyclic",
        Box::new(BuiltinSplineProvider {
            name: "cyclic",
            data_type: AttrType::Bool,
            writable: true,
            read_fn: cyclic_read,
            write_fn: cyclic_write,
        }),
    );

    ComponentAttributeProviders {
        builtin,
        dynamic: vec![Box::new(DynamicPointProvider), Box::new(DynamicSplineProvider)],
    }
}
