//! The curve component façade: ownership, copy-on-write, and attribute
//! routing.

use std::sync::{Arc, OnceLock};

use strand_core::AttrType;
use strand_curve::Curve;
use strand_math::Point3;

use crate::attribute::{AttributeInit, ReadAttribute, ReadAttributeLookup, WriteAttributeLookup};
use crate::domain::{adapt_domain, AttrDomain};
use crate::providers::{curve_attribute_providers, AttributeMeta};

/// Evaluated polylines snapshotting a curve for display purposes.
#[derive(Debug, Clone)]
pub struct RenderCurve {
    positions: Vec<Point3>,
    offsets: Vec<usize>,
    cyclic: Vec<bool>,
}

impl RenderCurve {
    fn build(curve: &Curve) -> Self {
        let mut positions = Vec::new();
        let mut offsets = vec![0];
        let mut cyclic = Vec::new();
        for spline in curve.splines() {
            positions.extend_from_slice(spline.evaluated_positions());
            offsets.push(positions.len());
            cyclic.push(spline.is_cyclic());
        }
        Self {
            positions,
            offsets,
            cyclic,
        }
    }

    pub fn polyline_count(&self) -> usize {
        self.cyclic.len()
    }

    pub fn polyline(&self, index: usize) -> &[Point3] {
        &self.positions[self.offsets[index]..self.offsets[index + 1]]
    }

    pub fn is_cyclic(&self, index: usize) -> bool {
        self.cyclic[index]
    }
}

/// Owns zero-or-one curve and adapts attribute requests onto it.
///
/// The curve is held behind an [`Arc`]: cloning the component shares the
/// data, and the first write access to shared data deep-clones it
/// (copy-on-write).
#[derive(Debug, Default)]
pub struct CurveComponent {
    curve: Option<Arc<Curve>>,
    render: OnceLock<RenderCurve>,
}

impl Clone for CurveComponent {
    fn clone(&self) -> Self {
        Self {
            curve: self.curve.clone(),
            render: OnceLock::new(),
        }
    }
}

impl CurveComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_curve(curve: Curve) -> Self {
        Self {
            curve: Some(Arc::new(curve)),
            render: OnceLock::new(),
        }
    }

    pub fn has_curve(&self) -> bool {
        self.curve.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.curve.is_none()
    }

    /// Drop the owned curve and the cached render representation.
    pub fn clear(&mut self) {
        self.curve = None;
        self.render = OnceLock::new();
    }

    /// Replace the owned curve.
    pub fn replace(&mut self, curve: Curve) {
        self.replace_shared(Arc::new(curve));
    }

    /// Adopt an already-shared curve; writes will copy-on-write.
    pub fn replace_shared(&mut self, curve: Arc<Curve>) {
        self.curve = Some(curve);
        self.render = OnceLock::new();
    }

    /// Take the curve out of the component, cloning if it is still shared.
    pub fn release(&mut self) -> Option<Curve> {
        self.render = OnceLock::new();
        let curve = self.curve.take()?;
        Some(Arc::try_unwrap(curve).unwrap_or_else(|shared| (*shared).clone()))
    }

    pub fn get_for_read(&self) -> Option<&Curve> {
        self.curve.as_deref()
    }

    /// Mutable access; deep-clones first when the curve is shared. The
    /// render snapshot is dropped since it would go stale.
    pub fn get_for_write(&mut self) -> Option<&mut Curve> {
        self.render = OnceLock::new();
        let curve = self.curve.as_mut()?;
        Some(Arc::make_mut(curve))
    }

    /// Number of attribute values stored at the given granularity.
    pub fn domain_size(&self, domain: AttrDomain) -> usize {
        match (self.get_for_read(), domain) {
            (None, _) => 0,
            (Some(curve), AttrDomain::Point) => curve.point_count(),
            (Some(curve), AttrDomain::Spline) => curve.spline_count(),
        }
    }

    /// Look up an attribute at its stored granularity.
    pub fn attribute_try_get_for_read(&self, name: &str) -> Option<ReadAttributeLookup<'_>> {
        let curve = self.get_for_read()?;
        let providers = curve_attribute_providers();
        if let Some(provider) = providers.builtin(name) {
            let attribute = provider.try_get_for_read(curve)?;
            return Some(ReadAttributeLookup {
                attribute,
                domain: provider.domain(),
            });
        }
        providers
            .dynamic()
            .iter()
            .find_map(|provider| provider.try_get_for_read(curve, name))
    }

    /// Look up an attribute and convert it to the requested granularity.
    pub fn attribute_get_for_read(
        &self,
        name: &str,
        domain: AttrDomain,
    ) -> Option<ReadAttribute<'_>> {
        let curve = self.get_for_read()?;
        let lookup = self.attribute_try_get_for_read(name)?;
        adapt_domain(curve, lookup.attribute, lookup.domain, domain)
    }

    /// Writable attribute lookup; performs copy-on-write on shared data.
    pub fn attribute_try_get_for_write(&mut self, name: &str) -> Option<WriteAttributeLookup<'_>> {
        let providers = curve_attribute_providers();
        if let Some(provider) = providers.builtin(name) {
            let curve = self.get_for_write()?;
            return provider.try_get_for_write(curve);
        }
        // Pick the provider by inspection first; the mutable borrow below
        // must come from a single call.
        let index = {
            let curve = self.get_for_read()?;
            providers
                .dynamic()
                .iter()
                .position(|provider| provider.exists(curve, name))?
        };
        let curve = self.get_for_write()?;
        providers.dynamic()[index].try_get_for_write(curve, name)
    }

    pub fn attribute_exists(&self, name: &str) -> bool {
        let Some(curve) = self.get_for_read() else {
            return false;
        };
        let providers = curve_attribute_providers();
        if let Some(provider) = providers.builtin(name) {
            return provider.exists(curve);
        }
        providers
            .dynamic()
            .iter()
            .any(|provider| provider.exists(curve, name))
    }

    /// Create an attribute; `false` if it exists, the name is a builtin with
    /// different shape, or the initializer does not fit.
    pub fn attribute_try_create(
        &mut self,
        name: &str,
        domain: AttrDomain,
        ty: AttrType,
        init: AttributeInit,
    ) -> bool {
        if self.attribute_exists(name) {
            return false;
        }
        let Some(curve) = self.get_for_write() else {
            return false;
        };
        let providers = curve_attribute_providers();
        if let Some(provider) = providers.builtin(name) {
            if !provider.creatable() || provider.domain() != domain || provider.data_type() != ty {
                return false;
            }
            return provider.try_create(curve, init);
        }
        providers
            .dynamic()
            .iter()
            .find(|provider| provider.domain() == domain)
            .map_or(false, |provider| {
                provider.try_create(curve, name, domain, ty, init)
            })
    }

    /// Delete an attribute everywhere it is stored; reports whether anything
    /// was removed.
    pub fn attribute_try_delete(&mut self, name: &str) -> bool {
        let Some(curve) = self.get_for_write() else {
            return false;
        };
        let providers = curve_attribute_providers();
        if let Some(provider) = providers.builtin(name) {
            return provider.try_delete(curve);
        }
        let mut deleted = false;
        for provider in providers.dynamic() {
            deleted |= provider.try_delete(curve, name);
        }
        deleted
    }

    /// Every attribute present on the curve, sorted by name.
    pub fn attribute_list(&self) -> Vec<AttributeMeta> {
        let Some(curve) = self.get_for_read() else {
            return Vec::new();
        };
        let providers = curve_attribute_providers();
        let mut out = Vec::new();
        for provider in providers.builtins() {
            if provider.exists(curve) {
                out.push(AttributeMeta {
                    name: provider.name().to_owned(),
                    domain: provider.domain(),
                    data_type: provider.data_type(),
                });
            }
        }
        for provider in providers.dynamic() {
            let mut metas = Vec::new();
            provider.list(curve, &mut metas);
            // Layers backing builtin attributes are already reported above.
            out.extend(
                metas
                    .into_iter()
                    .filter(|meta| providers.builtin(&meta.name).is_none()),
            );
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    /// The lazily built render snapshot. Idempotent and safe to call from
    /// concurrent readers; rebuilt after the curve is cleared, replaced, or
    /// opened for write.
    pub fn curve_for_render(&self) -> Option<&RenderCurve> {
        let curve = self.get_for_read()?;
        Some(self.render.get_or_init(|| RenderCurve::build(curve)))
    }
}
