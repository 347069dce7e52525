//! Named, typed attribute slot tables.

use serde::{Deserialize, Serialize};
use strand_core::{AttrArray, AttrType};

/// One named attribute layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    name: String,
    data: AttrArray,
}

impl Layer {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &AttrArray {
        &self.data
    }
}

/// An ordered table of named attribute layers, all of one element count.
///
/// Used per spline for point attributes and once per curve for spline
/// attributes. Layer order is creation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeSet {
    layers: Vec<Layer>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.iter().any(|layer| layer.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&AttrArray> {
        self.layers
            .iter()
            .find(|layer| layer.name == name)
            .map(|layer| &layer.data)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AttrArray> {
        self.layers
            .iter_mut()
            .find(|layer| layer.name == name)
            .map(|layer| &mut layer.data)
    }

    /// Create a default-filled layer; `false` if the name is taken.
    pub fn create(&mut self, name: &str, ty: AttrType, len: usize) -> bool {
        if self.contains(name) {
            return false;
        }
        self.layers.push(Layer {
            name: name.to_owned(),
            data: AttrArray::with_len(ty, len),
        });
        true
    }

    /// Adopt an existing array as a layer without copying its values.
    ///
    /// `false` if the name is taken; the array is returned to the caller in
    /// that case so ownership is never silently dropped.
    pub fn insert_array(&mut self, name: &str, data: AttrArray) -> Result<(), AttrArray> {
        if self.contains(name) {
            return Err(data);
        }
        self.layers.push(Layer {
            name: name.to_owned(),
            data,
        });
        Ok(())
    }

    /// Remove a layer; reports whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.name != name);
        self.layers.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Append one default element to every layer.
    pub fn push_defaults(&mut self) {
        for layer in &mut self.layers {
            layer.data.push_default();
        }
    }
}
