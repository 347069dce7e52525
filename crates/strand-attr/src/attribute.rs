//! Type-erased attribute views over the closed element-type set.

use glam::{DVec2, DVec3, DVec4};
use strand_core::{AttrArray, AttrElement, AttrType, AttrValue};

use crate::domain::AttrDomain;
use crate::mask::IndexMask;
use crate::varray::{VArray, VMutArray};

/// A read-only attribute of any supported element type.
pub enum ReadAttribute<'a> {
    Bool(VArray<'a, bool>),
    Int(VArray<'a, i32>),
    Float(VArray<'a, f64>),
    Vec2(VArray<'a, DVec2>),
    Vec3(VArray<'a, DVec3>),
    Color(VArray<'a, DVec4>),
}

/// A writable attribute of any supported element type.
pub enum WriteAttribute<'a> {
    Bool(VMutArray<'a, bool>),
    Int(VMutArray<'a, i32>),
    Float(VMutArray<'a, f64>),
    Vec2(VMutArray<'a, DVec2>),
    Vec3(VMutArray<'a, DVec3>),
    Color(VMutArray<'a, DVec4>),
}

/// An element type that can move between typed virtual arrays and the
/// type-erased attribute enums.
pub trait Erasable: AttrElement {
    fn wrap_read(varray: VArray<'_, Self>) -> ReadAttribute<'_>;
    fn wrap_write(varray: VMutArray<'_, Self>) -> WriteAttribute<'_>;
    fn read<'a, 'b>(attribute: &'b ReadAttribute<'a>) -> Option<&'b VArray<'a, Self>>;
    fn read_owned(attribute: ReadAttribute<'_>) -> Option<VArray<'_, Self>>;
    fn write<'a, 'b>(attribute: &'b mut WriteAttribute<'a>) -> Option<&'b mut VMutArray<'a, Self>>;
}

macro_rules! impl_erasable {
    ($($elem:ty => $variant:ident),* $(,)?) => {
        $(impl Erasable for $elem {
            fn wrap_read(varray: VArray<'_, Self>) -> ReadAttribute<'_> {
                ReadAttribute::$variant(varray)
            }

            fn wrap_write(varray: VMutArray<'_, Self>) -> WriteAttribute<'_> {
                WriteAttribute::$variant(varray)
            }

            fn read<'a, 'b>(attribute: &'b ReadAttribute<'a>) -> Option<&'b VArray<'a, Self>> {
                match attribute {
                    ReadAttribute::$variant(varray) => Some(varray),
                    _ => None,
                }
            }

            fn read_owned(attribute: ReadAttribute<'_>) -> Option<VArray<'_, Self>> {
                match attribute {
                    ReadAttribute::$variant(varray) => Some(varray),
                    _ => None,
                }
            }

            fn write<'a, 'b>(
                attribute: &'b mut WriteAttribute<'a>,
            ) -> Option<&'b mut VMutArray<'a, Self>> {
                match attribute {
                    WriteAttribute::$variant(varray) => Some(varray),
                    _ => None,
                }
            }
        })*
    };
}

impl_erasable! {
    bool => Bool,
    i32 => Int,
    f64 => Float,
    DVec2 => Vec2,
    DVec3 => Vec3,
    DVec4 => Color,
}

macro_rules! dispatch {
    ($value:expr, $varray:ident => $body:expr) => {
        match $value {
            Self::Bool($varray) => $body,
            Self::Int($varray) => $body,
            Self::Float($varray) => $body,
            Self::Vec2($varray) => $body,
            Self::Vec3($varray) => $body,
            Self::Color($varray) => $body,
        }
    };
}

impl<'a> ReadAttribute<'a> {
    pub fn data_type(&self) -> AttrType {
        match self {
            ReadAttribute::Bool(_) => AttrType::Bool,
            ReadAttribute::Int(_) => AttrType::Int,
            ReadAttribute::Float(_) => AttrType::Float,
            ReadAttribute::Vec2(_) => AttrType::Vec2,
            ReadAttribute::Vec3(_) => AttrType::Vec3,
            ReadAttribute::Color(_) => AttrType::Color,
        }
    }

    pub fn len(&self) -> usize {
        dispatch!(self, varray => varray.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value(&self, index: usize) -> AttrValue {
        dispatch!(self, varray => varray.get(index).into_value())
    }

    pub fn typed<T: Erasable>(&self) -> Option<&VArray<'a, T>> {
        T::read(self)
    }

    pub fn into_typed<T: Erasable>(self) -> Option<VArray<'a, T>> {
        T::read_owned(self)
    }

    /// Materialize the full range into an owned column.
    pub fn to_array(&self) -> AttrArray {
        dispatch!(self, varray => AttrArray::from_vec(varray.to_vec()))
    }
}

impl<'a> WriteAttribute<'a> {
    pub fn data_type(&self) -> AttrType {
        match self {
            WriteAttribute::Bool(_) => AttrType::Bool,
            WriteAttribute::Int(_) => AttrType::Int,
            WriteAttribute::Float(_) => AttrType::Float,
            WriteAttribute::Vec2(_) => AttrType::Vec2,
            WriteAttribute::Vec3(_) => AttrType::Vec3,
            WriteAttribute::Color(_) => AttrType::Color,
        }
    }

    pub fn len(&self) -> usize {
        dispatch!(self, varray => varray.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value(&self, index: usize) -> AttrValue {
        dispatch!(self, varray => varray.get(index).into_value())
    }

    /// Scatter one value; `false` on a type mismatch.
    pub fn set_value(&mut self, index: usize, value: AttrValue) -> bool {
        match (self, value) {
            (WriteAttribute::Bool(varray), AttrValue::Bool(v)) => varray.set(index, v),
            (WriteAttribute::Int(varray), AttrValue::Int(v)) => varray.set(index, v),
            (WriteAttribute::Float(varray), AttrValue::Float(v)) => varray.set(index, v),
            (WriteAttribute::Vec2(varray), AttrValue::Vec2(v)) => varray.set(index, v),
            (WriteAttribute::Vec3(varray), AttrValue::Vec3(v)) => varray.set(index, v),
            (WriteAttribute::Color(varray), AttrValue::Color(v)) => varray.set(index, v),
            _ => return false,
        }
        true
    }

    /// Bulk-copy a flat column into the backing; `false` on a type or length
    /// mismatch.
    pub fn set_all_array(&mut self, src: &AttrArray) -> bool {
        if src.data_type() != self.data_type() || src.len() != self.len() {
            return false;
        }
        dispatch!(self, varray => {
            match src.as_slice() {
                Some(slice) => varray.set_all(slice),
                None => return false,
            }
        });
        true
    }

    pub fn typed_mut<T: Erasable>(&mut self) -> Option<&mut VMutArray<'a, T>> {
        T::write(self)
    }

    /// Materialize the masked values as an owned column.
    pub fn materialize_to_array(&self, mask: IndexMask) -> AttrArray {
        dispatch!(self, varray => {
            let mut out = vec![Default::default(); varray.len()];
            varray.materialize(mask, &mut out);
            AttrArray::from_vec(out)
        })
    }

    /// End the write batch, running update-on-write hooks.
    pub fn finish(self) {
        dispatch!(self, varray => varray.finish())
    }
}

/// A read lookup: the attribute plus the granularity it is stored at.
pub struct ReadAttributeLookup<'a> {
    pub attribute: ReadAttribute<'a>,
    pub domain: AttrDomain,
}

/// A write lookup: the attribute plus the granularity it is stored at.
pub struct WriteAttributeLookup<'a> {
    pub attribute: WriteAttribute<'a>,
    pub domain: AttrDomain,
}

/// Initial values for attribute creation.
pub enum AttributeInit {
    /// Leave the new layer at the type's default values.
    Default,
    /// Fill from an owned column in flat point order. With a single spline
    /// the column is adopted directly, without copying.
    Array(AttrArray),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erased_round_trip() {
        let attribute = f64::wrap_read(VArray::Owned(vec![1.0, 2.0]));
        assert_eq!(attribute.data_type(), AttrType::Float);
        assert_eq!(attribute.len(), 2);
        assert_eq!(attribute.value(1), AttrValue::Float(2.0));
        assert!(attribute.typed::<f64>().is_some());
        assert!(attribute.typed::<i32>().is_none());
    }

    #[test]
    fn test_write_set_value_type_checked() {
        let mut data = [0.0_f64; 2];
        let mut attribute = f64::wrap_write(VMutArray::Span(&mut data));
        assert!(attribute.set_value(0, AttrValue::Float(3.5)));
        assert!(!attribute.set_value(0, AttrValue::Int(3)));
        assert_eq!(attribute.value(0), AttrValue::Float(3.5));
    }

    #[test]
    fn test_to_array_materializes() {
        let attribute = i32::wrap_read(VArray::Owned(vec![4, 5, 6]));
        let array = attribute.to_array();
        assert_eq!(array.as_slice::<i32>().unwrap(), &[4, 5, 6]);
    }
}
