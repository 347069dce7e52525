//! The closed set of runtime attribute value types and type-erased storage.

use std::any::Any;

use serde::{Deserialize, Serialize};

pub use glam::{DVec2, DVec3, DVec4};

/// Runtime tag for the supported attribute value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttrType {
    Bool,
    Int,
    Float,
    Vec2,
    Vec3,
    Color,
}

impl AttrType {
    pub fn name(self) -> &'static str {
        match self {
            AttrType::Bool => "bool",
            AttrType::Int => "int",
            AttrType::Float => "float",
            AttrType::Vec2 => "vec2",
            AttrType::Vec3 => "vec3",
            AttrType::Color => "color",
        }
    }
}

impl std::fmt::Display for AttrType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One attribute value of any supported type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Bool(bool),
    Int(i32),
    Float(f64),
    Vec2(DVec2),
    Vec3(DVec3),
    Color(DVec4),
}

impl AttrValue {
    pub fn data_type(&self) -> AttrType {
        match self {
            AttrValue::Bool(_) => AttrType::Bool,
            AttrValue::Int(_) => AttrType::Int,
            AttrValue::Float(_) => AttrType::Float,
            AttrValue::Vec2(_) => AttrType::Vec2,
            AttrValue::Vec3(_) => AttrType::Vec3,
            AttrValue::Color(_) => AttrType::Color,
        }
    }

    /// The default value of the given type (false / zero).
    pub fn zero(ty: AttrType) -> Self {
        match ty {
            AttrType::Bool => AttrValue::Bool(false),
            AttrType::Int => AttrValue::Int(0),
            AttrType::Float => AttrValue::Float(0.0),
            AttrType::Vec2 => AttrValue::Vec2(DVec2::ZERO),
            AttrType::Vec3 => AttrValue::Vec3(DVec3::ZERO),
            AttrType::Color => AttrValue::Color(DVec4::ZERO),
        }
    }
}

/// An element type that participates in the runtime-typed attribute system.
///
/// Implemented exactly for the six supported element types; the set is
/// closed, so generic attribute code can dispatch over `AttrType` and recover
/// the static type with [`with_attr_type!`](crate::with_attr_type).
pub trait AttrElement: Copy + Default + PartialEq + Send + Sync + 'static {
    const TYPE: AttrType;

    fn into_value(self) -> AttrValue;
    fn from_value(value: AttrValue) -> Option<Self>;
}

macro_rules! impl_attr_element {
    ($($elem:ty => $variant:ident),* $(,)?) => {
        $(impl AttrElement for $elem {
            const TYPE: AttrType = AttrType::$variant;

            fn into_value(self) -> AttrValue {
                AttrValue::$variant(self)
            }

            fn from_value(value: AttrValue) -> Option<Self> {
                match value {
                    AttrValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        })*
    };
}

impl_attr_element! {
    bool => Bool,
    i32 => Int,
    f64 => Float,
    DVec2 => Vec2,
    DVec3 => Vec3,
    DVec4 => Color,
}

/// Dispatch a runtime [`AttrType`] to its static element type.
///
/// Inside the body, `$T` is a type alias for the element type matching the
/// tag, so one generic expression serves all six types.
#[macro_export]
macro_rules! with_attr_type {
    ($ty:expr, $T:ident => $body:expr) => {
        match $ty {
            $crate::value::AttrType::Bool => {
                type $T = bool;
                $body
            }
            $crate::value::AttrType::Int => {
                type $T = i32;
                $body
            }
            $crate::value::AttrType::Float => {
                type $T = f64;
                $body
            }
            $crate::value::AttrType::Vec2 => {
                type $T = $crate::value::DVec2;
                $body
            }
            $crate::value::AttrType::Vec3 => {
                type $T = $crate::value::DVec3;
                $body
            }
            $crate::value::AttrType::Color => {
                type $T = $crate::value::DVec4;
                $body
            }
        }
    };
}

/// An owned, type-erased column of attribute values.
///
/// One contiguous `Vec` per runtime type; typed access goes through
/// [`as_slice`](AttrArray::as_slice) / [`as_mut_slice`](AttrArray::as_mut_slice)
/// which fail (return `None`) on a tag mismatch instead of reinterpreting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrArray {
    Bool(Vec<bool>),
    Int(Vec<i32>),
    Float(Vec<f64>),
    Vec2(Vec<DVec2>),
    Vec3(Vec<DVec3>),
    Color(Vec<DVec4>),
}

fn downcast_slice<A: 'static, T: 'static>(values: &Vec<A>) -> Option<&[T]> {
    (values as &dyn Any)
        .downcast_ref::<Vec<T>>()
        .map(|v| v.as_slice())
}

fn downcast_mut_slice<A: 'static, T: 'static>(values: &mut Vec<A>) -> Option<&mut [T]> {
    (values as &mut dyn Any)
        .downcast_mut::<Vec<T>>()
        .map(|v| v.as_mut_slice())
}

impl AttrArray {
    /// A default-filled array of the given type and length.
    pub fn with_len(ty: AttrType, len: usize) -> Self {
        match ty {
            AttrType::Bool => AttrArray::Bool(vec![false; len]),
            AttrType::Int => AttrArray::Int(vec![0; len]),
            AttrType::Float => AttrArray::Float(vec![0.0; len]),
            AttrType::Vec2 => AttrArray::Vec2(vec![DVec2::ZERO; len]),
            AttrType::Vec3 => AttrArray::Vec3(vec![DVec3::ZERO; len]),
            AttrType::Color => AttrArray::Color(vec![DVec4::ZERO; len]),
        }
    }

    /// Wrap a typed vector without copying.
    pub fn from_vec<T: AttrElement>(values: Vec<T>) -> Self {
        let any: Box<dyn Any> = Box::new(values);
        match T::TYPE {
            AttrType::Bool => AttrArray::Bool(*any.downcast().unwrap()),
            AttrType::Int => AttrArray::Int(*any.downcast().unwrap()),
            AttrType::Float => AttrArray::Float(*any.downcast().unwrap()),
            AttrType::Vec2 => AttrArray::Vec2(*any.downcast().unwrap()),
            AttrType::Vec3 => AttrArray::Vec3(*any.downcast().unwrap()),
            AttrType::Color => AttrArray::Color(*any.downcast().unwrap()),
        }
    }

    pub fn data_type(&self) -> AttrType {
        match self {
            AttrArray::Bool(_) => AttrType::Bool,
            AttrArray::Int(_) => AttrType::Int,
            AttrArray::Float(_) => AttrType::Float,
            AttrArray::Vec2(_) => AttrType::Vec2,
            AttrArray::Vec3(_) => AttrType::Vec3,
            AttrArray::Color(_) => AttrType::Color,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AttrArray::Bool(v) => v.len(),
            AttrArray::Int(v) => v.len(),
            AttrArray::Float(v) => v.len(),
            AttrArray::Vec2(v) => v.len(),
            AttrArray::Vec3(v) => v.len(),
            AttrArray::Color(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Typed view; `None` if `T` does not match the stored type.
    pub fn as_slice<T: AttrElement>(&self) -> Option<&[T]> {
        match self {
            AttrArray::Bool(v) => downcast_slice(v),
            AttrArray::Int(v) => downcast_slice(v),
            AttrArray::Float(v) => downcast_slice(v),
            AttrArray::Vec2(v) => downcast_slice(v),
            AttrArray::Vec3(v) => downcast_slice(v),
            AttrArray::Color(v) => downcast_slice(v),
        }
    }

    /// Typed mutable view; `None` if `T` does not match the stored type.
    pub fn as_mut_slice<T: AttrElement>(&mut self) -> Option<&mut [T]> {
        match self {
            AttrArray::Bool(v) => downcast_mut_slice(v),
            AttrArray::Int(v) => downcast_mut_slice(v),
            AttrArray::Float(v) => downcast_mut_slice(v),
            AttrArray::Vec2(v) => downcast_mut_slice(v),
            AttrArray::Vec3(v) => downcast_mut_slice(v),
            AttrArray::Color(v) => downcast_mut_slice(v),
        }
    }

    pub fn value(&self, index: usize) -> AttrValue {
        match self {
            AttrArray::Bool(v) => AttrValue::Bool(v[index]),
            AttrArray::Int(v) => AttrValue::Int(v[index]),
            AttrArray::Float(v) => AttrValue::Float(v[index]),
            AttrArray::Vec2(v) => AttrValue::Vec2(v[index]),
            AttrArray::Vec3(v) => AttrValue::Vec3(v[index]),
            AttrArray::Color(v) => AttrValue::Color(v[index]),
        }
    }

    /// Store a value at `index`; `false` on a type mismatch.
    pub fn set_value(&mut self, index: usize, value: AttrValue) -> bool {
        match (self, value) {
            (AttrArray::Bool(v), AttrValue::Bool(x)) => v[index] = x,
            (AttrArray::Int(v), AttrValue::Int(x)) => v[index] = x,
            (AttrArray::Float(v), AttrValue::Float(x)) => v[index] = x,
            (AttrArray::Vec2(v), AttrValue::Vec2(x)) => v[index] = x,
            (AttrArray::Vec3(v), AttrValue::Vec3(x)) => v[index] = x,
            (AttrArray::Color(v), AttrValue::Color(x)) => v[index] = x,
            _ => return false,
        }
        true
    }

    /// Append the type's default value.
    pub fn push_default(&mut self) {
        match self {
            AttrArray::Bool(v) => v.push(false),
            AttrArray::Int(v) => v.push(0),
            AttrArray::Float(v) => v.push(0.0),
            AttrArray::Vec2(v) => v.push(DVec2::ZERO),
            AttrArray::Vec3(v) => v.push(DVec3::ZERO),
            AttrArray::Color(v) => v.push(DVec4::ZERO),
        }
    }
}
