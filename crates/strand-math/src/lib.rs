pub mod frame;
pub mod mix;

pub use glam::{DMat3, DMat4, DQuat, DVec2, DVec3, DVec4};

pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
pub type Color4 = DVec4;
