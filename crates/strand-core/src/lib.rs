pub mod error;
pub mod traits;
pub mod value;

pub use error::{Result, StrandError};
pub use traits::Validate;
pub use value::{AttrArray, AttrElement, AttrType, AttrValue};
