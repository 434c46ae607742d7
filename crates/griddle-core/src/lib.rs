#[macro_use]
mod macros;

mod dialect;
pub use dialect::Dialect;

pub mod driver;
pub use driver::{Connection, Param, Row, Rows};

mod enumerated;
pub use enumerated::{resolve, Enumerated};

mod error;
pub use error::Error;

mod field;
pub use field::{FieldDescriptor, FieldFlags};

mod value;
pub use value::{ParamType, Value, YMD_HMS};

/// A Result type alias that uses Griddle's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
