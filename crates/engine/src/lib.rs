//! Roster engine: the pure part of the bulk student import.
//!
//! Rows come in as loosely-typed header → value maps (`RawRow`), get checked
//! against a fixed rule table (`validation`) and mapped onto the canonical
//! record the portal accepts (`normalize`). Nothing here touches files or
//! the network.

pub mod batch;
pub mod field;
pub mod normalize;
pub mod options;
pub mod row;
pub mod template;
pub mod validation;
pub mod value;

pub use batch::UploadBatch;
pub use field::Field;
pub use normalize::{normalize_row, normalize_rows, NormalizedStudent, StudentName};
pub use options::{ImportOptions, ZeroCgpa};
pub use row::RawRow;
pub use validation::{validate_row, validate_rows, ValidationError};
pub use value::CellValue;
