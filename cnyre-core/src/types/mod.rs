pub mod column;
pub mod record;
pub mod table;
pub mod value;

pub use column::{Column, ColumnKind};
pub use record::{Category, CategoryPool, PropertyRecord};
pub use table::PropertyTable;
pub use value::{Cell, Value};
