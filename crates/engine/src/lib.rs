pub mod cell;
pub mod sheet;

pub use cell::{CellValue, Fill};
pub use sheet::Sheet;
