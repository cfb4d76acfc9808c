pub mod aggregate;
pub mod collection;

pub use aggregate::{
    delete_row, edit_row, Carton, CartonId, CartonRow, NewCartonEntry, RowId, ValidationError,
};
pub use collection::{filter, summarize, CartonStats};
