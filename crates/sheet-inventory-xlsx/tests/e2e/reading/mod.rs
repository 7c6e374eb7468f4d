//! Reading tests - verify that the reader maps XLSX content into the model.

mod data_types;
mod errors;
mod formulas;
mod number_formats;
mod workbook;
