mod json;
mod text;
mod xlsx;

pub use json::{process_cell_value, results_to_json, serialize_to_json, OrderedSheetData};
pub use text::render_text;
pub use xlsx::export_xlsx;
