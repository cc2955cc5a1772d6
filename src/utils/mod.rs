//! Small helpers shared across modules

mod common;
mod id_gen;

pub use common::{DISPLAY_DATE_FORMAT, format_datetime, mask_string, now};
pub use id_gen::{generate_entry_id, is_valid_entry_id};
