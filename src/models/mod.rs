pub mod date_window;
pub mod record;

pub use date_window::*;
pub use record::*;
