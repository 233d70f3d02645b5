pub mod browse;

pub use browse::{endpoint_handler, root_handler};
