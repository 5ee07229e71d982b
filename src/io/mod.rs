mod data;
mod images;

pub use data::load_store;
pub use images::{ImageProbe, probe_image};
