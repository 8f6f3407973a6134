pub mod load;
pub mod model;

pub use load::load_settings;
pub use model::Settings;
