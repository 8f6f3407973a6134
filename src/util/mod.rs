pub mod copy;
pub mod paths;
