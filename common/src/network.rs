pub mod address;
pub mod host;
