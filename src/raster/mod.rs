pub mod composite;
pub mod sample;
