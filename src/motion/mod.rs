pub mod compositor;
pub mod pose;
