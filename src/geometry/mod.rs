pub mod canvas;
pub mod crop;
pub mod zoom;
