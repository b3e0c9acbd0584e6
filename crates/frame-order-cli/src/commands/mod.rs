pub mod evaluate;
pub mod matrix;
