pub mod a001_product;
pub mod a002_characteristic;
pub mod common;
