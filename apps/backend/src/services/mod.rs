pub mod comparison;
pub mod passages;
