pub mod compare;
pub mod passages;
pub mod settings;
