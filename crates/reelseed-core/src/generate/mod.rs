pub mod entities;
pub mod providers;
pub mod record;
pub mod relationships;
pub mod sampler;
pub mod value;
pub mod vocabulary;
