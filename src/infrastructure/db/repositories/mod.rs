pub mod factory;

pub use factory::Repositories;
