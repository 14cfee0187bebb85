pub mod clock;
pub mod repo;
