pub mod clock;
pub mod memory_repo;
