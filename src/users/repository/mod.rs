#[cfg(any(test, not(feature = "mongodb")))]
pub mod in_memory_user_repository;
#[cfg(feature = "mongodb")]
pub mod mongo_user_repository;
pub mod user_repository;
