pub mod drive;
pub mod in_memory;
pub mod scripted;
pub mod sheets;
