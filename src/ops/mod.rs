pub mod filter;
pub mod selection;
pub mod session;
pub mod task_store;
