pub mod extract;
pub mod sync;
pub mod vault;
