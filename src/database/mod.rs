pub mod migrator;
pub mod pool;
