// Application Layer - Use Cases

pub mod locator;
pub mod setup;

// Re-exports
pub use locator::BinaryLocator;
pub use setup::SetupOptions;
