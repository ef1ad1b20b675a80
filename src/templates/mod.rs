pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{bar, card, metric_tile, optional};
pub use layouts::desktop::desktop_layout;
