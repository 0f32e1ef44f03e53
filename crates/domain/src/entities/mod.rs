pub mod position;
pub mod token;

// Re-export for easier access
pub use position::{PositionId, PositionRecord};
pub use token::TokenMetadata;
