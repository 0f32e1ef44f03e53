pub mod amount;
pub mod percentage;
pub mod price;

pub use amount::Amount;
pub use percentage::Percentage;
pub use price::{Price, PriceQuotes};
