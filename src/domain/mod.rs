pub mod product;
pub mod cart;
pub mod coupon;
pub mod order;
pub mod stats;

pub use product::*;
pub use cart::*;
pub use coupon::*;
pub use order::*;
pub use stats::*;
