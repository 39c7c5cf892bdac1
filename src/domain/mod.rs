pub mod user;
pub mod product;
pub mod order;
pub mod cart;

pub use user::*;
pub use product::*;
pub use order::*;
pub use cart::*;
