//! Screen state, system wiring and process-wide setup.

pub mod catalog;
pub mod dashboard;
pub mod my_orders;
pub mod notice;
pub mod order_board;
pub mod storefront;
pub mod telemetry;

pub use catalog::*;
pub use dashboard::*;
pub use my_orders::*;
pub use notice::*;
pub use order_board::*;
pub use storefront::*;
pub use telemetry::*;
