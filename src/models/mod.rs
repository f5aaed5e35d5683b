pub mod date;
pub mod stats;
pub mod subscription;
pub mod user;

pub use date::parse_day;
pub use stats::*;
pub use subscription::*;
pub use user::*;
