pub mod coupon_repo;

pub use coupon_repo::*;
