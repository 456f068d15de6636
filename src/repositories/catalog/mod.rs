pub mod category_repo;
pub mod sub_category_repo;
pub mod product_repo;

pub use category_repo::*;
pub use sub_category_repo::*;
pub use product_repo::*;
