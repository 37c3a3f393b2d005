pub mod article_repo;
pub mod shop_repo;

pub use article_repo::ArticleRepo;
pub use shop_repo::ShopRepo;
