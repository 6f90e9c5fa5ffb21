mod catalog;

pub use catalog::CatalogManager;
