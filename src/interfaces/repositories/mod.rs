pub mod sqlx_repo;
pub mod image;
pub mod object_store;
pub mod image_source;
