use async_trait::async_trait;

use crate::{
    entities::image::{ImageRecord, NewImageRecord},
    errors::AppError,
    repositories::sqlx_repo::SqlxImageRepo,
};

#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn insert_image(&self, image: &NewImageRecord) -> Result<ImageRecord, AppError>;
}

impl SqlxImageRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxImageRepo { pool }
    }
}

#[async_trait]
impl ImageRepository for SqlxImageRepo {
    async fn insert_image(&self, image: &NewImageRecord) -> Result<ImageRecord, AppError> {
        let record = sqlx::query_as::<_, ImageRecord>(
            r#"
            INSERT INTO downloads (name, url, s3_path, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, url, s3_path, timestamp
            "#,
        )
        .bind(&image.name)
        .bind(&image.url)
        .bind(&image.s3_path)
        .bind(&image.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }
}
