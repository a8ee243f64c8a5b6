use crate::Db;
use crate::types::{ProductRow, SummaryRow};
use catalog_core::{
    models::{ProductData, ProductSummary},
    ports::{ProductFailure, ProductRepository, Record},
};

// Appended to every mutation.
const RETURNING: &str = "returning id, name, price, availability, created_at, updated_at";

impl ProductRepository for Db {
    async fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> Result<Result<Record<Self>, ProductFailure>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            select
                id, name, price, availability, created_at, updated_at
            from
                product
            where
                id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into).ok_or(ProductFailure::DoesNotExist))
    }

    async fn query_products(&self) -> Result<Vec<ProductSummary<Self::ProductId>>, Self::Error> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            select
                id, name, price, availability
            from
                product
            order by
                id desc
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_product(
        &self,
        data: ProductData,
        as_of: Self::DateTime,
    ) -> Result<Record<Self>, Self::Error> {
        let sql = format!(
            r#"
            insert into
                product (name, price, availability, created_at, updated_at)
            values
                ($1, $2, $3, $4, $4)
            {RETURNING}
            "#
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(data.name)
            .bind(data.price)
            .bind(data.availability)
            .bind(as_of)
            .fetch_one(&self.writer)
            .await?;

        Ok(row.into())
    }

    async fn update_product(
        &self,
        product_id: Self::ProductId,
        data: ProductData,
        as_of: Self::DateTime,
    ) -> Result<Result<Record<Self>, ProductFailure>, Self::Error> {
        let sql = format!(
            r#"
            update
                product
            set
                name = $2,
                price = $3,
                availability = $4,
                updated_at = $5
            where
                id = $1
            {RETURNING}
            "#
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product_id)
            .bind(data.name)
            .bind(data.price)
            .bind(data.availability)
            .bind(as_of)
            .fetch_optional(&self.writer)
            .await?;

        Ok(row.map(Into::into).ok_or(ProductFailure::DoesNotExist))
    }

    async fn toggle_availability(
        &self,
        product_id: Self::ProductId,
        as_of: Self::DateTime,
    ) -> Result<Result<Record<Self>, ProductFailure>, Self::Error> {
        let sql = format!(
            r#"
            update
                product
            set
                availability = not availability,
                updated_at = $2
            where
                id = $1
            {RETURNING}
            "#
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product_id)
            .bind(as_of)
            .fetch_optional(&self.writer)
            .await?;

        Ok(row.map(Into::into).ok_or(ProductFailure::DoesNotExist))
    }

    async fn delete_product(
        &self,
        product_id: Self::ProductId,
    ) -> Result<Result<Record<Self>, ProductFailure>, Self::Error> {
        let sql = format!(
            r#"
            delete from
                product
            where
                id = $1
            {RETURNING}
            "#
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product_id)
            .fetch_optional(&self.writer)
            .await?;

        Ok(row.map(Into::into).ok_or(ProductFailure::DoesNotExist))
    }
}
