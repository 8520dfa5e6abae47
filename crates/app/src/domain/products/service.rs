//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        catalog::initial_catalog,
        errors::ProductsServiceError,
        models::{Product, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ProductsServiceError> {
        let term = term.trim();

        if term.is_empty() {
            return self.list_products().await;
        }

        let pattern = escape_like(term);

        let mut tx = self.db.begin().await?;

        let products = self.repository.search_products(&mut tx, &pattern).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn seed_initial_products(&self) -> Result<u64, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self.repository.count_products(&mut tx).await?;

        if existing > 0 {
            tx.commit().await?;

            return Ok(0);
        }

        let mut inserted = 0_u64;

        for product in initial_catalog() {
            self.repository.create_product(&mut tx, &product).await?;

            inserted += 1;
        }

        tx.commit().await?;

        tracing::info!(inserted, "seeded initial product catalogue");

        Ok(inserted)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List the full catalogue.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// List products whose title contains `term` (case-insensitive).
    ///
    /// A blank term behaves like `list_products`.
    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Insert the built-in catalogue when no products exist yet.
    ///
    /// Returns the number of products inserted; zero means the catalogue was
    /// already populated and nothing changed.
    async fn seed_initial_products(&self) -> Result<u64, ProductsServiceError>;
}

/// Escape LIKE wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_passes_plain_terms_through() {
        assert_eq!(escape_like("laptop"), "laptop");
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%_deal"), "100\\%\\_deal");
    }

    #[test]
    fn escape_like_escapes_backslashes() {
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
