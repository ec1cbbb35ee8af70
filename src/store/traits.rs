use anyhow::Result;

use crate::model::{NewProduct, Product, ProductId, ProductPatch, MAX_ID_ATTEMPTS};

/// Store failures the HTTP layer must tell apart from plain I/O errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Product with this ID already exists")]
    DuplicateId,
}

/// Id generator used by the stores. Injectable so tests can pin it.
pub type IdGen = std::sync::Arc<dyn Fn() -> ProductId + Send + Sync>;

/// Draw candidate ids until one is free, up to [`MAX_ID_ATTEMPTS`]. A
/// generator that keeps colliding exhausts the attempts and the create is
/// rejected as a duplicate.
pub(crate) fn pick_free_id(existing: &[Product], id_gen: &IdGen) -> Result<ProductId, StoreError> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = id_gen();
        if !existing.iter().any(|p| p.id == id) {
            return Ok(id);
        }
    }
    Err(StoreError::DuplicateId)
}

#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>>;
    /// Assign a fresh five-digit id and add the product. Fails with
    /// [`StoreError::DuplicateId`] when no free id is found.
    async fn create_product(&self, new: NewProduct) -> Result<Product>;
    /// Merge the patch over the existing record. `None` when the id is absent.
    async fn update_product(&self, id: ProductId, patch: ProductPatch)
        -> Result<Option<Product>>;
    /// `false` when the id is absent.
    async fn delete_product(&self, id: ProductId) -> Result<bool>;
    /// Distinct `type` values, in order of first appearance.
    async fn list_product_types(&self) -> Result<Vec<String>>;
}
