use std::sync::Arc;

use anyhow::Result;
use itertools::Itertools;
use parking_lot::RwLock;

use crate::model::{generate_product_id, NewProduct, Product, ProductId, ProductPatch};
use crate::store::traits::{pick_free_id, IdGen, ProductStore};

/// Product store living entirely in process memory. Contents last for the
/// process lifetime only; reads never fail.
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    id_gen: IdGen,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    /// Start from a fixed collection, e.g. seed data.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self::with_id_gen(products, Arc::new(generate_product_id))
    }

    pub fn with_id_gen(products: Vec<Product>, id_gen: IdGen) -> Self {
        Self {
            products: RwLock::new(products),
            id_gen,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ProductStore for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().clone())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.products.read().iter().find(|p| p.id == id).cloned())
    }

    async fn create_product(&self, new: NewProduct) -> Result<Product> {
        let mut products = self.products.write();
        let id = pick_free_id(&products, &self.id_gen)?;
        let product = Product {
            id,
            name: new.name,
            kind: new.kind,
            price: new.price,
        };
        products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>> {
        let mut products = self.products.write();
        match products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                product.apply(patch);
                Ok(Some(product.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool> {
        let mut products = self.products.write();
        match products.iter().position(|p| p.id == id) {
            Some(index) => {
                products.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_product_types(&self) -> Result<Vec<String>> {
        Ok(self
            .products
            .read()
            .iter()
            .map(|p| p.kind.clone())
            .unique()
            .collect())
    }
}
