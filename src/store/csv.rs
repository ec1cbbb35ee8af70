use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use itertools::Itertools;
use tokio::sync::Mutex;

use crate::model::{generate_product_id, NewProduct, Product, ProductId, ProductPatch};
use crate::store::traits::{pick_free_id, IdGen, ProductStore};

/// Product store backed by a flat CSV file.
///
/// Every operation re-reads the whole file and every mutation rewrites it.
/// Mutations within this process are serialized by `write_lock`; writers in
/// other processes are not coordinated with, so the last rewrite wins.
///
/// The file is never created on read: a missing or malformed file is an
/// error the caller surfaces as a server failure.
pub struct CsvStore {
    path: PathBuf,
    write_lock: Mutex<()>,
    id_gen: IdGen,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_id_gen(path, Arc::new(generate_product_id))
    }

    pub fn with_id_gen(path: impl Into<PathBuf>, id_gen: IdGen) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            id_gen,
        }
    }

    async fn read_all(&self) -> Result<Vec<Product>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let mut products = Vec::new();
        for row in reader.deserialize() {
            let product: Product =
                row.with_context(|| format!("malformed row in {}", self.path.display()))?;
            products.push(product);
        }
        Ok(products)
    }

    async fn write_all(&self, products: &[Product]) -> Result<()> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for product in products {
            writer.serialize(product)?;
        }
        let bytes = writer.into_inner()?;

        tokio::fs::write(&self.path, bytes)
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

#[async_trait::async_trait]
impl ProductStore for CsvStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.read_all().await
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let products = self.read_all().await?;
        Ok(products.into_iter().find(|p| p.id == id))
    }

    async fn create_product(&self, new: NewProduct) -> Result<Product> {
        let _guard = self.write_lock.lock().await;

        let mut products = self.read_all().await?;
        let id = pick_free_id(&products, &self.id_gen)?;
        let product = Product {
            id,
            name: new.name,
            kind: new.kind,
            price: new.price,
        };
        products.push(product.clone());
        self.write_all(&products).await?;
        Ok(product)
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>> {
        let _guard = self.write_lock.lock().await;

        let mut products = self.read_all().await?;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        product.apply(patch);
        let updated = product.clone();
        self.write_all(&products).await?;
        Ok(Some(updated))
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut products = self.read_all().await?;
        let Some(index) = products.iter().position(|p| p.id == id) else {
            return Ok(false);
        };
        products.remove(index);
        self.write_all(&products).await?;
        Ok(true)
    }

    async fn list_product_types(&self) -> Result<Vec<String>> {
        let products = self.read_all().await?;
        Ok(products.into_iter().map(|p| p.kind).unique().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SEED_CSV: &str = "id,name,type,price\n12345,Widget,Hardware,9.99\n23456,Editor,Software,49.99\n";

    fn seeded_store(dir: &tempfile::TempDir) -> CsvStore {
        let path = dir.path().join("products.csv");
        std::fs::write(&path, SEED_CSV).unwrap();
        CsvStore::new(path)
    }

    fn new_product(name: &str, kind: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            kind: kind.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("nope.csv"));
        assert!(store.list_products().await.is_err());
    }

    #[tokio::test]
    async fn malformed_row_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");
        std::fs::write(&path, "id,name,type,price\nnot-a-number,Widget,Hardware,9.99\n").unwrap();
        let store = CsvStore::new(path);
        assert!(store.list_products().await.is_err());
    }

    #[tokio::test]
    async fn lists_parsed_rows() {
        let dir = tempdir().unwrap();
        let store = seeded_store(&dir);

        let products = store.list_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 12345);
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].kind, "Hardware");
        assert_eq!(products[0].price, 9.99);
    }

    #[tokio::test]
    async fn create_appends_and_rewrites_file() {
        let dir = tempdir().unwrap();
        let store = seeded_store(&dir);

        let created = store
            .create_product(new_product("Gadget", "Hardware", 19.99))
            .await
            .unwrap();

        // A fresh store over the same path sees the new row.
        let reopened = CsvStore::new(dir.path().join("products.csv"));
        let products = reopened.list_products().await.unwrap();
        assert_eq!(products.len(), 3);
        assert!(products.iter().any(|p| p.id == created.id));
    }

    #[tokio::test]
    async fn colliding_generator_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");
        std::fs::write(&path, SEED_CSV).unwrap();
        let store = CsvStore::with_id_gen(&path, Arc::new(|| 12345_u32));

        let err = store
            .create_product(new_product("Gadget", "Hardware", 19.99))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Product with this ID already exists");

        // The file was not rewritten with a duplicate.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SEED_CSV);
    }

    #[tokio::test]
    async fn update_persists_merged_record() {
        let dir = tempdir().unwrap();
        let store = seeded_store(&dir);

        let patch = ProductPatch {
            price: Some(12.50),
            ..Default::default()
        };
        let updated = store.update_product(12345, patch).await.unwrap().unwrap();
        assert_eq!(updated.price, 12.50);
        assert_eq!(updated.name, "Widget");

        let reopened = CsvStore::new(dir.path().join("products.csv"));
        let fetched = reopened.get_product(12345).await.unwrap().unwrap();
        assert_eq!(fetched.price, 12.50);
    }

    #[tokio::test]
    async fn delete_rewrites_without_the_row() {
        let dir = tempdir().unwrap();
        let store = seeded_store(&dir);

        assert!(store.delete_product(12345).await.unwrap());
        assert!(store.get_product(12345).await.unwrap().is_none());
        assert!(!store.delete_product(12345).await.unwrap());

        let products = store.list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 23456);
    }

    #[tokio::test]
    async fn types_deduplicated_in_first_seen_order() {
        let dir = tempdir().unwrap();
        let store = seeded_store(&dir);
        store
            .create_product(new_product("Gadget", "Hardware", 19.99))
            .await
            .unwrap();

        let types = store.list_product_types().await.unwrap();
        assert_eq!(types, vec!["Hardware", "Software"]);
    }
}
