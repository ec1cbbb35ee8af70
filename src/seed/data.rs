use anyhow::Result;

use crate::model::NewProduct;
use crate::store::traits::ProductStore;

fn demo_products() -> Vec<NewProduct> {
    let entries = [
        ("Mechanical Keyboard", "Hardware", 89.99),
        ("USB-C Dock", "Hardware", 129.00),
        ("Text Editor License", "Software", 49.99),
        ("Backup Service (1yr)", "Service", 24.00),
    ];

    entries
        .into_iter()
        .map(|(name, kind, price)| NewProduct {
            name: name.to_string(),
            kind: kind.to_string(),
            price,
        })
        .collect()
}

/// Load demonstration products into the store. Ids are assigned by the
/// store like any other create.
pub async fn load_seed_data<S: ProductStore>(store: &S) -> Result<()> {
    for product in demo_products() {
        store.create_product(product).await?;
    }
    Ok(())
}
