use rand::Rng;
use serde::{Deserialize, Serialize};

/// Product identifier: a five-digit integer in `[ID_MIN, ID_MAX]`.
pub type ProductId = u32;

pub const ID_MIN: ProductId = 10_000;
pub const ID_MAX: ProductId = 99_999;

/// How many candidate ids a store may draw before it gives up and reports
/// the id as already taken.
pub const MAX_ID_ATTEMPTS: usize = 32;

/// A single catalog entry. `type` is the grouping key for the
/// distinct-types listing; it is a Rust keyword, so the field is `kind`
/// and renamed on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
}

/// Fields accepted when creating a product. The id is assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
}

/// Partial update: absent fields keep their current value. The id is not
/// part of the patch and cannot be changed through one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub price: Option<f64>,
}

impl Product {
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

pub fn generate_product_id() -> ProductId {
    rand::thread_rng().gen_range(ID_MIN..=ID_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_five_digits() {
        for _ in 0..100 {
            let id = generate_product_id();
            assert!((ID_MIN..=ID_MAX).contains(&id), "id {} out of range", id);
        }
    }

    #[test]
    fn product_serializes_type_field() {
        let product = Product {
            id: 10234,
            name: "Widget".to_string(),
            kind: "Hardware".to_string(),
            price: 9.99,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["type"], "Hardware");
        assert!(json.get("kind").is_none());

        let parsed: Product = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, product);
    }

    #[test]
    fn patch_ignores_caller_supplied_id() {
        let json = serde_json::json!({"id": 99999, "price": 5.0});
        let patch: ProductPatch = serde_json::from_value(json).unwrap();
        assert_eq!(patch.price, Some(5.0));
        assert_eq!(patch.name, None);

        let mut product = Product {
            id: 10234,
            name: "Widget".to_string(),
            kind: "Hardware".to_string(),
            price: 9.99,
        };
        product.apply(patch);
        assert_eq!(product.id, 10234);
        assert_eq!(product.price, 5.0);
        assert_eq!(product.name, "Widget");
    }
}
