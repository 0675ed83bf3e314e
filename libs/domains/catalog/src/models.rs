use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};

/// Document body as stored under a product key.
///
/// The key is never part of the body. Fields the caller omitted are left out
/// of the stored document rather than written as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Product fields accepted by `createProduct` and `updateProduct`.
#[derive(Debug, Clone, Default, PartialEq, InputObject)]
pub struct ProductInput {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub tags: Option<Vec<String>>,
}

/// A product as returned by the API: the stored body plus its key.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct Product {
    /// Key the body is stored under
    pub id: String,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub tags: Option<Vec<String>>,
}

impl From<ProductInput> for ProductBody {
    fn from(input: ProductInput) -> Self {
        Self {
            name: input.name,
            price: input.price,
            quantity: input.quantity,
            tags: input.tags,
        }
    }
}

impl Product {
    pub fn from_body(id: impl Into<String>, body: ProductBody) -> Self {
        Self {
            id: id.into(),
            name: body.name,
            price: body.price,
            quantity: body.quantity,
            tags: body.tags,
        }
    }

    /// The stored fields of this product, without its key.
    pub fn body(&self) -> ProductBody {
        ProductBody {
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
            tags: self.tags.clone(),
        }
    }
}
