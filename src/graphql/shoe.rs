//! Shoe lookup with placeholder defaults.

use async_graphql::{Object, SimpleObject};

#[derive(SimpleObject, Debug, PartialEq)]
pub struct Shoe {
    pub brand: String,
    #[graphql(name = "type")]
    pub kind: String,
}

#[derive(Default)]
pub struct ShoeQuery;

#[Object]
impl ShoeQuery {
    async fn shoe_handler(
        &self,
        brand: Option<String>,
        #[graphql(name = "type")] kind: Option<String>,
    ) -> Shoe {
        Shoe {
            brand: brand
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Adidas".to_string()),
            kind: kind
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "athletic".to_string()),
        }
    }
}
