//! House lookup with placeholder defaults.

use async_graphql::{Object, SimpleObject};

#[derive(SimpleObject, Debug, PartialEq)]
pub struct House {
    pub brand: String,
    #[graphql(name = "type")]
    pub kind: String,
}

#[derive(Default)]
pub struct HouseQuery;

#[Object]
impl HouseQuery {
    async fn house_handler(
        &self,
        brand: Option<String>,
        #[graphql(name = "type")] kind: Option<String>,
    ) -> House {
        House {
            brand: brand
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Sydney".to_string()),
            kind: kind
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "House".to_string()),
        }
    }
}
