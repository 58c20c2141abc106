//! GraphQL query service for the static showcase objects.
//!
//! One query object per domain file, merged into a single root the same way
//! the REST handlers are split per resource. Served as plain JSON over POST
//! with a GraphiQL page on GET.

mod car;
mod house;
mod shoe;

pub use car::{Car, CarKind, CarQuery};
pub use house::{House, HouseQuery};
pub use shoe::{Shoe, ShoeQuery};

use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema};
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};

#[derive(MergedObject, Default)]
pub struct QueryRoot(CarQuery, HouseQuery, ShoeQuery);

pub type PortfolioSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema() -> PortfolioSchema {
    Schema::build(QueryRoot::default(), EmptyMutation, EmptySubscription).finish()
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/").finish())
}

async fn execute(
    State(schema): State<PortfolioSchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(schema.execute(request).await)
}

pub fn graphql_routes(schema: PortfolioSchema) -> Router {
    Router::new()
        .route("/", get(graphiql).post(execute))
        .with_state(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn run(query: &str) -> serde_json::Value {
        let response = build_schema().execute(query).await;
        assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
        response.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn honda_ev_resolves_to_clarity() {
        let data = run(r#"{ carHandler(brand: "Honda", type: EV) { brand type } }"#).await;
        assert_eq!(data, json!({"carHandler": {"brand": "Clarity", "type": "EV"}}));
    }

    #[tokio::test]
    async fn honda_non_ev_resolves_to_civic() {
        let data = run(r#"{ carHandler(brand: "Honda", type: Diesel) { brand type } }"#).await;
        assert_eq!(data, json!({"carHandler": {"brand": "Civic", "type": "Gas"}}));
    }

    #[tokio::test]
    async fn unknown_brand_falls_back_to_prius() {
        let data = run(r#"{ carHandler(brand: "Toyota") { brand type } }"#).await;
        assert_eq!(data, json!({"carHandler": {"brand": "Prius", "type": "Diesel"}}));
    }

    #[tokio::test]
    async fn house_and_shoe_defaults_apply() {
        let data = run("{ houseHandler { brand type } shoeHandler { brand type } }").await;
        assert_eq!(
            data,
            json!({
                "houseHandler": {"brand": "Sydney", "type": "House"},
                "shoeHandler": {"brand": "Adidas", "type": "athletic"}
            })
        );
    }

    #[tokio::test]
    async fn explicit_house_args_are_returned() {
        let data = run(r#"{ houseHandler(brand: "Melbourne", type: "Apartment") { brand type } }"#)
            .await;
        assert_eq!(
            data,
            json!({"houseHandler": {"brand": "Melbourne", "type": "Apartment"}})
        );
    }
}
