//! Car lookup: brand plus drivetrain resolve to a model.

use async_graphql::{Enum, Object, SimpleObject};

/// Drivetrain of the car being looked up.
#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum CarKind {
    #[default]
    #[graphql(name = "EV")]
    Ev,
    #[graphql(name = "Gas")]
    Gas,
    #[graphql(name = "Diesel")]
    Diesel,
}

impl CarKind {
    fn label(self) -> &'static str {
        match self {
            CarKind::Ev => "EV",
            CarKind::Gas => "Gas",
            CarKind::Diesel => "Diesel",
        }
    }
}

#[derive(SimpleObject, Debug, PartialEq)]
pub struct Car {
    pub brand: String,
    #[graphql(name = "type")]
    pub kind: String,
}

pub(crate) fn resolve_car(brand: &str, kind: CarKind) -> Car {
    if brand == "Honda" {
        return match kind {
            CarKind::Ev => Car {
                brand: "Clarity".to_string(),
                kind: CarKind::Ev.label().to_string(),
            },
            _ => Car {
                brand: "Civic".to_string(),
                kind: CarKind::Gas.label().to_string(),
            },
        };
    }
    Car {
        brand: "Prius".to_string(),
        kind: CarKind::Diesel.label().to_string(),
    }
}

#[derive(Default)]
pub struct CarQuery;

#[Object]
impl CarQuery {
    async fn car_handler(
        &self,
        brand: String,
        #[graphql(name = "type", default)] kind: CarKind,
    ) -> Car {
        resolve_car(&brand, kind)
    }
}
