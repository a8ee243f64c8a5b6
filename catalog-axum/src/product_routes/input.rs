//! Validated inputs of the product endpoints.
//!
//! Each type lists the rule chains of its route and converts the raw request
//! into domain values once the rules pass. The messages are part of the public
//! contract and must not change.

use crate::validation::{
    Chain, FieldError, Input, Location, Validate, boolean, coerce_number, number, text,
};
use aide::{OperationInput, generate::GenContext, openapi::Operation};
use axum::{Json, extract::Path};
use catalog_core::models::{ProductData, ValidationError};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

pub(crate) const ID_INVALID: &str = "ID no valido";
pub(crate) const NAME_EMPTY: &str = "El nombre del producto no puede ir vacio";
pub(crate) const PRICE_NOT_NUMERIC: &str = "Valor no Valido";
pub(crate) const PRICE_EMPTY: &str = "El precio de Producto no puede ir vacio";
pub(crate) const PRICE_INVALID: &str = "precio no Valido";
pub(crate) const AVAILABILITY_INVALID: &str = "Valor para disponibilidad no valido";

fn greater_than_zero(value: Option<&Value>) -> bool {
    coerce_number(value) > 0.0
}

fn id_chain() -> Chain {
    Chain::param("id").is_int(ID_INVALID)
}

fn name_chain() -> Chain {
    Chain::body("name").not_empty(NAME_EMPTY)
}

fn price_chain() -> Chain {
    Chain::body("price")
        .is_numeric(PRICE_NOT_NUMERIC)
        .not_empty(PRICE_EMPTY)
        .custom(greater_than_zero, PRICE_INVALID)
}

fn availability_chain() -> Chain {
    Chain::body("availability").is_boolean(AVAILABILITY_INVALID)
}

fn parse_id<I: FromStr>(input: &Input) -> Result<I, FieldError> {
    let value = input.get(Location::Params, "id");
    text(value)
        .parse()
        .map_err(|_| FieldError::new(Location::Params, "id", value, ID_INVALID))
}

fn product_data(input: &Input, availability: bool) -> Result<ProductData, FieldError> {
    let name = input.get(Location::Body, "name");
    let price = input.get(Location::Body, "price");
    let parsed = number(price)
        .ok_or_else(|| FieldError::new(Location::Body, "price", price, PRICE_NOT_NUMERIC))?;

    ProductData::new(text(name), parsed, availability).map_err(|err| match err {
        ValidationError::EmptyName => FieldError::new(Location::Body, "name", name, NAME_EMPTY),
        ValidationError::InvalidPrice(_) => {
            FieldError::new(Location::Body, "price", price, PRICE_INVALID)
        }
    })
}

/// Path parameters of the `/{id}` routes.
#[derive(Deserialize, JsonSchema)]
#[schemars(inline)]
#[allow(dead_code)]
struct IdParam {
    /// The unique identifier of the product
    id: i64,
}

/// Request body for creating a product.
#[derive(Deserialize, JsonSchema)]
#[allow(dead_code)]
struct CreateProductBody {
    /// The product name
    name: String,
    /// The product price, greater than zero
    price: f64,
    /// Whether the product is available (defaults to true)
    availability: Option<bool>,
}

/// Request body for replacing a product.
#[derive(Deserialize, JsonSchema)]
#[allow(dead_code)]
struct UpdateProductBody {
    /// The product name
    name: String,
    /// The product price, greater than zero
    price: f64,
    /// Whether the product is available
    availability: bool,
}

/// Input of the routes that only take an id.
pub(crate) struct ProductPath<I> {
    pub id: I,
}

impl<I: FromStr> Validate for ProductPath<I> {
    fn chains() -> Vec<Chain> {
        vec![id_chain()]
    }

    fn build(input: &Input) -> Result<Self, FieldError> {
        Ok(Self {
            id: parse_id(input)?,
        })
    }

    fn document(ctx: &mut GenContext, operation: &mut Operation) {
        Path::<IdParam>::operation_input(ctx, operation);
    }
}

/// Input of the create route. A boolean-like `availability` is honoured,
/// anything else leaves the default of `true`.
pub(crate) struct CreateProduct {
    pub data: ProductData,
}

impl Validate for CreateProduct {
    fn chains() -> Vec<Chain> {
        vec![name_chain(), price_chain()]
    }

    fn build(input: &Input) -> Result<Self, FieldError> {
        let availability = boolean(input.get(Location::Body, "availability")).unwrap_or(true);
        Ok(Self {
            data: product_data(input, availability)?,
        })
    }

    fn document(ctx: &mut GenContext, operation: &mut Operation) {
        Json::<CreateProductBody>::operation_input(ctx, operation);
    }
}

/// Input of the full-update route.
pub(crate) struct UpdateProduct<I> {
    pub id: I,
    pub data: ProductData,
}

impl<I: FromStr> Validate for UpdateProduct<I> {
    fn chains() -> Vec<Chain> {
        vec![id_chain(), name_chain(), price_chain(), availability_chain()]
    }

    fn build(input: &Input) -> Result<Self, FieldError> {
        let availability = input.get(Location::Body, "availability");
        let availability = boolean(availability).ok_or_else(|| {
            FieldError::new(
                Location::Body,
                "availability",
                availability,
                AVAILABILITY_INVALID,
            )
        })?;
        Ok(Self {
            id: parse_id(input)?,
            data: product_data(input, availability)?,
        })
    }

    fn document(ctx: &mut GenContext, operation: &mut Operation) {
        Path::<IdParam>::operation_input(ctx, operation);
        Json::<UpdateProductBody>::operation_input(ctx, operation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;
    use rstest::rstest;
    use serde_json::json;

    fn with_id(id: &str, body: Value) -> Input {
        Input::new([("id".to_string(), id.to_string())], body)
    }

    fn messages<T: Validate>(input: &Input) -> Vec<String> {
        validate(&T::chains(), input)
            .into_iter()
            .map(|e| e.msg)
            .collect()
    }

    #[rstest]
    #[case::empty(json!({}), 4)]
    #[case::zero_price(json!({"name": "Monitor Curvo - Testing", "price": 0}), 1)]
    #[case::word_price(json!({"name": "Monitor curvo - testing", "price": "hola"}), 2)]
    #[case::missing_name(json!({"price": 10}), 1)]
    #[case::valid(json!({"name": "Mouse - Testing", "price": 400}), 0)]
    fn create_error_counts(#[case] body: Value, #[case] count: usize) {
        assert_eq!(messages::<CreateProduct>(&Input::new([], body)).len(), count);
    }

    #[test]
    fn create_empty_body_messages() {
        assert_eq!(
            messages::<CreateProduct>(&Input::new([], json!({}))),
            vec![NAME_EMPTY, PRICE_NOT_NUMERIC, PRICE_EMPTY, PRICE_INVALID]
        );
    }

    #[rstest]
    #[case::empty_valid_id("1", json!({}), 5)]
    #[case::empty_invalid_id("invalid-url", json!({}), 6)]
    #[case::invalid_id("invalid-url", json!({"name": "monitor 20 pulgadas", "availability": true, "price": 500}), 1)]
    #[case::zero_price("1", json!({"name": "Monitor curvo ", "availability": true, "price": 0}), 1)]
    #[case::bad_availability("1", json!({"name": "Monitor", "availability": "si", "price": 5}), 1)]
    #[case::valid("1", json!({"name": "Monitor curvo", "availability": true, "price": 300}), 0)]
    fn update_error_counts(#[case] id: &str, #[case] body: Value, #[case] count: usize) {
        assert_eq!(messages::<UpdateProduct<i64>>(&with_id(id, body)).len(), count);
    }

    #[test]
    fn id_error_comes_first() {
        let input = with_id("not-valid", json!({}));
        assert_eq!(messages::<UpdateProduct<i64>>(&input)[0], ID_INVALID);
        assert_eq!(messages::<ProductPath<i64>>(&input), vec![ID_INVALID]);
    }

    #[test]
    fn builds_typed_create_input() {
        let input = Input::new([], json!({"name": "Mouse", "price": "12.5"}));
        let CreateProduct { data } = CreateProduct::build(&input).unwrap();
        assert_eq!(data, ProductData::new("Mouse", 12.5, true).unwrap());

        let input = Input::new([], json!({"name": "Mouse", "price": 3, "availability": false}));
        let CreateProduct { data } = CreateProduct::build(&input).unwrap();
        assert!(!data.availability);
    }

    #[test]
    fn builds_typed_update_input() {
        let input = with_id("7", json!({"name": "Monitor", "price": 300, "availability": "false"}));
        let UpdateProduct { id, data } = UpdateProduct::<i64>::build(&input).unwrap();
        assert_eq!(id, 7);
        assert_eq!(data, ProductData::new("Monitor", 300.0, false).unwrap());
    }

    #[test]
    fn out_of_range_id_is_invalid() {
        let input = with_id("99999999999999999999", json!({}));
        assert!(validate(&ProductPath::<i64>::chains(), &input).is_empty());
        let err = ProductPath::<i64>::build(&input).err().unwrap();
        assert_eq!(err.msg, ID_INVALID);
    }
}
