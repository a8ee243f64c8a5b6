use thiserror::Error;

/// The mutable field set of a product.
///
/// Both creation and full updates are expressed with this type. Construct it
/// with [`ProductData::new`] to have the value invariants checked.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductData {
    /// The display name, never empty
    pub name: String,
    /// The unit price, strictly greater than zero
    pub price: f64,
    /// Whether the product can currently be ordered
    pub availability: bool,
}

impl ProductData {
    /// Build a product's data, checking that the name is not empty and the
    /// price is a finite number greater than zero.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        availability: bool,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(ValidationError::InvalidPrice(price));
        }
        Ok(Self {
            name,
            price,
            availability,
        })
    }

    /// The same data with `availability` negated.
    pub fn toggled(self) -> Self {
        Self {
            availability: !self.availability,
            ..self
        }
    }
}

/// The ways in which product data may be invalid.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// The name is the empty string
    #[error("product name is empty")]
    EmptyName,
    /// The price is not a finite number above zero
    #[error("product price must be greater than zero, got {0}")]
    InvalidPrice(f64),
}

/// A stored product, as returned by single-item operations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ProductRecord<ProductId, DateTime> {
    /// The store-assigned identifier
    pub id: ProductId,
    /// The product's current fields
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: ProductData,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

impl<ProductId, DateTime> ProductRecord<ProductId, DateTime> {
    /// Drop the timestamps, keeping only the listing view.
    pub fn summary(self) -> ProductSummary<ProductId> {
        ProductSummary {
            id: self.id,
            data: self.data,
        }
    }
}

/// A stored product without its bookkeeping timestamps, as returned by listings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductSummary<ProductId> {
    /// The store-assigned identifier
    pub id: ProductId,
    /// The product's current fields
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: ProductData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        assert_eq!(
            ProductData::new("", 10.0, true),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn rejects_non_positive_price() {
        assert_eq!(
            ProductData::new("Mouse", 0.0, true),
            Err(ValidationError::InvalidPrice(0.0))
        );
        assert!(ProductData::new("Mouse", -1.5, true).is_err());
        assert!(ProductData::new("Mouse", f64::NAN, true).is_err());
    }

    #[test]
    fn whitespace_name_is_not_empty() {
        assert!(ProductData::new(" ", 1.0, false).is_ok());
    }

    #[test]
    fn toggled_flips_only_availability() {
        let data = ProductData::new("Monitor", 300.0, true).unwrap();
        let toggled = data.clone().toggled();
        assert!(!toggled.availability);
        assert_eq!(toggled.name, data.name);
        assert_eq!(toggled.clone().toggled(), data);
    }

    #[test]
    fn record_serializes_camel_case_and_flat() {
        let record = ProductRecord {
            id: 7,
            data: ProductData::new("Mouse - Testing", 400.0, true).unwrap(),
            created_at: "2024-01-01T00:00:00Z",
            updated_at: "2024-01-02T00:00:00Z",
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "name": "Mouse - Testing",
                "price": 400.0,
                "availability": true,
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-02T00:00:00Z",
            })
        );
    }

    #[test]
    fn summary_has_no_timestamps() {
        let record = ProductRecord {
            id: 1,
            data: ProductData::new("Monitor", 300.0, false).unwrap(),
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_value(record.summary()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert!(!object.contains_key("createdAt"));
        assert!(!object.contains_key("updatedAt"));
    }
}
