use crate::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Товар в прайс-листе.
///
/// `characteristics` — упорядоченный список строк: либо голая метка
/// (исторические данные вроде "Aluminio"), либо кодированная пара
/// `"имя:опция"` из библиотеки характеристик.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    pub name: String,

    #[serde(default)]
    pub brand: String,

    pub category: String,

    // Цена всегда неотрицательная
    #[serde(rename = "currentPrice")]
    pub current_price: f64,

    #[serde(default)]
    pub characteristics: Vec<String>,

    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Product {
    pub fn new_for_insert(
        name: String,
        brand: String,
        category: String,
        current_price: f64,
        characteristics: Vec<String>,
    ) -> Self {
        Self {
            id: ProductId::new_v4(),
            name,
            brand,
            category,
            current_price,
            characteristics,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Заменить цену и обновить метаданные.
    pub fn set_price(&mut self, price: f64) {
        self.current_price = price;
        self.metadata.touch();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre no puede estar vacío".into());
        }
        if self.category.trim().is_empty() {
            return Err("La categoría no puede estar vacía".into());
        }
        if !self.current_price.is_finite() || self.current_price < 0.0 {
            return Err("El precio debe ser un número no negativo".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product::new_for_insert(
            "Puerta Principal Modelo A".into(),
            "Aluar".into(),
            "Puertas".into(),
            85000.0,
            vec!["Aluminio".into(), "Doble vidrio".into()],
        )
    }

    #[test]
    fn fresh_products_get_distinct_ids() {
        assert_ne!(sample().id, sample().id);
    }

    #[test]
    fn set_price_touches_metadata() {
        let mut p = sample();
        let before = p.metadata.updated_at;
        p.set_price(90000.0);
        assert_eq!(p.current_price, 90000.0);
        assert!(p.metadata.updated_at >= before);
    }

    #[test]
    fn validate_rejects_blanks_and_negative_price() {
        let mut p = sample();
        p.name = "   ".into();
        assert!(p.validate().is_err());

        let mut p = sample();
        p.category = String::new();
        assert!(p.validate().is_err());

        let mut p = sample();
        p.current_price = -1.0;
        assert!(p.validate().is_err());

        assert!(sample().validate().is_ok());
    }

    #[test]
    fn serializes_with_historical_field_names() {
        let p = sample();
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("currentPrice").is_some());
        assert!(json.get("characteristics").is_some());
        assert_eq!(json["brand"], "Aluar");
    }
}
