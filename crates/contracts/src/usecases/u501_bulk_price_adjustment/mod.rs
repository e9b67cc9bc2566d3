//! u501: массовая корректировка цен по марке и категории.
//!
//! Двухфазный сценарий: подбор фильтров и значения → предпросмотр
//! затронутых товаров → фиксация. Фиксация атомарна: либо пересчитываются
//! все затронутые цены, либо ни одной.

use crate::domain::a001_product::Product;
use crate::usecases::common::{UseCaseError, UseCaseMetadata, UseCaseResult};
use serde::{Deserialize, Serialize};

/// Значение фильтра "все марки" / "все категории".
pub const FILTER_ALL: &str = "all";

/// Тип корректировки: процент от текущей цены или фиксированная сумма.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Percentage,
    Fixed,
}

/// Состояние сценария массовой корректировки.
///
/// `value` хранится строкой до валидации; `confirming` — флаг фазы
/// предпросмотра.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkPriceAdjustment {
    pub brand: String,
    pub category: String,
    pub kind: AdjustmentKind,
    pub value: String,
    pub confirming: bool,
}

impl Default for BulkPriceAdjustment {
    fn default() -> Self {
        Self {
            brand: FILTER_ALL.to_string(),
            category: FILTER_ALL.to_string(),
            kind: AdjustmentKind::Percentage,
            value: String::new(),
            confirming: false,
        }
    }
}

impl UseCaseMetadata for BulkPriceAdjustment {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "bulk_price_adjustment"
    }

    fn display_name() -> &'static str {
        "Ajuste Masivo de Precios"
    }
}

impl BulkPriceAdjustment {
    fn matches(&self, product: &Product) -> bool {
        (self.brand == FILTER_ALL || product.brand == self.brand)
            && (self.category == FILTER_ALL || product.category == self.category)
    }

    /// Товары, которые затронет корректировка при текущих фильтрах.
    /// Пересчитывается при каждом обращении, порядок хранилища сохраняется.
    pub fn affected<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    pub fn parsed_value(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Проекция новой цены. Нечитаемое значение оставляет цену как есть.
    ///
    /// Округление — `f64::round`, то есть half-away-from-zero:
    /// 0.5 уходит от нуля.
    pub fn project(&self, price: f64) -> f64 {
        let Some(value) = self.parsed_value() else {
            return price;
        };
        match self.kind {
            AdjustmentKind::Percentage => (price * (1.0 + value / 100.0)).round(),
            AdjustmentKind::Fixed => (price + value).round(),
        }
    }

    /// Переход к предпросмотру разрешён, когда значение заполнено и есть
    /// хотя бы один затронутый товар.
    pub fn can_confirm(&self, products: &[Product]) -> bool {
        !self.value.trim().is_empty() && products.iter().any(|p| self.matches(p))
    }

    /// Фаза редактирования → предпросмотр. UI блокирует кнопку сам, но
    /// переход дополнительно отклоняется здесь.
    pub fn begin_confirm(&mut self, products: &[Product]) -> bool {
        if !self.can_confirm(products) {
            return false;
        }
        self.confirming = true;
        true
    }

    /// Предпросмотр → редактирование. Фильтры и значение сохраняются,
    /// чтобы пользователь мог их поправить.
    pub fn back(&mut self) {
        self.confirming = false;
    }

    /// Зафиксировать корректировку: пересчитать цену каждого затронутого
    /// товара, остальные не трогать.
    ///
    /// Если значение не разбирается числом, фиксация отменяется целиком —
    /// ни одна цена не меняется, фаза предпросмотра сохраняется. После
    /// успеха фильтры и значение сбрасываются, сценарий возвращается в
    /// фазу редактирования. Возвращает число затронутых товаров.
    pub fn apply(&mut self, products: &mut [Product]) -> UseCaseResult<usize> {
        if self.parsed_value().is_none() {
            return Err(UseCaseError::validation(
                "El valor de ajuste no es un número",
            ));
        }
        let mut adjusted = 0;
        for product in products.iter_mut() {
            if self.matches(product) {
                let new_price = self.project(product.current_price);
                product.set_price(new_price);
                adjusted += 1;
            }
        }
        self.brand = FILTER_ALL.to_string();
        self.category = FILTER_ALL.to_string();
        self.value.clear();
        self.confirming = false;
        Ok(adjusted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, brand: &str, category: &str, price: f64) -> Product {
        Product::new_for_insert(name.into(), brand.into(), category.into(), price, Vec::new())
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("Puerta Principal Modelo A", "Aluar", "Puertas", 85000.0),
            product("Ventana Corrediza Standard", "Modena", "Ventanas", 45000.0),
            product("Membrana Asfáltica Premium", "Sika", "Membranas", 12500.0),
            product("Puerta Balcón Doble Hoja", "Aluar", "Puertas", 125000.0),
        ]
    }

    fn spec(brand: &str, category: &str, kind: AdjustmentKind, value: &str) -> BulkPriceAdjustment {
        BulkPriceAdjustment {
            brand: brand.into(),
            category: category.into(),
            kind,
            value: value.into(),
            confirming: false,
        }
    }

    #[test]
    fn affected_with_both_filters_all_is_whole_store() {
        let products = catalog();
        let adj = BulkPriceAdjustment::default();
        assert_eq!(adj.affected(&products).len(), products.len());
    }

    #[test]
    fn affected_filters_by_brand_and_category() {
        let products = catalog();

        let by_brand = spec("Aluar", FILTER_ALL, AdjustmentKind::Percentage, "10");
        assert_eq!(by_brand.affected(&products).len(), 2);

        let by_category = spec(FILTER_ALL, "Membranas", AdjustmentKind::Percentage, "10");
        assert_eq!(by_category.affected(&products).len(), 1);

        let both = spec("Aluar", "Membranas", AdjustmentKind::Percentage, "10");
        assert!(both.affected(&products).is_empty());

        let brand_and_own_category = spec("Aluar", "Puertas", AdjustmentKind::Percentage, "10");
        assert_eq!(brand_and_own_category.affected(&products).len(), 2);
    }

    #[test]
    fn projection_is_deterministic() {
        let pct = spec(FILTER_ALL, FILTER_ALL, AdjustmentKind::Percentage, "5");
        assert_eq!(pct.project(85000.0), 89250.0);

        let fixed = spec(FILTER_ALL, FILTER_ALL, AdjustmentKind::Fixed, "-500");
        assert_eq!(fixed.project(85000.0), 84500.0);

        let junk = spec(FILTER_ALL, FILTER_ALL, AdjustmentKind::Percentage, "not-a-number");
        assert_eq!(junk.project(85000.0), 85000.0);
        let junk_fixed = spec(FILTER_ALL, FILTER_ALL, AdjustmentKind::Fixed, "abc");
        assert_eq!(junk_fixed.project(12500.0), 12500.0);
    }

    #[test]
    fn projection_rounds_half_away_from_zero() {
        let fixed = spec(FILTER_ALL, FILTER_ALL, AdjustmentKind::Fixed, "0.5");
        assert_eq!(fixed.project(100.0), 101.0);
        let down = spec(FILTER_ALL, FILTER_ALL, AdjustmentKind::Fixed, "-0.5");
        assert_eq!(down.project(100.0), 99.0);
    }

    #[test]
    fn begin_confirm_requires_value_and_affected() {
        let products = catalog();

        let mut blank = spec("Aluar", FILTER_ALL, AdjustmentKind::Percentage, "  ");
        assert!(!blank.begin_confirm(&products));
        assert!(!blank.confirming);

        let mut empty_set = spec("Aluar", "Membranas", AdjustmentKind::Percentage, "10");
        assert!(!empty_set.begin_confirm(&products));
        assert!(!empty_set.confirming);

        let mut ok = spec("Aluar", FILTER_ALL, AdjustmentKind::Percentage, "10");
        assert!(ok.begin_confirm(&products));
        assert!(ok.confirming);
    }

    #[test]
    fn back_keeps_filters_and_value() {
        let products = catalog();
        let mut adj = spec("Aluar", FILTER_ALL, AdjustmentKind::Percentage, "10");
        adj.begin_confirm(&products);
        adj.back();
        assert!(!adj.confirming);
        assert_eq!(adj.brand, "Aluar");
        assert_eq!(adj.value, "10");
    }

    #[test]
    fn apply_adjusts_only_affected_and_resets_spec() {
        let mut products = catalog();
        let mut adj = spec("Aluar", FILTER_ALL, AdjustmentKind::Percentage, "10");
        adj.begin_confirm(&products);

        let adjusted = adj.apply(&mut products).unwrap();
        assert_eq!(adjusted, 2);
        assert_eq!(products[0].current_price, 93500.0);
        assert_eq!(products[3].current_price, 137500.0);
        // не затронутые товары не меняются
        assert_eq!(products[1].current_price, 45000.0);
        assert_eq!(products[2].current_price, 12500.0);

        // после фиксации сценарий возвращается к значениям по умолчанию
        assert_eq!(adj.brand, FILTER_ALL);
        assert_eq!(adj.category, FILTER_ALL);
        assert!(adj.value.is_empty());
        assert!(!adj.confirming);
    }

    #[test]
    fn apply_with_unparseable_value_changes_nothing() {
        let mut products = catalog();
        let before: Vec<f64> = products.iter().map(|p| p.current_price).collect();

        let mut adj = spec("Aluar", FILTER_ALL, AdjustmentKind::Percentage, "10");
        adj.begin_confirm(&products);
        adj.value = "garbage".into();

        let result = adj.apply(&mut products);
        assert!(result.is_err());
        let after: Vec<f64> = products.iter().map(|p| p.current_price).collect();
        assert_eq!(before, after);
        // фаза предпросмотра сохраняется
        assert!(adj.confirming);
        assert_eq!(adj.brand, "Aluar");
    }

    #[test]
    fn fixed_adjustment_applies_to_every_matching_product() {
        let mut products = catalog();
        let mut adj = spec(FILTER_ALL, "Puertas", AdjustmentKind::Fixed, "-500");
        adj.begin_confirm(&products);
        assert_eq!(adj.apply(&mut products).unwrap(), 2);
        assert_eq!(products[0].current_price, 84500.0);
        assert_eq!(products[3].current_price, 124500.0);
    }
}
