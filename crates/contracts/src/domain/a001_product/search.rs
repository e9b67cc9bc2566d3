use super::aggregate::Product;
use crate::shared::text::normalize_search;

/// Отбор товаров по строке поиска.
///
/// Товар проходит, если нормализованный запрос — подстрока
/// нормализованного имени, категории, марки или любой характеристики.
/// Пустой запрос пропускает всё. Порядок хранилища сохраняется.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = normalize_search(query);
    products
        .iter()
        .filter(|p| matches_query(p, &needle))
        .collect()
}

fn matches_query(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    normalize_search(&product.name).contains(needle)
        || normalize_search(&product.category).contains(needle)
        || normalize_search(&product.brand).contains(needle)
        || product
            .characteristics
            .iter()
            .any(|c| normalize_search(c).contains(needle))
}
