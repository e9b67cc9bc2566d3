use contracts::domain::a001_product::draft::DraftMode;
use contracts::domain::a001_product::search::filter_products;
use contracts::domain::a001_product::{Product, ProductDraft, ProductId};
use contracts::domain::a002_characteristic::CharacteristicLibrary;
use leptos::prelude::*;
use once_cell::sync::Lazy;

/// Демонстрационный каталог; загружается в хранилище при старте.
static DEMO_PRODUCTS: Lazy<Vec<Product>> = Lazy::new(|| {
    let p = |name: &str, brand: &str, category: &str, price: f64, chars: &[&str]| {
        Product::new_for_insert(
            name.to_string(),
            brand.to_string(),
            category.to_string(),
            price,
            chars.iter().map(|c| c.to_string()).collect(),
        )
    };
    vec![
        p(
            "Puerta Principal Modelo A",
            "Aluar",
            "Puertas",
            85000.0,
            &["Aluminio", "Doble vidrio", "120x210cm"],
        ),
        p(
            "Ventana Corrediza Standard",
            "Modena",
            "Ventanas",
            45000.0,
            &["Aluminio", "Vidrio simple", "100x120cm"],
        ),
        p(
            "Membrana Asfáltica Premium",
            "Sika",
            "Membranas",
            12500.0,
            &["4mm", "Poliéster", "10m²"],
        ),
        p(
            "Puerta Balcón Doble Hoja",
            "Aluar",
            "Puertas",
            125000.0,
            &["Aluminio", "DVH", "160x210cm"],
        ),
        p(
            "Ventana Banderola",
            "Modena",
            "Ventanas",
            32000.0,
            &["Aluminio", "Vidrio simple", "80x40cm"],
        ),
        p(
            "Membrana Líquida Elastomérica",
            "Weber",
            "Membranas",
            8900.0,
            &["Líquida", "20kg", "Blanca"],
        ),
    ]
});

/// Состояние редактирования цены в строке таблицы.
/// Единый слот на всю таблицу: редактируется максимум одна строка.
#[derive(Clone, Debug, Default)]
pub struct InlineEdit {
    pub editing: Option<ProductId>,
    pub temp_value: String,
}

/// Состояние экрана прайс-листа: хранилище товаров, библиотека
/// характеристик, строка поиска и слот построчного редактирования.
///
/// Все производные наборы (отфильтрованный список, списки марок и
/// категорий) вычисляются заново при каждом чтении.
#[derive(Clone, Debug)]
pub struct PriceListState {
    pub products: Vec<Product>,
    pub library: CharacteristicLibrary,
    pub search: String,
    pub inline: InlineEdit,
}

impl PriceListState {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            library: CharacteristicLibrary::new(),
            search: String::new(),
            inline: InlineEdit::default(),
        }
    }

    pub fn demo() -> Self {
        Self::new(DEMO_PRODUCTS.clone())
    }

    // ------------------------------------------------------------------
    // Производные представления
    // ------------------------------------------------------------------

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn filtered(&self) -> Vec<&Product> {
        filter_products(&self.products, &self.search)
    }

    /// Уникальные марки, отсортированные по алфавиту.
    pub fn brands(&self) -> Vec<String> {
        let mut brands: Vec<String> = Vec::new();
        for p in &self.products {
            if !p.brand.is_empty() && !brands.contains(&p.brand) {
                brands.push(p.brand.clone());
            }
        }
        brands.sort();
        brands
    }

    /// Уникальные категории, отсортированные по алфавиту.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for p in &self.products {
            if !p.category.is_empty() && !categories.contains(&p.category) {
                categories.push(p.category.clone());
            }
        }
        categories.sort();
        categories
    }

    // ------------------------------------------------------------------
    // Поиск
    // ------------------------------------------------------------------

    pub fn set_search(&mut self, query: String) {
        self.search = query;
    }

    // ------------------------------------------------------------------
    // Построчное редактирование цены
    // ------------------------------------------------------------------

    /// Открыть редактор цены для строки. Если другая строка уже
    /// редактировалась, её незафиксированное значение отбрасывается.
    pub fn start_price_edit(&mut self, id: ProductId) {
        let Some(price) = self.get(&id).map(|p| p.current_price) else {
            return;
        };
        self.inline.temp_value = price.to_string();
        self.inline.editing = Some(id);
    }

    pub fn set_temp_price(&mut self, value: String) {
        self.inline.temp_value = value;
    }

    pub fn is_editing(&self, id: &ProductId) -> bool {
        self.inline.editing.as_ref() == Some(id)
    }

    /// Сохранить цену из редактора. Фиксируется только конечное строго
    /// положительное число; ноль, отрицательные и нечитаемые значения
    /// отбрасываются молча. В любом случае редактор закрывается.
    pub fn save_price_edit(&mut self) {
        if let Some(id) = self.inline.editing.take() {
            if let Ok(value) = self.inline.temp_value.trim().parse::<f64>() {
                if value.is_finite() && value > 0.0 {
                    if let Some(product) = self.products.iter_mut().find(|p| p.id == id) {
                        product.set_price(value);
                        log::info!("precio actualizado: {} -> {}", product.name, value);
                    }
                }
            }
        }
        self.inline.temp_value.clear();
    }

    pub fn cancel_price_edit(&mut self) {
        self.inline.editing = None;
        self.inline.temp_value.clear();
    }

    // ------------------------------------------------------------------
    // Товары
    // ------------------------------------------------------------------

    /// Удалить товар. Несуществующий id — no-op.
    /// Библиотека характеристик при удалении не чистится.
    pub fn delete_product(&mut self, id: &ProductId) {
        self.products.retain(|p| &p.id != id);
        if self.inline.editing.as_ref() == Some(id) {
            self.cancel_price_edit();
        }
    }

    /// Зафиксировать черновик формы: обновить товар на месте либо добавить
    /// новый со свежим id. Черновик с незаполненными полями отклоняется.
    ///
    /// Форма не собирает марку: в обоих случаях записывается пустая строка.
    pub fn commit_draft(&mut self, draft: &ProductDraft) -> Result<ProductId, String> {
        draft.validate()?;
        let price = draft
            .parsed_price()
            .ok_or_else(|| "El precio debe ser un número no negativo".to_string())?;
        let characteristics = draft.flattened_characteristics();

        match draft.mode {
            DraftMode::Editing(id) => {
                let product = self
                    .products
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| "El producto ya no existe".to_string())?;
                product.name = draft.name.trim().to_string();
                product.brand = String::new();
                product.category = draft.category.trim().to_string();
                product.current_price = price;
                product.characteristics = characteristics;
                product.metadata.touch();
                log::info!("producto actualizado: {}", product.name);
                Ok(id)
            }
            DraftMode::Creating => {
                let product = Product::new_for_insert(
                    draft.name.trim().to_string(),
                    String::new(),
                    draft.category.trim().to_string(),
                    price,
                    characteristics,
                );
                let id = product.id;
                log::info!("producto creado: {}", product.name);
                self.products.push(product);
                Ok(id)
            }
        }
    }

    // ------------------------------------------------------------------
    // Библиотека характеристик
    // ------------------------------------------------------------------

    pub fn register_characteristic(&mut self, name: &str) {
        self.library.ensure_entry(name);
    }

    pub fn register_option(&mut self, name: &str, option: &str) {
        self.library.add_option(name, option);
    }
}

pub fn create_state() -> RwSignal<PriceListState> {
    RwSignal::new(PriceListState::demo())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::u501_bulk_price_adjustment::{AdjustmentKind, BulkPriceAdjustment};

    fn demo() -> PriceListState {
        PriceListState::demo()
    }

    #[test]
    fn demo_store_has_six_products() {
        assert_eq!(demo().products.len(), 6);
    }

    #[test]
    fn brand_and_category_lists_are_unique_and_sorted() {
        let state = demo();
        assert_eq!(state.brands(), vec!["Aluar", "Modena", "Sika", "Weber"]);
        assert_eq!(state.categories(), vec!["Membranas", "Puertas", "Ventanas"]);
    }

    #[test]
    fn search_is_case_and_diacritic_insensitive() {
        let mut state = demo();
        state.set_search("membrana".into());
        let found = state.filtered();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.category == "Membranas"));
    }

    #[test]
    fn inline_edit_commits_positive_price() {
        let mut state = demo();
        let id = state.products[0].id;
        state.start_price_edit(id);
        assert!(state.is_editing(&id));
        assert_eq!(state.inline.temp_value, "85000");

        state.set_temp_price("90000".into());
        state.save_price_edit();
        assert_eq!(state.get(&id).unwrap().current_price, 90000.0);
        assert!(state.inline.editing.is_none());
        assert!(state.inline.temp_value.is_empty());
    }

    #[test]
    fn inline_edit_rejects_zero_negative_and_junk() {
        for bad in ["0", "-5", "abc"] {
            let mut state = demo();
            let id = state.products[0].id;
            state.start_price_edit(id);
            state.set_temp_price(bad.into());
            state.save_price_edit();
            assert_eq!(state.get(&id).unwrap().current_price, 85000.0, "{bad}");
            assert!(state.inline.editing.is_none());
        }
    }

    #[test]
    fn opening_another_row_discards_previous_edit() {
        let mut state = demo();
        let a = state.products[0].id;
        let b = state.products[1].id;

        state.start_price_edit(a);
        state.set_temp_price("99999".into());
        // второй вызов перезаписывает слот, правка строки A пропадает
        state.start_price_edit(b);
        assert!(!state.is_editing(&a));
        assert!(state.is_editing(&b));
        assert_eq!(state.inline.temp_value, "45000");

        state.save_price_edit();
        assert_eq!(state.get(&a).unwrap().current_price, 85000.0);
        assert_eq!(state.get(&b).unwrap().current_price, 45000.0);
    }

    #[test]
    fn cancel_discards_pending_value() {
        let mut state = demo();
        let id = state.products[0].id;
        state.start_price_edit(id);
        state.set_temp_price("1".into());
        state.cancel_price_edit();
        assert_eq!(state.get(&id).unwrap().current_price, 85000.0);
        assert!(state.inline.editing.is_none());
    }

    #[test]
    fn delete_removes_by_id_and_tolerates_missing() {
        let mut state = demo();
        let id = state.products[2].id;
        state.delete_product(&id);
        assert_eq!(state.products.len(), 5);
        assert!(state.get(&id).is_none());
        // повторное удаление — no-op
        state.delete_product(&id);
        assert_eq!(state.products.len(), 5);
    }

    #[test]
    fn commit_draft_creates_product_with_flattened_characteristics() {
        let mut state = demo();
        state.register_characteristic("Color");
        state.register_option("Color", "Rojo");

        let mut draft = ProductDraft::for_create(&state.library);
        draft.name = "Puerta Plegable".into();
        draft.price = "61000".into();
        draft.category = "Puertas".into();
        draft.toggle_option("Color", "Rojo");

        let id = state.commit_draft(&draft).unwrap();
        let product = state.get(&id).unwrap();
        assert_eq!(product.current_price, 61000.0);
        assert_eq!(product.characteristics, vec!["Color:Rojo"]);
        assert_eq!(product.brand, "");
        assert_eq!(state.products.len(), 7);
    }

    #[test]
    fn commit_draft_round_trips_through_edit_form() {
        let mut state = demo();
        state.register_characteristic("Color");
        state.register_option("Color", "Rojo");

        let mut draft = ProductDraft::for_create(&state.library);
        draft.name = "Puerta Plegable".into();
        draft.price = "61000".into();
        draft.category = "Puertas".into();
        draft.toggle_option("Color", "Rojo");
        let id = state.commit_draft(&draft).unwrap();

        let reopened = ProductDraft::for_edit(state.get(&id).unwrap(), &state.library);
        let color = reopened.characteristic("Color").unwrap();
        assert!(color.is_selected("Rojo"));
        assert_eq!(color.selected.len(), 1);
    }

    #[test]
    fn commit_draft_rejects_incomplete_form() {
        let mut state = demo();
        let draft = ProductDraft::for_create(&state.library);
        assert!(state.commit_draft(&draft).is_err());
        assert_eq!(state.products.len(), 6);
    }

    #[test]
    fn commit_draft_updates_in_place_preserving_id() {
        let mut state = demo();
        let id = state.products[0].id;
        let mut draft = ProductDraft::for_edit(state.get(&id).unwrap(), &state.library);
        draft.price = "88000".into();

        assert_eq!(state.commit_draft(&draft).unwrap(), id);
        assert_eq!(state.products.len(), 6);
        let product = state.get(&id).unwrap();
        assert_eq!(product.current_price, 88000.0);
        // форма не собирает марку: запись затирается пустой строкой
        assert_eq!(product.brand, "");
    }

    // Сквозной сценарий: поиск + массовая корректировка на демо-каталоге.
    #[test]
    fn end_to_end_search_then_bulk_adjust() {
        let mut state = demo();

        state.set_search("membrana".into());
        assert_eq!(state.filtered().len(), 2);
        state.set_search(String::new());

        let mut adj = BulkPriceAdjustment {
            brand: "Aluar".into(),
            kind: AdjustmentKind::Percentage,
            value: "10".into(),
            ..Default::default()
        };
        assert_eq!(adj.affected(&state.products).len(), 2);
        assert!(adj.begin_confirm(&state.products));

        let adjusted = adj.apply(&mut state.products).unwrap();
        assert_eq!(adjusted, 2);

        let prices: Vec<f64> = state
            .products
            .iter()
            .filter(|p| p.brand == "Aluar")
            .map(|p| p.current_price)
            .collect();
        assert_eq!(prices, vec![93500.0, 137500.0]);

        // фильтры сброшены после фиксации
        assert_eq!(adj.brand, "all");
        assert_eq!(adj.category, "all");
        assert!(adj.value.is_empty());
    }
}
