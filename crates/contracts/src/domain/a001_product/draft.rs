use super::aggregate::{Product, ProductId};
use crate::domain::a002_characteristic::{CharacteristicDef, CharacteristicLibrary, Selection};

/// Режим формы товара: создание или правка существующей записи.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    Creating,
    Editing(ProductId),
}

/// Черновик одной характеристики внутри формы.
#[derive(Debug, Clone)]
pub struct CharacteristicDraft {
    pub name: String,
    /// Снимок опций библиотеки на момент открытия формы
    /// плюс опции, добавленные в самой форме.
    pub options: Vec<String>,
    pub selected: Vec<Selection>,
}

impl CharacteristicDraft {
    fn from_library(entry: &CharacteristicDef, selected: Vec<Selection>) -> Self {
        Self {
            name: entry.name.clone(),
            options: entry.options.clone(),
            selected,
        }
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.iter().any(|s| s.option == option)
    }

    /// Список опций для отрисовки: объединение опций библиотеки и опций
    /// черновика, без дубликатов. Библиотека могла уйти вперёд, если другой
    /// товар добавил опции после открытия этой формы.
    pub fn render_options(&self, library: &CharacteristicLibrary) -> Vec<String> {
        let mut merged: Vec<String> = library
            .get(&self.name)
            .map(|e| e.options.clone())
            .unwrap_or_default();
        for option in &self.options {
            if !merged.iter().any(|o| o == option) {
                merged.push(option.clone());
            }
        }
        merged
    }
}

/// Переходное состояние формы создания/правки товара.
///
/// Живёт только пока форма открыта; отбрасывается при сохранении и отмене.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub mode: DraftMode,
    pub name: String,
    /// Цена как строка, до валидации.
    pub price: String,
    pub category: String,
    pub characteristics: Vec<CharacteristicDraft>,
}

impl ProductDraft {
    /// Форма нового товара: снимок всей библиотеки, ничего не выбрано.
    pub fn for_create(library: &CharacteristicLibrary) -> Self {
        Self {
            mode: DraftMode::Creating,
            name: String::new(),
            price: String::new(),
            category: String::new(),
            characteristics: library
                .entries()
                .iter()
                .map(|e| CharacteristicDraft::from_library(e, Vec::new()))
                .collect(),
        }
    }

    /// Форма правки: тот же снимок библиотеки, выбранные значения берутся
    /// из кодированных пар товара.
    pub fn for_edit(product: &Product, library: &CharacteristicLibrary) -> Self {
        Self {
            mode: DraftMode::Editing(product.id),
            name: product.name.clone(),
            price: product.current_price.to_string(),
            category: product.category.clone(),
            characteristics: library
                .entries()
                .iter()
                .map(|e| {
                    let selected = product
                        .characteristics
                        .iter()
                        .filter_map(|raw| Selection::parse(raw))
                        .filter(|s| s.belongs_to(&e.name))
                        .collect();
                    CharacteristicDraft::from_library(e, selected)
                })
                .collect(),
        }
    }

    pub fn characteristic(&self, name: &str) -> Option<&CharacteristicDraft> {
        self.characteristics.iter().find(|c| c.name == name)
    }

    /// Добавить характеристику. Пустые и уже существующие в черновике имена
    /// отклоняются молча. Возвращает принятое имя, чтобы вызывающий
    /// зарегистрировал его и в общей библиотеке.
    pub fn add_characteristic(&mut self, raw: &str) -> Option<String> {
        let name = raw.trim();
        if name.is_empty() || self.characteristic(name).is_some() {
            return None;
        }
        self.characteristics.push(CharacteristicDraft {
            name: name.to_string(),
            options: Vec::new(),
            selected: Vec::new(),
        });
        Some(name.to_string())
    }

    /// Добавить опцию к характеристике черновика. Дубликат — no-op.
    /// Возвращает принятую опцию для регистрации в библиотеке.
    pub fn add_option(&mut self, characteristic: &str, raw: &str) -> Option<String> {
        let option = raw.trim();
        if option.is_empty() {
            return None;
        }
        let draft = self
            .characteristics
            .iter_mut()
            .find(|c| c.name == characteristic)?;
        if draft.options.iter().any(|o| o == option) {
            return None;
        }
        draft.options.push(option.to_string());
        Some(option.to_string())
    }

    /// Выбрать/снять опцию.
    pub fn toggle_option(&mut self, characteristic: &str, option: &str) {
        let Some(draft) = self
            .characteristics
            .iter_mut()
            .find(|c| c.name == characteristic)
        else {
            return;
        };
        if let Some(pos) = draft.selected.iter().position(|s| s.option == option) {
            draft.selected.remove(pos);
        } else {
            draft.selected.push(Selection::new(characteristic, option));
        }
    }

    pub fn parsed_price(&self) -> Option<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre es obligatorio".into());
        }
        if self.price.trim().is_empty() {
            return Err("El precio es obligatorio".into());
        }
        if self.parsed_price().is_none() {
            return Err("El precio debe ser un número no negativo".into());
        }
        if self.category.trim().is_empty() {
            return Err("La categoría es obligatoria".into());
        }
        Ok(())
    }

    /// Итоговый массив характеристик товара: конкатенация кодированных
    /// выбранных пар всех характеристик черновика.
    pub fn flattened_characteristics(&self) -> Vec<String> {
        self.characteristics
            .iter()
            .flat_map(|c| c.selected.iter().map(Selection::encode))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library_with_color() -> CharacteristicLibrary {
        let mut lib = CharacteristicLibrary::new();
        lib.ensure_entry("Color");
        lib.add_option("Color", "Rojo");
        lib.add_option("Color", "Negro");
        lib
    }

    #[test]
    fn create_snapshots_whole_library_with_nothing_selected() {
        let lib = library_with_color();
        let draft = ProductDraft::for_create(&lib);
        assert_eq!(draft.characteristics.len(), 1);
        let color = draft.characteristic("Color").unwrap();
        assert_eq!(color.options, vec!["Rojo", "Negro"]);
        assert!(color.selected.is_empty());
    }

    #[test]
    fn duplicate_characteristic_name_is_rejected() {
        let lib = CharacteristicLibrary::new();
        let mut draft = ProductDraft::for_create(&lib);
        assert_eq!(draft.add_characteristic(" Color "), Some("Color".into()));
        assert_eq!(draft.add_characteristic("Color"), None);
        assert_eq!(draft.add_characteristic("   "), None);
        assert_eq!(draft.characteristics.len(), 1);
    }

    #[test]
    fn duplicate_option_is_rejected() {
        let lib = CharacteristicLibrary::new();
        let mut draft = ProductDraft::for_create(&lib);
        draft.add_characteristic("Color");
        assert_eq!(draft.add_option("Color", "Rojo"), Some("Rojo".into()));
        assert_eq!(draft.add_option("Color", " Rojo "), None);
        assert_eq!(draft.add_option("Color", ""), None);
        assert_eq!(draft.characteristic("Color").unwrap().options, vec!["Rojo"]);
    }

    #[test]
    fn toggle_adds_then_removes_selection() {
        let lib = library_with_color();
        let mut draft = ProductDraft::for_create(&lib);
        draft.toggle_option("Color", "Rojo");
        assert!(draft.characteristic("Color").unwrap().is_selected("Rojo"));
        draft.toggle_option("Color", "Rojo");
        assert!(!draft.characteristic("Color").unwrap().is_selected("Rojo"));
    }

    #[test]
    fn toggle_on_unknown_characteristic_is_noop() {
        let lib = CharacteristicLibrary::new();
        let mut draft = ProductDraft::for_create(&lib);
        draft.toggle_option("Medida", "120x210");
        assert!(draft.characteristics.is_empty());
    }

    #[test]
    fn flattened_characteristics_encode_all_selections() {
        let lib = library_with_color();
        let mut draft = ProductDraft::for_create(&lib);
        draft.add_characteristic("Medida");
        draft.add_option("Medida", "120x210");
        draft.toggle_option("Color", "Rojo");
        draft.toggle_option("Medida", "120x210");
        assert_eq!(
            draft.flattened_characteristics(),
            vec!["Color:Rojo", "Medida:120x210"]
        );
    }

    #[test]
    fn edit_round_trip_restores_selections() {
        let lib = library_with_color();
        let product = Product::new_for_insert(
            "Puerta".into(),
            String::new(),
            "Puertas".into(),
            85000.0,
            vec!["Color:Rojo".into(), "Aluminio".into()],
        );
        let draft = ProductDraft::for_edit(&product, &lib);
        assert_eq!(draft.mode, DraftMode::Editing(product.id));
        assert_eq!(draft.price, "85000");
        let color = draft.characteristic("Color").unwrap();
        assert_eq!(color.selected, vec![Selection::new("Color", "Rojo")]);
    }

    #[test]
    fn render_options_merges_library_and_draft() {
        let mut lib = library_with_color();
        let mut draft = ProductDraft::for_create(&lib);
        // другой товар дописал опцию в библиотеку после открытия формы
        lib.add_option("Color", "Blanco");
        draft.add_option("Color", "Verde");
        let color = draft.characteristic("Color").unwrap();
        assert_eq!(
            color.render_options(&lib),
            vec!["Rojo", "Negro", "Blanco", "Verde"]
        );
    }

    #[test]
    fn validate_requires_name_price_category() {
        let lib = CharacteristicLibrary::new();
        let mut draft = ProductDraft::for_create(&lib);
        assert!(draft.validate().is_err());
        draft.name = "Puerta".into();
        draft.price = "85000".into();
        draft.category = "Puertas".into();
        assert!(draft.validate().is_ok());

        draft.price = "no-numérico".into();
        assert!(draft.validate().is_err());
        draft.price = "-5".into();
        assert!(draft.validate().is_err());
    }
}
