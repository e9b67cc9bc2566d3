use crate::domain::a001_product::ui::list::PriceListState;
use contracts::domain::a001_product::draft::DraftMode;
use contracts::domain::a001_product::{ProductDraft, ProductId};
use contracts::shared::text::capitalize_first;
use leptos::prelude::*;
use std::collections::HashMap;

/// ViewModel формы товара: черновик, ошибка и буферы ввода для новых
/// характеристик и опций.
///
/// Черновик — снимок библиотеки на момент открытия; общая библиотека
/// обновляется сразу при добавлении имён и опций, ещё до сохранения
/// товара.
#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub store: RwSignal<PriceListState>,
    pub draft: RwSignal<ProductDraft>,
    pub error: RwSignal<Option<String>>,
    pub new_characteristic: RwSignal<String>,
    pub option_inputs: RwSignal<HashMap<String, String>>,
}

impl ProductDetailsViewModel {
    /// `id == None` — создание; иначе правка существующего товара.
    pub fn new(store: RwSignal<PriceListState>, id: Option<ProductId>) -> Self {
        let draft = {
            let state = store.get_untracked();
            match id.and_then(|id| state.get(&id).cloned()) {
                Some(product) => ProductDraft::for_edit(&product, &state.library),
                None => ProductDraft::for_create(&state.library),
            }
        };
        Self {
            store,
            draft: RwSignal::new(draft),
            error: RwSignal::new(None),
            new_characteristic: RwSignal::new(String::new()),
            option_inputs: RwSignal::new(HashMap::new()),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.draft.get_untracked().mode, DraftMode::Editing(_))
    }

    pub fn is_form_valid(&self) -> bool {
        self.draft.get().validate().is_ok()
    }

    pub fn set_name(&self, value: String) {
        self.draft.update(|d| d.name = capitalize_first(&value));
    }

    pub fn set_price(&self, value: String) {
        self.draft.update(|d| d.price = value);
    }

    pub fn set_category(&self, value: String) {
        self.draft.update(|d| d.category = capitalize_first(&value));
    }

    pub fn set_new_characteristic(&self, value: String) {
        self.new_characteristic.set(capitalize_first(&value));
    }

    pub fn option_input(&self, characteristic: &str) -> String {
        self.option_inputs
            .get()
            .get(characteristic)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_option_input(&self, characteristic: &str, value: String) {
        self.option_inputs.update(|inputs| {
            inputs.insert(characteristic.to_string(), capitalize_first(&value));
        });
    }

    /// Добавить характеристику из буфера ввода. Пустое или повторное имя
    /// отклоняется молча, буфер при этом не очищается. Принятое имя
    /// регистрируется и в общей библиотеке.
    pub fn add_characteristic(&self) {
        let raw = self.new_characteristic.get_untracked();
        let mut accepted = None;
        self.draft.update(|d| accepted = d.add_characteristic(&raw));
        if let Some(name) = accepted {
            self.store.update(|s| s.register_characteristic(&name));
            self.new_characteristic.set(String::new());
        }
    }

    /// Добавить опцию из буфера характеристики. Пустой ввод — no-op;
    /// дубликат не добавляется, но буфер очищается. Принятая опция
    /// регистрируется и в общей библиотеке.
    pub fn add_option(&self, characteristic: &str) {
        let raw = self.option_input(characteristic);
        if raw.trim().is_empty() {
            return;
        }
        let mut accepted = None;
        self.draft
            .update(|d| accepted = d.add_option(characteristic, &raw));
        if let Some(option) = accepted {
            self.store.update(|s| s.register_option(characteristic, &option));
        }
        self.option_inputs.update(|inputs| {
            inputs.insert(characteristic.to_string(), String::new());
        });
    }

    pub fn toggle_option(&self, characteristic: &str, option: &str) {
        self.draft.update(|d| d.toggle_option(characteristic, option));
    }

    /// Зафиксировать черновик в хранилище. Невалидная форма оставляет
    /// окно открытым и показывает причину.
    pub fn save_command(&self, on_saved: Callback<()>) {
        let draft = self.draft.get_untracked();
        let mut outcome: Result<ProductId, String> = Err(String::new());
        self.store.update(|s| outcome = s.commit_draft(&draft));
        match outcome {
            Ok(_) => on_saved.run(()),
            Err(message) => self.error.set(Some(message)),
        }
    }
}
