use crate::domain::a001_product::ui::list::PriceListState;
use contracts::usecases::common::UseCaseResult;
use contracts::usecases::u501_bulk_price_adjustment::{AdjustmentKind, BulkPriceAdjustment};
use leptos::prelude::*;

/// ViewModel диалога массовой корректировки: спецификация сценария
/// в сигнале плюс производные наборы для предпросмотра.
#[derive(Clone, Copy)]
pub struct BulkAdjustmentViewModel {
    pub store: RwSignal<PriceListState>,
    pub spec: RwSignal<BulkPriceAdjustment>,
}

impl BulkAdjustmentViewModel {
    pub fn new(store: RwSignal<PriceListState>) -> Self {
        Self {
            store,
            spec: RwSignal::new(BulkPriceAdjustment::default()),
        }
    }

    pub fn set_brand(&self, brand: String) {
        self.spec.update(|a| a.brand = brand);
    }

    pub fn set_category(&self, category: String) {
        self.spec.update(|a| a.category = category);
    }

    pub fn set_kind(&self, raw: String) {
        let kind = match raw.as_str() {
            "fixed" => AdjustmentKind::Fixed,
            _ => AdjustmentKind::Percentage,
        };
        self.spec.update(|a| a.kind = kind);
    }

    pub fn set_value(&self, value: String) {
        self.spec.update(|a| a.value = value);
    }

    pub fn confirming(&self) -> bool {
        self.spec.get().confirming
    }

    pub fn affected_count(&self) -> usize {
        let state = self.store.get();
        self.spec.get().affected(&state.products).len()
    }

    /// Строки предпросмотра: (название, старая цена, новая цена).
    pub fn preview(&self) -> Vec<(String, f64, f64)> {
        let state = self.store.get();
        let spec = self.spec.get();
        spec.affected(&state.products)
            .into_iter()
            .map(|p| (p.name.clone(), p.current_price, spec.project(p.current_price)))
            .collect()
    }

    pub fn can_confirm(&self) -> bool {
        let state = self.store.get();
        self.spec.get().can_confirm(&state.products)
    }

    /// Редактирование → предпросмотр. Без значения или с пустым
    /// затронутым набором переход отклоняется.
    pub fn continue_command(&self) {
        let products = self.store.get_untracked().products;
        self.spec.update(|a| {
            a.begin_confirm(&products);
        });
    }

    pub fn back_command(&self) {
        self.spec.update(|a| a.back());
    }

    /// Зафиксировать корректировку. При успехе диалог закрывается через
    /// `on_done`; при нечитаемом значении ничего не меняется и окно
    /// остаётся в предпросмотре.
    pub fn confirm_command(&self, on_done: Callback<()>) {
        let mut spec = self.spec.get_untracked();
        let mut outcome: UseCaseResult<usize> = Ok(0);
        self.store.update(|s| outcome = spec.apply(&mut s.products));
        self.spec.set(spec);
        match outcome {
            Ok(count) => {
                log::info!("ajuste masivo aplicado a {} productos", count);
                on_done.run(());
            }
            Err(err) => {
                log::warn!("ajuste masivo rechazado: {}", err);
            }
        }
    }
}
