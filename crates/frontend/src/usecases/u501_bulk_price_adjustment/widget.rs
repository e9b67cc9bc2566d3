use super::view_model::BulkAdjustmentViewModel;
use crate::domain::a001_product::ui::list::PriceListState;
use crate::shared::components::table::format_price;
use crate::shared::components::ui::{Button, Input, RadioGroup, Select};
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_bulk_price_adjustment::{
    AdjustmentKind, BulkPriceAdjustment, FILTER_ALL,
};
use leptos::prelude::*;

/// В предпросмотре показываем не больше 5 строк.
const PREVIEW_ROWS: usize = 5;

#[component]
#[allow(non_snake_case)]
pub fn BulkAdjustmentDialog(
    state: RwSignal<PriceListState>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = BulkAdjustmentViewModel::new(state);

    let brand_options = Signal::derive(move || {
        let mut options = vec![(FILTER_ALL.to_string(), "Todas las marcas".to_string())];
        options.extend(state.get().brands().into_iter().map(|b| (b.clone(), b)));
        options
    });
    let category_options = Signal::derive(move || {
        let mut options = vec![(FILTER_ALL.to_string(), "Todas las categorías".to_string())];
        options.extend(state.get().categories().into_iter().map(|c| (c.clone(), c)));
        options
    });
    let kind_options = Signal::derive(|| {
        vec![
            ("percentage".to_string(), "Porcentaje (%)".to_string()),
            ("fixed".to_string(), "Monto Fijo ($)".to_string()),
        ]
    });
    let kind_value = Signal::derive(move || {
        match vm.spec.get().kind {
            AdjustmentKind::Percentage => "percentage",
            AdjustmentKind::Fixed => "fixed",
        }
        .to_string()
    });
    let value_label = Signal::derive(move || {
        match vm.spec.get().kind {
            AdjustmentKind::Percentage => "Porcentaje de ajuste",
            AdjustmentKind::Fixed => "Monto de ajuste",
        }
        .to_string()
    });
    let value_placeholder = Signal::derive(move || {
        match vm.spec.get().kind {
            AdjustmentKind::Percentage => "ej: 5 o -10",
            AdjustmentKind::Fixed => "ej: 1000 o -500",
        }
        .to_string()
    });

    view! {
        <Modal title=BulkPriceAdjustment::display_name().to_string() on_close=on_close>
            <p class="modal__description">{"Selecciona los filtros y el tipo de ajuste a aplicar"}</p>

            // фаза редактирования
            <Show when=move || !vm.confirming()>
                <div class="bulk-form">
                    <div class="bulk-form__filters">
                        <Select
                            label="Marca".to_string()
                            value=Signal::derive(move || vm.spec.get().brand.clone())
                            on_change=Callback::new(move |v| vm.set_brand(v))
                            options=brand_options
                        />
                        <Select
                            label="Categoría".to_string()
                            value=Signal::derive(move || vm.spec.get().category.clone())
                            on_change=Callback::new(move |v| vm.set_category(v))
                            options=category_options
                        />
                    </div>
                    <RadioGroup
                        label="Tipo de Ajuste".to_string()
                        name="adjustment-kind"
                        value=kind_value
                        on_change=Callback::new(move |v| vm.set_kind(v))
                        options=kind_options
                    />
                    <Input
                        label=value_label
                        input_type="number".to_string()
                        value=Signal::derive(move || vm.spec.get().value.clone())
                        on_input=Callback::new(move |v| vm.set_value(v))
                        placeholder=value_placeholder
                    />
                    <div class="bulk-form__notice">
                        {icon("dollar")}
                        <span>
                            {"Se aplicará a "}
                            <strong>{move || vm.affected_count()}</strong>
                            {" productos"}
                        </span>
                    </div>
                    <div class="details-actions">
                        <Button variant="secondary".to_string() on_click=Callback::new(move |_| on_close.run(()))>
                            {"Cancelar"}
                        </Button>
                        <Button
                            on_click=Callback::new(move |_| vm.continue_command())
                            disabled=Signal::derive(move || !vm.can_confirm())
                        >
                            {"Continuar"}
                        </Button>
                    </div>
                </div>
            </Show>

            // фаза предпросмотра
            <Show when=move || vm.confirming()>
                <div class="bulk-confirm">
                    <div class="bulk-form__notice">
                        {icon("trending-up")}
                        <strong>{"Confirmación de cambios:"}</strong>
                    </div>
                    <div class="bulk-confirm__rows">
                        {move || {
                            let rows = vm.preview();
                            let total = rows.len();
                            let shown = rows
                                .into_iter()
                                .take(PREVIEW_ROWS)
                                .map(|(name, old_price, new_price)| view! {
                                    <div class="bulk-confirm__row">
                                        <span class="bulk-confirm__name">{name}</span>
                                        <div class="bulk-confirm__prices">
                                            <span>{format_price(old_price)}</span>
                                            <span class="bulk-confirm__arrow">{"→"}</span>
                                            <strong>{format_price(new_price)}</strong>
                                        </div>
                                    </div>
                                })
                                .collect_view();
                            view! {
                                <>
                                    {shown}
                                    {(total > PREVIEW_ROWS).then(|| view! {
                                        <p class="bulk-confirm__more">
                                            {format!("... y {} productos más", total - PREVIEW_ROWS)}
                                        </p>
                                    })}
                                </>
                            }
                        }}
                    </div>
                    <div class="details-actions">
                        <Button variant="secondary".to_string() on_click=Callback::new(move |_| vm.back_command())>
                            {icon("x")}
                            {"Volver"}
                        </Button>
                        <Button on_click=Callback::new(move |_| {
                            vm.confirm_command(Callback::new(move |_| on_close.run(())));
                        })>
                            {icon("check")}
                            {"Confirmar"}
                        </Button>
                    </div>
                </div>
            </Show>
        </Modal>
    }
}
