use super::view_model::ProductDetailsViewModel;
use crate::domain::a001_product::ui::list::PriceListState;
use crate::shared::components::ui::{Button, Checkbox, Input};
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use contracts::domain::a001_product::ProductId;
use leptos::prelude::*;

#[component]
pub fn ProductDetails(
    state: RwSignal<PriceListState>,
    id: Option<ProductId>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = ProductDetailsViewModel::new(state, id);
    let title = if vm.is_edit_mode() {
        "Editar producto"
    } else {
        "Nuevo producto"
    };
    let save_label = if vm.is_edit_mode() { "Guardar" } else { "Crear" };

    view! {
        <Modal title=title.to_string() on_close=on_close>
            <div class="details-form">
                {move || vm.error.get().map(|e| view! {
                    <div class="form__error">{e}</div>
                })}

                <Input
                    label="Nombre".to_string()
                    value=Signal::derive(move || vm.draft.get().name.clone())
                    on_input=Callback::new(move |v| vm.set_name(v))
                    placeholder="Nombre del producto".to_string()
                />
                <Input
                    label="Precio".to_string()
                    input_type="number".to_string()
                    value=Signal::derive(move || vm.draft.get().price.clone())
                    on_input=Callback::new(move |v| vm.set_price(v))
                    placeholder="Precio en pesos".to_string()
                />
                <Input
                    label="Categoría".to_string()
                    value=Signal::derive(move || vm.draft.get().category.clone())
                    on_input=Callback::new(move |v| vm.set_category(v))
                    placeholder="Categoría del producto".to_string()
                />

                <div class="characteristics">
                    <div class="characteristics__add">
                        <Input
                            value=Signal::derive(move || vm.new_characteristic.get())
                            on_input=Callback::new(move |v| vm.set_new_characteristic(v))
                            placeholder="Nueva característica general (ej: Color)".to_string()
                        />
                        <Button variant="secondary".to_string() on_click=Callback::new(move |_| vm.add_characteristic())>
                            {icon("plus")}
                            {"Agregar característica"}
                        </Button>
                    </div>

                    <For
                        each=move || {
                            vm.draft
                                .get()
                                .characteristics
                                .iter()
                                .map(|c| c.name.clone())
                                .collect::<Vec<_>>()
                        }
                        key=|name| name.clone()
                        children=move |name: String| {
                            view! { <CharacteristicEditor vm=vm name=name /> }
                        }
                    />
                </div>
            </div>

            <div class="details-actions">
                <Button
                    on_click=Callback::new(move |_| {
                        vm.save_command(Callback::new(move |_| on_close.run(())));
                    })
                    disabled=Signal::derive(move || !vm.is_form_valid())
                >
                    {icon("check")}
                    {save_label}
                </Button>
                <Button variant="secondary".to_string() on_click=Callback::new(move |_| on_close.run(()))>
                    {"Cancelar"}
                </Button>
            </div>
        </Modal>
    }
}

/// Блок одной характеристики: добавление опций и выбор значений.
#[component]
fn CharacteristicEditor(vm: ProductDetailsViewModel, name: String) -> impl IntoView {
    let store = vm.store;
    let name_options = name.clone();
    let name_value = name.clone();
    let name_input = name.clone();
    let name_enter = name.clone();
    let name_add = name.clone();
    let name_rows = name.clone();

    // объединение опций библиотеки и опций черновика
    let options = Signal::derive(move || {
        let state = store.get();
        vm.draft
            .get()
            .characteristic(&name_options)
            .map(|c| c.render_options(&state.library))
            .unwrap_or_default()
    });

    view! {
        <div class="characteristic-card">
            <div class="characteristic-card__name">{name.clone()}</div>
            <div class="characteristic-card__add">
                <input
                    class="form__input"
                    type="text"
                    placeholder=format!("Nueva opción para {}", name)
                    prop:value=move || vm.option_input(&name_value)
                    on:input=move |ev| {
                        vm.set_option_input(&name_input, event_target_value(&ev));
                    }
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            vm.add_option(&name_enter);
                        }
                    }
                />
                <button
                    class="button button--secondary"
                    title="Agregar opción"
                    on:click=move |_| vm.add_option(&name_add)
                >
                    {icon("plus")}
                </button>
            </div>
            <div class="characteristic-card__options">
                <For
                    each=move || options.get()
                    key=|option| option.clone()
                    children=move |option: String| {
                        let name_checked = name_rows.clone();
                        let option_checked = option.clone();
                        let name_toggle = name_rows.clone();
                        let option_toggle = option.clone();
                        let checked = Signal::derive(move || {
                            vm.draft
                                .get()
                                .characteristic(&name_checked)
                                .map(|c| c.is_selected(&option_checked))
                                .unwrap_or(false)
                        });
                        view! {
                            <Checkbox
                                label=option.clone()
                                checked=checked
                                on_change=Callback::new(move |_| {
                                    vm.toggle_option(&name_toggle, &option_toggle);
                                })
                            />
                        }
                    }
                />
            </div>
        </div>
    }
}
