use super::state::create_state;
use crate::domain::a001_product::ui::details::ProductDetails;
use crate::shared::components::table::format_price;
use crate::shared::components::PageHeader;
use crate::shared::icons::icon;
use crate::usecases::u501_bulk_price_adjustment::BulkAdjustmentDialog;
use contracts::domain::a001_product::{Product, ProductId};
use contracts::domain::a002_characteristic::selection::display_label;
use leptos::prelude::*;

/// Сколько характеристик показывать в строке таблицы; остальное — "+N".
const BADGES_SHOWN: usize = 2;

#[derive(Clone, Debug)]
struct ProductRow {
    id: ProductId,
    name: String,
    brand: String,
    category: String,
    price: f64,
    badges: Vec<String>,
    hidden_badges: usize,
    updated_at: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            brand: if p.brand.is_empty() {
                "-".to_string()
            } else {
                p.brand.clone()
            },
            category: p.category.clone(),
            price: p.current_price,
            badges: p
                .characteristics
                .iter()
                .take(BADGES_SHOWN)
                .map(|c| display_label(c).to_string())
                .collect(),
            hidden_badges: p.characteristics.len().saturating_sub(BADGES_SHOWN),
            updated_at: format_timestamp(p.metadata.updated_at),
        }
    }
}

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

#[component]
#[allow(non_snake_case)]
pub fn ProductList() -> impl IntoView {
    let state = create_state();
    let (show_bulk, set_show_bulk) = signal(false);
    let (show_details, set_show_details) = signal(false);
    let (editing_product, set_editing_product) = signal::<Option<ProductId>>(None);

    let handle_create_new = move || {
        set_editing_product.set(None);
        set_show_details.set(true);
    };

    let handle_edit = move |id: ProductId| {
        if state.get().get(&id).is_some() {
            set_editing_product.set(Some(id));
            set_show_details.set(true);
        }
    };

    let handle_delete = move |id: ProductId, name: String| {
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message(&format!("¿Eliminar \"{}\"?", name))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        state.update(|s| s.delete_product(&id));
        log::info!("producto eliminado: {}", name);
    };

    view! {
        <div class="page">
            <PageHeader title="Listado de Precios" subtitle="Gestión de precios de productos".to_string()>
                <button class="button button--secondary" on:click=move |_| set_show_bulk.set(true)>
                    {icon("settings")}
                    {"Ajuste Masivo"}
                </button>
                <button class="button button--primary" on:click=move |_| handle_create_new()>
                    {icon("plus")}
                    {"Nuevo producto"}
                </button>
            </PageHeader>

            <div class="search-bar">
                <span class="search-bar__icon">{icon("search")}</span>
                <input
                    class="search-bar__input"
                    type="text"
                    placeholder="Buscar por nombre, marca o categoría..."
                    prop:value=move || state.get().search
                    on:input=move |ev| {
                        state.update(|s| s.set_search(event_target_value(&ev)));
                    }
                />
            </div>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Producto"}</th>
                            <th class="table__header-cell">{"Marca"}</th>
                            <th class="table__header-cell">{"Categoría"}</th>
                            <th class="table__header-cell">{"Características"}</th>
                            <th class="table__header-cell table__header-cell--right">{"Precio Actual"}</th>
                            <th class="table__header-cell">{"Actualizado"}</th>
                            <th class="table__header-cell table__header-cell--actions">{"Acciones"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let snapshot = state.get();
                            let rows: Vec<(ProductRow, bool, String)> = snapshot
                                .filtered()
                                .into_iter()
                                .map(|p| {
                                    (
                                        ProductRow::from(p),
                                        snapshot.is_editing(&p.id),
                                        snapshot.inline.temp_value.clone(),
                                    )
                                })
                                .collect();
                            rows.into_iter().map(|(row, is_editing, temp_value)| {
                                let id = row.id;
                                let name_for_delete = row.name.clone();
                                let price_cell = if is_editing {
                                    view! {
                                        <div class="price-editor">
                                            <input
                                                class="form__input price-editor__input"
                                                type="number"
                                                prop:value=temp_value
                                                on:input=move |ev| {
                                                    state.update(|s| s.set_temp_price(event_target_value(&ev)));
                                                }
                                            />
                                            <button
                                                class="button button--icon button--confirm"
                                                title="Guardar"
                                                on:click=move |_| state.update(|s| s.save_price_edit())
                                            >
                                                {icon("check")}
                                            </button>
                                            <button
                                                class="button button--icon"
                                                title="Cancelar"
                                                on:click=move |_| state.update(|s| s.cancel_price_edit())
                                            >
                                                {icon("x")}
                                            </button>
                                        </div>
                                    }.into_any()
                                } else {
                                    view! {
                                        <div class="price-cell">
                                            <span class="price-cell__value">{format_price(row.price)}</span>
                                            <button
                                                class="button button--icon price-cell__edit"
                                                title="Editar precio"
                                                on:click=move |_| state.update(|s| s.start_price_edit(id))
                                            >
                                                {icon("dollar")}
                                            </button>
                                        </div>
                                    }.into_any()
                                };

                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell table__cell--name">{row.name.clone()}</td>
                                        <td class="table__cell">{row.brand}</td>
                                        <td class="table__cell">
                                            <span class="badge badge--outline">{row.category}</span>
                                        </td>
                                        <td class="table__cell">
                                            <div class="badge-list">
                                                {row.badges.into_iter().map(|b| view! {
                                                    <span class="badge badge--secondary">{b}</span>
                                                }).collect_view()}
                                                {(row.hidden_badges > 0).then(|| view! {
                                                    <span class="badge badge--secondary">{format!("+{}", row.hidden_badges)}</span>
                                                })}
                                            </div>
                                        </td>
                                        <td class="table__cell table__cell--right">{price_cell}</td>
                                        <td class="table__cell table__cell--muted">{row.updated_at}</td>
                                        <td class="table__cell table__cell--actions">
                                            <button
                                                class="button button--icon"
                                                title="Editar"
                                                on:click=move |_| handle_edit(id)
                                            >
                                                {icon("edit")}
                                            </button>
                                            <button
                                                class="button button--icon button--danger"
                                                title="Eliminar"
                                                on:click=move |_| handle_delete(id, name_for_delete.clone())
                                            >
                                                {icon("delete")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                </table>
            </div>

            <Show when=move || show_details.get()>
                {move || {
                    let id = editing_product.get();
                    view! {
                        <ProductDetails
                            state=state
                            id=id
                            on_close=Callback::new(move |_| set_show_details.set(false))
                        />
                    }
                }}
            </Show>

            <Show when=move || show_bulk.get()>
                {move || view! {
                    <BulkAdjustmentDialog
                        state=state
                        on_close=Callback::new(move |_| set_show_bulk.set(false))
                    />
                }}
            </Show>
        </div>
    }
}
