use crate::domain::a001_product::ui::list::ProductList;
use leptos::prelude::*;

/// Единственный экран приложения — прайс-лист.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <ProductList />
    }
}
