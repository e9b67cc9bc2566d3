use leptos::prelude::*;

/// Radio button component
#[component]
pub fn Radio(
    /// Label text
    #[prop(into)]
    label: Signal<String>,
    /// Radio value
    #[prop(into)]
    value: String,
    /// Current selected value
    #[prop(into)]
    checked_value: Signal<String>,
    /// Change event handler
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    /// Name attribute (for grouping)
    #[prop(into)]
    name: String,
) -> impl IntoView {
    let value_for_check = value.clone();
    let value_for_change = value.clone();
    let is_checked = move || checked_value.get() == value_for_check;

    view! {
        <label class="form__radio-wrapper">
            <input
                type="radio"
                class="form__radio"
                name=name
                value=value
                prop:checked=is_checked
                on:change=move |_| {
                    if let Some(handler) = on_change {
                        handler.run(value_for_change.clone());
                    }
                }
            />
            <span class="form__radio-label">{label}</span>
        </label>
    }
}

/// Radio group component
#[component]
pub fn RadioGroup(
    /// Label for the group
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Current selected value
    #[prop(into)]
    value: Signal<String>,
    /// Change event handler
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    /// Name attribute (for grouping)
    #[prop(into)]
    name: String,
    /// Options: Vec of (value, label) tuples
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label">{l}</label>
            })}
            <div class="form__radio-group">
                <For
                    each=move || options.get()
                    key=|(val, _)| val.clone()
                    children=move |(val, lbl)| {
                        let on_change_inner = move |new_val: String| {
                            if let Some(handler) = on_change {
                                handler.run(new_val);
                            }
                        };
                        view! {
                            <Radio
                                label=lbl
                                value=val
                                checked_value=value
                                on_change=Callback::new(on_change_inner)
                                name=name.clone()
                            />
                        }
                    }
                />
            </div>
        </div>
    }
}
