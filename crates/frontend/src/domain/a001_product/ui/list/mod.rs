mod state;
mod widget;

pub use state::{create_state, PriceListState};
pub use widget::ProductList;
