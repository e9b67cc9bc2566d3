//! u501: диалог массовой корректировки цен.
//!
//! Логика сценария живёт в contracts; здесь — ViewModel с сигналами
//! и само окно.

mod view_model;
mod widget;

pub use view_model::BulkAdjustmentViewModel;
pub use widget::BulkAdjustmentDialog;
