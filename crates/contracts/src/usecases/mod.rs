pub mod common;
pub mod u501_bulk_price_adjustment;
