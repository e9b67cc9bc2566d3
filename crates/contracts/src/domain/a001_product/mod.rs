pub mod aggregate;
pub mod draft;
pub mod search;

pub use aggregate::{Product, ProductId};
pub use draft::{CharacteristicDraft, DraftMode, ProductDraft};
