//! Card data: the Scryfall-shaped card record, identifier normalization,
//! and the lookup resolver seam.

mod ident;
mod model;
mod resolver;

pub use ident::normalize_card_id;
pub use model::{Card, CardFace, Color, ImageUris, Prices};
pub use resolver::{CardResolver, LookupError};
