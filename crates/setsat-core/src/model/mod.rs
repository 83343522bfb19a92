pub mod attribute;
pub mod card;
pub mod deck;
