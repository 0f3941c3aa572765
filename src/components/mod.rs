pub mod attraction;
pub mod layout;
pub mod ui;

pub(crate) use attraction::AttractionList;
pub use layout::{Header, Loading, Navigation};
