pub mod alert;
pub mod button;
pub mod card;
pub mod spinner;

pub use alert::*;
pub use button::*;
#[allow(unused_imports)]
pub use card::*;
pub use spinner::*;
