//! Order record and related types.

mod model;
mod state;
mod value_objects;

pub use model::{Order, PaymentDetails};
pub use state::OrderStatus;
pub use value_objects::{Money, PaymentMethod, UnsupportedPaymentMethod};
