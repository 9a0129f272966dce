//! Trade submission: client-side validation and the ticket state machine

pub mod ticket;
pub mod validate;

pub use ticket::{TicketState, TradeTicket};
pub use validate::{validate_quantity, MAX_TRADE_QUANTITY};
