pub mod cancel;
pub mod order;
pub mod portfolio;
pub mod set_price;
pub mod stocks;
pub mod trades;
pub mod version;
pub mod watch;
