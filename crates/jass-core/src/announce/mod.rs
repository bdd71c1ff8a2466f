pub mod stock;
pub mod weis;
