pub mod portfolio;
pub mod price;
