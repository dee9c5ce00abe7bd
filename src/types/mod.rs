pub mod condition;
pub mod forecast;
pub mod observation;
pub mod tide;
