pub mod health;
pub mod splain;
