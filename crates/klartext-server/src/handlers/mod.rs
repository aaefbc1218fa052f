pub mod chain;
pub mod health;
pub mod tokenize;
