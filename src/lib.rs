// library crate for bdisp
// exposes the rule engine and dispatcher to the binary and integration tests

pub mod cli;
pub mod conditions;
pub mod config;
pub mod dispatch;
pub mod launcher;
pub mod logging;
pub mod store;
