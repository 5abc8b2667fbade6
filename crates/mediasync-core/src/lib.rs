pub mod config;
pub mod logging;

pub mod catalog;
pub mod crawler;
pub mod engine;
pub mod event;
pub mod ledger;
pub mod naming;
pub mod presence;
pub mod scheduler;
pub mod transfer;

#[cfg(test)]
mod test_support;
