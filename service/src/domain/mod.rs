//! Domain definitions.

pub mod agent;
pub mod client;
pub mod commission;
pub mod ledger;
pub mod matching;
pub mod property;

pub use self::{
    client::Client, commission::Commission, property::Property,
};
