//! Financial report [`Query`] definitions.
//!
//! [`Query`]: crate::Query

pub mod dre;

pub use self::dre::Dre;
