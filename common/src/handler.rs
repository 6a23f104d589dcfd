//! [`Handler`] abstractions.

use std::future::Future;

/// Handler of `Args`, executable asynchronously.
///
/// Commands, queries and database operations are all expressed as
/// [`Handler`] implementations over their argument types.
pub trait Handler<Args = ()> {
    /// Type of a successful [`Handler`] result.
    type Ok;

    /// Type of a [`Handler`] execution error.
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
