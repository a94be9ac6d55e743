//! [`Handler`] abstraction.

use std::future::Future;

/// Asynchronous executor of `Args` operations.
///
/// Browse queries, landlord commands and property store operations are all
/// [`Handler`]s of the corresponding operation types, so each layer only
/// depends on the operations it actually needs from the one below.
pub trait Handler<Args = ()> {
    /// Result of a successful execution.
    type Ok;

    /// Error of a failed execution.
    type Err;

    /// Executes the provided `args` operation.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
