//! Handler port
//!
//! A handler takes an event payload and a context object, both opaque to
//! the injectors, and returns an arbitrary value or error. The injectors
//! implement this trait themselves, so wrapped handlers nest.

use std::fmt;
use std::future::Future;

use async_trait::async_trait;

/// A named request handler
#[async_trait]
pub trait Handler<Ev, Ctx>: Send + Sync
where
    Ev: Send + 'static,
    Ctx: Send + 'static,
{
    /// Value returned on success
    type Output: Send + 'static;
    /// Error returned on failure
    type Error: Send + 'static;

    /// Name used in informational output
    fn name(&self) -> &str;

    /// Handle one invocation
    async fn call(&self, event: Ev, context: Ctx) -> Result<Self::Output, Self::Error>;
}

/// Handler built from an async closure
#[derive(Clone)]
pub struct HandlerFn<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Turn an async closure into a named [`Handler`]
///
/// # Example
///
/// ```
/// use chaos_application::handler_fn;
///
/// let handler = handler_fn("handler", |_event: String, _context: ()| async {
///     Ok::<_, std::io::Error>("Hello from Lambda!")
/// });
/// ```
pub fn handler_fn<F>(name: impl Into<String>, f: F) -> HandlerFn<F> {
    HandlerFn {
        name: name.into(),
        f,
    }
}

#[async_trait]
impl<F, Fut, Ev, Ctx, T, E> Handler<Ev, Ctx> for HandlerFn<F>
where
    F: Fn(Ev, Ctx) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    Ev: Send + 'static,
    Ctx: Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;
    type Error = E;

    fn name(&self) -> &str {
        &self.name
    }

    async fn call(&self, event: Ev, context: Ctx) -> Result<T, E> {
        (self.f)(event, context).await
    }
}
