use super::env::RuntimeEnv;
use crate::error::ScribePrepError;
use std::future::Future;
use tokio::net::TcpListener;

/// A request-routable server handle: something the runner can hand a bound
/// listener to. The runner imposes nothing else on the application.
pub trait Application: Send + 'static {
    fn run(
        self,
        listener: TcpListener,
    ) -> impl Future<Output = Result<(), ScribePrepError>> + Send;
}

/// Explicit contract for the otherwise-opaque application factory: given the
/// runtime environment (already applied to the process), produce a fully
/// configured application. Factory errors are fatal and propagate to process
/// exit.
pub trait AppFactory {
    type App: Application;

    fn create_app(&self, env: &RuntimeEnv) -> Result<Self::App, ScribePrepError>;
}

/// Adapter for embedders whose factory is a plain function of no arguments.
pub struct FnAppFactory<F>(pub F);

impl<F, A> AppFactory for FnAppFactory<F>
where
    F: Fn() -> Result<A, ScribePrepError>,
    A: Application,
{
    type App = A;

    fn create_app(&self, _env: &RuntimeEnv) -> Result<A, ScribePrepError> {
        (self.0)()
    }
}
