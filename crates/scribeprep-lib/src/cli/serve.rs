use crate::bootstrap::{AppFactory, StatusAppFactory, run_app};
use crate::cli::ServeParams;
use crate::error::ScribePrepError;

/// Bootstrap with the built-in status application. Embedders with a real
/// transcription backend use [`run_serve_with`] and their own factory.
pub async fn run_serve(params: ServeParams) -> Result<(), ScribePrepError> {
    run_serve_with(&StatusAppFactory, params).await
}

pub async fn run_serve_with<F: AppFactory>(
    factory: &F,
    params: ServeParams,
) -> Result<(), ScribePrepError> {
    run_app(factory, &params.runtime_env, &params.options).await
}
