use super::env::RuntimeEnv;
use super::factory::{AppFactory, Application};
use crate::error::ScribePrepError;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    /// Hot reload is unsupported; command resolution rejects `true`. Kept so
    /// the bind log line records the full server configuration.
    pub reload: bool,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7860,
            reload: false,
        }
    }
}

/// Bootstrap sequence: apply the runtime environment, construct the
/// application, bind the address, hand the listener over. Any error
/// propagates uncaught to the caller; for the CLI binary that means a
/// non-zero process exit.
pub async fn run_app<F: AppFactory>(
    factory: &F,
    env: &RuntimeEnv,
    options: &ServeOptions,
) -> Result<(), ScribePrepError> {
    // Environment first: the factory may initialize native libraries that
    // read these variables immediately.
    env.apply();

    let app = factory.create_app(env)?;

    let addr = format!("{}:{}", options.host, options.port);
    info!(%addr, reload = options.reload, "Starting server");

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ScribePrepError::Bind {
            addr: addr.clone(),
            reason: e.to_string(),
        })?;

    app.run(listener).await
}
