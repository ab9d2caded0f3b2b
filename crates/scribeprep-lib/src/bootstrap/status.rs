use super::env::RuntimeEnv;
use super::factory::{AppFactory, Application};
use crate::error::ScribePrepError;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tracing::debug;

/// Default application wired into `scribeprep serve`. The transcription
/// backend itself ships separately and embeds the bootstrap through
/// [`AppFactory`]; until one is linked in, this app answers every connection
/// with a plain-text status line so the full bind-and-serve path stays
/// exercisable.
pub struct StatusApp {
    ffmpeg_binary: String,
}

pub struct StatusAppFactory;

impl AppFactory for StatusAppFactory {
    type App = StatusApp;

    fn create_app(&self, env: &RuntimeEnv) -> Result<StatusApp, ScribePrepError> {
        Ok(StatusApp {
            ffmpeg_binary: env.ffmpeg_binary.clone(),
        })
    }
}

impl Application for StatusApp {
    async fn run(self, listener: TcpListener) -> Result<(), ScribePrepError> {
        loop {
            let (mut stream, peer) = listener.accept().await?;
            debug!(%peer, "Accepted connection");

            let body = format!(
                "scribeprep bootstrap online; transcription backend not linked; ffmpeg={}\n",
                self.ffmpeg_binary
            );
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );

            tokio::spawn(async move {
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    }
}
