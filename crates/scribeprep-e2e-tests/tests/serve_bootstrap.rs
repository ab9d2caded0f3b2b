use scribeprep_e2e_tests::init_tracing;
use scribeprep_lib::bootstrap::{
    AppFactory, Application, RuntimeEnv, ServeOptions, StatusAppFactory, run_app,
};
use scribeprep_lib::error::ScribePrepError;
use std::net::SocketAddr;
use std::sync::Mutex;
use tokio::net::TcpListener;

const ENV_KEYS: [&str; 6] = [
    "GLOG_minloglevel",
    "TF_CPP_MIN_LOG_LEVEL",
    "TF_ENABLE_ONEDNN_OPTS",
    "MEDIAPIPE_DISABLE_GPU",
    "FFMPEG_BINARY",
    "FFPROBE_BINARY",
];

fn free_local_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    listener.local_addr().expect("Failed to read addr").port()
}

struct NoopApp {
    expected_addr: SocketAddr,
}

impl Application for NoopApp {
    async fn run(self, listener: TcpListener) -> Result<(), ScribePrepError> {
        let actual = listener.local_addr()?;
        assert_eq!(
            actual, self.expected_addr,
            "Runner must bind exactly the configured address"
        );
        Ok(())
    }
}

/// Records the process environment as seen at factory time, proving the
/// runtime env is applied before the factory runs.
struct EnvProbeFactory {
    expected_addr: SocketAddr,
    seen: Mutex<Option<Vec<(String, Option<String>)>>>,
}

impl AppFactory for EnvProbeFactory {
    type App = NoopApp;

    fn create_app(&self, _env: &RuntimeEnv) -> Result<NoopApp, ScribePrepError> {
        let seen = ENV_KEYS
            .iter()
            .map(|key| (key.to_string(), std::env::var(key).ok()))
            .collect();
        *self.seen.lock().unwrap() = Some(seen);

        Ok(NoopApp {
            expected_addr: self.expected_addr,
        })
    }
}

struct FailingFactory;

impl AppFactory for FailingFactory {
    type App = NoopApp;

    fn create_app(&self, _env: &RuntimeEnv) -> Result<NoopApp, ScribePrepError> {
        Err(ScribePrepError::AppFactory {
            reason: "backend construction failed".to_string(),
        })
    }
}

#[test]
fn test_serve_options_default_to_fixed_bind_config() {
    let options = ServeOptions::default();
    assert_eq!(options.host, "0.0.0.0");
    assert_eq!(options.port, 7860);
    assert!(!options.reload);
}

#[tokio::test]
async fn test_env_applied_before_factory_and_exact_addr_bound() {
    init_tracing();

    let port = free_local_port();
    let options = ServeOptions {
        host: "127.0.0.1".to_string(),
        port,
        reload: false,
    };
    let expected_addr: SocketAddr = format!("127.0.0.1:{port}").parse().unwrap();

    let factory = EnvProbeFactory {
        expected_addr,
        seen: Mutex::new(None),
    };

    run_app(&factory, &RuntimeEnv::default(), &options)
        .await
        .expect("Bootstrap should succeed");

    let seen = factory
        .seen
        .lock()
        .unwrap()
        .take()
        .expect("Factory should have been invoked");

    let expected: Vec<(String, Option<String>)> = vec![
        ("GLOG_minloglevel".to_string(), Some("3".to_string())),
        ("TF_CPP_MIN_LOG_LEVEL".to_string(), Some("3".to_string())),
        ("TF_ENABLE_ONEDNN_OPTS".to_string(), Some("0".to_string())),
        ("MEDIAPIPE_DISABLE_GPU".to_string(), Some("1".to_string())),
        ("FFMPEG_BINARY".to_string(), Some("ffmpeg".to_string())),
        ("FFPROBE_BINARY".to_string(), Some("ffprobe".to_string())),
    ];
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_fn_factory_adapter_wraps_plain_functions() {
    use scribeprep_lib::bootstrap::FnAppFactory;

    init_tracing();

    let port = free_local_port();
    let options = ServeOptions {
        host: "127.0.0.1".to_string(),
        port,
        reload: false,
    };
    let expected_addr: SocketAddr = format!("127.0.0.1:{port}").parse().unwrap();

    let factory = FnAppFactory(move || -> Result<NoopApp, ScribePrepError> {
        Ok(NoopApp { expected_addr })
    });

    run_app(&factory, &RuntimeEnv::default(), &options)
        .await
        .expect("Bootstrap through the fn adapter should succeed");
}

#[tokio::test]
async fn test_factory_error_propagates_to_caller() {
    init_tracing();

    let options = ServeOptions {
        host: "127.0.0.1".to_string(),
        port: free_local_port(),
        reload: false,
    };

    let result = run_app(&FailingFactory, &RuntimeEnv::default(), &options).await;
    assert!(matches!(result, Err(ScribePrepError::AppFactory { .. })));
}

#[tokio::test]
async fn test_status_app_answers_connections() {
    use tokio::io::AsyncReadExt;

    init_tracing();

    let port = free_local_port();
    let options = ServeOptions {
        host: "127.0.0.1".to_string(),
        port,
        reload: false,
    };

    let server = tokio::spawn(async move {
        run_app(&StatusAppFactory, &RuntimeEnv::default(), &options).await
    });

    let mut response = String::new();
    for attempt in 0.. {
        match tokio::net::TcpStream::connect(("127.0.0.1", port)).await {
            Ok(mut stream) => {
                stream
                    .read_to_string(&mut response)
                    .await
                    .expect("Failed to read response");
                break;
            }
            Err(_) if attempt < 50 => {
                tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
            }
            Err(e) => panic!("Failed to connect to status app: {e}"),
        }
    }

    assert!(
        response.contains("scribeprep bootstrap online"),
        "Unexpected response: {response}"
    );
    assert!(response.starts_with("HTTP/1.1 200 OK"));

    server.abort();
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    init_tracing();

    // Hold the port so the runner cannot bind it.
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port();

    let options = ServeOptions {
        host: "127.0.0.1".to_string(),
        port,
        reload: false,
    };

    let result = run_app(&OkFactory, &RuntimeEnv::default(), &options).await;
    assert!(matches!(result, Err(ScribePrepError::Bind { .. })));
}

/// Factory that succeeds; used where the bind itself is expected to fail.
struct OkFactory;

impl AppFactory for OkFactory {
    type App = NoopApp;

    fn create_app(&self, _env: &RuntimeEnv) -> Result<NoopApp, ScribePrepError> {
        Ok(NoopApp {
            expected_addr: "127.0.0.1:0".parse().unwrap(),
        })
    }
}
