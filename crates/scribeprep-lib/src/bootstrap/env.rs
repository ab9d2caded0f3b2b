use crate::config::RuntimeEnvOverrides;

/// Environment expected by the native libraries behind the transcription
/// backend. Held as an explicit value instead of ad-hoc process mutation so
/// the exact variable set is inspectable and testable; [`RuntimeEnv::apply`]
/// still writes it into the process environment because the consuming
/// libraries read these keys at initialization time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeEnv {
    pub ffmpeg_binary: String,
    pub ffprobe_binary: String,
}

impl Default for RuntimeEnv {
    fn default() -> Self {
        Self {
            ffmpeg_binary: "ffmpeg".to_string(),
            ffprobe_binary: "ffprobe".to_string(),
        }
    }
}

impl RuntimeEnv {
    pub fn from_overrides(overrides: &RuntimeEnvOverrides) -> Self {
        let defaults = Self::default();
        Self {
            ffmpeg_binary: overrides
                .ffmpeg_binary
                .clone()
                .unwrap_or(defaults.ffmpeg_binary),
            ffprobe_binary: overrides
                .ffprobe_binary
                .clone()
                .unwrap_or(defaults.ffprobe_binary),
        }
    }

    /// The full ordered key/value set: logging-verbosity and GPU-disable
    /// flags for the native libraries, plus the FFmpeg/FFprobe binary
    /// overrides.
    pub fn vars(&self) -> Vec<(&'static str, String)> {
        vec![
            ("GLOG_minloglevel", "3".to_string()),
            ("TF_CPP_MIN_LOG_LEVEL", "3".to_string()),
            ("TF_ENABLE_ONEDNN_OPTS", "0".to_string()),
            ("MEDIAPIPE_DISABLE_GPU", "1".to_string()),
            ("FFMPEG_BINARY", self.ffmpeg_binary.clone()),
            ("FFPROBE_BINARY", self.ffprobe_binary.clone()),
        ]
    }

    /// Write the variables into the process environment. Must happen before
    /// the application factory runs; the native libraries read these keys
    /// during initialization, not lazily.
    pub fn apply(&self) {
        for (key, value) in self.vars() {
            // SAFETY: called from the single-threaded bootstrap phase, before
            // the server runtime spawns any worker that reads the environment.
            unsafe { std::env::set_var(key, value) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_env_uses_system_ffmpeg() {
        let env = RuntimeEnv::default();
        let vars = env.vars();

        assert_eq!(
            vars,
            vec![
                ("GLOG_minloglevel", "3".to_string()),
                ("TF_CPP_MIN_LOG_LEVEL", "3".to_string()),
                ("TF_ENABLE_ONEDNN_OPTS", "0".to_string()),
                ("MEDIAPIPE_DISABLE_GPU", "1".to_string()),
                ("FFMPEG_BINARY", "ffmpeg".to_string()),
                ("FFPROBE_BINARY", "ffprobe".to_string()),
            ]
        );
    }

    #[test]
    fn test_overrides_replace_binary_names() {
        let overrides = RuntimeEnvOverrides {
            ffmpeg_binary: Some("app/bin/ffmpeg.exe".to_string()),
            ffprobe_binary: None,
        };
        let env = RuntimeEnv::from_overrides(&overrides);

        assert_eq!(env.ffmpeg_binary, "app/bin/ffmpeg.exe");
        assert_eq!(env.ffprobe_binary, "ffprobe");
    }
}
