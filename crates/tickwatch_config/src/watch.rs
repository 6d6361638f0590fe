//! Settings for the `tickwatch` binary
//!
//! Values come from defaults, an optional TOML file and `TICKWATCH_*`
//! environment variables, in increasing order of precedence.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

use crate::settings::{DisplayUnit, Precision};

pub const ENV_PRECISION: &str = "TICKWATCH_PRECISION";
pub const ENV_UNIT: &str = "TICKWATCH_UNIT";
pub const ENV_DECIMALS: &str = "TICKWATCH_DECIMALS";
pub const ENV_LOG: &str = "TICKWATCH_LOG";

/// Complete reporting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Scalar type elapsed seconds are computed in
    pub precision: Precision,

    /// Unit elapsed time is printed in
    pub unit: DisplayUnit,

    /// Digits after the decimal point
    pub decimals: usize,

    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            precision: Precision::Double,
            unit: DisplayUnit::Seconds,
            decimals: 6,
            log_filter: "tickwatch=info".to_string(),
        }
    }
}

/// An environment value that could not be parsed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedVar {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl RejectedVar {
    pub fn log(&self) {
        warn!(key = self.key, value = %self.value, "ignoring {}: {}", self.key, self.reason);
    }
}

impl WatchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::default().merge_with_env()
    }

    /// Merge with environment variables (env vars take precedence)
    pub fn merge_with_env(self) -> Self {
        self.merge_with(|key| std::env::var(key).ok())
    }

    /// Like [`merge_with_env`](Self::merge_with_env), but hands rejected
    /// values back instead of logging them, for callers that install a
    /// subscriber only once the config is known.
    pub fn merge_with_env_collecting(self) -> (Self, Vec<RejectedVar>) {
        self.merge_collecting(|key| std::env::var(key).ok())
    }

    /// Overrides fields with whatever `lookup` returns for the `TICKWATCH_*`
    /// keys. Unparseable values are logged and skipped.
    pub fn merge_with<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config, rejected) = self.merge_collecting(lookup);
        for var in &rejected {
            var.log();
        }
        config
    }

    pub fn merge_collecting<F>(mut self, lookup: F) -> (Self, Vec<RejectedVar>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();
        if let Some(precision) = parse_var(&lookup, ENV_PRECISION, &mut rejected) {
            self.precision = precision;
        }
        if let Some(unit) = parse_var(&lookup, ENV_UNIT, &mut rejected) {
            self.unit = unit;
        }
        if let Some(decimals) = parse_var(&lookup, ENV_DECIMALS, &mut rejected) {
            self.decimals = decimals;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|value| !value.trim().is_empty()) {
            self.log_filter = filter;
        }
        (self, rejected)
    }

    /// Load configuration from TOML file
    #[cfg(feature = "toml-config")]
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: WatchConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from TOML file (stub when toml feature is disabled)
    #[cfg(not(feature = "toml-config"))]
    pub fn from_file(_path: &Path) -> anyhow::Result<Self> {
        anyhow::bail!("TOML support not enabled. Enable the 'toml-config' feature.")
    }

    /// Save configuration to TOML file
    #[cfg(feature = "toml-config")]
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Save configuration to TOML file (stub when toml feature is disabled)
    #[cfg(not(feature = "toml-config"))]
    pub fn save_to_file(&self, _path: &Path) -> anyhow::Result<()> {
        anyhow::bail!("TOML support not enabled. Enable the 'toml-config' feature.")
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str, rejected: &mut Vec<RejectedVar>) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(err) => {
            rejected.push(RejectedVar {
                key,
                value: raw,
                reason: err.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = WatchConfig::default();
        assert_eq!(config.precision, Precision::Double);
        assert_eq!(config.unit, DisplayUnit::Seconds);
        assert_eq!(config.decimals, 6);
        assert_eq!(config.log_filter, "tickwatch=info");
    }

    #[test]
    fn test_env_overrides() {
        let config = WatchConfig::default().merge_with(lookup_from(&[
            (ENV_PRECISION, "single"),
            (ENV_UNIT, "us"),
            (ENV_DECIMALS, "2"),
            (ENV_LOG, "tickwatch=trace"),
        ]));
        assert_eq!(config.precision, Precision::Single);
        assert_eq!(config.unit, DisplayUnit::Micros);
        assert_eq!(config.decimals, 2);
        assert_eq!(config.log_filter, "tickwatch=trace");
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let config = WatchConfig::default().merge_with(lookup_from(&[
            (ENV_PRECISION, "quad"),
            (ENV_DECIMALS, "-1"),
            (ENV_LOG, "  "),
            (ENV_UNIT, "ns"),
        ]));
        assert_eq!(config.precision, Precision::Double);
        assert_eq!(config.decimals, 6);
        assert_eq!(config.log_filter, "tickwatch=info");
        assert_eq!(config.unit, DisplayUnit::Nanos);
    }

    #[test]
    fn test_rejected_values_are_collected() {
        let (config, rejected) = WatchConfig::default().merge_collecting(lookup_from(&[
            (ENV_UNIT, "bogus"),
            (ENV_DECIMALS, "abc"),
            (ENV_PRECISION, "single"),
        ]));
        assert_eq!(config.precision, Precision::Single);
        assert_eq!(config.unit, DisplayUnit::Seconds);

        let keys: Vec<_> = rejected.iter().map(|var| var.key).collect();
        assert_eq!(keys, vec![ENV_UNIT, ENV_DECIMALS]);
        assert_eq!(rejected[0].value, "bogus");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_rejected_value_logs_warning() {
        let (_, rejected) =
            WatchConfig::default().merge_collecting(lookup_from(&[(ENV_UNIT, "bogus")]));

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            for var in &rejected {
                var.log();
            }
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("ignoring TICKWATCH_UNIT"), "{output}");
        assert!(output.contains("bogus"), "{output}");
    }

    #[cfg(not(feature = "toml-config"))]
    #[test]
    fn test_file_loading_requires_feature() {
        let err = WatchConfig::from_file(Path::new("tickwatch.toml")).unwrap_err();
        assert!(err.to_string().contains("toml-config"));
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickwatch.toml");
        let config = WatchConfig {
            precision: Precision::Single,
            unit: DisplayUnit::Millis,
            decimals: 3,
            log_filter: "tickwatch=debug".to_string(),
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(WatchConfig::from_file(&path).unwrap(), config);
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickwatch.toml");
        std::fs::write(&path, "unit = \"ns\"\n").unwrap();

        let config = WatchConfig::from_file(&path).unwrap();
        assert_eq!(config.unit, DisplayUnit::Nanos);
        assert_eq!(config.precision, Precision::Double);
        assert_eq!(config.decimals, 6);
    }
}
