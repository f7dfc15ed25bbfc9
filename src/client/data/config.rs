//! Configuration files using serde.
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::prelude::*,
    path::{Path, PathBuf},
};

use crate::error::Error::InvalidConfig;
#[cfg(feature = "toml_config")]
use crate::error::TomlError;
use crate::error::{ConfigError, Result};
use crate::proto::command::DEFAULT_TRIGGER;

/// The port used when the configuration does not name one.
pub const DEFAULT_PORT: u16 = 6667;

/// The character encoding used when the configuration does not name one.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Configuration for the bot.
///
/// # Building a configuration programmatically
///
/// `Config` is an ordinary struct with public fields. Use `Config::default()` for the fields
/// you do not care about:
///
/// ```
/// use bananabot::client::prelude::Config;
///
/// let config = Config {
///     host: Some("irc.example.com".to_owned()),
///     nickname: Some("bananabot".to_owned()),
///     channels: vec!["#bananas".to_owned()],
///     ..Config::default()
/// };
/// assert_eq!(config.port(), 6667);
/// ```
///
/// # Loading a configuration from a file
///
/// ## YAML (`config.yaml`)
/// ```yaml
/// host: irc.example.com
/// port: 6667
/// nickname: bananabot
/// channels:
///   - "#bananas"
/// ```
///
/// ## Rust
/// ```no_run
/// use bananabot::client::prelude::Config;
///
/// let config = Config::load("config.yaml").unwrap();
/// ```
#[derive(Clone, Deserialize, Serialize, Default, PartialEq, Debug)]
pub struct Config {
    /// The server to connect to.
    pub host: Option<String>,
    /// The port to connect on.
    pub port: Option<u16>,
    /// The bot's nickname.
    pub nickname: Option<String>,
    /// The bot's username. Defaults to the nickname.
    pub username: Option<String>,
    /// The bot's real name. Defaults to the nickname.
    pub realname: Option<String>,
    /// Channels to join on connection, in order.
    #[serde(default)]
    pub channels: Vec<String>,
    /// The encoding type used for this connection.
    /// This is typically UTF-8, but could be something else.
    pub encoding: Option<String>,
    /// The character that marks a message as a bot command.
    pub command_trigger: Option<char>,

    /// The path that this configuration was loaded from.
    ///
    /// This should not be specified in any configuration. It will automatically be handled by the library.
    #[serde(skip)]
    #[doc(hidden)]
    pub path: Option<PathBuf>,
}

impl Config {
    fn with_path<P: AsRef<Path>>(mut self, path: P) -> Config {
        self.path = Some(path.as_ref().to_owned());
        self
    }

    fn path(&self) -> String {
        self.path
            .as_ref()
            .map(|buf| buf.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<none>".to_owned())
    }

    /// Loads a configuration from the desired path. This will use the file extension to detect
    /// which format to parse the file as (json, toml, or yaml). Using each format requires having
    /// its respective crate feature enabled. Only yaml and toml are available by default.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let mut file = File::open(&path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;

        let res = match path.as_ref().extension().and_then(|s| s.to_str()) {
            Some("json") => Config::load_json(&path, &data),
            Some("toml") => Config::load_toml(&path, &data),
            Some("yaml") | Some("yml") => Config::load_yaml(&path, &data),
            Some(ext) => Err(InvalidConfig {
                path: path.as_ref().to_string_lossy().into_owned(),
                cause: ConfigError::UnknownConfigFormat {
                    format: ext.to_owned(),
                },
            }),
            None => Err(InvalidConfig {
                path: path.as_ref().to_string_lossy().into_owned(),
                cause: ConfigError::MissingExtension,
            }),
        };

        res.map(|config| config.with_path(path))
    }

    #[cfg(feature = "json_config")]
    fn load_json<P: AsRef<Path>>(path: P, data: &str) -> Result<Config> {
        serde_json::from_str(data).map_err(|e| InvalidConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            cause: ConfigError::InvalidJson(e),
        })
    }

    #[cfg(not(feature = "json_config"))]
    fn load_json<P: AsRef<Path>>(path: P, _: &str) -> Result<Config> {
        Err(InvalidConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            cause: ConfigError::ConfigFormatDisabled { format: "JSON" },
        })
    }

    #[cfg(feature = "toml_config")]
    fn load_toml<P: AsRef<Path>>(path: P, data: &str) -> Result<Config> {
        toml::from_str(data).map_err(|e| InvalidConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            cause: ConfigError::InvalidToml(TomlError::Read(e)),
        })
    }

    #[cfg(not(feature = "toml_config"))]
    fn load_toml<P: AsRef<Path>>(path: P, _: &str) -> Result<Config> {
        Err(InvalidConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            cause: ConfigError::ConfigFormatDisabled { format: "TOML" },
        })
    }

    #[cfg(feature = "yaml_config")]
    fn load_yaml<P: AsRef<Path>>(path: P, data: &str) -> Result<Config> {
        serde_yaml::from_str(data).map_err(|e| InvalidConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            cause: ConfigError::InvalidYaml(e),
        })
    }

    #[cfg(not(feature = "yaml_config"))]
    fn load_yaml<P: AsRef<Path>>(path: P, _: &str) -> Result<Config> {
        Err(InvalidConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            cause: ConfigError::ConfigFormatDisabled { format: "YAML" },
        })
    }

    /// Saves a configuration to the desired path. This will use the file extension to detect
    /// which format to write the file as (json, toml, or yaml).
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let _ = self.path.take();
        let data = match path.as_ref().extension().and_then(|s| s.to_str()) {
            Some("json") => self.save_json(&path)?,
            Some("toml") => self.save_toml(&path)?,
            Some("yaml") | Some("yml") => self.save_yaml(&path)?,
            Some(ext) => {
                return Err(InvalidConfig {
                    path: path.as_ref().to_string_lossy().into_owned(),
                    cause: ConfigError::UnknownConfigFormat {
                        format: ext.to_owned(),
                    },
                })
            }
            None => {
                return Err(InvalidConfig {
                    path: path.as_ref().to_string_lossy().into_owned(),
                    cause: ConfigError::MissingExtension,
                })
            }
        };
        let mut file = File::create(&path)?;
        file.write_all(data.as_bytes())?;
        self.path = Some(path.as_ref().to_owned());
        Ok(())
    }

    #[cfg(feature = "json_config")]
    fn save_json<P: AsRef<Path>>(&self, path: &P) -> Result<String> {
        serde_json::to_string(self).map_err(|e| InvalidConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            cause: ConfigError::InvalidJson(e),
        })
    }

    #[cfg(not(feature = "json_config"))]
    fn save_json<P: AsRef<Path>>(&self, path: &P) -> Result<String> {
        Err(InvalidConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            cause: ConfigError::ConfigFormatDisabled { format: "JSON" },
        })
    }

    #[cfg(feature = "toml_config")]
    fn save_toml<P: AsRef<Path>>(&self, path: &P) -> Result<String> {
        toml::to_string(self).map_err(|e| InvalidConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            cause: ConfigError::InvalidToml(TomlError::Write(e)),
        })
    }

    #[cfg(not(feature = "toml_config"))]
    fn save_toml<P: AsRef<Path>>(&self, path: &P) -> Result<String> {
        Err(InvalidConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            cause: ConfigError::ConfigFormatDisabled { format: "TOML" },
        })
    }

    #[cfg(feature = "yaml_config")]
    fn save_yaml<P: AsRef<Path>>(&self, path: &P) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| InvalidConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            cause: ConfigError::InvalidYaml(e),
        })
    }

    #[cfg(not(feature = "yaml_config"))]
    fn save_yaml<P: AsRef<Path>>(&self, path: &P) -> Result<String> {
        Err(InvalidConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            cause: ConfigError::ConfigFormatDisabled { format: "YAML" },
        })
    }

    /// Gets the server specified in the configuration.
    pub fn host(&self) -> Result<&str> {
        self.host.as_deref().ok_or_else(|| InvalidConfig {
            path: self.path(),
            cause: ConfigError::FieldMissing { field: "host" },
        })
    }

    /// Gets the port of the server specified in the configuration.
    /// This defaults to 6667 when not specified.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Gets the nickname specified in the configuration.
    pub fn nickname(&self) -> Result<&str> {
        self.nickname.as_deref().ok_or_else(|| InvalidConfig {
            path: self.path(),
            cause: ConfigError::FieldMissing { field: "nickname" },
        })
    }

    /// Gets the username specified in the configuration.
    /// This defaults to the nickname when not specified.
    pub fn username(&self) -> Result<&str> {
        match self.username.as_deref() {
            Some(username) => Ok(username),
            None => self.nickname(),
        }
    }

    /// Gets the real name specified in the configuration.
    /// This defaults to the nickname when not specified.
    pub fn realname(&self) -> Result<&str> {
        match self.realname.as_deref() {
            Some(realname) => Ok(realname),
            None => self.nickname(),
        }
    }

    /// Gets the channels to join upon connection, in order.
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Gets the encoding to use for this connection. This requires the encoding to be listed
    /// in the WHATWG Encoding Standard. This defaults to UTF-8 when not specified.
    pub fn encoding(&self) -> &str {
        self.encoding.as_deref().unwrap_or(DEFAULT_ENCODING)
    }

    /// Gets the character that introduces bot commands. This defaults to `!`.
    pub fn command_trigger(&self) -> char {
        self.command_trigger.unwrap_or(DEFAULT_TRIGGER)
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::Config;
    use crate::error::{ConfigError, Error};

    fn test_config() -> Config {
        Config {
            host: Some("irc.test.net".to_string()),
            port: Some(6697),
            nickname: Some("banana".to_string()),
            channels: vec!["#test".to_string(), "#test2".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn defaults() {
        let config = Config {
            nickname: Some("banana".to_string()),
            ..Default::default()
        };
        assert_eq!(config.port(), 6667);
        assert_eq!(config.username().unwrap(), "banana");
        assert_eq!(config.realname().unwrap(), "banana");
        assert_eq!(config.encoding(), "UTF-8");
        assert_eq!(config.command_trigger(), '!');
        assert!(config.channels().is_empty());
    }

    #[test]
    fn missing_required_fields() {
        let config = Config::default();
        match config.host() {
            Err(Error::InvalidConfig {
                path,
                cause: ConfigError::FieldMissing { field },
            }) => {
                assert_eq!(path, "<none>");
                assert_eq!(field, "host");
            }
            other => panic!("expected a missing field, got {:?}", other),
        }
        assert!(config.nickname().is_err());
        assert!(config.username().is_err());
    }

    #[test]
    #[cfg(feature = "yaml_config")]
    fn load_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "host: irc.test.net\n\
             port: 6697\n\
             nickname: banana\n\
             channels:\n  - \"#test\"\n  - \"#test2\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config,
            Config {
                path: Some(path),
                ..test_config()
            }
        );
    }

    #[test]
    #[cfg(feature = "toml_config")]
    fn load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "host = \"irc.test.net\"\n\
             nickname = \"banana\"\n\
             command_trigger = \".\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.host().unwrap(), "irc.test.net");
        assert_eq!(config.port(), 6667);
        assert_eq!(config.command_trigger(), '.');
        assert!(config.channels().is_empty());
    }

    #[test]
    #[cfg(feature = "yaml_config")]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.yml");
        let mut config = test_config();
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "host=irc.test.net\n").unwrap();
        match Config::load(&path) {
            Err(Error::InvalidConfig {
                cause: ConfigError::UnknownConfigFormat { format },
                ..
            }) => assert_eq!(format, "ini"),
            other => panic!("expected an unknown format, got {:?}", other),
        }
    }

    #[test]
    fn missing_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, "host: irc.test.net\n").unwrap();
        match Config::load(&path) {
            Err(Error::InvalidConfig {
                cause: ConfigError::MissingExtension,
                ..
            }) => (),
            other => panic!("expected a missing extension, got {:?}", other),
        }
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        match Config::load(dir.path().join("nope.yaml")) {
            Err(Error::Io(_)) => (),
            other => panic!("expected an io error, got {:?}", other),
        }
    }
}
