use std::path::Path;

use photobot::config::{Config, ConfigError, OutputDir};

const CONFIG: &str = r#"
bot_token: "123456:secret-token"
output_dirpath_list:
  - path: /mock/output
  - path: /mock/other
"#;

#[test]
fn parses_config() {
    let config = Config::from_yaml(CONFIG).unwrap();

    assert_eq!(config.bot_token.to_string(), "123456:secret-token");
    assert_eq!(
        config.output_dirpath_list,
        vec![OutputDir::new("/mock/output"), OutputDir::new("/mock/other")]
    );
}

#[test]
fn base_dirpath_is_first_entry() {
    let config = Config::from_yaml(CONFIG).unwrap();
    assert_eq!(config.base_dirpath().unwrap(), Path::new("/mock/output"));

    let config = Config::from_yaml(
        "bot_token: t\noutput_dirpath_list:\n  - path: /mock/output\n",
    )
    .unwrap();
    assert_eq!(config.base_dirpath().unwrap(), Path::new("/mock/output"));
}

#[test]
fn base_dirpath_without_entries_is_an_error() {
    let config = Config {
        bot_token: "token".into(),
        output_dirpath_list: vec![],
    };

    assert!(matches!(
        config.base_dirpath(),
        Err(ConfigError::NoOutputDirs)
    ));
}

#[test]
fn rejects_empty_documents() {
    for doc in ["", "   \n\n", "# nothing here\n", "{}"] {
        assert!(
            matches!(Config::from_yaml(doc), Err(ConfigError::EmptyDocument)),
            "{doc:?}"
        );
    }
}

#[test]
fn rejects_empty_output_dirpath_list() {
    let err = Config::from_yaml("bot_token: t\noutput_dirpath_list: []\n").unwrap_err();
    assert!(matches!(err, ConfigError::NoOutputDirs), "{err:?}");
}

#[test]
fn rejects_missing_or_empty_token() {
    let err = Config::from_yaml("bot_token: ''\noutput_dirpath_list:\n  - path: /x\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::MissingToken), "{err:?}");

    let err = Config::from_yaml("output_dirpath_list:\n  - path: /x\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err:?}");
}

#[test]
fn rejects_malformed_entries() {
    let err = Config::from_yaml("bot_token: t\noutput_dirpath_list:\n  - dir: /x\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err:?}");
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main_config.yaml");
    std::fs::write(&path, CONFIG).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.base_dirpath().unwrap(), Path::new("/mock/output"));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.yaml");

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }), "{err:?}");
    assert!(err.to_string().contains("nope.yaml"));
}

#[test]
fn debug_does_not_leak_token() {
    let config = Config::from_yaml(CONFIG).unwrap();
    let debug = format!("{:?}", config);

    assert!(!debug.contains("secret-token"));
    assert!(debug.contains("/mock/output"));
}
