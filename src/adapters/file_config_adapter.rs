//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key).filter(|v| !v.trim().is_empty())
    }

    fn get_double(&self, section: &str, key: &str) -> Option<Result<f64, String>> {
        self.get_string(section, key)
            .map(|raw| raw.trim().parse::<f64>().map_err(|_| raw))
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[shell]
prompt = (gbce)

[data]
path = data/sample_data.yml

[formulas]
window_seconds = 600
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("shell", "prompt"),
            Some("(gbce)".to_string())
        );
        assert_eq!(
            adapter.get_string("data", "path"),
            Some("data/sample_data.yml".to_string())
        );
        assert_eq!(
            adapter.get_double("formulas", "window_seconds"),
            Some(Ok(600.0))
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[shell]\nprompt = >\n").unwrap();
        assert_eq!(adapter.get_string("shell", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_string_treats_blank_as_missing() {
        let adapter = FileConfigAdapter::from_string("[data]\npath =\n").unwrap();
        assert_eq!(adapter.get_string("data", "path"), None);
    }

    #[test]
    fn get_double_missing_is_none() {
        let adapter = FileConfigAdapter::from_string("[formulas]\n").unwrap();
        assert_eq!(adapter.get_double("formulas", "window_seconds"), None);
    }

    #[test]
    fn get_double_non_numeric_keeps_raw_value() {
        let adapter =
            FileConfigAdapter::from_string("[formulas]\nwindow_seconds = soon\n").unwrap();
        assert_eq!(
            adapter.get_double("formulas", "window_seconds"),
            Some(Err("soon".to_string()))
        );
    }

    #[test]
    fn get_bool_returns_true_values() {
        let adapter =
            FileConfigAdapter::from_string("[shell]\na = true\nb = yes\nc = 1\n").unwrap();
        assert!(adapter.get_bool("shell", "a", false));
        assert!(adapter.get_bool("shell", "b", false));
        assert!(adapter.get_bool("shell", "c", false));
    }

    #[test]
    fn get_bool_returns_false_values() {
        let adapter =
            FileConfigAdapter::from_string("[shell]\na = false\nb = no\nc = 0\n").unwrap();
        assert!(!adapter.get_bool("shell", "a", true));
        assert!(!adapter.get_bool("shell", "b", true));
        assert!(!adapter.get_bool("shell", "c", true));
    }

    #[test]
    fn get_bool_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[shell]\n").unwrap();
        assert!(adapter.get_bool("shell", "missing", true));
        assert!(!adapter.get_bool("shell", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[data]\npath = /srv/gbce/stocks.yml\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "path"),
            Some("/srv/gbce/stocks.yml".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/stockscli.ini");
        assert!(result.is_err());
    }
}
