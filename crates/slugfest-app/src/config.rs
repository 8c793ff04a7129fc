// Configuration loading and parsing (config/analysis.toml).

use serde::Deserialize;
use slugfest_baseball::AnalysisRequest;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "analysis.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub data_paths: DataPaths,
    pub request: AnalysisRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub batting: PathBuf,
    pub master: PathBuf,
}

// ---------------------------------------------------------------------------
// analysis.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire analysis.toml file.
#[derive(Debug, Clone, Deserialize)]
struct AnalysisFile {
    data: DataPaths,
    improvement: ImprovementSection,
    slugging: SluggingSection,
    triple_crown: TripleCrownSection,
}

#[derive(Debug, Clone, Deserialize)]
struct ImprovementSection {
    first_year: i32,
    second_year: i32,
}

#[derive(Debug, Clone, Deserialize)]
struct SluggingSection {
    team: String,
    year: i32,
}

#[derive(Debug, Clone, Deserialize)]
struct TripleCrownSection {
    year: i32,
    #[serde(default = "default_leagues")]
    leagues: Vec<String>,
}

fn default_leagues() -> Vec<String> {
    AnalysisRequest::default().leagues
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/analysis.toml` relative to `base_dir`.
///
/// Relative data paths are resolved against `base_dir`. This does not copy
/// defaults; `load_config()` does that first.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: AnalysisFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let data_paths = DataPaths {
        batting: resolve(base_dir, file.data.batting),
        master: resolve(base_dir, file.data.master),
    };
    let request = AnalysisRequest {
        first_year: file.improvement.first_year,
        second_year: file.improvement.second_year,
        team: file.slugging.team,
        team_year: file.slugging.year,
        triple_crown_year: file.triple_crown.year,
        leagues: file.triple_crown.leagues,
    };

    let config = Config {
        data_paths,
        request,
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/analysis.toml` from `defaults/` when it is missing.
///
/// Returns the path written, or `None` when nothing needed copying. An
/// existing config is never overwritten. Without a `defaults/` directory the
/// config must already exist.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() {
        return Ok(None);
    }
    if !source.is_file() {
        if config_dir.exists() {
            return Ok(None);
        }
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no config/{CONFIG_FILE} or defaults/{CONFIG_FILE} under {}; \
                 run from the project root or pass --config-dir",
                base_dir.display()
            ),
        });
    }

    let copy_err = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to seed {}: {e}", target.display()),
    };
    std::fs::create_dir_all(&config_dir).map_err(copy_err)?;
    std::fs::copy(&source, &target).map_err(copy_err)?;
    Ok(Some(target))
}

/// Seed the config from `defaults/` if needed, then load it relative to
/// `base_dir`.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_file(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn resolve(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() && !path.as_os_str().is_empty() {
        base_dir.join(path)
    } else {
        path
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let paths: &[(&str, &Path)] = &[
        ("data.batting", config.data_paths.batting.as_path()),
        ("data.master", config.data_paths.master.as_path()),
    ];
    for (name, path) in paths {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    let request = &config.request;
    if request.first_year >= request.second_year {
        return Err(ConfigError::ValidationError {
            field: "improvement.second_year".into(),
            message: format!(
                "must be later than first_year ({}), got {}",
                request.first_year, request.second_year
            ),
        });
    }

    if request.team.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "slugging.team".into(),
            message: "must not be empty".into(),
        });
    }

    if request.leagues.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "triple_crown.leagues".into(),
            message: "must list at least one league".into(),
        });
    }
    let mut seen = HashSet::new();
    for league in &request.leagues {
        if !seen.insert(league.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "triple_crown.leagues".into(),
                message: format!("league {league:?} listed more than once"),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// The crate's own defaults/ directory.
    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    fn defaults_text() -> String {
        fs::read_to_string(project_root().join("defaults").join(CONFIG_FILE)).unwrap()
    }

    /// A temp base dir whose config/analysis.toml holds `text`.
    fn base_with_config(text: &str) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let config_dir = tmp.path().join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), text).unwrap();
        tmp
    }

    fn expect_validation_field(text: &str, expected: &str) {
        let tmp = base_with_config(text);
        let err = load_config_from(tmp.path()).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_valid_config_from_project_defaults() {
        let tmp = base_with_config(&defaults_text());
        let config = load_config_from(tmp.path()).expect("should load valid config");

        assert_eq!(config.request, AnalysisRequest::default());
        assert_eq!(
            config.data_paths.batting,
            tmp.path().join("data/Batting-07-12.csv")
        );
        assert_eq!(
            config.data_paths.master,
            tmp.path().join("data/Master-small.csv")
        );
    }

    #[test]
    fn absolute_data_paths_are_kept() {
        let text = defaults_text().replace(
            "batting = \"data/Batting-07-12.csv\"",
            "batting = \"/srv/lahman/Batting.csv\"",
        );
        let tmp = base_with_config(&text);
        let config = load_config_from(tmp.path()).unwrap();
        assert_eq!(
            config.data_paths.batting,
            PathBuf::from("/srv/lahman/Batting.csv")
        );
    }

    #[test]
    fn leagues_default_when_omitted() {
        let text = defaults_text().replace("leagues = [\"NL\", \"AL\"]", "");
        let tmp = base_with_config(&text);
        let config = load_config_from(tmp.path()).unwrap();
        assert_eq!(config.request.leagues, vec!["NL", "AL"]);
    }

    #[test]
    fn rejects_years_out_of_order() {
        let text = defaults_text().replace("second_year = 2010", "second_year = 2008");
        expect_validation_field(&text, "improvement.second_year");
    }

    #[test]
    fn rejects_equal_years() {
        let text = defaults_text().replace("second_year = 2010", "second_year = 2009");
        expect_validation_field(&text, "improvement.second_year");
    }

    #[test]
    fn rejects_blank_team() {
        let text = defaults_text().replace("team = \"OAK\"", "team = \"  \"");
        expect_validation_field(&text, "slugging.team");
    }

    #[test]
    fn rejects_empty_league_list() {
        let text = defaults_text().replace("leagues = [\"NL\", \"AL\"]", "leagues = []");
        expect_validation_field(&text, "triple_crown.leagues");
    }

    #[test]
    fn rejects_duplicate_league() {
        let text = defaults_text().replace("leagues = [\"NL\", \"AL\"]", "leagues = [\"AL\", \"AL\"]");
        expect_validation_field(&text, "triple_crown.leagues");
    }

    #[test]
    fn rejects_empty_data_path() {
        let text = defaults_text().replace(
            "master = \"data/Master-small.csv\"",
            "master = \"\"",
        );
        expect_validation_field(&text, "data.master");
    }

    #[test]
    fn file_not_found_for_missing_analysis_toml() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("config")).unwrap();

        let err = load_config_from(tmp.path()).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected FileNotFound, got: {other}"),
        }
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = base_with_config("this is not valid [[[ toml");
        let err = load_config_from(tmp.path()).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected ParseError, got: {other}"),
        }
    }

    #[test]
    fn parse_error_for_missing_section() {
        let tmp = base_with_config("[data]\nbatting = \"b.csv\"\nmaster = \"m.csv\"\n");
        let err = load_config_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn ensure_config_file_seeds_missing_config() {
        let tmp = tempfile::tempdir().unwrap();
        let defaults_dir = tmp.path().join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join(CONFIG_FILE), defaults_text()).unwrap();
        fs::write(defaults_dir.join("notes.toml"), "# unrelated\n").unwrap();

        assert!(!tmp.path().join("config").exists());

        let copied = ensure_config_file(tmp.path()).expect("should succeed");
        assert_eq!(copied, Some(tmp.path().join("config").join(CONFIG_FILE)));
        assert!(!tmp.path().join("config/notes.toml").exists());

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.request.team, "OAK");
    }

    #[test]
    fn ensure_config_file_keeps_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let defaults_dir = tmp.path().join("defaults");
        let config_dir = tmp.path().join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(defaults_dir.join(CONFIG_FILE), defaults_text()).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), "# custom\n").unwrap();

        let copied = ensure_config_file(tmp.path()).expect("should succeed");
        assert!(copied.is_none());

        let content = fs::read_to_string(config_dir.join(CONFIG_FILE)).unwrap();
        assert_eq!(content, "# custom\n");
    }

    #[test]
    fn ensure_config_file_without_defaults_leaves_config_dir_alone() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("config")).unwrap();

        let copied = ensure_config_file(tmp.path()).expect("should succeed");
        assert!(copied.is_none());
    }

    #[test]
    fn ensure_config_file_errors_when_nothing_to_load() {
        let tmp = tempfile::tempdir().unwrap();

        let err = ensure_config_file(tmp.path()).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("pass --config-dir"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
    }
}
