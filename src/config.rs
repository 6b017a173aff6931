use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A job file that can be given with `--config` instead of listing everything on the command line.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Export {
	pub template: PathBuf,
	#[serde(default = "default_output_dir")]
	pub output_dir: PathBuf,
	pub themes: Vec<String>,
}

fn default_output_dir() -> PathBuf {
	PathBuf::from(".")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Yaml config I/O error with path {0:?}")]
	IOError(PathBuf, #[source] std::io::Error),

	#[error("Yaml deserialization error: {0}")]
	SerdeYamlError(String),
}

fn load_yaml_config<T>(path: &Path) -> Result<T, ConfigError>
where
	T: serde::de::DeserializeOwned,
{
	let file = File::open(path).map_err(|e| ConfigError::IOError(path.to_path_buf(), e))?;
	let reader = BufReader::new(file);
	match serde_yaml::from_reader(reader) {
		Ok(deserialized) => Ok(deserialized),
		Err(err) => Err(ConfigError::SerdeYamlError(err.to_string())),
	}
}

/// Loads a job file. Relative paths in it are taken relative to the job file's own directory.
pub fn load_export(path: &Path) -> Result<Export, ConfigError> {
	log::info!("Loading export yaml config from {:?}", path);
	let mut export: Export = load_yaml_config(path)?;
	let config_dir = path.parent().unwrap_or_else(|| Path::new(""));
	export.template = config_dir.join(&export.template);
	export.output_dir = config_dir.join(&export.output_dir);
	Ok(export)
}
