use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: theme_exporter <TEMPLATE> <OUTPUT_DIR> <THEME> [THEME ...]
       theme_exporter --config <FILE>

Writes OUTPUT_DIR/<THEME><EXT> for every THEME, replacing every occurrence of the template's file name
(without extension) with the theme name. `path/to/base.css` with themes `dark light` gives `dark.css` and
`light.css` with every `base` replaced.

Options:
  -y, --yes        Don't ask for confirmation before writing
  -c, --config     Read template, output_dir and themes from a YAML file
  -h, --help       Show this help";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CliError {
	#[error("Missing arguments, use the help command for more information")]
	NoArguments,

	#[error("Missing {0} argument(s), use the help command for more information")]
	MissingArguments(usize),

	#[error("Missing config file path after {0}")]
	MissingConfigPath(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
	Help,
	Export { template_path: PathBuf, output_dir: PathBuf, themes: Vec<String>, assume_yes: bool },
	ConfigFile { path: PathBuf, assume_yes: bool },
}

/// Output directory as given, or `.` for an empty argument. Unlike a job file, where an empty
/// `output_dir` means the job file's own directory, this is relative to the working directory.
fn output_dir_from_arg(arg: &str) -> PathBuf {
	if arg.is_empty() {
		PathBuf::from(".")
	} else {
		PathBuf::from(arg)
	}
}

/// Parses the arguments following the program name.
pub fn parse(args: Vec<String>) -> Result<Command, CliError> {
	let first_arg = match args.first() {
		Some(arg) => arg.as_str(),
		None => return Err(CliError::NoArguments),
	};
	if first_arg == "help" || first_arg == "-h" || first_arg == "--help" {
		return Ok(Command::Help);
	}

	let mut assume_yes = false;
	let mut config_path = None;
	let mut positional = Vec::new();
	let mut args = args.into_iter();
	while let Some(arg) = args.next() {
		match arg.as_str() {
			"-y" | "--yes" => assume_yes = true,
			"-c" | "--config" => match args.next() {
				Some(path) => config_path = Some(PathBuf::from(path)),
				None => return Err(CliError::MissingConfigPath(arg)),
			},
			_ => positional.push(arg),
		}
	}

	if let Some(path) = config_path {
		return Ok(Command::ConfigFile { path, assume_yes });
	}

	if positional.len() < 3 {
		return Err(CliError::MissingArguments(3 - positional.len()));
	}
	let themes = positional.split_off(2);
	let output_dir = output_dir_from_arg(&positional[1]);
	let template_path = PathBuf::from(&positional[0]);
	Ok(Command::Export { template_path, output_dir, themes, assume_yes })
}
