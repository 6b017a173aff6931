use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use itertools::Itertools;

use crate::confirm::{Confirm, RunSummary};
use crate::engine::{EngineError, SubstitutionJob};
use crate::token::{TemplateToken, TokenError};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
	#[error("Template path error")]
	TokenError(#[from] TokenError),

	#[error("Template path {0:?} is not valid UTF-8")]
	NonUtf8TemplatePath(PathBuf),

	#[error("No themes given")]
	NoThemes,

	#[error("Theme #{0} has an empty name")]
	EmptyTheme(usize),

	#[error("Console output error")]
	OutputError(#[from] std::io::Error),
}

/// Everything needed to generate the theme files, validated up front so that nothing is touched
/// on disk when the template path or theme list is unusable.
#[derive(Debug, Clone)]
pub struct ExportPlan {
	pub template_path: PathBuf,
	pub output_dir: PathBuf,
	pub themes: Vec<String>,
	pub token: TemplateToken,
}

impl ExportPlan {
	pub fn new(template_path: PathBuf, output_dir: PathBuf, themes: Vec<String>) -> Result<Self, ExportError> {
		let token = match template_path.to_str() {
			Some(path) => TemplateToken::derive(path)?,
			None => return Err(ExportError::NonUtf8TemplatePath(template_path)),
		};
		if themes.is_empty() {
			return Err(ExportError::NoThemes);
		}
		if let Some(index) = themes.iter().position(|theme| theme.is_empty()) {
			return Err(ExportError::EmptyTheme(index + 1));
		}
		Ok(ExportPlan { template_path, output_dir, themes, token })
	}

	pub fn summary(&self) -> RunSummary {
		RunSummary {
			template_path: self.template_path.clone(),
			output_dir: self.output_dir.clone(),
			themes: self.themes.clone(),
		}
	}

	fn job<'a>(&'a self, theme: &'a str) -> SubstitutionJob<'a> {
		SubstitutionJob::new(&self.template_path, &self.output_dir, &self.token, theme)
	}
}

#[derive(Debug)]
pub struct ThemeResult {
	pub theme: String,
	pub output_path: PathBuf,
	pub result: Result<(), EngineError>,
}

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_THEMES_FAILED: u8 = 2;

#[derive(Debug)]
pub enum Outcome {
	Aborted,
	Completed(Vec<ThemeResult>),
}

impl Outcome {
	pub fn failed_themes(&self) -> Vec<&str> {
		match self {
			Outcome::Aborted => Vec::new(),
			Outcome::Completed(results) => {
				results.iter().filter(|r| r.result.is_err()).map(|r| r.theme.as_str()).collect()
			}
		}
	}

	/// Aborting is not a failure; any failed theme is.
	pub fn exit_code(&self) -> u8 {
		if self.failed_themes().is_empty() {
			EXIT_SUCCESS
		} else {
			EXIT_THEMES_FAILED
		}
	}
}

fn describe(err: &EngineError) -> String {
	match err.source() {
		Some(source) => format!("{}: {}", err, source),
		None => err.to_string(),
	}
}

/// Asks for confirmation, then runs one job per theme in the order given, writing progress to
/// `out`. A failed theme is reported and the remaining themes still run.
pub fn run<C, W>(plan: &ExportPlan, confirm: &mut C, out: &mut W) -> Result<Outcome, ExportError>
where
	C: Confirm + ?Sized,
	W: Write,
{
	if !confirm.confirm(&plan.summary()) {
		log::info!("Export aborted by user");
		writeln!(out, "Program aborted")?;
		return Ok(Outcome::Aborted);
	}

	writeln!(out, "\n\nLet's go then!")?;
	log::info!(
		"Replacing {:?} in {:?} for {} theme(s), writing to {:?}",
		plan.token.find_token,
		plan.template_path,
		plan.themes.len(),
		plan.output_dir
	);

	let mut results = Vec::with_capacity(plan.themes.len());
	for theme in plan.themes.iter() {
		let job = plan.job(theme);
		let result = job.run();
		match &result {
			Ok(()) => {
				log::debug!("Wrote {:?}", job.output_path);
				writeln!(out, "\t- {} done", theme)?;
			}
			Err(err) => {
				log::error!("Theme {:?} failed: {:?}", theme, err);
				eprintln!("{}", describe(err));
				writeln!(out, "Oops!, something went wrong with theme: {} :(\n", theme)?;
			}
		}
		results.push(ThemeResult { theme: theme.clone(), output_path: job.output_path, result });
	}

	let outcome = Outcome::Completed(results);
	let failed = outcome.failed_themes();
	if failed.is_empty() {
		writeln!(out, "All themes are done :)")?;
	} else {
		writeln!(out, "Finished with {} failed theme(s): {}", failed.len(), failed.iter().join(", "))?;
	}
	Ok(outcome)
}
