use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;

mod cli;
mod config;
mod confirm;
mod engine;
mod export;
mod token;

fn load_plan(command: cli::Command) -> anyhow::Result<Option<(export::ExportPlan, bool)>> {
	match command {
		cli::Command::Help => Ok(None),
		cli::Command::Export { template_path, output_dir, themes, assume_yes } => {
			let plan = export::ExportPlan::new(template_path, output_dir, themes) //
				.context("Preparing export")?;
			Ok(Some((plan, assume_yes)))
		}
		cli::Command::ConfigFile { path, assume_yes } => {
			let config = config::load_export(&path) //
				.with_context(|| format!("Loading export config {:?}", path))?;
			let plan = export::ExportPlan::new(config.template, config.output_dir, config.themes)
				.with_context(|| format!("Preparing export from {:?}", path))?;
			Ok(Some((plan, assume_yes)))
		}
	}
}

fn try_run<F, W>(args: Vec<String>, make_confirm: F, out: &mut W) -> anyhow::Result<u8>
where
	F: FnOnce(bool) -> Box<dyn confirm::Confirm>,
	W: Write,
{
	let command = match cli::parse(args) {
		Ok(command) => command,
		Err(err) => {
			writeln!(out, "{}", err)?;
			return Ok(export::EXIT_ERROR);
		}
	};

	let (plan, assume_yes) = match load_plan(command)? {
		Some(loaded) => loaded,
		None => {
			writeln!(out, "{}", cli::USAGE)?;
			return Ok(export::EXIT_SUCCESS);
		}
	};
	log::debug!("Export plan: {:?}", plan);

	writeln!(out, "Theme Exporter - rev {} built {}", env!("GIT_HASH"), env!("BUILD_TS"))?;

	let mut confirm = make_confirm(assume_yes);
	let outcome = export::run(&plan, confirm.as_mut(), out).context("Running export")?;
	if let export::Outcome::Completed(results) = &outcome {
		for written in results.iter().filter(|result| result.result.is_ok()) {
			log::info!("Wrote {:?} for theme {:?}", written.output_path, written.theme);
		}
	}
	Ok(outcome.exit_code())
}

/// Runs the whole command line and returns the process exit code. Errors that stop the run before
/// any theme is processed are printed and give `EXIT_ERROR`.
fn run<F, W>(args: Vec<String>, make_confirm: F, out: &mut W) -> u8
where
	F: FnOnce(bool) -> Box<dyn confirm::Confirm>,
	W: Write,
{
	match try_run(args, make_confirm, out) {
		Ok(code) => code,
		Err(err) => {
			log::error!("{:?}", err);
			eprintln!("Error: {:#}", err);
			export::EXIT_ERROR
		}
	}
}

fn main() -> anyhow::Result<ExitCode> {
	let log_level = env::var("LOG_LEVEL").map_or(String::from("warn"), |value| value.to_lowercase());
	simple_log::new(
		simple_log::LogConfigBuilder::builder() //
			.level(log_level)
			.output_console()
			.build(),
	)
	.map_err(|err| anyhow::anyhow!(err))?;

	let mut args: Vec<String> = env::args().collect();
	args.remove(0); // normally the path of the executable itself

	let code = run(
		args,
		|assume_yes| -> Box<dyn confirm::Confirm> {
			if assume_yes {
				Box::new(confirm::AssumeYes::new(io::stdout()))
			} else {
				Box::new(confirm::ConsolePrompt::new(io::stdin().lock(), io::stdout()))
			}
		},
		&mut io::stdout(),
	);
	Ok(ExitCode::from(code))
}
