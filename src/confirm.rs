use std::io::{BufRead, Write};
use std::path::PathBuf;

/// What is about to be generated, shown to the user before anything is written.
#[derive(Debug, Clone)]
pub struct RunSummary {
	pub template_path: PathBuf,
	pub output_dir: PathBuf,
	pub themes: Vec<String>,
}

impl RunSummary {
	pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
		writeln!(out, "\nPlease check the following: \n")?;
		writeln!(out, "Generic file: {}", self.template_path.display())?;
		writeln!(out, "Output folder: {}", self.output_dir.display())?;
		writeln!(out, "Themes({}): ", self.themes.len())?;
		for theme in self.themes.iter() {
			writeln!(out, "\t- {}", theme)?;
		}
		Ok(())
	}
}

pub trait Confirm {
	fn confirm(&mut self, summary: &RunSummary) -> bool;
}

impl<F> Confirm for F
where
	F: FnMut(&RunSummary) -> bool,
{
	fn confirm(&mut self, summary: &RunSummary) -> bool {
		(self)(summary)
	}
}

/// Asks on the console. Only an answer starting with `Y` or `y` proceeds.
pub struct ConsolePrompt<R, W> {
	input: R,
	output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
	pub fn new(input: R, output: W) -> Self {
		ConsolePrompt { input, output }
	}

	fn ask(&mut self, summary: &RunSummary) -> std::io::Result<bool> {
		summary.write_to(&mut self.output)?;
		writeln!(self.output, "\nLooking good (Y/N)?")?;
		self.output.flush()?;

		// the first non-whitespace character is the answer, even if it takes several lines to get to
		let mut line = String::new();
		loop {
			line.clear();
			if self.input.read_line(&mut line)? == 0 {
				return Ok(false);
			}
			if let Some(answer) = line.trim_start().chars().next() {
				return Ok(answer == 'Y' || answer == 'y');
			}
		}
	}
}

impl<R: BufRead, W: Write> Confirm for ConsolePrompt<R, W> {
	fn confirm(&mut self, summary: &RunSummary) -> bool {
		match self.ask(summary) {
			Ok(answer) => answer,
			Err(err) => {
				log::error!("Error reading confirmation answer: {:?}", err);
				false
			}
		}
	}
}

/// Used with `--yes`. Still prints the summary so the log of a non-interactive run shows what was
/// generated.
pub struct AssumeYes<W> {
	output: W,
}

impl<W: Write> AssumeYes<W> {
	pub fn new(output: W) -> Self {
		AssumeYes { output }
	}
}

impl<W: Write> Confirm for AssumeYes<W> {
	fn confirm(&mut self, summary: &RunSummary) -> bool {
		if let Err(err) = summary.write_to(&mut self.output) {
			log::warn!("Error printing run summary: {:?}", err);
		}
		log::info!("Confirmation skipped, proceeding with {} theme(s)", summary.themes.len());
		true
	}
}
