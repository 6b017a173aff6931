use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::token::TemplateToken;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
	#[error("Could not read template {0:?}")]
	TemplateUnreadable(PathBuf, #[source] std::io::Error),

	#[error("Could not write {0:?}, make sure the directory exists")]
	OutputUnwritable(PathBuf, #[source] std::io::Error),
}

/// One template-to-output substitution for a single theme.
#[derive(Debug)]
pub struct SubstitutionJob<'a> {
	pub template_path: &'a Path,
	pub output_dir: &'a Path,
	pub find_token: &'a str,
	pub theme: &'a str,
	pub output_path: PathBuf,
}

impl<'a> SubstitutionJob<'a> {
	pub fn new(template_path: &'a Path, output_dir: &'a Path, token: &'a TemplateToken, theme: &'a str) -> Self {
		// appended rather than joined, so a theme like `/tmp/dark` can't replace the output dir
		let mut output_path = output_dir.as_os_str().to_os_string();
		output_path.push("/");
		output_path.push(token.output_file_name(theme));
		let output_path = PathBuf::from(output_path);
		SubstitutionJob { template_path, output_dir, find_token: &token.find_token, theme, output_path }
	}

	/// Reads the whole template, substitutes every line and only then creates (or truncates) the
	/// output file, so an unreadable template never clobbers an existing output.
	pub fn run(&self) -> Result<(), EngineError> {
		log::debug!("Reading template {:?} for theme {:?}", self.template_path, self.theme);
		let template = std::fs::read(self.template_path)
			.map_err(|e| EngineError::TemplateUnreadable(self.template_path.to_path_buf(), e))?;

		let rendered = substitute(&template, self.find_token.as_bytes(), self.theme.as_bytes());

		log::debug!("Writing {} bytes to {:?} (output dir {:?})", rendered.len(), self.output_path, self.output_dir);
		let f = File::create(&self.output_path) //
			.map_err(|e| EngineError::OutputUnwritable(self.output_path.clone(), e))?;
		let mut writer = BufWriter::new(f);
		writer
			.write_all(&rendered)
			.and_then(|_| writer.flush())
			.map_err(|e| EngineError::OutputUnwritable(self.output_path.clone(), e))?;

		Ok(())
	}
}

/// Substitutes `find` with `replace` on every line of `template`. Every line read is written back
/// followed by `\n`, including an unterminated last line. A `\r` before the `\n` stays part of
/// the line.
pub fn substitute(template: &[u8], find: &[u8], replace: &[u8]) -> Vec<u8> {
	let mut output = Vec::with_capacity(template.len());
	for line in lines(template) {
		replace_in_line(line, find, replace, &mut output);
		output.push(b'\n');
	}
	output
}

fn lines(template: &[u8]) -> impl Iterator<Item = &[u8]> {
	// a terminating newline does not start another line
	let body = template.strip_suffix(b"\n").unwrap_or(template);
	let is_empty = template.is_empty();
	body.split(|b| *b == b'\n').filter(move |_| !is_empty)
}

fn replace_in_line(line: &[u8], find: &[u8], replace: &[u8], output: &mut Vec<u8>) {
	if find.is_empty() {
		output.extend_from_slice(line);
		return;
	}

	// scanning resumes after the inserted replacement, so a replacement containing `find` is never
	// substituted again
	let mut rest = line;
	while let Some(pos) = rest.windows(find.len()).position(|window| window == find) {
		output.extend_from_slice(&rest[..pos]);
		output.extend_from_slice(replace);
		rest = &rest[pos + find.len()..];
	}
	output.extend_from_slice(rest);
}

#[cfg(test)]
mod tests {
	use super::*;

	fn substitute_str(template: &str, find: &str, replace: &str) -> String {
		String::from_utf8(substitute(template.as_bytes(), find.as_bytes(), replace.as_bytes())).unwrap()
	}

	#[test]
	fn replaces_every_occurrence_on_every_line() {
		let template = ".base { color: var(--base-fg); }\n.base-alt { background: base; }\n";
		assert_eq!(
			substitute_str(template, "base", "dark"),
			".dark { color: var(--dark-fg); }\n.dark-alt { background: dark; }\n"
		);
	}

	#[test]
	fn replacement_count_matches_original_token_count() {
		let line = "base base-base xbasex";
		let output = substitute_str(line, "base", "night");
		assert_eq!(output.matches("base").count(), 0);
		assert_eq!(output.matches("night").count(), line.matches("base").count());
	}

	#[test]
	fn replacement_containing_token_is_not_replaced_again() {
		assert_eq!(substitute_str("dark dark\n", "dark", "super_dark"), "super_dark super_dark\n");
		assert_eq!(substitute_str("dark\n", "dark", "darkdark"), "darkdark\n");
	}

	#[test]
	fn adjacent_occurrences_are_all_replaced() {
		assert_eq!(substitute_str("aaaa\n", "aa", "b"), "bb\n");
	}

	#[test]
	fn unterminated_last_line_gets_a_newline() {
		assert_eq!(substitute_str("one base\ntwo base", "base", "x"), "one x\ntwo x\n");
	}

	#[test]
	fn blank_lines_are_preserved() {
		assert_eq!(substitute_str("a\n\n\nb\n", "a", "c"), "c\n\n\nb\n");
		assert_eq!(substitute_str("\n", "a", "c"), "\n");
	}

	#[test]
	fn empty_template_produces_empty_output() {
		assert_eq!(substitute_str("", "base", "dark"), "");
	}

	#[test]
	fn crlf_line_endings_survive() {
		assert_eq!(substitute_str("base\r\nbase\r\n", "base", "dark"), "dark\r\ndark\r\n");
	}

	#[test]
	fn non_utf8_bytes_pass_through() {
		let template = b"\xffbase\xfe\n";
		assert_eq!(substitute(template, b"base", b"dark"), b"\xffdark\xfe\n".to_vec());
	}

	#[test]
	fn job_writes_output_and_leaves_template_untouched() {
		let dir = tempfile::TempDir::new().unwrap();
		let template_path = dir.path().join("base.css");
		let template = ".base { color: base; }\n";
		std::fs::write(&template_path, template).unwrap();

		let token = TemplateToken::derive(template_path.to_str().unwrap()).unwrap();
		let job = SubstitutionJob::new(&template_path, dir.path(), &token, "dark");
		assert_eq!(job.output_path, dir.path().join("dark.css"));
		job.run().unwrap();

		assert_eq!(std::fs::read_to_string(dir.path().join("dark.css")).unwrap(), ".dark { color: dark; }\n");
		assert_eq!(std::fs::read_to_string(&template_path).unwrap(), template);
	}

	#[test]
	fn absolute_theme_stays_inside_output_dir() {
		let token = TemplateToken::derive("styles/base.css").unwrap();
		let job = SubstitutionJob::new(Path::new("styles/base.css"), Path::new("out"), &token, "/tmp/evil");
		assert_eq!(job.output_path, PathBuf::from("out//tmp/evil.css"));
		assert!(job.output_path.starts_with("out"));
	}

	#[test]
	fn job_overwrites_existing_output() {
		let dir = tempfile::TempDir::new().unwrap();
		let template_path = dir.path().join("base.css");
		std::fs::write(&template_path, "base\n").unwrap();
		std::fs::write(dir.path().join("dark.css"), "stale content that is longer\n").unwrap();

		let token = TemplateToken::derive(template_path.to_str().unwrap()).unwrap();
		SubstitutionJob::new(&template_path, dir.path(), &token, "dark").run().unwrap();

		assert_eq!(std::fs::read_to_string(dir.path().join("dark.css")).unwrap(), "dark\n");
	}

	#[test]
	fn missing_template_is_unreadable_and_writes_nothing() {
		let dir = tempfile::TempDir::new().unwrap();
		let template_path = dir.path().join("base.css");
		std::fs::write(dir.path().join("dark.css"), "previous\n").unwrap();

		let token = TemplateToken::derive(template_path.to_str().unwrap()).unwrap();
		let result = SubstitutionJob::new(&template_path, dir.path(), &token, "dark").run();

		assert!(matches!(result, Err(EngineError::TemplateUnreadable(path, _)) if path == template_path));
		assert_eq!(std::fs::read_to_string(dir.path().join("dark.css")).unwrap(), "previous\n");
	}

	#[test]
	fn missing_output_dir_is_unwritable() {
		let dir = tempfile::TempDir::new().unwrap();
		let template_path = dir.path().join("base.css");
		std::fs::write(&template_path, "base\n").unwrap();
		let output_dir = dir.path().join("missing");

		let token = TemplateToken::derive(template_path.to_str().unwrap()).unwrap();
		let result = SubstitutionJob::new(&template_path, &output_dir, &token, "dark").run();

		assert!(matches!(result, Err(EngineError::OutputUnwritable(path, _)) if path == output_dir.join("dark.css")));
		assert!(!output_dir.exists());
	}
}
