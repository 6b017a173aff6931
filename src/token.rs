#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
	#[error("Template path {0:?} has no file extension to derive the token and output extension from")]
	MalformedTemplatePath(String),

	#[error("Template path {0:?} has an empty file name before its extension, nothing to replace")]
	EmptyToken(String),
}

/// The word to replace in the template and the extension every output file gets, both derived
/// from the template's file name. `styles/base.css` gives the token `base` and extension `.css`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateToken {
	pub find_token: String,
	pub file_extension: String,
}

impl TemplateToken {
	pub fn derive(template_path: &str) -> Result<Self, TokenError> {
		let name_start = template_path.rfind(std::path::is_separator).map_or(0, |index| index + 1);
		let file_name = &template_path[name_start..];

		let dot = match file_name.rfind('.') {
			Some(dot) => dot,
			None => return Err(TokenError::MalformedTemplatePath(template_path.to_string())),
		};
		if dot == 0 {
			return Err(TokenError::EmptyToken(template_path.to_string()));
		}

		let (find_token, file_extension) = file_name.split_at(dot);
		log::debug!("Derived token {:?} and extension {:?} from {:?}", find_token, file_extension, template_path);
		Ok(TemplateToken { find_token: find_token.to_string(), file_extension: file_extension.to_string() })
	}

	/// File name for a theme's output, e.g. `dark.css`.
	pub fn output_file_name(&self, theme: &str) -> String {
		format!("{}{}", theme, self.file_extension)
	}
}
