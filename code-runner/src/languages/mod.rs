//! Language lookup table.
//!
//! Each supported language contributes one static [`LanguageProfile`]. Nothing
//! outside this module branches on the language; callers go through
//! [`Language::profile`].

mod go;
mod python;

use crate::types::Language;
use which::which;

/// Everything needed to present and run one language
#[derive(Debug)]
pub struct LanguageProfile {
    pub language: Language,
    /// Name shown in the language picker
    pub display_name: &'static str,
    /// File the submitted code is written to inside the workspace
    pub file_name: &'static str,
    /// Program invoked to run the code unless overridden
    pub program: &'static str,
    /// Arguments placed before the source file path
    pub args: &'static [&'static str],
    /// Starter snippet shown in the editor
    pub default_code: &'static str,
    /// Syntax mode label understood by the page's editor
    pub editor_mode: &'static str,
}

/// Indexed by `Language` discriminant, so the order must follow the enum.
static PROFILES: [LanguageProfile; 2] = [go::PROFILE, python::PROFILE];

impl Language {
    pub fn profile(self) -> &'static LanguageProfile {
        &PROFILES[self as usize]
    }
}

/// Programs from `programs` that cannot be found on `PATH`
pub fn missing_tools<'a>(programs: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    programs
        .into_iter()
        .filter(|program| which(program).is_err())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) fn skip_if_not_available(tools: &[&str]) -> bool {
    let missing = missing_tools(tools.iter().copied());
    if !missing.is_empty() {
        eprintln!("Skipping test: {} not available", missing.join(", "));
        return true;
    }
    false
}
