use super::LanguageProfile;
use crate::types::Language;

const DEFAULT_CODE: &str = r#"input_data = input()
print("Hello from Python! You entered:", input_data)"#;

// Plain `python` is missing on many distributions; override with --python.
pub(super) const PROFILE: LanguageProfile = LanguageProfile {
    language: Language::Python,
    display_name: "Python",
    file_name: "main.py",
    program: "python3",
    args: &[],
    default_code: DEFAULT_CODE,
    editor_mode: "python",
};
