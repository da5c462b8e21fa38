use super::LanguageProfile;
use crate::types::Language;

const DEFAULT_CODE: &str = r#"package main

import "fmt"

func main() {
    var input string
    fmt.Scanln(&input)
    fmt.Println("Hello from Go! You entered:", input)
}
"#;

pub(super) const PROFILE: LanguageProfile = LanguageProfile {
    language: Language::Go,
    display_name: "Go",
    file_name: "main.go",
    program: "go",
    args: &["run"],
    default_code: DEFAULT_CODE,
    editor_mode: "golang",
};
