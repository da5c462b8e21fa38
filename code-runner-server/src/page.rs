//! Editor page rendering.

use code_runner::{escape_html, Language};

const TEMPLATE: &str = include_str!("../templates/base.html");

/// Render the editor page with `language` selected and its starter snippet
/// loaded.
pub fn render_page(language: Language) -> Result<String, serde_json::Error> {
    let profile = language.profile();

    let options: Vec<String> = Language::ALL
        .iter()
        .map(|option| {
            let selected = if *option == language { " selected" } else { "" };
            format!(
                "        <option value=\"{}\"{}>{}</option>",
                option.as_str(),
                selected,
                escape_html(option.profile().display_name)
            )
        })
        .collect();

    // The snippet is substituted last so placeholder-like text inside it is
    // left alone.
    Ok(TEMPLATE
        .replace("{{language_options}}", &options.join("\n"))
        .replace("{{current_language}}", language.as_str())
        .replace("{{editor_mode}}", profile.editor_mode)
        .replace("{{default_code}}", &js_string(profile.default_code)?))
}

/// Encode `text` as a JavaScript string literal that is safe inside a
/// `<script>` element.
fn js_string(text: &str) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(text)?.replace("</", "<\\/"))
}
