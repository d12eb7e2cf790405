/// Rewrites LaTeX math delimiters into dollar delimiters.
///
/// Nougat emits `\( \)` for inline and `\[ \]` for display math, while most
/// Markdown renderers only understand `$` and `$$`.
pub fn to_display_math(markdown: &str) -> String {
    markdown
        .replace(r"\(", "$")
        .replace(r"\)", "$")
        .replace(r"\[", "$$")
        .replace(r"\]", "$$")
}
