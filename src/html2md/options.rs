use derive_builder::Builder;

/// Structural choices for HTML→Markdown conversion.
///
/// The flags are independent; any combination is valid. All default to off.
///
/// # Examples
///
/// ```
/// use docq::ConversionOptionsBuilder;
///
/// let options = ConversionOptionsBuilder::default()
///     .generate_front_matter(true)
///     .use_title_as_h1(true)
///     .build()
///     .unwrap();
/// assert!(!options.extract_scripts_as_code_blocks);
/// ```
#[derive(Builder, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[builder(default)]
pub struct ConversionOptions {
    /// Emit inline `<script>` bodies as fenced code blocks. External (`src=`) scripts are
    /// dropped either way.
    pub extract_scripts_as_code_blocks: bool,
    /// Prefix the output with a YAML front-matter block built from `<head>` metadata.
    pub generate_front_matter: bool,
    /// Render the document `<title>` as a level-1 heading instead of a plain paragraph.
    pub use_title_as_h1: bool,
}
