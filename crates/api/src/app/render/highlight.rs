use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;

const THEME: &str = "base16-ocean.dark";
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Class-based syntax highlighter.
///
/// Output is a sequence of `<span class="hl-…">` elements; the matching
/// stylesheet is generated once and shared by every render.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    stylesheet: String,
}

/// Highlighted markup plus the stylesheet it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub html: String,
    pub stylesheet: String,
}

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("unknown highlighting theme: {0}")]
    UnknownTheme(&'static str),
    #[error(transparent)]
    Syntect(#[from] syntect::Error),
}

impl Highlighter {
    pub fn new() -> Result<Self, HighlightError> {
        let themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .get(THEME)
            .ok_or(HighlightError::UnknownTheme(THEME))?;

        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            stylesheet: css_for_theme_with_class_style(theme, CLASS_STYLE)?,
        })
    }

    /// Highlight `content`, picking the grammar from `extension` when given.
    ///
    /// Unknown or absent extensions fall back to first-line detection (shebangs,
    /// modelines) and finally to plain text.
    pub fn highlight(
        &self,
        content: &str,
        extension: Option<&str>,
    ) -> Result<Highlighted, HighlightError> {
        let syntax = self.syntax_for(content, extension);
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, CLASS_STYLE);

        for line in LinesWithEndings::from(content) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(Highlighted {
            html: generator.finalize(),
            stylesheet: self.stylesheet.clone(),
        })
    }

    fn syntax_for(&self, content: &str, extension: Option<&str>) -> &SyntaxReference {
        extension
            .and_then(|ext| self.syntaxes.find_syntax_by_token(ext))
            .or_else(|| self.syntaxes.find_syntax_by_first_line(content))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }
}
