//! Lexer and parser options.

/// Configuration shared by the lexer and parser.
///
/// The defaults give the base language: `#` comments discarded, no
/// expression arguments, no user punctuators, unlimited nesting.
///
/// # Example
///
/// ```
/// use confetti_lex::Options;
///
/// let options = Options::new()
///     .with_c_style_comments(true)
///     .with_punctuators(vec![":=".to_string()]);
/// assert!(options.c_style_comments);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Preserve comments alongside the tree instead of discarding them.
    pub capture_comments: bool,
    /// Recognize `//` as a line comment in addition to `#`.
    pub c_style_comments: bool,
    /// Allow `( … )`-delimited verbatim arguments.
    pub expression_arguments: bool,
    /// Strings recognized as standalone single-argument tokens,
    /// longest match first. Built-in punctuation always wins.
    pub punctuators: Vec<String>,
    /// Cap on block nesting depth; `None` means unlimited.
    pub max_depth: Option<u32>,
}

impl Options {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capture_comments(mut self, capture: bool) -> Self {
        self.capture_comments = capture;
        self
    }

    pub fn with_c_style_comments(mut self, enabled: bool) -> Self {
        self.c_style_comments = enabled;
        self
    }

    pub fn with_expression_arguments(mut self, enabled: bool) -> Self {
        self.expression_arguments = enabled;
        self
    }

    pub fn with_punctuators(mut self, punctuators: Vec<String>) -> Self {
        self.punctuators = punctuators;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<u32>) -> Self {
        self.max_depth = depth;
        self
    }
}
