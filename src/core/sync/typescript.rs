//! TypeScript source building blocks.
//!
//! Generated files are assembled line by line through [`CodeWriter`], which
//! owns indentation and doc comment layout. Names and literals coming from
//! the CMS pass through the helpers below before they reach the output.

/// Indentation-aware line buffer.
#[derive(Debug)]
pub struct CodeWriter {
    out: String,
    unit: &'static str,
    depth: usize,
}

impl CodeWriter {
    /// A writer indenting with four spaces.
    pub fn new() -> Self {
        Self::with_indent("    ")
    }

    pub fn with_indent(unit: &'static str) -> Self {
        Self {
            out: String::new(),
            unit,
            depth: 0,
        }
    }

    /// Write one line at the current depth. Empty lines carry no indent.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(self.unit);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Write a `/** ... */` block, paragraphs separated by an empty ` *` line.
    pub fn doc<I, S>(&mut self, paragraphs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.line("/**");
        for (i, paragraph) in paragraphs.into_iter().enumerate() {
            if i > 0 {
                self.line(" *");
            }
            for text in comment_text(paragraph.as_ref()).lines() {
                if text.trim().is_empty() {
                    self.line(" *");
                } else {
                    self.line(format!(" * {}", text.trim_end()));
                }
            }
        }
        self.line(" */")
    }

    /// Write `open`, the body one level deeper, then `close`.
    pub fn block(
        &mut self,
        open: impl AsRef<str>,
        close: &str,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.line(open);
        self.indent();
        body(self);
        self.dedent();
        self.line(close)
    }

    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a CMS type name into a TypeScript identifier.
///
/// Characters outside `[A-Za-z0-9_]` are dropped, a leading digit gets a `_`
/// prefix and an empty result becomes `_`.
pub fn safe_model_name(name: &str) -> String {
    let mut out: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if out.is_empty() {
        return "_".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Field name for a CMS property: the safe name with its first character
/// lower-cased.
pub fn field_name(name: &str) -> String {
    let safe = safe_model_name(name);
    let mut chars = safe.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => safe,
    }
}

/// Quote `value` as a TypeScript string literal using `quote`.
pub fn string_literal(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Text that is safe inside a block comment.
pub fn comment_text(value: &str) -> String {
    value.replace("*/", "*\\/")
}

/// Text that is safe inside a line comment.
pub fn line_comment_text(value: &str) -> String {
    value
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
