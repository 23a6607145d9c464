/// Ordered output lines of a run.
///
/// `WRITE` items land on the current line separated by a single space; a
/// `/` item starts a new line. Lines already written are never changed
/// except by appending to the last one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    lines: Vec<String>,
}

impl OutputBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh line.
    pub fn new_line(&mut self) {
        self.lines.push(String::new());
    }

    /// Appends text to the current line, separated from earlier text on the
    /// same line by one space.
    ///
    /// # Example
    /// ```
    /// use abapi::interpreter::executor::output::OutputBuffer;
    ///
    /// let mut out = OutputBuffer::new();
    /// out.write("Mensaje:");
    /// out.write("Hola");
    /// out.new_line();
    /// out.write("8");
    /// assert_eq!(out.render(), "Mensaje: Hola\n8");
    /// ```
    pub fn write(&mut self, text: &str) {
        if self.lines.is_empty() {
            self.new_line();
        }
        let last = self.lines.len() - 1;
        let line = &mut self.lines[last];
        if !line.is_empty() && !line.ends_with(' ') {
            line.push(' ');
        }
        line.push_str(text);
    }

    /// The lines written so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns `true` if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Joins the lines with `\n`.
    ///
    /// Each line is right-trimmed and a trailing empty line is dropped.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines: Vec<&str> = self.lines.iter().map(|line| line.trim_end()).collect();
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_new_line_starts_the_first_line() {
        let mut out = OutputBuffer::new();
        out.new_line();
        out.write("a");
        assert_eq!(out.render(), "a");
    }

    #[test]
    fn trailing_new_line_is_suppressed() {
        let mut out = OutputBuffer::new();
        out.write("a");
        out.new_line();
        assert_eq!(out.render(), "a");
        out.new_line();
        assert_eq!(out.render(), "a\n");
    }

    #[test]
    fn padded_fields_are_trimmed_on_render() {
        let mut out = OutputBuffer::new();
        out.write("ab  ");
        out.write("c");
        assert_eq!(out.lines(), ["ab  c"]);
        out.write("d   ");
        assert_eq!(out.render(), "ab  c d");
    }

    #[test]
    fn empty_buffer_renders_empty() {
        assert_eq!(OutputBuffer::new().render(), "");
        assert!(OutputBuffer::new().is_empty());
    }
}
