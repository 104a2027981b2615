//! Colors, status marks and the failed-command block.

use console::Style;

/// Leading mark of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Success,
    Warning,
    Error,
}

impl Mark {
    /// The glyph printed before the message.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
        }
    }
}

/// Styles shared by every terminal surface.
#[derive(Debug, Clone)]
pub struct ScaffoldTheme {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    /// Headers and hints.
    pub accent: Style,
    /// Secondary text and box borders.
    pub muted: Style,
    /// Command lines shown to the user.
    pub command: Style,
    /// Section labels such as "Next steps:".
    pub label: Style,
}

impl Default for ScaffoldTheme {
    fn default() -> Self {
        Self::colored()
    }
}

impl ScaffoldTheme {
    /// Full color. `console` still drops the escapes when colors are disabled.
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            accent: Style::new().cyan(),
            muted: Style::new().dim(),
            command: Style::new().dim().italic(),
            label: Style::new().bold(),
        }
    }

    /// No styling at all.
    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            success: none.clone(),
            warning: none.clone(),
            error: none.clone(),
            accent: none.clone(),
            muted: none.clone(),
            command: none.clone(),
            label: none,
        }
    }

    /// Colored on a terminal unless `NO_COLOR` is set.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// `✓ msg`, `⚠ msg` or `✗ msg` in the mark's color.
    pub fn mark(&self, mark: Mark, msg: &str) -> String {
        let style = match mark {
            Mark::Success => &self.success,
            Mark::Warning => &self.warning,
            Mark::Error => &self.error,
        };
        style
            .apply_to(format!("{} {}", mark.glyph(), msg))
            .to_string()
    }

    /// Banner line for a section.
    pub fn header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.accent.apply_to("🚀"),
            self.label.apply_to(title)
        )
    }

    /// Lines of the box shown for a failed command.
    ///
    /// The box holds the command line and, when present, its output. The
    /// hint goes below the box.
    pub fn error_block(&self, command: &str, output: &str, hint: Option<&str>) -> Vec<String> {
        let edge = |s: &str| self.muted.apply_to(s).to_string();
        let mut lines = vec![
            format!("    {} {}", edge("┌─"), edge("Command ──────────────────────────")),
            format!("    {} {}", edge("│"), self.command.apply_to(command)),
        ];
        if !output.is_empty() {
            lines.push(format!(
                "    {} {}",
                edge("├─"),
                edge("Output ───────────────────────────")
            ));
            lines.extend(output.lines().map(|l| format!("    {} {}", edge("│"), l)));
        }
        lines.push(format!("    {}", edge("└────────────────────────────────────")));
        if let Some(hint) = hint {
            lines.push(String::new());
            lines.push(format!("    {}", self.accent.apply_to(format!("Hint: {}", hint))));
        }
        lines
    }
}

/// Colors are used on a terminal when `NO_COLOR` is unset.
pub fn should_use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_prefix_glyphs() {
        let theme = ScaffoldTheme::plain();
        assert_eq!(theme.mark(Mark::Success, "Created app"), "✓ Created app");
        assert_eq!(theme.mark(Mark::Warning, "Git not installed"), "⚠ Git not installed");
        assert_eq!(theme.mark(Mark::Error, "Failed"), "✗ Failed");
    }

    #[test]
    fn header_carries_title() {
        let line = ScaffoldTheme::plain().header("Creating my-app");
        assert_eq!(line, "🚀 Creating my-app");
    }

    #[test]
    fn error_block_frames_command_and_output() {
        let lines = ScaffoldTheme::plain().error_block(
            "npm create vite@latest app",
            "npm ERR! code E404\nnpm ERR! 404 Not Found",
            Some("Check that node, npm is installed and on your PATH"),
        );
        assert_eq!(lines[1], "    │ npm create vite@latest app");
        assert!(lines.contains(&"    │ npm ERR! 404 Not Found".to_string()));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("    Hint: Check that node, npm is installed and on your PATH")
        );
    }

    #[test]
    fn error_block_without_output_has_no_output_section() {
        let lines = ScaffoldTheme::plain().error_block("git init", "", None);
        assert_eq!(lines.len(), 3);
        assert!(!lines.iter().any(|l| l.contains("Output")));
    }
}
