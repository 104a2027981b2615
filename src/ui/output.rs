//! How much the CLI prints.

/// Verbosity picked by `--verbose` / `--quiet`.
///
/// Warnings, errors and machine-readable data are printed in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Normal output plus whatever captured generators printed.
    Verbose,
    /// Progress, status lines, headers and hints.
    #[default]
    Normal,
    /// Only warnings, errors and data.
    Quiet,
}

impl OutputMode {
    /// Mode for the global flags. `--quiet` wins; clap rejects both anyway.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    /// Echo stdout of captured commands after they succeed.
    pub fn shows_command_output(self) -> bool {
        self == Self::Verbose
    }

    /// Spinners, status lines, headers and hints.
    pub fn shows_progress(self) -> bool {
        self != Self::Quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_modes() {
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Normal);
        assert_eq!(OutputMode::from_flags(true, false), OutputMode::Verbose);
        assert_eq!(OutputMode::from_flags(false, true), OutputMode::Quiet);
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Quiet);
    }

    #[test]
    fn only_verbose_echoes_generator_output() {
        assert!(OutputMode::Verbose.shows_command_output());
        assert!(!OutputMode::Normal.shows_command_output());
        assert!(!OutputMode::Quiet.shows_command_output());
    }

    #[test]
    fn quiet_hides_progress() {
        assert!(OutputMode::Verbose.shows_progress());
        assert!(OutputMode::Normal.shows_progress());
        assert!(!OutputMode::Quiet.shows_progress());
    }
}
