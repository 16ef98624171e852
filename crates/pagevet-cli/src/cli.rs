//! Command-line interface definition for the pagevet binary.
//!
//! A single flat command: pass URLs and run options, get an exit code.
//! The CLI enums mirror the library's [`Engine`] and [`WaitUntil`] types
//! so the library stays free of clap.

use clap::{Parser, ValueEnum};
use pagevet::{CheckConfig, Engine, WaitUntil};

/// pagevet - browser smoke tests for URL lists
#[derive(Parser, Debug)]
#[command(
    name = "pagevet",
    version,
    about = "Visit URLs in a real browser and report console errors, exceptions, timeouts and bad statuses",
    long_about = "pagevet opens each given URL in a fresh, isolated browsing context of a real\n\
                  Chromium-family browser and counts the error signals the page produced while\n\
                  loading: console errors, uncaught exceptions, navigation timeouts and non-200\n\
                  document statuses. The exit code is 0 when no URL produced an error, 1 otherwise."
)]
pub struct Cli {
    /// URLs to visit, in order
    ///
    /// May be repeated or given as a space-separated list. With no URLs
    /// the tool performs no work and exits 0.
    #[arg(short = 'u', long = "urls", value_name = "URL", num_args = 1..)]
    pub urls: Vec<String>,

    /// Browser engine to drive
    ///
    /// Chromium-family channels resolve to their channel executable.
    /// firefox and webkit are accepted for compatibility but rejected
    /// before any browser work: the backend speaks CDP only.
    #[arg(short, long, value_enum, default_value = "chromium")]
    pub browser: BrowserKind,

    /// Run with a visible browser window (headless otherwise)
    #[arg(short = 'H', long)]
    pub headed: bool,

    /// Navigation timeout in seconds
    #[arg(short, long, value_name = "SECONDS", default_value_t = CheckConfig::DEFAULT_TIMEOUT_SECS)]
    pub timeout: f64,

    /// When a navigation counts as complete
    #[arg(short, long, value_enum, default_value = "load")]
    pub wait_until: WaitUntilArg,

    /// Enable verbose logging (debug level)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Builds the validated run configuration.
    ///
    /// # Errors
    ///
    /// Propagates the library's validation errors (bad timeout,
    /// unsupported engine).
    pub fn to_config(&self) -> pagevet::Result<CheckConfig> {
        CheckConfig::new(
            self.urls.clone(),
            self.browser.into(),
            self.headed,
            self.timeout,
            self.wait_until.into(),
        )
    }
}

/// Engine selector, mirroring the library's [`Engine`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum BrowserKind {
    /// Generic Chromium (or an installed Chrome as a fallback)
    #[value(name = "chromium")]
    Chromium,
    /// Google Chrome, stable channel
    #[value(name = "chrome")]
    Chrome,
    /// Google Chrome, beta channel
    #[value(name = "chrome-beta")]
    ChromeBeta,
    /// Microsoft Edge, stable channel
    #[value(name = "msedge")]
    Msedge,
    /// Microsoft Edge, beta channel
    #[value(name = "msedge-beta")]
    MsedgeBeta,
    /// Microsoft Edge, dev channel
    #[value(name = "msedge-dev")]
    MsedgeDev,
    /// Mozilla Firefox (rejected at configuration time)
    #[value(name = "firefox")]
    Firefox,
    /// WebKit (rejected at configuration time)
    #[value(name = "webkit")]
    Webkit,
}

impl From<BrowserKind> for Engine {
    fn from(kind: BrowserKind) -> Self {
        match kind {
            BrowserKind::Chromium => Engine::Chromium,
            BrowserKind::Chrome => Engine::Chrome,
            BrowserKind::ChromeBeta => Engine::ChromeBeta,
            BrowserKind::Msedge => Engine::Msedge,
            BrowserKind::MsedgeBeta => Engine::MsedgeBeta,
            BrowserKind::MsedgeDev => Engine::MsedgeDev,
            BrowserKind::Firefox => Engine::Firefox,
            BrowserKind::Webkit => Engine::Webkit,
        }
    }
}

/// Navigation-completion criterion, mirroring the library's [`WaitUntil`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum WaitUntilArg {
    /// The DOM has been parsed
    #[value(name = "domcontentloaded")]
    DomContentLoaded,
    /// The load event fired
    #[value(name = "load")]
    Load,
    /// The navigation request committed
    #[value(name = "commit")]
    Commit,
}

impl From<WaitUntilArg> for WaitUntil {
    fn from(arg: WaitUntilArg) -> Self {
        match arg {
            WaitUntilArg::DomContentLoaded => WaitUntil::DomContentLoaded,
            WaitUntilArg::Load => WaitUntil::Load,
            WaitUntilArg::Commit => WaitUntil::Commit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_documented_surface() {
        let cli = Cli::try_parse_from(["pagevet"]).expect("no args is valid");
        assert!(cli.urls.is_empty());
        assert_eq!(cli.browser, BrowserKind::Chromium);
        assert!(!cli.headed);
        assert!((cli.timeout - 30.0).abs() < f64::EPSILON);
        assert_eq!(cli.wait_until, WaitUntilArg::Load);
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn urls_accepts_a_space_separated_list() {
        let cli = Cli::try_parse_from([
            "pagevet",
            "-u",
            "https://a.example",
            "https://b.example",
        ])
        .expect("two urls parse");
        assert_eq!(cli.urls, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn urls_flag_may_be_repeated() {
        let cli = Cli::try_parse_from([
            "pagevet",
            "-u",
            "https://a.example",
            "--urls",
            "https://b.example",
        ])
        .expect("repeated flag parses");
        assert_eq!(cli.urls.len(), 2);
    }

    #[test]
    fn engine_names_round_trip() {
        for (name, expected) in [
            ("chromium", Engine::Chromium),
            ("chrome", Engine::Chrome),
            ("chrome-beta", Engine::ChromeBeta),
            ("msedge", Engine::Msedge),
            ("msedge-beta", Engine::MsedgeBeta),
            ("msedge-dev", Engine::MsedgeDev),
            ("firefox", Engine::Firefox),
            ("webkit", Engine::Webkit),
        ] {
            let cli = Cli::try_parse_from(["pagevet", "-b", name]).expect("engine parses");
            assert_eq!(Engine::from(cli.browser), expected, "engine {name}");
        }
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["pagevet", "-v", "-q"]).is_err());
    }

    #[test]
    fn firefox_fails_configuration() {
        let cli = Cli::try_parse_from(["pagevet", "-u", "https://a.example", "-b", "firefox"])
            .expect("parses; rejected later");
        let err = cli.to_config().unwrap_err();
        assert!(err.to_string().contains("firefox"));
    }

    #[test]
    fn non_positive_timeout_fails_configuration() {
        let cli = Cli::try_parse_from(["pagevet", "-u", "https://a.example", "-t", "0"])
            .expect("parses; rejected later");
        assert!(cli.to_config().is_err());
    }

    #[test]
    fn fractional_timeout_is_accepted() {
        let cli = Cli::try_parse_from(["pagevet", "-u", "https://a.example", "-t", "2.5"])
            .expect("parses");
        let config = cli.to_config().expect("valid config");
        assert_eq!(config.timeout, std::time::Duration::from_millis(2500));
    }
}
