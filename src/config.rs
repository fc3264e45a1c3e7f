//! Configuration file handling for portfolio-ui.
//!
//! Loads configuration from `~/.config/portfolio-ui/config.toml` or a custom path.
//! Every selector, class name, label and timing a component uses lives here
//! and is handed to the component when it is constructed.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Configuration file structure for portfolio-ui.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub preloader: PreloaderConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub typewriter: TypewriterConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub modal: ModalConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub back_to_top: BackToTopConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    pub selector: String,
    pub fade_class: String,
    /// Delay after `load` before the fade starts.
    pub delay_ms: u64,
    /// Length of the fade; the overlay is removed from layout afterwards.
    pub fade_ms: u64,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            selector: "#preloader".to_string(),
            fade_class: "fade-out".to_string(),
            delay_ms: 500,
            fade_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub link_selector: String,
    /// Height of the fixed navigation bar subtracted from scroll targets.
    pub nav_offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            link_selector: "a[href^=\"#\"]".to_string(),
            nav_offset: 70.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub visible_class: String,
    /// Fraction of an element's height that must be on screen (0.0-1.0).
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".fade-in".to_string(),
            visible_class: "visible".to_string(),
            threshold: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub toggle_selector: String,
    /// Icon element inside the toggle.
    pub icon_selector: String,
    /// Label element inside the toggle.
    pub label_selector: String,
    pub dark_class: String,
    pub light_icon: String,
    pub dark_icon: String,
    pub light_label: String,
    pub dark_label: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            toggle_selector: "#theme-toggle".to_string(),
            icon_selector: "i".to_string(),
            label_selector: ".theme-label".to_string(),
            dark_class: "dark-mode".to_string(),
            light_icon: "fa-moon".to_string(),
            dark_icon: "fa-sun".to_string(),
            light_label: "Dark Mode".to_string(),
            dark_label: "Light Mode".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub hamburger_selector: String,
    pub menu_selector: String,
    pub active_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            hamburger_selector: ".hamburger".to_string(),
            menu_selector: ".nav-menu".to_string(),
            active_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub selector: String,
    /// Text to animate. Empty means "use the element's initial text".
    pub text: String,
    pub start_delay_ms: u64,
    pub typing_ms: u64,
    pub deleting_ms: u64,
    pub pause_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            selector: ".typing-text".to_string(),
            text: String::new(),
            start_delay_ms: 500,
            typing_ms: 100,
            deleting_ms: 50,
            pause_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub button_selector: String,
    pub card_selector: String,
    pub active_class: String,
    /// Filter value that matches every card.
    pub all_value: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            button_selector: ".filter-btn".to_string(),
            card_selector: ".project-card".to_string(),
            active_class: "active".to_string(),
            all_value: "all".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub trigger_selector: String,
    pub modal_selector: String,
    pub title_selector: String,
    pub desc_selector: String,
    pub github_selector: String,
    pub live_selector: String,
    pub close_selector: String,
    /// `display` value used while the dialog is open.
    pub open_display: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            trigger_selector: ".view-details".to_string(),
            modal_selector: "#project-modal".to_string(),
            title_selector: "#modal-title".to_string(),
            desc_selector: "#modal-desc".to_string(),
            github_selector: "#modal-github".to_string(),
            live_selector: "#modal-live".to_string(),
            close_selector: ".modal-close".to_string(),
            open_display: "flex".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub form_selector: String,
    pub status_selector: String,
    /// Submit control, searched inside the form.
    pub submit_selector: String,
    pub sending_label: String,
    pub success_message: String,
    pub failure_message: String,
    pub network_message: String,
    pub success_color: String,
    pub error_color: String,
    /// Delay after resolution before the status text is cleared.
    pub clear_after_ms: u64,
    /// Overall request timeout.
    pub timeout_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_selector: "#contact-form".to_string(),
            status_selector: "#form-status".to_string(),
            submit_selector: "button[type=submit]".to_string(),
            sending_label: "Sending...".to_string(),
            success_message: "Thanks for your message! I'll get back to you soon.".to_string(),
            failure_message: "Oops! There was a problem submitting your form.".to_string(),
            network_message: "Oops! Could not reach the server. Please check your connection and try again."
                .to_string(),
            success_color: "#10b981".to_string(),
            error_color: "#ef4444".to_string(),
            clear_after_ms: 6000,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackToTopConfig {
    pub selector: String,
    pub visible_class: String,
    /// Scroll offset past which the button is shown.
    pub threshold: f64,
}

impl Default for BackToTopConfig {
    fn default() -> Self {
        Self {
            selector: "#back-to-top".to_string(),
            visible_class: "visible".to_string(),
            threshold: 300.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub cursor_selector: String,
    pub follower_selector: String,
    /// Elements that enlarge the follower while hovered.
    pub interactive_selector: String,
    pub hover_class: String,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            cursor_selector: ".cursor".to_string(),
            follower_selector: ".cursor-follower".to_string(),
            interactive_selector: "a, button".to_string(),
            hover_class: "hover".to_string(),
        }
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

impl PreloaderConfig {
    pub fn delay(&self) -> Duration {
        ms(self.delay_ms)
    }

    pub fn fade(&self) -> Duration {
        ms(self.fade_ms)
    }
}

impl TypewriterConfig {
    pub fn start_delay(&self) -> Duration {
        ms(self.start_delay_ms)
    }
}

impl ContactConfig {
    pub fn clear_after(&self) -> Duration {
        ms(self.clear_after_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("portfolio-ui").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/portfolio-ui/config.toml")
        })
}

/// Commented template written by `portfolio-ui config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r##"# portfolio-ui configuration
# Every value below is the built-in default; uncomment to override.

[preloader]
# selector = "#preloader"
# delay_ms = 500
# fade_ms = 500

[scroll]
# nav_offset = 70.0

[reveal]
# selector = ".fade-in"
# threshold = 0.1

[theme]
# dark_class = "dark-mode"

[typewriter]
# selector = ".typing-text"
# text = ""            # empty: animate the element's own text
# typing_ms = 100
# deleting_ms = 50
# pause_ms = 2000

[filter]
# all_value = "all"

[modal]
# modal_selector = "#project-modal"

[contact]
# form_selector = "#contact-form"
# clear_after_ms = 6000
# timeout_secs = 30

[back_to_top]
# threshold = 300.0

[cursor]
# interactive_selector = "a, button"
"##;
