//! Light/dark theme toggle.

use crate::config::ThemeConfig;
use crate::dom::{Document, ElementId, Selector, SelectorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

pub struct ThemeToggle {
    toggle: ElementId,
    icon: Option<ElementId>,
    label: Option<ElementId>,
    config: ThemeConfig,
}

impl ThemeToggle {
    /// Needs the toggle control; the icon and label inside it are optional.
    pub fn new(doc: &Document, config: &ThemeConfig) -> Result<Option<Self>, SelectorError> {
        let toggle_selector = Selector::parse(&config.toggle_selector)?;
        let icon_selector = Selector::parse(&config.icon_selector)?;
        let label_selector = Selector::parse(&config.label_selector)?;
        let Some(toggle) = doc.select(&toggle_selector) else {
            return Ok(None);
        };
        Ok(Some(Self {
            toggle,
            icon: doc.select_within(toggle, &icon_selector),
            label: doc.select_within(toggle, &label_selector),
            config: config.clone(),
        }))
    }

    /// Current theme, read from the body class.
    pub fn theme(&self, doc: &Document) -> Theme {
        if doc.has_class(doc.body(), &self.config.dark_class) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Handle a click. Returns the new theme if the click hit the toggle.
    pub fn on_click(&self, doc: &mut Document, target: ElementId) -> Option<Theme> {
        if !doc.contains(self.toggle, target) {
            return None;
        }
        let theme = self.theme(doc).toggled();
        self.apply(doc, theme);
        log::info!("Theme switched to {}", theme.name());
        Some(theme)
    }

    fn apply(&self, doc: &mut Document, theme: Theme) {
        let body = doc.body();
        doc.element_mut(body)
            .set_class(&self.config.dark_class, theme == Theme::Dark);

        let (show_icon, hide_icon, label) = match theme {
            Theme::Light => (
                &self.config.light_icon,
                &self.config.dark_icon,
                &self.config.light_label,
            ),
            Theme::Dark => (
                &self.config.dark_icon,
                &self.config.light_icon,
                &self.config.dark_label,
            ),
        };
        if let Some(icon) = self.icon {
            doc.remove_class(icon, hide_icon);
            doc.add_class(icon, show_icon);
        }
        if let Some(label_el) = self.label {
            doc.set_text(label_el, label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_body_icon_and_label() {
        let mut doc = Document::new();
        let toggle = doc.create_element("button", None);
        doc.element_mut(toggle).id = Some("theme-toggle".into());
        let icon = doc.create_element("i", Some(toggle));
        doc.add_class(icon, "fas");
        doc.add_class(icon, "fa-moon");
        let label = doc.create_element("span", Some(toggle));
        doc.add_class(label, "theme-label");

        let theme = ThemeToggle::new(&doc, &ThemeConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(theme.theme(&doc), Theme::Light);

        assert_eq!(theme.on_click(&mut doc, icon), Some(Theme::Dark));
        assert!(doc.has_class(doc.body(), "dark-mode"));
        assert!(doc.has_class(icon, "fa-sun"));
        assert!(!doc.has_class(icon, "fa-moon"));
        assert!(doc.has_class(icon, "fas"));
        assert_eq!(doc.text(label), "Light Mode");

        assert_eq!(theme.on_click(&mut doc, toggle), Some(Theme::Light));
        assert!(!doc.has_class(doc.body(), "dark-mode"));
        assert!(doc.has_class(icon, "fa-moon"));
        assert_eq!(doc.text(label), "Dark Mode");

        let body = doc.body();
        assert_eq!(theme.on_click(&mut doc, body), None);
    }

    #[test]
    fn test_toggle_without_icon_or_label() {
        let mut doc = Document::new();
        let toggle = doc.create_element("button", None);
        doc.element_mut(toggle).id = Some("theme-toggle".into());
        let theme = ThemeToggle::new(&doc, &ThemeConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(theme.on_click(&mut doc, toggle), Some(Theme::Dark));
    }
}
