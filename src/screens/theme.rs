//! Theme toggler: a cell published to descendants through a scoped
//! provider.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::{use_scoped, Cell, ScopedProvider, StateError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value published to everything inside the theme provider.
#[derive(Debug, Clone)]
pub struct ThemeContext {
    pub theme: Theme,
    source: Cell<Theme>,
}

impl ThemeContext {
    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Flip the provider's theme. Descendants see the new theme on their
    /// next read.
    pub fn toggle_theme(&self) -> Result<bool, StateError> {
        self.source.update(|theme| theme.toggled())
    }
}

/// Read the theme published by the enclosing provider.
pub fn use_theme() -> Result<ThemeContext, StateError> {
    use_scoped::<ThemeContext>()
}

/// Descendant view: renders whatever theme its provider publishes.
pub fn theme_card() -> Result<Vec<String>, StateError> {
    let context = use_theme()?;
    Ok(vec![
        format!("Current theme: {}", context.theme),
        "This is a local theme managed with a scoped provider.".to_string(),
    ])
}

/// Screen owning the theme cell and its provider.
pub struct ThemeScreen {
    theme: Cell<Theme>,
    provider: ScopedProvider<ThemeContext>,
}

impl ThemeScreen {
    pub fn new() -> Self {
        let theme = Cell::named("theme", Theme::default());
        let source = theme.clone();
        let provider = ScopedProvider::from_fn(move || ThemeContext {
            theme: source.get(),
            source: source.clone(),
        });
        Self { theme, provider }
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Run `render` inside this screen's theme scope.
    pub fn provide<R>(&self, render: impl FnOnce() -> R) -> R {
        self.provider.provide(render)
    }

    pub fn render(&self) -> Result<Vec<String>, StateError> {
        self.provide(theme_card)
    }
}

impl Default for ThemeScreen {
    fn default() -> Self {
        Self::new()
    }
}
