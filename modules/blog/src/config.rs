use std::fmt;

use serde::{Deserialize, Serialize};

fn default_title() -> String {
    "Blog".to_owned()
}

/// Blog module configuration (`modules.blog` section).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BlogConfig {
    /// Insert the demo user and articles during `init`.
    #[serde(default)]
    pub seed: bool,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub banner: Banner,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            seed: false,
            title: default_title(),
            banner: Banner::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Banner {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Banner(title={}, content={})",
            self.title.as_deref().unwrap_or("null"),
            self.content
        )
    }
}
