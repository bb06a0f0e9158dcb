use std::any::Any;
use std::env::vars;

use anyhow::bail;
use members_states::{State, state_assign_impl};
use serde::Deserialize;

/// Where the members list is served from when nothing else is configured.
pub const DEFAULT_MEMBERS_URL: &str =
    "https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json";

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How field edits reach a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Every keystroke is written to the member; cancel keeps what was typed.
    #[default]
    Live,
    /// Keystrokes go to a draft that save commits and cancel discards.
    Buffered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub members_url: String,
    pub page_size: usize,
    pub edit_mode: EditMode,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    members_url: Option<String>,
    page_size: Option<usize>,
    edit_mode: Option<EditMode>,
}

impl BusinessConfig {
    pub fn new(members_url: impl Into<String>) -> Self {
        Self {
            members_url: members_url.into(),
            ..Self::default()
        }
    }

    pub fn with_edit_mode(mut self, edit_mode: EditMode) -> Self {
        self.edit_mode = edit_mode;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Reads `MEMBERS_URL`, `PAGE_SIZE` and `EDIT_MODE` from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let raw: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            members_url,
            page_size,
            edit_mode,
        } = raw;

        let members_url = match members_url {
            Some(url) if url.trim().is_empty() => bail!("MEMBERS_URL must not be empty"),
            Some(url) => {
                log::info!("Using provided MEMBERS_URL: {url}");
                url
            }
            None => DEFAULT_MEMBERS_URL.to_owned(),
        };

        let page_size = match page_size {
            Some(0) => bail!("PAGE_SIZE must be at least 1"),
            Some(size) => size,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            members_url,
            page_size,
            edit_mode: edit_mode.unwrap_or_default(),
        })
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            members_url: DEFAULT_MEMBERS_URL.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            edit_mode: EditMode::default(),
        }
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
