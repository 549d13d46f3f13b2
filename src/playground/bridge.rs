//! Bridge capability object handed to injected code.
//!
//! Injected code may reference only the names enumerated here plus the
//! standard browser globals. The wrapper binds every capability as a local
//! of the run scope; the page runtime builds the matching object for each
//! run (`window.__livepad.bridge(run)`), so `displayError` and
//! `setRendering` always report against the run that called them.

use serde::Serialize;

/// One named binding visible to injected code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    // UI and utility libraries
    React,
    ReactDom,
    Antd,
    Lodash,
    Moment,
    // HTTP client
    Axios,
    // Styling helper
    Styled,
    // Immutable-update helper
    Immer,
    // Custom hooks
    UseFormBinding,
    UseInterval,
    UseModel,
    // Error reporter
    DisplayError,
    // Asset loaders
    LoadScript,
    LoadStyle,
    AppendScript,
    AppendStyle,
    // Render-complete signal
    SetRendering,
    // The mount surface element
    MountNode,
}

impl Capability {
    pub const ALL: [Self; 18] = [
        Self::React,
        Self::ReactDom,
        Self::Antd,
        Self::Lodash,
        Self::Moment,
        Self::Axios,
        Self::Styled,
        Self::Immer,
        Self::UseFormBinding,
        Self::UseInterval,
        Self::UseModel,
        Self::DisplayError,
        Self::LoadScript,
        Self::LoadStyle,
        Self::AppendScript,
        Self::AppendStyle,
        Self::SetRendering,
        Self::MountNode,
    ];

    /// Identifier under which injected code sees this capability.
    pub const fn name(self) -> &'static str {
        match self {
            Self::React => "React",
            Self::ReactDom => "ReactDOM",
            Self::Antd => "Antd",
            Self::Lodash => "_",
            Self::Moment => "moment",
            Self::Axios => "axios",
            Self::Styled => "styled",
            Self::Immer => "immer",
            Self::UseFormBinding => "useFormBinding",
            Self::UseInterval => "useInterval",
            Self::UseModel => "useModel",
            Self::DisplayError => "displayError",
            Self::LoadScript => "loadScript",
            Self::LoadStyle => "loadStyle",
            Self::AppendScript => "appendScript",
            Self::AppendStyle => "appendStyle",
            Self::SetRendering => "setRendering",
            Self::MountNode => "mountNode",
        }
    }
}

/// Capability object for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bridge {
    run: u64,
    capabilities: Vec<Capability>,
}

impl Bridge {
    /// Full capability surface for `run`.
    pub fn for_run(run: u64) -> Self {
        Self {
            run,
            capabilities: Capability::ALL.to_vec(),
        }
    }

    pub const fn run(&self) -> u64 {
        self.run
    }

    /// Binding names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.capabilities.iter().map(|c| c.name())
    }

    /// Expression evaluating to this run's capability object in the page.
    pub fn expression(&self) -> String {
        format!("window.__livepad.bridge({})", self.run)
    }
}

/// Asset loader request, mirrored by `loadScript`/`loadStyle`/`appendScript`/
/// `appendStyle` in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AssetRequest {
    /// `<script src>` appended to the assets node
    Script(String),
    /// `<link rel="stylesheet">` appended to the assets node
    Style(String),
    /// Inline `<script>` text
    InlineScript(String),
    /// Inline `<style>` text
    InlineStyle(String),
}

impl AssetRequest {
    /// Classify a preload entry by its extension: `.css` → style, else script.
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.to_ascii_lowercase().ends_with(".css") {
            Self::Style(url.to_string())
        } else {
            Self::Script(url.to_string())
        }
    }
}
