//! Typed option groups: glob matching options and the renderer.

use std::fmt;
use std::sync::Arc;

use super::value::{RawConfig, RawValue};

/// Options handed to the glob matcher.
///
/// `nocase`, `matchBase` and `dot` are known; any other key is carried
/// through untouched in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobOptions {
    pub nocase: bool,
    pub match_base: bool,
    pub dot: bool,
    pub extra: RawConfig,
}

impl Default for GlobOptions {
    fn default() -> Self {
        Self {
            nocase: true,
            match_base: true,
            dot: true,
            extra: RawConfig::new(),
        }
    }
}

impl GlobOptions {
    /// The field behind a known option key, in its serialized spelling.
    pub fn flag_mut(&mut self, key: &str) -> Option<&mut bool> {
        match key {
            "nocase" => Some(&mut self.nocase),
            "matchBase" => Some(&mut self.match_base),
            "dot" => Some(&mut self.dot),
            _ => None,
        }
    }

    pub fn to_raw(&self) -> RawValue {
        let mut map = RawConfig::new();
        map.insert("nocase".to_string(), RawValue::Bool(self.nocase));
        map.insert("matchBase".to_string(), RawValue::Bool(self.match_base));
        map.insert("dot".to_string(), RawValue::Bool(self.dot));
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        RawValue::Object(map)
    }
}

type RenderClosure = dyn Fn(&str) + Send + Sync;

/// Custom renderer: receives each line of task output.
#[derive(Clone)]
pub struct RenderFn(Arc<RenderClosure>);

impl RenderFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        RenderFn(Arc::new(f))
    }

    pub fn render(&self, line: &str) {
        (self.0)(line)
    }
}

impl PartialEq for RenderFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.0) as *const () == Arc::as_ptr(&other.0) as *const ()
    }
}

impl fmt::Debug for RenderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderFn(..)")
    }
}

/// Output presentation strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Renderer {
    /// In-place updating task list
    Update,
    /// Line-by-line output, the default in debug mode
    Verbose,
    /// Any other renderer name, resolved by the executor
    Named(String),
    Custom(RenderFn),
}

impl Renderer {
    pub fn default_for(debug: bool) -> Self {
        if debug {
            Renderer::Verbose
        } else {
            Renderer::Update
        }
    }

    pub fn from_raw(value: &RawValue) -> Option<Self> {
        match value {
            RawValue::String(name) => Some(match name.as_str() {
                "update" => Renderer::Update,
                "verbose" => Renderer::Verbose,
                _ => Renderer::Named(name.clone()),
            }),
            RawValue::Renderer(f) => Some(Renderer::Custom(f.clone())),
            _ => None,
        }
    }

    pub fn to_raw(&self) -> RawValue {
        match self {
            Renderer::Custom(f) => RawValue::Renderer(f.clone()),
            named => RawValue::String(named.name().to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Renderer::Update => "update",
            Renderer::Verbose => "verbose",
            Renderer::Named(name) => name,
            Renderer::Custom(_) => "custom",
        }
    }
}
