//! "Extra functions": channel methods exposed to users as ad-hoc actions.
//!
//! A channel tags a callable with [`extra`], which pairs it with a display
//! name and a usage description without changing how it is called. Tagged
//! callables are collected in an [`ExtraFunctions`] registry keyed by the
//! function's identity, which the host queries to list and invoke them.
//!
//! ```
//! use efb_core::extra::{extra, ExtraFunctions};
//!
//! let echo = extra("Echo", "Repeat text back. Usage: {function_name} <text>")(
//!     |text: &str| text.to_uppercase(),
//! );
//! assert_eq!(echo("hi"), "HI");
//!
//! let mut registry = ExtraFunctions::new();
//! registry.register("echo", echo);
//! assert_eq!(
//!     registry.list()[0].desc,
//!     "Repeat text back. Usage: echo <text>"
//! );
//! ```

use std::collections::btree_map::{self, BTreeMap};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Token in a description replaced by the function's identifier.
pub const FUNCTION_NAME_PLACEHOLDER: &str = "{function_name}";

/// Metadata attached to an extra function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraMeta {
    /// Marker flag; always `true` for tagged callables.
    pub extra_fn: bool,
    /// Human-readable name.
    pub name: String,
    /// Short description and usage. May contain `{function_name}`.
    pub desc: String,
}

impl ExtraMeta {
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            extra_fn: true,
            name: name.into(),
            desc: desc.into(),
        }
    }

    /// The description with every `{function_name}` replaced by `function_name`.
    pub fn describe(&self, function_name: &str) -> String {
        self.desc.replace(FUNCTION_NAME_PLACEHOLDER, function_name)
    }
}

/// A callable paired with its [`ExtraMeta`].
///
/// Derefs to the wrapped callable, so `tagged(args)` behaves exactly like
/// calling the original.
#[derive(Debug, Clone)]
pub struct Extra<F> {
    meta: ExtraMeta,
    func: F,
}

impl<F> Extra<F> {
    pub fn meta(&self) -> &ExtraMeta {
        &self.meta
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn desc(&self) -> &str {
        &self.meta.desc
    }

    pub fn is_extra_fn(&self) -> bool {
        self.meta.extra_fn
    }

    /// The wrapped callable.
    pub fn func(&self) -> &F {
        &self.func
    }

    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<F> Deref for Extra<F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.func
    }
}

/// Tag a callable as an extra function.
///
/// Returns a function that takes any callable and returns it wrapped with
/// the marker flag, `name` and `desc`. Use `{function_name}` in `desc` where
/// the function's identifier should appear.
pub fn extra<F>(name: impl Into<String>, desc: impl Into<String>) -> impl FnOnce(F) -> Extra<F> {
    let meta = ExtraMeta::new(name, desc);
    move |func| Extra { meta, func }
}

/// Listing entry for one registered extra function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraFunctionInfo {
    /// Identifier the host uses to invoke the function.
    pub id: String,
    pub name: String,
    /// Description with `{function_name}` rendered as `id`.
    pub desc: String,
}

/// Extra functions of one channel, keyed by function identifier.
#[derive(Debug, Clone)]
pub struct ExtraFunctions<F> {
    entries: BTreeMap<String, Extra<F>>,
}

impl<F> Default for ExtraFunctions<F> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<F> ExtraFunctions<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `function` under `id`.
    ///
    /// Registration only adds: if `id` is taken the existing entry is kept,
    /// `function` is dropped, and `false` is returned.
    pub fn register(&mut self, id: impl Into<String>, function: Extra<F>) -> bool {
        match self.entries.entry(id.into()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(function);
                true
            }
            btree_map::Entry::Occupied(slot) => {
                warn!(id = %slot.key(), "extra function already registered, keeping the first");
                false
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Extra<F>> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered functions in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Extra<F>)> {
        self.entries.iter().map(|(id, f)| (id.as_str(), f))
    }

    /// Name and rendered description of every registered function, in
    /// identifier order.
    pub fn list(&self) -> Vec<ExtraFunctionInfo> {
        self.iter()
            .map(|(id, f)| ExtraFunctionInfo {
                id: id.to_string(),
                name: f.name().to_string(),
                desc: f.meta().describe(id),
            })
            .collect()
    }
}
