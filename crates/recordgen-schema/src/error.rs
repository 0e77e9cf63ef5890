use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

///
/// ErrorTree
///
/// Aggregated validation messages, grouped by route (table, table.field, ...).
/// Validation keeps going after the first problem so one pass reports everything.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Record one message at this level.
    pub fn add(&mut self, message: impl Display) {
        self.messages.push(message.to_string());
    }

    /// Merge a child tree under `route`, skipping empty children.
    pub fn add_route(&mut self, route: impl Into<String>, child: Self) {
        if child.is_empty() {
            return;
        }

        let entry = self.children.entry(route.into()).or_default();
        entry.merge(child);
    }

    /// Merge another tree into this one at the same level.
    pub fn merge(&mut self, other: Self) {
        self.messages.extend(other.messages);
        for (route, child) in other.children {
            self.add_route(route, child);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Total number of messages across every route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Flatten into `(route, message)` pairs, routes joined with `.`.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);

        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for message in &self.messages {
            out.push((prefix.to_string(), message.clone()));
        }

        for (route, child) in &self.children {
            let path = if prefix.is_empty() {
                route.clone()
            } else {
                format!("{prefix}.{route}")
            };
            child.flatten_into(&path, out);
        }
    }

    /// `Ok(())` when nothing was recorded, otherwise the tree itself.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .flatten()
            .into_iter()
            .map(|(route, message)| {
                if route.is_empty() {
                    message
                } else {
                    format!("{route}: {message}")
                }
            })
            .collect::<Vec<_>>();

        write!(f, "{}", lines.join("; "))
    }
}

impl std::error::Error for ErrorTree {}

/// Record a formatted message on an `ErrorTree`.
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {{
        $errs.add(format!($($arg)*));
    }};
}
