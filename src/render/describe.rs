//! The `Describe` capability: how a value tells the render engine what it is made of.
//!
//! A value reports exactly one shape to the [`Describer`] it is handed: a scalar, a
//! piece of text, nothing at all, a sequence of values, or a record of named fields.
//! Fields a type does not report are simply not rendered; that is how private state
//! stays out of the log.
//!
//! ```
//! use foldlog::render::{Describe, Describer};
//!
//! struct Account {
//!     owner: String,
//!     balance: i64,
//!     pin: u16, // never reported
//! }
//!
//! impl Describe for Account {
//!     fn describe(&self, out: &mut Describer<'_>) {
//!         out.record("Account")
//!             .field("owner", &self.owner)
//!             .field("balance", &self.balance)
//!             .finish();
//!     }
//! }
//! # let _ = Account { owner: String::new(), balance: 0, pin: 0 }.pin;
//! ```

use super::{RenderEngine, RenderedValue};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;

/// A value the render engine can take apart.
pub trait Describe {
    /// Report this value's shape to `out`.
    fn describe(&self, out: &mut Describer<'_>);
}

/// Receives the shape of one value and turns it into a [`RenderedValue`].
///
/// Nested values are rendered eagerly, while the describing value still holds any
/// borrows it needed to reach them.
#[derive(Debug)]
pub struct Describer<'e> {
    engine: &'e RenderEngine,
    label: &'e str,
    depth: usize,
    rendered: Option<RenderedValue>,
}

impl<'e> Describer<'e> {
    pub(super) fn new(engine: &'e RenderEngine, label: &'e str, depth: usize) -> Self {
        Self {
            engine,
            label,
            depth,
            rendered: None,
        }
    }

    pub(super) fn finish(self) -> RenderedValue {
        self.rendered
            .unwrap_or_else(|| RenderedValue::scalar("(undescribed)", self.label, "(nothing to show)"))
    }

    /// Nesting level of the value being described; 0 is the outermost value.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Name the value is being shown under.
    pub fn label(&self) -> &str {
        self.label
    }

    /// A value shown through its `Display` form, never recursed into.
    pub fn scalar(&mut self, type_name: &str, value: impl Display) {
        self.rendered = Some(RenderedValue::scalar(type_name, self.label, &value.to_string()));
    }

    /// A piece of text.
    pub fn text(&mut self, value: &str) {
        self.rendered = Some(RenderedValue::scalar("string", self.label, value));
    }

    /// An absent value.
    pub fn null(&mut self) {
        self.rendered = Some(RenderedValue::scalar("null", self.label, "(none)"));
    }

    /// An ordered collection. Element `i` is shown as `slot #i`.
    pub fn sequence<'v, I>(&mut self, type_name: &str, items: I)
    where
        I: IntoIterator<Item = &'v dyn Describe>,
    {
        let engine = self.engine;
        if engine.is_too_deep(self.depth) {
            self.rendered = Some(RenderedValue::too_deep(type_name, self.label));
            return;
        }

        let depth = self.depth;
        let elements: Vec<RenderedValue> = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| engine.render(item, &format!("slot #{index}"), depth + 1))
            .collect();

        self.rendered = Some(engine.sequence_block(type_name, self.label, depth, elements));
    }

    /// A compound value with named fields; see [`RecordBuilder`].
    pub fn record<'d>(&'d mut self, type_name: &str) -> RecordBuilder<'d, 'e> {
        let too_deep = self.engine.is_too_deep(self.depth);
        RecordBuilder {
            describer: self,
            type_name: type_name.to_string(),
            fields: Vec::new(),
            too_deep,
        }
    }
}

/// Collects the fields of a record, in the spirit of `fmt::DebugStruct`.
#[derive(Debug)]
pub struct RecordBuilder<'d, 'e> {
    describer: &'d mut Describer<'e>,
    type_name: String,
    fields: Vec<(String, RenderedValue)>,
    too_deep: bool,
}

impl RecordBuilder<'_, '_> {
    /// Add a field. Past the depth limit the value is not visited.
    pub fn field(&mut self, name: &str, value: &dyn Describe) -> &mut Self {
        if !self.too_deep {
            let engine = self.describer.engine;
            let rendered = engine.render(value, name, self.describer.depth + 1);
            self.fields.push((name.to_string(), rendered));
        }
        self
    }

    /// Complete the record.
    pub fn finish(&mut self) {
        let describer = &mut *self.describer;
        let rendered = if self.too_deep {
            RenderedValue::too_deep(&self.type_name, describer.label)
        } else {
            describer.engine.record_block(
                &self.type_name,
                describer.label,
                describer.depth,
                std::mem::take(&mut self.fields),
            )
        };
        describer.rendered = Some(rendered);
    }
}

/// `std::any::type_name` without module paths: `alloc::vec::Vec<i32>` → `Vec<i32>`.
pub fn short_type_name<T: ?Sized>() -> String {
    shorten_type_path(std::any::type_name::<T>())
}

pub(crate) fn shorten_type_path(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            out.push_str(segment.rsplit("::").next().unwrap_or_default());
            segment.clear();
            out.push(ch);
        }
    }
    out.push_str(segment.rsplit("::").next().unwrap_or_default());
    out
}

// ===== Implementations for common types =====

macro_rules! describe_as_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Describe for $t {
                fn describe(&self, out: &mut Describer<'_>) {
                    out.scalar(stringify!($t), self);
                }
            }
        )*
    };
}

describe_as_scalar!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char
);

impl Describe for str {
    fn describe(&self, out: &mut Describer<'_>) {
        out.text(self);
    }
}

impl Describe for String {
    fn describe(&self, out: &mut Describer<'_>) {
        out.text(self);
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe(&self, out: &mut Describer<'_>) {
        (**self).describe(out);
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn describe(&self, out: &mut Describer<'_>) {
        (**self).describe(out);
    }
}

impl<T: Describe + ?Sized> Describe for Rc<T> {
    fn describe(&self, out: &mut Describer<'_>) {
        (**self).describe(out);
    }
}

impl<T: Describe + ?Sized> Describe for Arc<T> {
    fn describe(&self, out: &mut Describer<'_>) {
        (**self).describe(out);
    }
}

impl<T: Describe + ?Sized> Describe for RefCell<T> {
    fn describe(&self, out: &mut Describer<'_>) {
        match self.try_borrow() {
            Ok(inner) => inner.describe(out),
            Err(_) => out.text("(mutably borrowed)"),
        }
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe(&self, out: &mut Describer<'_>) {
        match self {
            Some(value) => value.describe(out),
            None => out.null(),
        }
    }
}

impl<T: Describe> Describe for [T] {
    fn describe(&self, out: &mut Describer<'_>) {
        out.sequence(
            &short_type_name::<Self>(),
            self.iter().map(|item| item as &dyn Describe),
        );
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe(&self, out: &mut Describer<'_>) {
        out.sequence(
            &short_type_name::<Self>(),
            self.iter().map(|item| item as &dyn Describe),
        );
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe(&self, out: &mut Describer<'_>) {
        out.sequence(
            &short_type_name::<Self>(),
            self.iter().map(|item| item as &dyn Describe),
        );
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe(&self, out: &mut Describer<'_>) {
        out.sequence(
            &short_type_name::<Self>(),
            self.iter().map(|item| item as &dyn Describe),
        );
    }
}

impl<K: Display, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe(&self, out: &mut Describer<'_>) {
        // Hash order is arbitrary; sort so the same map always renders the same way.
        let mut entries: Vec<(String, &V)> =
            self.iter().map(|(key, value)| (key.to_string(), value)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let type_name = shorten_type_path(&format!(
            "HashMap<{}, {}>",
            std::any::type_name::<K>(),
            std::any::type_name::<V>()
        ));
        let mut record = out.record(&type_name);
        for (key, value) in &entries {
            record.field(key, *value);
        }
        record.finish();
    }
}

impl<K: Display, V: Describe> Describe for BTreeMap<K, V> {
    fn describe(&self, out: &mut Describer<'_>) {
        let mut record = out.record(&short_type_name::<Self>());
        for (key, value) in self {
            record.field(&key.to_string(), value);
        }
        record.finish();
    }
}

impl Describe for serde_json::Value {
    fn describe(&self, out: &mut Describer<'_>) {
        use serde_json::Value;

        match self {
            Value::Null => out.null(),
            Value::Bool(b) => out.scalar("bool", b),
            Value::Number(n) => out.scalar("number", n),
            Value::String(s) => out.text(s),
            Value::Array(items) => {
                out.sequence("array", items.iter().map(|item| item as &dyn Describe));
            }
            Value::Object(map) => {
                let mut record = out.record("object");
                for (key, value) in map {
                    record.field(key, value);
                }
                record.finish();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_type_path_strips_modules() {
        assert_eq!(shorten_type_path("alloc::vec::Vec<i32>"), "Vec<i32>");
        assert_eq!(
            shorten_type_path("std::collections::hash::map::HashMap<alloc::string::String, u8>"),
            "HashMap<String, u8>"
        );
        assert_eq!(shorten_type_path("[my_crate::model::Point; 3]"), "[Point; 3]");
        assert_eq!(shorten_type_path("u64"), "u64");
    }

    #[test]
    fn short_type_name_of_slice() {
        assert_eq!(short_type_name::<[String]>(), "[String]");
    }
}
