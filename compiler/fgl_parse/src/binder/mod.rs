//! Scoped cursor and prepared-statement bindings.
//!
//! `DECLARE` and `PREPARE` introduce names that later `OPEN`, `FETCH`,
//! `FOREACH` and `EXECUTE` statements refer to. Each statement block pushes
//! a frame; lookups walk from the innermost frame outwards. References the
//! parser cannot bind are left for the resolver.

use fgl_ir::{Ident, NodeId};
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct BinderStack {
    frames: Vec<FxHashMap<String, NodeId>>,
}

impl BinderStack {
    pub fn push(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Bind `name` in the innermost frame; a later declaration shadows.
    pub fn declare(&mut self, name: &Ident, decl: NodeId) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.key(), decl);
        }
    }

    pub fn lookup(&self, name: &Ident) -> Option<NodeId> {
        let key = name.key();
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(&key).copied())
    }
}

#[cfg(test)]
mod tests;
