use std::fmt;

use crate::ast::capability::{Node, Typed};
use crate::foundation::error::{CompileResult, ResultExt};
use crate::foundation::position::SourcePosition;
use crate::model::types::Type;
use crate::model::value::Value;

#[derive(Clone, Debug)]
pub struct MapEntry {
    node: Node,
    key: Value,
    value: Value,
}

impl MapEntry {
    pub fn new(key: Value, value: Value, pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            key,
            value,
        }
    }

    pub fn key(&self) -> &Value {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }
}

/// Display translation table. Keys are unique; re-adding a key overwrites it where it stands.
#[derive(Clone, Debug)]
pub struct Map {
    node: Node,
    key_type: Typed,
    value_type: Typed,
    entries: Vec<MapEntry>,
}

impl Map {
    pub fn new(pos: SourcePosition) -> Self {
        Self {
            node: Node::new(pos),
            key_type: Typed::default(),
            value_type: Typed::default(),
            entries: Vec::new(),
        }
    }

    pub fn pos(&self) -> &SourcePosition {
        self.node.pos()
    }

    pub fn key_type(&self) -> Option<&Type> {
        self.key_type.get_opt()
    }

    pub fn value_type(&self) -> Option<&Type> {
        self.value_type.get_opt()
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub fn add(&mut self, entry: MapEntry) -> CompileResult<()> {
        self.key_type.ensure(&entry.key.ty()).at(entry.pos())?;
        self.value_type.ensure(&entry.value.ty()).at(entry.pos())?;
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => existing.value = entry.value,
            None => self.entries.push(entry),
        }
        Ok(())
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| &e.key == key)
            .map(|e| &e.value)
    }

    /// Internal consistency: keys share one type, values share one type.
    pub fn check(&self) -> CompileResult<()> {
        let mut keys = Typed::default();
        let mut values = Typed::default();
        for e in &self.entries {
            keys.ensure(&e.key.ty()).at(e.pos())?;
            values.ensure(&e.value.ty()).at(e.pos())?;
        }
        Ok(())
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("map {")?;
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {}", e.key.raw(), e.value.raw())?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ast/map.rs"]
mod tests;
