use std::path::Path;

use crate::ast::structure::{ConstantId, InstanceId, InstanceMember, VariableId};
use crate::ast::tree::Ast;
use crate::config::GeneratorOptions;
use crate::foundation::error::{CompileResult, DevconfError, DevconfResult};
use crate::symbols::table::{ScopeId, Symbol, SymbolTable};

/// One `#define NAME VALUE` line.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MacroEntry {
    pub name: String,
    pub value: String,
}

/// Generated macros in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MacroTable {
    pub entries: Vec<MacroEntry>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Header,
    Json,
}

impl MacroTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }

    /// Header text: a blank line, then one `#define` per entry.
    pub fn render_header(&self) -> String {
        let mut out = String::from("\n");
        for e in &self.entries {
            out.push_str(&format!("#define {} {}\n", e.name, e.value));
        }
        out
    }

    pub fn to_json(&self) -> DevconfResult<String> {
        let mut s = serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?;
        s.push('\n');
        Ok(s)
    }

    pub fn render(&self, format: OutputFormat) -> DevconfResult<String> {
        match format {
            OutputFormat::Header => Ok(self.render_header()),
            OutputFormat::Json => self.to_json(),
        }
    }

    /// Render fully in memory, then write `path` in one go.
    pub fn write_to(&self, path: impl AsRef<Path>, format: OutputFormat) -> DevconfResult<()> {
        let path = path.as_ref();
        let text = self.render(format)?;
        std::fs::write(path, text).map_err(|e| DevconfError::io(path, e))
    }
}

/// Flattens the sealed scope tree into macro names.
pub struct MacroGenerator<'a> {
    ast: &'a Ast,
    symbols: &'a SymbolTable,
    options: &'a GeneratorOptions,
}

impl<'a> MacroGenerator<'a> {
    pub fn new(ast: &'a Ast, symbols: &'a SymbolTable, options: &'a GeneratorOptions) -> Self {
        Self {
            ast,
            symbols,
            options,
        }
    }

    pub fn generate(&self) -> CompileResult<MacroTable> {
        let mut table = MacroTable::default();
        if let Some(root) = self.symbols.root() {
            self.walk_scope(root, &self.options.prefix, &mut table)?;
        }
        tracing::debug!(entries = table.len(), "generated macro table");
        Ok(table)
    }

    fn join(&self, path: &str, segment: &str) -> String {
        format!(
            "{path}{}{}",
            self.options.separator,
            segment.replace('.', "DOT")
        )
    }

    fn emit(&self, table: &mut MacroTable, name: String, value: String) {
        tracing::trace!(%name, %value, "emit");
        table.entries.push(MacroEntry {
            name: name.to_uppercase(),
            value,
        });
    }

    fn walk_scope(&self, id: ScopeId, path: &str, table: &mut MacroTable) -> CompileResult<()> {
        let scope = self.symbols.scope(id);
        // Constants lead their scope; everything else keeps declaration order.
        for entry in scope.members() {
            if let Symbol::Constant(c) = entry.symbol {
                self.emit_constant(c, path, table)?;
            }
        }
        for entry in scope.members() {
            match entry.symbol {
                Symbol::Variable(v) => self.emit_variable(v, path, table)?,
                Symbol::Instance(i) => {
                    self.walk_instance(i, &self.join(path, &entry.name), table)?;
                }
                Symbol::Constant(_) | Symbol::Struct(_) | Symbol::Member(_) => {}
            }
        }
        for child in scope.children() {
            match self.symbols.scope(*child).name() {
                Some(name) => self.walk_scope(*child, &self.join(path, name), table)?,
                None => self.walk_scope(*child, path, table)?,
            }
        }
        Ok(())
    }

    fn walk_instance(
        &self,
        id: InstanceId,
        path: &str,
        table: &mut MacroTable,
    ) -> CompileResult<()> {
        for (name, member) in self.ast.instances[id].members() {
            match member {
                InstanceMember::Variable(v) => self.emit_variable(v, path, table)?,
                InstanceMember::Struct(i) => {
                    self.walk_instance(i, &self.join(path, name), table)?;
                }
            }
        }
        Ok(())
    }

    fn emit_constant(
        &self,
        id: ConstantId,
        path: &str,
        table: &mut MacroTable,
    ) -> CompileResult<()> {
        let c = &self.ast.constants[id];
        self.emit(table, self.join(path, c.name()), c.value()?.raw());
        Ok(())
    }

    fn emit_variable(
        &self,
        id: VariableId,
        path: &str,
        table: &mut MacroTable,
    ) -> CompileResult<()> {
        let v = &self.ast.variables[id];
        let base = self.join(path, v.name());
        self.emit(table, self.join(&base, "VALUE"), v.read()?.raw());
        self.emit(table, base, v.display_value()?.raw());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/macros.rs"]
mod tests;
