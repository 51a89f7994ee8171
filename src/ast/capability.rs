use crate::foundation::error::ErrorKind;
use crate::foundation::position::SourcePosition;
use crate::model::types::Type;

/// Source location shared by every AST entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pos: SourcePosition,
}

impl Node {
    pub fn new(pos: SourcePosition) -> Self {
        Self { pos }
    }

    pub fn pos(&self) -> &SourcePosition {
        &self.pos
    }
}

/// One-shot identifier slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Named {
    name: Option<String>,
}

impl Named {
    pub fn with(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn bind(&mut self, name: impl Into<String>) -> Result<(), ErrorKind> {
        let name = name.into();
        match &self.name {
            Some(existing) => Err(ErrorKind::Renamed {
                existing: existing.clone(),
                attempted: name,
            }),
            None => {
                self.name = Some(name);
                Ok(())
            }
        }
    }

    pub fn get(&self) -> Result<&str, ErrorKind> {
        self.name.as_deref().ok_or(ErrorKind::Unnamed)
    }

    pub fn get_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }
}

/// One-shot type slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Typed {
    ty: Option<Type>,
}

impl Typed {
    /// Binding twice fails even when both types agree.
    pub fn bind(&mut self, ty: Type) -> Result<(), ErrorKind> {
        match &self.ty {
            Some(existing) => Err(ErrorKind::RedefinedType {
                existing: existing.name().to_owned(),
                attempted: ty.name().to_owned(),
            }),
            None => {
                self.ty = Some(ty);
                Ok(())
            }
        }
    }

    pub fn get(&self) -> Result<&Type, ErrorKind> {
        self.ty.as_ref().ok_or(ErrorKind::UndefinedType)
    }

    pub fn get_opt(&self) -> Option<&Type> {
        self.ty.as_ref()
    }

    /// Bind `ty` if nothing is bound yet, otherwise require it to match the bound type.
    pub fn ensure(&mut self, ty: &Type) -> Result<(), ErrorKind> {
        match &self.ty {
            Some(existing) if existing == ty => Ok(()),
            Some(existing) => Err(ErrorKind::incompatible(existing, ty)),
            None => {
                self.ty = Some(ty.clone());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ast/capability.rs"]
mod tests;
