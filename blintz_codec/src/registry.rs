use crate::obj::Structured;
use blintz_types::error::RegistryError;
use std::collections::HashMap;

/// Maps a classname to a zero-argument constructor. This is the explicit
/// replacement for looking types up in a module namespace: the caller
/// decides exactly which types are materializable.
#[derive(Default)]
pub struct Registry {
    ctors: HashMap<String, fn() -> Box<dyn Structured>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, classname: impl Into<String>, ctor: fn() -> Box<dyn Structured>) {
        self.ctors.insert(classname.into(), ctor);
    }

    pub fn construct(&self, classname: &str) -> Result<Box<dyn Structured>, RegistryError> {
        match self.ctors.get(classname) {
            Some(ctor) => Ok(ctor()),
            None => Err(RegistryError::UnknownClass(String::from(classname))),
        }
    }
}
