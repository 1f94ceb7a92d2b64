//! Entry point resolution.
//!
//! The launcher never loads code itself: targets are registered in-process by
//! whoever bootstrapped them, and looked up here by identifier.
use crate::launch::error::CallError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Static `main(String[])` equivalent
pub type MainFn = dyn Fn(Vec<String>) -> Result<(), CallError> + Send + Sync;

/// Writer for a static configuration field
pub type FieldSetter = dyn Fn(FieldValue) -> Result<(), CallError> + Send + Sync;

/// Lookup capability the invoker needs from the host
pub trait SymbolResolver {
    /// Find the entry point type registered under `id`
    fn resolve_type(&self, id: &str) -> Option<EntryPointType>;

    /// Find the static `main` callable on `ty`
    fn resolve_static_entry_point(&self, ty: &EntryPointType) -> Option<Callable>;

    /// Find the first writable static field on `ty` matching one of `candidates`
    fn resolve_writable_field(
        &self,
        ty: &EntryPointType,
        candidates: &[FieldCandidate],
    ) -> Option<FieldHandle>;
}

/// Type of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Directory,
}

/// Value written into a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Directory(PathBuf),
}

/// Name and type a field must have to be picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCandidate {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldCandidate {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

#[derive(Clone)]
struct FieldEntry {
    name: String,
    kind: FieldKind,
    setter: Arc<FieldSetter>,
}

/// A registered entry point: its identifier, `main` and static fields
#[derive(Clone)]
pub struct EntryPointType {
    id: String,
    main: Option<Arc<MainFn>>,
    fields: Vec<FieldEntry>,
}

impl EntryPointType {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            main: None,
            fields: Vec::new(),
        }
    }

    /// Set the static `main` callable
    pub fn with_main<F>(mut self, main: F) -> Self
    where
        F: Fn(Vec<String>) -> Result<(), CallError> + Send + Sync + 'static,
    {
        self.main = Some(Arc::new(main));
        self
    }

    /// Add a writable static field
    pub fn with_field<F>(mut self, name: impl Into<String>, kind: FieldKind, setter: F) -> Self
    where
        F: Fn(FieldValue) -> Result<(), CallError> + Send + Sync + 'static,
    {
        self.fields.push(FieldEntry {
            name: name.into(),
            kind,
            setter: Arc::new(setter),
        });
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Debug for EntryPointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPointType")
            .field("id", &self.id)
            .field("has_main", &self.main.is_some())
            .field(
                "fields",
                &self.fields.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Resolved `main` callable
#[derive(Clone)]
pub struct Callable {
    owner: String,
    func: Arc<MainFn>,
}

impl Callable {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn call(&self, args: Vec<String>) -> Result<(), CallError> {
        (self.func)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({}.main)", self.owner)
    }
}

/// Resolved writable field
#[derive(Clone)]
pub struct FieldHandle {
    owner: String,
    name: String,
    kind: FieldKind,
    setter: Arc<FieldSetter>,
}

impl FieldHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set(&self, value: FieldValue) -> Result<(), CallError> {
        (self.setter)(value)
    }
}

impl fmt::Debug for FieldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldHandle({}.{}: {:?})", self.owner, self.name, self.kind)
    }
}

/// In-process registry of entry points
#[derive(Default)]
pub struct EntryPointRegistry {
    types: RwLock<HashMap<String, EntryPointType>>,
}

impl EntryPointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ty`, replacing any entry point with the same identifier
    pub fn register(&self, ty: EntryPointType) {
        log::debug!("Registering entry point: {}", ty.id);
        let mut types = self.types.write().unwrap_or_else(|e| e.into_inner());
        types.insert(ty.id.clone(), ty);
    }

    pub fn unregister(&self, id: &str) -> Option<EntryPointType> {
        let mut types = self.types.write().unwrap_or_else(|e| e.into_inner());
        types.remove(id)
    }

    pub fn is_empty(&self) -> bool {
        let types = self.types.read().unwrap_or_else(|e| e.into_inner());
        types.is_empty()
    }

    pub fn is_registered(&self, id: &str) -> bool {
        let types = self.types.read().unwrap_or_else(|e| e.into_inner());
        types.contains_key(id)
    }
}

impl SymbolResolver for EntryPointRegistry {
    fn resolve_type(&self, id: &str) -> Option<EntryPointType> {
        let types = self.types.read().unwrap_or_else(|e| e.into_inner());
        types.get(id).cloned()
    }

    fn resolve_static_entry_point(&self, ty: &EntryPointType) -> Option<Callable> {
        ty.main.as_ref().map(|func| Callable {
            owner: ty.id.clone(),
            func: Arc::clone(func),
        })
    }

    fn resolve_writable_field(
        &self,
        ty: &EntryPointType,
        candidates: &[FieldCandidate],
    ) -> Option<FieldHandle> {
        candidates.iter().find_map(|candidate| {
            ty.fields
                .iter()
                .find(|field| field.name == candidate.name && field.kind == candidate.kind)
                .map(|field| FieldHandle {
                    owner: ty.id.clone(),
                    name: field.name.clone(),
                    kind: field.kind,
                    setter: Arc::clone(&field.setter),
                })
        })
    }
}

// Entry points already available in this process
static REGISTRY: Lazy<EntryPointRegistry> = Lazy::new(EntryPointRegistry::new);

/// The process-global registry
pub fn global_registry() -> &'static EntryPointRegistry {
    &REGISTRY
}

/// Register an entry point in the process-global registry
pub fn register_entry_point(ty: EntryPointType) {
    REGISTRY.register(ty);
}
