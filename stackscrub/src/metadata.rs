//! Method and type metadata backing frame resolution.
//!
//! Rust has no runtime reflection, so the introspection surface a managed
//! runtime would hand us is modeled as passive records registered in a
//! [`MetadataTable`]. An adapter translates whatever its host exposes (a VM
//! introspection API, a debugger wire format, demangled native symbols) into
//! records once, and the parse pipeline only ever reads them back through
//! [`TypeId`]/[`MethodId`] handles.
//!
//! The table also answers the structural questions resolution needs: display
//! and fully qualified type names, whether a method is a compiler-synthesized
//! async or iterator step, and which declared method such a step originated
//! from.

use std::fmt;

// ============================================================================
// Handles
// ============================================================================

/// Handle to a type registered in a [`MetadataTable`].
///
/// Handles are minted by [`MetadataTable::add_type`] and are only meaningful
/// against the table that produced them. Using one against a different table
/// is a programming error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

/// Handle to a method registered in a [`MetadataTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(usize);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "method#{}", self.0)
    }
}

// ============================================================================
// Records
// ============================================================================

/// Description of one type as the host runtime reported it.
///
/// Built with [`TypeRecord::new`] plus the `with_`/marker builders, then
/// registered via [`MetadataTable::add_type`]:
///
/// ```
/// use stackscrub::{MetadataTable, TypeRecord};
///
/// let mut table = MetadataTable::new();
/// let service = table.add_type(TypeRecord::new("CheckoutService").with_namespace("Acme.Billing"));
/// assert_eq!(table.full_name(service), "Acme.Billing.CheckoutService");
/// ```
#[derive(Debug, Clone)]
pub struct TypeRecord {
    pub(crate) name: String,
    pub(crate) namespace: Option<String>,
    /// Type this one is nested inside, for synthesized state-machine types
    /// and ordinary nested declarations alike.
    pub(crate) enclosing: Option<TypeId>,
    pub(crate) compiler_generated: bool,
    pub(crate) async_state_machine: bool,
    pub(crate) iterator: bool,
    /// Concrete generic arguments, e.g. the `int` of `Nullable<int>`.
    pub(crate) generic_args: Vec<TypeId>,
    /// Set on by-reference wrapper types; `element` is the referenced type.
    pub(crate) by_ref: bool,
    pub(crate) element: Option<TypeId>,
}

impl TypeRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            enclosing: None,
            compiler_generated: false,
            async_state_machine: false,
            iterator: false,
            generic_args: Vec::new(),
            by_ref: false,
            element: None,
        }
    }

    /// A by-reference wrapper around `element`, as runtimes report the
    /// declared type of `ref`/`out` parameters.
    #[must_use]
    pub fn by_ref_of(element: TypeId) -> Self {
        let mut record = Self::new("");
        record.by_ref = true;
        record.element = Some(element);
        record
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn nested_in(mut self, enclosing: TypeId) -> Self {
        self.enclosing = Some(enclosing);
        self
    }

    #[must_use]
    pub fn compiler_generated(mut self) -> Self {
        self.compiler_generated = true;
        self
    }

    /// Mark this type as an async state machine. Implies nothing about
    /// nesting; pair with [`TypeRecord::nested_in`] for unwinding to work.
    #[must_use]
    pub fn async_state_machine(mut self) -> Self {
        self.async_state_machine = true;
        self
    }

    /// Mark this type as a synthesized iterator implementation.
    #[must_use]
    pub fn iterator(mut self) -> Self {
        self.iterator = true;
        self
    }

    #[must_use]
    pub fn with_generic_args(mut self, args: Vec<TypeId>) -> Self {
        self.generic_args = args;
        self
    }
}

/// Description of one method as the host runtime reported it.
#[derive(Debug, Clone)]
pub struct MethodRecord {
    pub(crate) name: String,
    pub(crate) declaring_type: Option<TypeId>,
    pub(crate) generic_params: Vec<TypeId>,
    pub(crate) params: Vec<ParamRecord>,
    /// For methods compiled into a state machine: the synthesized type that
    /// carries their resumption steps. The unwinding scan matches on this.
    pub(crate) state_machine_type: Option<TypeId>,
}

impl MethodRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring_type: None,
            generic_params: Vec::new(),
            params: Vec::new(),
            state_machine_type: None,
        }
    }

    #[must_use]
    pub fn declared_on(mut self, ty: TypeId) -> Self {
        self.declaring_type = Some(ty);
        self
    }

    #[must_use]
    pub fn with_generic_params(mut self, params: Vec<TypeId>) -> Self {
        self.generic_params = params;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<ParamRecord>) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn state_machine(mut self, synthesized: TypeId) -> Self {
        self.state_machine_type = Some(synthesized);
        self
    }
}

/// One formal parameter of a [`MethodRecord`].
#[derive(Debug, Clone)]
pub struct ParamRecord {
    /// Parameter name; hosts may omit it for synthesized or stripped methods.
    pub(crate) name: Option<String>,
    pub(crate) ty: TypeId,
    /// Out parameters; by-reference in/out parameters are recognized from the
    /// declared type itself being a by-ref wrapper.
    pub(crate) out_param: bool,
}

impl ParamRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            out_param: false,
        }
    }

    #[must_use]
    pub fn unnamed(ty: TypeId) -> Self {
        Self {
            name: None,
            ty,
            out_param: false,
        }
    }

    #[must_use]
    pub fn out_param(mut self) -> Self {
        self.out_param = true;
        self
    }
}

// ============================================================================
// Classification
// ============================================================================

/// How a method relates to the code a developer actually wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Declared directly in source.
    Ordinary,
    /// Resumption step of a compiler-synthesized async state machine.
    AsyncStep,
    /// Resumption step of a compiler-synthesized iterator.
    IteratorStep,
}

impl MethodKind {
    /// True for the synthesized step kinds that unwinding applies to.
    #[must_use]
    pub fn is_state_machine_step(self) -> bool {
        matches!(self, MethodKind::AsyncStep | MethodKind::IteratorStep)
    }
}

// ============================================================================
// Table
// ============================================================================

/// Registry of every type and method a snapshot's frames may reference.
///
/// Append-only: adapters fill it while capturing, the parser reads it through
/// handles. Wrapped in an `Arc` by [`StackSnapshot`](crate::StackSnapshot) so
/// snapshots stay cheap to clone and safe to parse from multiple threads.
#[derive(Debug, Default)]
pub struct MetadataTable {
    types: Vec<TypeRecord>,
    methods: Vec<MethodRecord>,
    /// Methods in declaration order per type, parallel to `types`. Unwinding
    /// depends on this order when several methods match.
    declared: Vec<Vec<MethodId>>,
}

impl MetadataTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type and mint its handle.
    ///
    /// # Panics
    ///
    /// Panics if the record references a handle this table never issued.
    pub fn add_type(&mut self, record: TypeRecord) -> TypeId {
        for referenced in record
            .enclosing
            .iter()
            .chain(record.element.iter())
            .chain(record.generic_args.iter())
        {
            assert!(
                referenced.0 < self.types.len(),
                "{referenced} does not belong to this metadata table"
            );
        }
        let id = TypeId(self.types.len());
        self.types.push(record);
        self.declared.push(Vec::new());
        id
    }

    /// Register a method and mint its handle. The method is appended to its
    /// declaring type's declaration order.
    ///
    /// # Panics
    ///
    /// Panics if the record references a handle this table never issued.
    pub fn add_method(&mut self, record: MethodRecord) -> MethodId {
        for referenced in record
            .declaring_type
            .iter()
            .chain(record.state_machine_type.iter())
            .chain(record.generic_params.iter())
            .chain(record.params.iter().map(|p| &p.ty))
        {
            assert!(
                referenced.0 < self.types.len(),
                "{referenced} does not belong to this metadata table"
            );
        }
        let id = MethodId(self.methods.len());
        if let Some(declaring) = record.declaring_type {
            self.declared[declaring.0].push(id);
        }
        self.methods.push(record);
        id
    }

    /// Simple display name: generic arguments in angle brackets, by-ref types
    /// shown as their element followed by `&`.
    #[must_use]
    pub fn display_name(&self, ty: TypeId) -> String {
        let record = self.ty(ty);
        if record.by_ref {
            return match record.element {
                Some(element) => format!("{}&", self.display_name(element)),
                None => format!("{}&", record.name),
            };
        }
        if record.generic_args.is_empty() {
            return record.name.clone();
        }
        let args: Vec<String> = record
            .generic_args
            .iter()
            .map(|&arg| self.display_name(arg))
            .collect();
        format!("{}<{}>", record.name, args.join(", "))
    }

    /// Dot-qualified name: namespace of the outermost declaration, then the
    /// nesting chain from the outside in.
    #[must_use]
    pub fn full_name(&self, ty: TypeId) -> String {
        let mut chain = Vec::new();
        let mut namespace = None;
        let mut cursor = Some(ty);
        while let Some(id) = cursor {
            let record = self.ty(id);
            chain.push(record.name.as_str());
            namespace = record.namespace.as_deref();
            cursor = record.enclosing;
        }
        chain.reverse();
        match namespace {
            Some(namespace) => format!("{}.{}", namespace, chain.join(".")),
            None => chain.join("."),
        }
    }

    /// Namespace a type lives in, taken from its outermost enclosing
    /// declaration. Nested and synthesized types rarely carry their own.
    #[must_use]
    pub fn namespace_of(&self, ty: TypeId) -> Option<&str> {
        let mut cursor = ty;
        loop {
            let record = self.ty(cursor);
            match record.enclosing {
                Some(enclosing) => cursor = enclosing,
                None => return record.namespace.as_deref(),
            }
        }
    }

    /// Classify a method by the type that declares it.
    #[must_use]
    pub fn classify(&self, method: MethodId) -> MethodKind {
        let Some(declaring) = self.method(method).declaring_type else {
            return MethodKind::Ordinary;
        };
        let record = self.ty(declaring);
        if !record.compiler_generated {
            return MethodKind::Ordinary;
        }
        if record.async_state_machine {
            MethodKind::AsyncStep
        } else if record.iterator {
            MethodKind::IteratorStep
        } else {
            MethodKind::Ordinary
        }
    }

    /// The method a developer wrote for this frame.
    ///
    /// Ordinary methods come back unchanged. For a state-machine step the
    /// enclosing type's declared methods are scanned in declaration order for
    /// the first one whose state-machine marker names the synthesized type;
    /// when the scan finds nothing (stripped metadata, exotic synthesis) the
    /// step itself is returned rather than failing.
    #[must_use]
    pub fn originating_method(&self, method: MethodId) -> MethodId {
        if !self.classify(method).is_state_machine_step() {
            return method;
        }
        self.state_machine_origin(method).unwrap_or(method)
    }

    fn state_machine_origin(&self, step: MethodId) -> Option<MethodId> {
        let synthesized = self.method(step).declaring_type?;
        let enclosing = self.ty(synthesized).enclosing?;
        self.declared[enclosing.0]
            .iter()
            .copied()
            .find(|&candidate| self.method(candidate).state_machine_type == Some(synthesized))
    }

    pub(crate) fn ty(&self, id: TypeId) -> &TypeRecord {
        &self.types[id.0]
    }

    pub(crate) fn method(&self, id: MethodId) -> &MethodRecord {
        &self.methods[id.0]
    }
}
