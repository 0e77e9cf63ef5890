//! The class model handed to a code emitter.
//!
//! A model is built once per table and never mutated after assembly.

use recordgen_core::codec::Codec;
use recordgen_schema::types::{ForeignKeyType, SemanticType};
use serde::Serialize;
use std::collections::BTreeSet;

/// Header comment carried by every generated artifact.
pub const GENERATED_HEADER: &str = "GENERATED FILE - DO NOT EDIT";

///
/// ClassKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ClassKind {
    Record,
    Enum,
    Test,
}

///
/// Access
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
    Package,
}

///
/// ClassModel
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassModel {
    pub name: String,
    pub package: String,
    pub kind: ClassKind,
    pub extends: Option<String>,
    pub header_comment: Option<String>,
    pub annotations: Vec<String>,
    pub imports: BTreeSet<String>,
    pub constants: Vec<Constant>,
    pub fields: Vec<FieldVar>,
    pub methods: Vec<Method>,

    /// Enum types nested inside this class.
    pub enums: Vec<EnumModel>,

    /// Literals, when this class is itself an enum.
    pub literals: Vec<String>,

    /// Static literal-to-stored-value lookup of an enumeration class.
    pub lookup: Option<EnumLookup>,

    /// Statements of the static initializer block.
    pub static_init: Vec<String>,

    pub relations: Vec<RelationModel>,
    pub injection_support: bool,
}

impl ClassModel {
    #[must_use]
    pub fn new(name: impl Into<String>, package: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind,
            extends: None,
            header_comment: None,
            annotations: Vec::new(),
            imports: BTreeSet::new(),
            constants: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            enums: Vec::new(),
            literals: Vec::new(),
            lookup: None,
            static_init: Vec::new(),
            relations: Vec::new(),
            injection_support: false,
        }
    }

    /// The `GENERATED FILE - DO NOT EDIT` banner naming this class's file.
    #[must_use]
    pub fn with_generated_header(mut self) -> Self {
        self.header_comment = Some(format!("{}.java\n\n{GENERATED_HEADER}", self.name));
        self
    }

    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }

    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldVar> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// First method called `name`; overloads follow in declaration order.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// The overload of `name` whose first parameter has type `param_ty`.
    #[must_use]
    pub fn method_with_param(&self, name: &str, param_ty: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.params.first().is_some_and(|p| p.ty == param_ty))
    }

    #[must_use]
    pub fn nested_enum(&self, name: &str) -> Option<&EnumModel> {
        self.enums.iter().find(|e| e.name == name)
    }
}

///
/// Constant
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Constant {
    pub name: String,
    pub ty: String,
    pub value: ConstantValue,
    pub access: Access,
}

impl Constant {
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: "String".to_string(),
            value: ConstantValue::Text(value.into()),
            access: Access::Public,
        }
    }

    /// A `String[]` constant listing other constants by name.
    #[must_use]
    pub fn names(name: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            name: name.into(),
            ty: "String[]".to_string(),
            value: ConstantValue::Names(names),
            access: Access::Package,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            ConstantValue::Text(text) => Some(text),
            ConstantValue::Names(_) => None,
        }
    }
}

///
/// ConstantValue
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum ConstantValue {
    /// A string literal.
    Text(String),

    /// An array of references to other constants.
    Names(Vec<String>),
}

///
/// FieldVar
///
/// An instance (or static) variable of a generated class.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FieldVar {
    pub name: String,
    pub ty: String,
    pub semantic: Option<SemanticType>,
    pub default_value: Option<String>,
    pub access: Access,
    pub is_static: bool,

    /// Getter and setter are generated for this variable.
    pub accessors: bool,

    /// Copied on the way in and out of the record.
    pub defensive_copy: bool,

    /// Set from outside; never flattened into the property bag.
    pub requires_wiring: bool,

    /// Marshalling codec, for columns the record reads and writes itself.
    pub codec: Option<Codec>,
}

impl FieldVar {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            access: Access::Private,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub const fn with_accessors(mut self) -> Self {
        self.accessors = true;
        self
    }

    #[must_use]
    pub const fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn getter_name(&self) -> String {
        crate::naming::getter_name(&self.name, self.ty == "boolean")
    }

    #[must_use]
    pub fn setter_name(&self) -> String {
        crate::naming::setter_name(&self.name)
    }
}

///
/// Param
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

impl Param {
    #[must_use]
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

///
/// Method
///
/// A method (or constructor, when `return_type` is `None`).
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Method {
    pub name: String,
    pub access: Access,
    pub return_type: Option<String>,
    pub params: Vec<Param>,
    pub body: String,
    pub annotations: Vec<String>,
    pub is_static: bool,
}

impl Method {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            return_type: Some(return_type.into()),
            body: body.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn constructor(
        class_name: impl Into<String>,
        params: Vec<Param>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: class_name.into(),
            params,
            body: body.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    #[must_use]
    pub const fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    #[must_use]
    pub const fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub const fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    /// Body lines that are not blank.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.body.lines().filter(|line| !line.trim().is_empty())
    }
}

///
/// EnumModel
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EnumModel {
    pub name: String,
    pub literals: Vec<String>,
}

impl EnumModel {
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            literals: literals.into_iter().map(Into::into).collect(),
        }
    }
}

///
/// EnumLookup
///
/// Static literal-to-stored-string map plus the stored strings in declaration order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EnumLookup {
    pub map: Vec<(String, String)>,
    pub list: Vec<String>,
}

impl EnumLookup {
    #[must_use]
    pub fn get(&self, literal: &str) -> Option<&str> {
        self.map
            .iter()
            .find(|(name, _)| name == literal)
            .map(|(_, value)| value.as_str())
    }
}

///
/// RelationModel
///
/// One relationship wired into a record class.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RelationModel {
    pub kind: ForeignKeyType,
    pub target_class: String,
    pub var_name: String,

    /// Pending-removal collection, for the parent side of a one-to-many.
    pub pending_var: Option<String>,
}

///
/// TESTS
///
