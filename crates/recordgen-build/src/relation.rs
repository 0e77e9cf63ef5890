//! Relationship wiring: single references and the parent side of one-to-many.

use crate::{
    BuildError,
    classify::FieldRole,
    model::{Access, FieldVar, Method, Param, RelationModel},
    naming::{capitalize, decapitalize, setter_name, to_identifier_case},
};
use recordgen_core::Strictness;
use recordgen_schema::prelude::*;
use std::collections::BTreeMap;

/// Name of the aggregated orphan-cleanup method.
pub const CLEANUP_ORPHANS: &str = "cleanupOrphans";

const TAB: &str = "\t";

///
/// InboundRef
///
/// A one-to-many foreign key on another table pointing at the indexed table.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InboundRef {
    pub child_table: String,
    pub field: String,

    /// The child's variable holding the parent.
    pub back_ref: String,

    /// Set when the child table has several one-to-many keys to the same parent;
    /// it is folded into every parent-side member name.
    pub qualifier: Option<String>,
}

///
/// InboundIndex
///
/// Target table name to the one-to-many references pointing at it, built once
/// from a read-only view of every table before any table is assembled.
///

#[derive(Clone, Debug, Default)]
pub struct InboundIndex {
    by_target: BTreeMap<String, Vec<InboundRef>>,
}

impl InboundIndex {
    #[must_use]
    pub fn build(database: &Database) -> Self {
        let mut by_target: BTreeMap<String, Vec<InboundRef>> = BTreeMap::new();

        for table in &database.tables {
            for field in &table.fields {
                if field.foreign_key != ForeignKeyType::OneToMany {
                    continue;
                }
                let Some(target) = field.foreign_table() else {
                    continue;
                };
                let Some(back_ref) = reference_var_name(database, table, field) else {
                    continue;
                };

                let siblings = table
                    .fields
                    .iter()
                    .filter(|f| f.foreign_key == ForeignKeyType::OneToMany)
                    .filter(|f| f.foreign_table() == Some(target))
                    .count();

                by_target.entry(target.to_string()).or_default().push(InboundRef {
                    child_table: table.name.clone(),
                    field: field.name.clone(),
                    qualifier: (siblings > 1).then(|| capitalize(&back_ref)),
                    back_ref,
                });
            }
        }

        Self { by_target }
    }

    /// Inbound references in table then field declaration order.
    #[must_use]
    pub fn inbound(&self, table: &str) -> &[InboundRef] {
        self.by_target.get(table).map_or(&[], Vec::as_slice)
    }
}

/// Name of the variable holding the record `field` references.
///
/// An explicit name wins. Otherwise it is the target class name, unless `table`
/// has several keys to the same target; then each is named after its own field.
#[must_use]
pub fn reference_var_name(database: &Database, table: &Table, field: &Field) -> Option<String> {
    if let Some(name) = field.explicit_var_name() {
        return Some(name.to_string());
    }

    let target = field.foreign_table()?;
    if table.foreign_key_fields(target).count() > 1 {
        return Some(field_stem(&field.name));
    }

    database
        .class_info(target)
        .map(|info| decapitalize(&info.class_name))
}

// Identifier of a key column without its trailing `_ID`.
fn field_stem(name: &str) -> String {
    let stem = name
        .len()
        .checked_sub(3)
        .filter(|&at| at > 0)
        .and_then(|at| {
            let (head, tail) = (name.get(..at)?, name.get(at..)?);
            tail.eq_ignore_ascii_case("_id").then_some(head)
        })
        .unwrap_or(name);

    to_identifier_case(stem)
}

///
/// ReferenceParts
///

#[derive(Clone, Debug)]
pub struct ReferenceParts {
    pub var: FieldVar,
    pub import: String,
    pub relation: RelationModel,
}

/// A single owned reference to the foreign record, wired from outside.
pub fn reference(
    database: &Database,
    table: &Table,
    field: &Field,
    role: FieldRole,
) -> Result<ReferenceParts, BuildError> {
    let target = field.foreign_table().unwrap_or_default();
    let info = database
        .class_info(target)
        .ok_or_else(|| BuildError::UnknownTable(target.to_string()))?;
    let var_name = reference_var_name(database, table, field)
        .unwrap_or_else(|| decapitalize(&info.class_name));

    let mut var = FieldVar::new(&var_name, &info.class_name).with_accessors();
    var.requires_wiring = true;

    let kind = match role {
        FieldRole::OneToOne => ForeignKeyType::OneToOne,
        FieldRole::OneToMany => ForeignKeyType::OneToMany,
        _ => ForeignKeyType::ManyToOne,
    };

    Ok(ReferenceParts {
        var,
        import: info.wildcard_import(),
        relation: RelationModel {
            kind,
            target_class: info.class_name,
            var_name,
            pending_var: None,
        },
    })
}

///
/// OneToManyParts
///

#[derive(Clone, Debug)]
pub struct OneToManyParts {
    pub fields: Vec<FieldVar>,
    pub methods: Vec<Method>,
    pub imports: Vec<String>,

    /// This relationship's share of the cleanup method body.
    pub cleanup: String,
    pub relation: RelationModel,
}

/// Parent-side membership for one inbound one-to-many reference.
pub fn one_to_many(
    database: &Database,
    parent: &Table,
    inbound: &InboundRef,
    strictness: Strictness,
) -> Result<OneToManyParts, BuildError> {
    let child = database
        .class_info(&inbound.child_table)
        .ok_or_else(|| BuildError::UnknownTable(inbound.child_table.clone()))?;
    let parent_info = database
        .class_info(&parent.name)
        .ok_or_else(|| BuildError::UnknownTable(parent.name.clone()))?;

    let child_class = &child.class_name;
    let child_var = decapitalize(child_class);
    let suffix = inbound
        .qualifier
        .as_deref()
        .map(|qualifier| format!("As{qualifier}"))
        .unwrap_or_default();
    let items = format!("{child_var}Items{suffix}");
    let to_delete = format!("{items}ToDelete");
    let set_type = format!("Set<{child_class}>");
    let new_set = format!("new HashSet<{child_class}>()");
    let back_ref_setter = setter_name(&inbound.back_ref);

    tracing::debug!(
        parent = %parent.name,
        child = %inbound.child_table,
        field = %inbound.field,
        %items,
        "wiring one-to-many"
    );

    let fields = vec![
        FieldVar::new(&items, &set_type).with_default(&new_set),
        FieldVar::new(&to_delete, &set_type).with_default(&new_set),
    ];

    let getter = Method::new(
        format!("get{}", capitalize(&items)),
        &set_type,
        format!("return java.util.Collections.unmodifiableSet({items});"),
    );

    let add = Method::new(
        format!("add{child_class}{suffix}"),
        "void",
        [
            format!("{child_var}.{back_ref_setter}(({}) this);", parent_info.class_name),
            format!("{items}.add({child_var});"),
            format!("{to_delete}.remove({child_var});"),
        ]
        .join("\n"),
    )
    .with_param(Param::new(child_class, &child_var));

    let failure = format!("delete{child_class}{suffix} failed: Cannot find itemID ");
    let throw = format!(
        "{TAB}throw new IllegalStateException(\"{failure}\" + {child_var}.getPrimaryKeyID());"
    );
    let delete = Method::new(
        format!("delete{child_class}{suffix}"),
        "void",
        [
            format!("if ({child_var} == null) {{"),
            format!("{TAB}return;"),
            "}".to_string(),
            String::new(),
            format!("if (!{items}.remove({child_var})) {{"),
            throw,
            "}".to_string(),
            format!("{to_delete}.add({child_var});"),
        ]
        .join("\n"),
    )
    .with_param(Param::new(child_class, &child_var));

    Ok(OneToManyParts {
        fields,
        methods: vec![getter, add, delete],
        imports: vec![
            child.wildcard_import(),
            "java.util.Set".to_string(),
            "java.util.HashSet".to_string(),
        ],
        cleanup: cleanup_snippet(child_class, &to_delete, strictness),
        relation: RelationModel {
            kind: ForeignKeyType::OneToMany,
            target_class: child_class.clone(),
            var_name: items,
            pending_var: Some(to_delete),
        },
    })
}

fn cleanup_snippet(child_class: &str, to_delete: &str, strictness: Strictness) -> String {
    let mut lines = vec![format!("for ({child_class} itemToDelete : {to_delete}) {{")];

    if strictness.is_strict() {
        lines.push(format!("{TAB}em.remove(itemToDelete);"));
    } else {
        lines.extend([
            format!("{TAB}try {{"),
            format!("{TAB}{TAB}em.remove(itemToDelete);"),
            format!("{TAB}}} catch (RuntimeException e) {{"),
            format!("{TAB}{TAB}// already removed"),
            format!("{TAB}}}"),
        ]);
    }
    lines.push("}".to_string());
    lines.push(format!("{to_delete}.clear();"));

    lines.join("\n")
}

/// The aggregated cleanup method, when any one-to-many exists.
#[must_use]
pub fn cleanup_method(snippets: &[String]) -> Option<Method> {
    if snippets.is_empty() {
        return None;
    }

    Some(Method::new(CLEANUP_ORPHANS, "void", snippets.join("\n\n")).with_access(Access::Protected))
}

///
/// TESTS
///
