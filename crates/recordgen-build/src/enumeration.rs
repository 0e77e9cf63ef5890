use crate::{
    BuildError,
    model::{ClassKind, ClassModel, EnumLookup, EnumModel, FieldVar, Method, Param},
    naming::capitalize,
};
use recordgen_config::GenConfig;
use recordgen_schema::prelude::*;

///
/// EnumPlacement
///
/// Where the enum type used by a field is declared.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EnumPlacement {
    /// Nested inside the owning record class.
    Nested(EnumModel),

    /// A standalone class next to the record.
    Sibling(EnumModel),

    /// Generated for an enumeration table; the record only imports it.
    Import(String),
}

///
/// EnumField
///
/// The enum type behind one enumerated field.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumField {
    pub type_name: String,
    pub literals: Vec<String>,
    pub default_value: Option<String>,
    pub placement: EnumPlacement,
}

/// Resolve the enum type of an enumerated field.
///
/// A field pointing at an enumeration table shares that table's enum; a field
/// without one gets a local enum named after the field.
pub fn field_enum(
    database: &Database,
    field: &Field,
    var: &str,
    config: &GenConfig,
) -> Result<EnumField, BuildError> {
    let (type_name, literals, placement) = if let Some(target) = field.foreign_table() {
        let info = database
            .class_info(target)
            .ok_or_else(|| BuildError::UnknownTable(target.to_string()))?;

        if field.enum_values.is_empty() {
            let table = database
                .table(target)
                .ok_or_else(|| BuildError::UnknownTable(target.to_string()))?;
            let literals = table.enums.iter().map(|e| e.name.clone()).collect();

            (info.class_name.clone(), literals, EnumPlacement::Import(info.qualified_name()))
        } else {
            // inline values override the shared table and always nest
            let model = EnumModel::new(&info.class_name, field.enum_values.iter().cloned());
            (info.class_name, field.enum_values.clone(), EnumPlacement::Nested(model))
        }
    } else {
        let type_name = capitalize(var);
        let model = EnumModel::new(&type_name, field.enum_values.iter().cloned());
        let placement = if config.use_inner_enums {
            EnumPlacement::Nested(model)
        } else {
            EnumPlacement::Sibling(model)
        };

        (type_name, field.enum_values.clone(), placement)
    };

    let default_literal = field
        .enum_default
        .clone()
        .or_else(|| literals.first().cloned());

    Ok(EnumField {
        default_value: default_literal.map(|literal| format!("{type_name}.{literal}")),
        type_name,
        literals,
        placement,
    })
}

/// Standalone enum class for a local enum that is not nested.
#[must_use]
pub fn sibling_class(model: &EnumModel, package: &str) -> ClassModel {
    let mut class = ClassModel::new(&model.name, package, ClassKind::Enum).with_generated_header();
    class.literals.clone_from(&model.literals);

    class
}

/// Build the enum class generated for an enumeration table.
///
/// Produces the enum, its static lookup map and list, and their accessors.
/// The record generator adds the table and DDL constants; there is no record
/// class and no test.
#[must_use]
pub fn enumeration_table_class(table: &Table, info: &ClassInfo) -> ClassModel {
    let name = &info.class_name;
    let mut class = ClassModel::new(name, &info.package, ClassKind::Enum).with_generated_header();
    class.annotations.push("@SuppressWarnings(\"all\")".to_string());
    class.literals = table.enums.iter().map(|e| e.name.clone()).collect();

    if table.enums.is_empty() {
        return class;
    }

    for import in [
        "java.util.Map",
        "java.util.EnumMap",
        "java.util.List",
        "java.util.ArrayList",
        "java.util.Collections",
    ] {
        class.imports.insert(import.to_string());
    }

    let map_type = format!("Map<{name}, String>");
    class.fields.push(
        FieldVar::new("enumStringMap", &map_type)
            .with_default(format!("new EnumMap<{name}, String>({name}.class)"))
            .with_static(),
    );
    class.fields.push(
        FieldVar::new("stringList", "List<String>")
            .with_default("new ArrayList<String>()")
            .with_static(),
    );

    let lookup = EnumLookup {
        map: table
            .enums
            .iter()
            .map(|e| (e.name.clone(), e.value.clone()))
            .collect(),
        list: table.enums.iter().map(|e| e.value.clone()).collect(),
    };
    class.static_init = table
        .enums
        .iter()
        .flat_map(|e| {
            [
                format!("enumStringMap.put({}, \"{}\");", e.name, e.value),
                format!("stringList.add(\"{}\");", e.value),
            ]
        })
        .collect();
    class.lookup = Some(lookup);

    class.methods.push(
        Method::new("getString", "String", "return enumStringMap.get(key);")
            .with_param(Param::new(name, "key"))
            .with_static(),
    );
    class.methods.push(
        Method::new(
            "getList",
            "List<String>",
            "return Collections.unmodifiableList(stringList);",
        )
        .with_static(),
    );

    class
}

///
/// TESTS
///
