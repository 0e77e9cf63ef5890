//! Record class assembly.
//!
//! Each field is turned into an isolated set of parts, and the parts are folded
//! into one class model in declaration order. Inbound one-to-many relationships
//! come from the pre-built index, so assembling a table never rescans the schema.

use crate::{
    BuildError,
    classify::{Classified, FieldRole, classify_fields},
    emit::GeneratedTable,
    enumeration::{self, EnumPlacement},
    marshal::{EnumInfo, MarshalOutcome, marshal_expr},
    model::{ClassKind, ClassModel, Constant, EnumModel, FieldVar, Method, Param, RelationModel},
    naming::{column_constant, full_column_constant, to_identifier_case},
    relation::{self, InboundIndex},
    test_gen::{self, AccessorTest, TestValue},
};
use recordgen_config::{DateMode, GenConfig};
use recordgen_schema::{
    ddl::DdlRenderer,
    mapping::TypeMapping,
    prelude::*,
};

/// Suffix of a generated record class.
pub const RECORD_SUFFIX: &str = "BaseRecord";

/// Base class every record extends.
pub const BASE_RECORD: &str = "BaseRecord";

pub const PRIMARY_KEY_COLUMN: &str = "PRIMARY_KEY_COLUMN";
pub const ALL_KEYS: &str = "ALL_KEYS";

const DATE_TIME_TYPE: &str = "org.joda.time.DateTime";

///
/// ClassParts
///
/// The contribution of one field (or one inbound relationship) to a class.
///

#[derive(Debug, Default)]
struct ClassParts {
    constants: Vec<Constant>,
    fields: Vec<FieldVar>,
    methods: Vec<Method>,
    imports: Vec<String>,
    enums: Vec<EnumModel>,
    siblings: Vec<EnumModel>,
    keys: Vec<String>,
    to_bag: Vec<String>,
    from_bag: Vec<String>,
    from_cursor: Vec<String>,
    to_string: Vec<String>,
    cleanup: Vec<String>,
    tests: Vec<AccessorTest>,
    relations: Vec<RelationModel>,
    primary_key: Option<String>,
}

impl ClassParts {
    fn merge(mut self, other: Self) -> Self {
        self.constants.extend(other.constants);
        self.fields.extend(other.fields);
        self.methods.extend(other.methods);
        self.imports.extend(other.imports);
        self.enums.extend(other.enums);
        self.siblings.extend(other.siblings);
        self.keys.extend(other.keys);
        self.to_bag.extend(other.to_bag);
        self.from_bag.extend(other.from_bag);
        self.from_cursor.extend(other.from_cursor);
        self.to_string.extend(other.to_string);
        self.cleanup.extend(other.cleanup);
        self.tests.extend(other.tests);
        self.relations.extend(other.relations);
        self.primary_key = self.primary_key.or(other.primary_key);

        self
    }
}

///
/// RecordGenerator
///
/// Assembles the class model of one table against a read-only database view.
///

pub struct RecordGenerator<'a> {
    database: &'a Database,
    config: &'a GenConfig,
    mapping: &'a dyn TypeMapping,
    ddl: &'a dyn DdlRenderer,
    inbound: &'a InboundIndex,
}

impl<'a> RecordGenerator<'a> {
    #[must_use]
    pub const fn new(
        database: &'a Database,
        config: &'a GenConfig,
        mapping: &'a dyn TypeMapping,
        ddl: &'a dyn DdlRenderer,
        inbound: &'a InboundIndex,
    ) -> Self {
        Self {
            database,
            config,
            mapping,
            ddl,
            inbound,
        }
    }

    /// Generate everything for `table`.
    pub fn generate_table(&self, table: &Table) -> Result<GeneratedTable, BuildError> {
        let info = self
            .database
            .class_info(&table.name)
            .ok_or_else(|| BuildError::UnknownTable(table.name.clone()))?;

        if table.enumeration_table {
            tracing::debug!(
                table = %table.name,
                class = %info.class_name,
                "generating enumeration class"
            );

            let mut record = enumeration::enumeration_table_class(table, &info);
            record.constants.extend(self.identity_constants(table));
            record.constants.extend(self.ddl_constants(table));

            return Ok(GeneratedTable {
                table: table.name.clone(),
                record,
                siblings: Vec::new(),
                test: None,
            });
        }

        let class_name = format!("{}{RECORD_SUFFIX}", info.class_name);
        tracing::debug!(table = %table.name, class = %class_name, "generating record class");

        // Phase 1: fold every field into the class parts.
        let parts = classify_fields(table)?
            .iter()
            .try_fold(ClassParts::default(), |acc, classified| {
                Ok::<_, BuildError>(acc.merge(self.field_parts(table, classified)?))
            })?;

        // Phase 2: parent side of inbound one-to-many relationships.
        let parts = self
            .inbound
            .inbound(&table.name)
            .iter()
            .try_fold(parts, |acc, inbound| {
                let wiring = relation::one_to_many(
                    self.database,
                    table,
                    inbound,
                    self.config.strictness.orphan_cleanup,
                )?;

                Ok::<_, BuildError>(acc.merge(ClassParts {
                    fields: wiring.fields,
                    methods: wiring.methods,
                    imports: wiring.imports,
                    cleanup: vec![wiring.cleanup],
                    relations: vec![wiring.relation],
                    ..ClassParts::default()
                }))
            })?;

        // Phase 3: assemble the class.
        Ok(self.assemble(table, &info, class_name, parts))
    }

    fn field_parts(
        &self,
        table: &Table,
        classified: &Classified<'_>,
    ) -> Result<ClassParts, BuildError> {
        let field = classified.field;

        match classified.role {
            FieldRole::Ignored => Ok(ClassParts::default()),
            role if role.is_reference() => {
                let reference = relation::reference(self.database, table, field, role)?;

                Ok(ClassParts {
                    fields: vec![reference.var],
                    imports: vec![reference.import],
                    relations: vec![reference.relation],
                    ..ClassParts::default()
                })
            }
            _ => self.column_parts(table, classified),
        }
    }

    // Scalar and enumerated columns: constants, variable, marshalling, test.
    fn column_parts(
        &self,
        table: &Table,
        classified: &Classified<'_>,
    ) -> Result<ClassParts, BuildError> {
        let field = classified.field;
        let mode = self.config.date_mode();
        let var_name = to_identifier_case(&field.name);
        let key = column_constant(&var_name);
        let mut parts = ClassParts::default();

        // constants
        if classified.primary_key {
            parts.constants.push(Constant::text(PRIMARY_KEY_COLUMN, &field.name));
        }
        parts.constants.push(Constant::text(&key, &field.name));
        parts.constants.push(Constant::text(
            full_column_constant(&var_name),
            format!("{}.{}", table.name, field.name),
        ));
        parts.keys.push(key.clone());

        // variable
        let enum_field = if classified.role == FieldRole::Enumerated {
            Some(enumeration::field_enum(self.database, field, &var_name, self.config)?)
        } else {
            None
        };
        let mut var = match &enum_field {
            Some(resolved) => {
                let mut var = FieldVar::new(&var_name, &resolved.type_name).with_accessors();
                var.default_value.clone_from(&resolved.default_value);
                var
            }
            None => self.scalar_var(field, &var_name, mode),
        };
        var.semantic = Some(field.ty);

        if let Some(resolved) = &enum_field {
            match &resolved.placement {
                EnumPlacement::Nested(model) => parts.enums.push(model.clone()),
                EnumPlacement::Sibling(model) => parts.siblings.push(model.clone()),
                EnumPlacement::Import(path) => parts.imports.push(path.clone()),
            }
        }

        // marshalling
        let enum_info = enum_field.as_ref().map(|resolved| EnumInfo {
            type_name: &resolved.type_name,
            len: resolved.literals.len(),
        });
        let outcome = marshal_expr(&var_name, &key, field.ty, enum_info, mode);
        if let MarshalOutcome::Unsupported(ty) = &outcome {
            if self.config.strictness.unmapped_types.is_strict() {
                return Err(BuildError::UnsupportedType {
                    table: table.name.clone(),
                    field: field.name.clone(),
                    ty: *ty,
                });
            }
            tracing::warn!(
                table = %table.name,
                field = %field.name,
                %ty,
                "no marshalling for column type"
            );
        }
        let (to_bag, from_bag, from_cursor, codec) = outcome.into_exprs_or_placeholder();
        var.codec = codec;

        // the identity column is assigned by the backend on insert
        if !(classified.primary_key && field.auto_increment) {
            parts.to_bag.push(to_bag);
            parts.from_bag.push(format!("{var_name} = {from_bag};"));
        }
        parts.from_cursor.push(format!("{var_name} = {from_cursor};"));

        if !field.ty.is_large_object() {
            parts
                .to_string
                .push(format!("text += \"{var_name} = \" + {var_name} + \"\\n\";"));
        }

        if classified.primary_key {
            parts.primary_key = Some(var_name.clone());
            parts.methods.extend(primary_key_methods(&key, &var));
        }

        let enum_literal = enum_field.as_ref().and_then(|resolved| {
            Some((resolved.type_name.as_str(), resolved.literals.first()?.as_str()))
        });
        let value = TestValue::for_column(field.ty, enum_literal, mode);
        parts.tests.push(test_gen::accessor_test(
            &var,
            &value,
            self.config.use_legacy_test_framework,
        ));

        parts.fields.push(var);

        Ok(parts)
    }

    fn scalar_var(&self, field: &Field, var_name: &str, mode: DateMode) -> FieldVar {
        let target = self.mapping.target(field.ty);

        // date-time instants are immutable, so they are never copied
        let date_time = mode == DateMode::DateTime && field.ty.is_date_family();
        let ty = if date_time {
            DATE_TIME_TYPE
        } else {
            target.text(field.nullable)
        };

        let mut var = FieldVar::new(var_name, ty).with_accessors();
        var.defensive_copy = target.needs_defensive_copy() && !date_time;
        var.default_value = field
            .default_value
            .as_deref()
            .and_then(|raw| format_default(field.ty, raw));

        var
    }

    // DATABASE, TABLE and FULL_TABLE.
    fn identity_constants(&self, table: &Table) -> [Constant; 3] {
        [
            Constant::text("DATABASE", &self.database.name),
            Constant::text("TABLE", &table.name),
            Constant::text(
                "FULL_TABLE",
                format!("{}.{}", self.database.name, table.name),
            ),
        ]
    }

    fn ddl_constants(&self, table: &Table) -> [Constant; 2] {
        [
            Constant::text("CREATE_TABLE", self.ddl.create_table(table, self.mapping)),
            Constant::text("DROP_TABLE", self.ddl.drop_table(table)),
        ]
    }

    fn assemble(
        &self,
        table: &Table,
        info: &ClassInfo,
        class_name: String,
        parts: ClassParts,
    ) -> GeneratedTable {
        let mut class =
            ClassModel::new(class_name, &info.package, ClassKind::Record).with_generated_header();
        class.extends = Some(BASE_RECORD.to_string());
        class.annotations.push("@SuppressWarnings(\"all\")".to_string());
        class.injection_support = self.config.injection_support;

        class.imports.insert(format!("{}.{BASE_RECORD}", self.database.package));
        class.imports.insert("android.content.ContentValues".to_string());
        class.imports.insert("android.database.Cursor".to_string());
        class.imports.extend(parts.imports);

        // constants
        class.constants.extend(self.identity_constants(table));
        class.constants.extend(parts.constants);
        class.constants.extend(self.ddl_constants(table));
        class.constants.push(Constant::names(ALL_KEYS, parts.keys));

        class.fields = parts.fields;
        class.enums = parts.enums;
        class.relations = parts.relations;

        // methods
        class.methods.push(overriding("getDatabaseName", "String", "return DATABASE;"));
        class.methods.push(overriding("getTableName", "String", "return TABLE;"));
        class.methods.extend(
            parts
                .methods
                .iter()
                .filter(|m| is_primary_key_method(m))
                .cloned(),
        );
        class.methods.push(overriding(
            "getAllKeys",
            "String[]",
            format!("return {ALL_KEYS}.clone();"),
        ));
        class.methods.push(overriding(
            "getContentValues",
            "ContentValues",
            block(
                "ContentValues values = new ContentValues();",
                &parts.to_bag,
                Some("return values;"),
            ),
        ));
        class.methods.push(
            Method::new("setContent", "void", block("", &parts.from_bag, None))
                .with_param(Param::new("ContentValues", "values")),
        );
        class.methods.push(
            overriding("setContent", "void", block("", &parts.from_cursor, None))
                .with_param(Param::new("Cursor", "cursor")),
        );
        class.methods.extend(parts.methods.into_iter().filter(|m| !is_primary_key_method(m)));
        if let Some(cleanup) = relation::cleanup_method(&parts.cleanup) {
            class.methods.push(cleanup);
        }
        class.methods.push(overriding(
            "toString",
            "String",
            block("String text = \"\\n\";", &parts.to_string, Some("return text;")),
        ));
        if parts.primary_key.is_some() {
            class.methods.push(Method::new(
                "isNewRecord",
                "boolean",
                "return getPrimaryKeyID() <= 0;",
            ));
        }

        let siblings = parts
            .siblings
            .iter()
            .map(|model| enumeration::sibling_class(model, &info.package))
            .collect();

        let test = self.config.write_tests.then(|| {
            test_gen::test_class(&class, parts.tests, self.config.use_legacy_test_framework)
        });

        GeneratedTable {
            table: table.name.clone(),
            record: class,
            siblings,
            test,
        }
    }
}

fn overriding(name: &str, return_type: &str, body: impl Into<String>) -> Method {
    Method::new(name, return_type, body).with_annotation("Override")
}

const PRIMARY_KEY_METHODS: [&str; 3] = ["getRowIDKey", "getPrimaryKeyID", "setPrimaryKeyID"];

fn is_primary_key_method(method: &Method) -> bool {
    PRIMARY_KEY_METHODS.contains(&method.name.as_str())
}

fn primary_key_methods(key: &str, var: &FieldVar) -> [Method; 3] {
    [
        overriding(PRIMARY_KEY_METHODS[0], "String", format!("return {key};")),
        overriding(PRIMARY_KEY_METHODS[1], &var.ty, format!("return {};", var.name)),
        overriding(PRIMARY_KEY_METHODS[2], "void", format!("this.{} = id;", var.name))
            .with_param(Param::new(&var.ty, "id")),
    ]
}

// Join a method body: optional opening line, one line per entry, optional closing line.
fn block(open: &str, lines: &[String], close: Option<&str>) -> String {
    let open = (!open.is_empty()).then_some(open);

    open.into_iter()
        .chain(lines.iter().map(String::as_str))
        .chain(close)
        .collect::<Vec<_>>()
        .join("\n")
}

// Field default formatted as a literal of the field's target type.
fn format_default(ty: SemanticType, raw: &str) -> Option<String> {
    let literal = match ty {
        SemanticType::Text | SemanticType::Clob => format!("\"{raw}\""),
        SemanticType::Long => format!("{raw}L"),
        SemanticType::Float => format!("{raw}f"),
        SemanticType::Integer | SemanticType::Double => raw.to_string(),
        SemanticType::Boolean => raw.to_ascii_lowercase(),
        SemanticType::Date | SemanticType::Timestamp | SemanticType::Time | SemanticType::Blob => {
            return None;
        }
    };

    Some(literal)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use recordgen_schema::{ddl::SqliteDdlRenderer, mapping::SqliteTypeMapping};

    fn generate(
        database: &Database,
        table: &str,
        config: &GenConfig,
    ) -> Result<GeneratedTable, BuildError> {
        let index = InboundIndex::build(database);
        let generator =
            RecordGenerator::new(database, config, &SqliteTypeMapping, &SqliteDdlRenderer, &index);

        generator.generate_table(database.table(table).expect("table exists"))
    }

    #[test]
    fn block_skips_empty_opening() {
        assert_eq!(block("", &["a;".to_string()], None), "a;");
        assert_eq!(block("x;", &[], Some("y;")), "x;\ny;");
    }

    #[test]
    fn defaults_are_formatted_per_type() {
        assert_eq!(format_default(SemanticType::Long, "5").as_deref(), Some("5L"));
        assert_eq!(format_default(SemanticType::Text, "x").as_deref(), Some("\"x\""));
        assert_eq!(format_default(SemanticType::Boolean, "TRUE").as_deref(), Some("true"));
        assert_eq!(format_default(SemanticType::Date, "now"), None);
    }

    #[test]
    fn relationship_fields_get_no_constants_or_marshalling() {
        let db = Database::new("main", "com.example")
            .with_table(
                Table::new("OWNER").with_field(Field::new("ID", SemanticType::Long).primary_key()),
            )
            .with_table(
                Table::new("PET")
                    .with_field(Field::new("NAME", SemanticType::Text))
                    .with_field(
                        Field::new("OWNER_ID", SemanticType::Long)
                            .foreign_key(ForeignKeyType::ManyToOne, "OWNER"),
                    )
                    .with_field(
                        Field::new("OLD", SemanticType::Text)
                            .foreign_key(ForeignKeyType::Ignore, ""),
                    ),
            );

        let generated = generate(&db, "PET", &GenConfig::default()).expect("generate");
        let record = &generated.record;

        assert!(record.constant("C_OWNER_ID").is_none());
        assert!(record.constant("C_OLD").is_none(), "ignored fields leave no trace");
        assert!(record.field("old").is_none());

        let owner = record.field("owner").expect("owner reference");
        assert!(owner.requires_wiring);
        assert!(record.imports.contains("com.example.owner.*"));

        let values = record.method("getContentValues").expect("getContentValues");
        assert_eq!(values.lines().filter(|l| l.contains("values.put(")).count(), 1);
        assert!(record.method("isNewRecord").is_none(), "no primary key, no identity check");
    }

    #[test]
    fn unsupported_type_is_soft_by_default() {
        let db = Database::new("main", "p").with_table(
            Table::new("FILE").with_field(Field::new("DATA", SemanticType::Blob)),
        );

        let generated = generate(&db, "FILE", &GenConfig::default()).expect("lenient generation");
        let cursor = generated
            .record
            .method_with_param("setContent", "Cursor")
            .expect("cursor reader");
        assert_eq!(cursor.body, "data = [[UNHANDLED FIELD TYPE: Blob]];");
        assert!(generated.record.field("data").expect("data").codec.is_none());

        let mut strict = GenConfig::default();
        strict.strictness.unmapped_types = recordgen_core::Strictness::Strict;
        let err = generate(&db, "FILE", &strict).expect_err("strict generation fails");
        assert!(matches!(
            err,
            BuildError::UnsupportedType { ty: SemanticType::Blob, .. }
        ));
    }

    #[test]
    fn large_objects_are_left_out_of_to_string() {
        let db = Database::new("main", "p").with_table(
            Table::new("DOC")
                .with_field(Field::new("TITLE", SemanticType::Text))
                .with_field(Field::new("BODY", SemanticType::Clob)),
        );

        let generated = generate(&db, "DOC", &GenConfig::default()).expect("generate");
        let to_string = generated.record.method("toString").expect("toString");

        assert!(to_string.body.contains("title"));
        assert!(!to_string.body.contains("body"));
    }

    #[test]
    fn sibling_enums_are_separate_classes() {
        let db = Database::new("main", "com.example").with_table(
            Table::new("CAR").with_field(
                Field::new("COLOR", SemanticType::Integer).enumeration(["RED", "BLUE"]),
            ),
        );
        let config = GenConfig {
            use_inner_enums: false,
            ..GenConfig::default()
        };

        let generated = generate(&db, "CAR", &config).expect("generate");

        assert!(generated.record.enums.is_empty());
        assert_eq!(generated.siblings.len(), 1);
        assert_eq!(generated.siblings[0].qualified_name(), "com.example.car.Color");
        assert_eq!(generated.record.field("color").expect("color").ty, "Color");
    }

    #[test]
    fn date_time_mode_uses_immutable_instants() {
        let db = Database::new("main", "p").with_table(
            Table::new("EVENT").with_field(Field::new("AT", SemanticType::Timestamp)),
        );
        let config = GenConfig {
            date_time_support: true,
            ..GenConfig::default()
        };

        let legacy = generate(&db, "EVENT", &GenConfig::default()).expect("generate");
        let modern = generate(&db, "EVENT", &config).expect("generate");

        assert!(legacy.record.field("at").expect("at").defensive_copy);
        let at = modern.record.field("at").expect("at");
        assert_eq!(at.ty, "org.joda.time.DateTime");
        assert!(!at.defensive_copy);
    }

    #[test]
    fn write_tests_flag_controls_test_stub() {
        let db = Database::new("main", "p")
            .with_table(Table::new("T").with_field(Field::new("NAME", SemanticType::Text)));
        let config = GenConfig {
            write_tests: false,
            ..GenConfig::default()
        };

        assert!(generate(&db, "T", &GenConfig::default()).expect("generate").test.is_some());
        assert!(generate(&db, "T", &config).expect("generate").test.is_none());
    }
}
