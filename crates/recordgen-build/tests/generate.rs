use recordgen_build::{
    BuildError, generate, model::ClassKind, record::RecordGenerator, relation::InboundIndex,
};
use recordgen_config::GenConfig;
use recordgen_core::{
    Strictness,
    bag::PropertyBag,
    cursor::MemoryCursor,
    value::FieldValue,
};
use recordgen_schema::{
    ddl::SqliteDdlRenderer,
    mapping::SqliteTypeMapping,
    prelude::*,
};
use time::macros::datetime;

fn person() -> Table {
    Table::new("PERSON")
        .with_field(
            Field::new("ID", SemanticType::Integer)
                .primary_key()
                .auto_increment(),
        )
        .with_field(Field::new("FIRST_NAME", SemanticType::Text))
        .with_field(Field::new("BIRTH_DATE", SemanticType::Date).nullable())
}

fn status() -> Table {
    Table::new("STATUS")
        .with_field(Field::new("ID", SemanticType::Integer).primary_key())
        .with_field(Field::new("CODE", SemanticType::Text))
        .with_enums(vec![
            EnumLiteral::new("ACTIVE", "A"),
            EnumLiteral::new("INACTIVE", "I"),
        ])
}

fn meal() -> Table {
    Table::new("MEAL").with_field(Field::new("ID", SemanticType::Long).primary_key())
}

fn food(keys: impl IntoIterator<Item = Field>) -> Table {
    keys.into_iter().fold(
        Table::new("FOOD").with_field(Field::new("ID", SemanticType::Long).primary_key()),
        Table::with_field,
    )
}

fn meal_key(name: &str, kind: ForeignKeyType) -> Field {
    Field::new(name, SemanticType::Long).foreign_key(kind, "MEAL")
}

fn meals() -> Database {
    Database::new("main", "com.example")
        .with_table(meal())
        .with_table(food([meal_key("MEAL_ID", ForeignKeyType::OneToMany)]))
}

fn names<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut names = items.into_iter().collect::<Vec<_>>();
    names.sort_unstable();
    names
}

#[test]
fn person_record_has_constants_fields_and_marshalling() {
    let db = Database::new("main", "com.example").with_table(person());

    let generated = generate(&db, &GenConfig::default()).expect("generate");
    assert_eq!(generated.len(), 1);
    let record = &generated[0].record;

    assert_eq!(record.name, "PersonBaseRecord");
    assert_eq!(record.package, "com.example.person");
    assert_eq!(record.kind, ClassKind::Record);
    assert_eq!(record.extends.as_deref(), Some("BaseRecord"));
    assert!(record.imports.contains("com.example.BaseRecord"));

    for name in ["C_ID", "C_FIRST_NAME", "C_BIRTH_DATE"] {
        assert!(record.constant(name).is_some(), "missing {name}");
    }
    assert_eq!(
        record.constant("C_FIRST_NAME").and_then(|c| c.as_text()),
        Some("FIRST_NAME")
    );
    assert_eq!(
        record.constant("FULL_C_FIRST_NAME").and_then(|c| c.as_text()),
        Some("PERSON.FIRST_NAME")
    );
    assert_eq!(record.constant("PRIMARY_KEY_COLUMN").and_then(|c| c.as_text()), Some("ID"));

    let names: Vec<&str> = record.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "firstName", "birthDate"]);

    // the auto-increment key is assigned by the backend
    let values = record.method("getContentValues").expect("getContentValues");
    assert_eq!(values.lines().filter(|l| l.contains("values.put(")).count(), 2);

    let from_cursor = record
        .method_with_param("setContent", "Cursor")
        .expect("cursor reader");
    assert!(from_cursor.body.contains("id = cursor.getInt(cursor.getColumnIndex(C_ID));"));
    assert!(record.method("isNewRecord").is_some());

    let create = record
        .constant("CREATE_TABLE")
        .and_then(|c| c.as_text())
        .expect("create");
    assert!(create.starts_with("CREATE TABLE PERSON ("), "got: {create}");
}

#[test]
fn person_test_stub_covers_each_accessor() {
    let db = Database::new("main", "com.example").with_table(person());

    let generated = generate(&db, &GenConfig::default()).expect("generate");
    let test = generated[0].test.as_ref().expect("test class");

    assert_eq!(test.name, "PersonBaseRecordTest");
    for name in [
        "setUp",
        "tearDown",
        "testId",
        "testFirstName",
        "testBirthDate",
        "testToString",
    ] {
        assert!(test.method(name).is_some(), "missing {name}");
    }
    assert!(test.imports.contains("java.util.Calendar"));
}

#[test]
fn enumeration_table_builds_lookup_and_is_shared() {
    let db = Database::new("main", "com.example").with_table(status()).with_table(
        Table::new("ACCOUNT")
            .with_field(Field::new("ID", SemanticType::Long).primary_key())
            .with_field(
                Field::new("STATUS_ID", SemanticType::Integer).shared_enumeration("STATUS"),
            ),
    );

    let generated = generate(&db, &GenConfig::default()).expect("generate");

    let status = &generated[0];
    assert_eq!(status.record.kind, ClassKind::Enum);
    assert_eq!(status.record.literals, vec!["ACTIVE", "INACTIVE"]);
    assert!(status.test.is_none());
    let lookup = status.record.lookup.as_ref().expect("lookup");
    assert_eq!(lookup.get("ACTIVE"), Some("A"));
    assert_eq!(lookup.get("INACTIVE"), Some("I"));
    assert_eq!(lookup.list, vec!["A", "I"]);

    let text = |name: &str| status.record.constant(name).and_then(|c| c.as_text());
    assert_eq!(text("DATABASE"), Some("main"));
    assert_eq!(text("TABLE"), Some("STATUS"));
    assert_eq!(text("FULL_TABLE"), Some("main.STATUS"));
    assert_eq!(text("DROP_TABLE"), Some("DROP TABLE IF EXISTS STATUS;"));
    let create = text("CREATE_TABLE").expect("create");
    assert!(create.starts_with("CREATE TABLE STATUS (\n\tID "), "got: {create}");
    assert!(create.contains("\tCODE "), "got: {create}");

    let account = &generated[1].record;
    assert!(account.imports.contains("com.example.status.Status"));
    assert!(account.enums.is_empty());
    let field = account.field("statusId").expect("statusId");
    assert_eq!(field.ty, "Status");
    assert_eq!(field.default_value.as_deref(), Some("Status.ACTIVE"));
}

#[test]
fn duplicate_primary_key_is_fatal() {
    let db = Database::new("main", "p").with_table(
        Table::new("DUP")
            .with_field(Field::new("A", SemanticType::Long).primary_key())
            .with_field(Field::new("B", SemanticType::Long).primary_key()),
    );
    let config = GenConfig::default();
    let index = InboundIndex::build(&db);
    let generator =
        RecordGenerator::new(&db, &config, &SqliteTypeMapping, &SqliteDdlRenderer, &index);

    let err = generator
        .generate_table(db.table("DUP").expect("table"))
        .expect_err("second key");

    assert!(matches!(
        err,
        BuildError::DuplicatePrimaryKey { ref table, ref field } if table == "DUP" && field == "B"
    ));
}

#[test]
fn one_to_many_wires_both_sides() {
    let generated = generate(&meals(), &GenConfig::default()).expect("generate");

    let meal = &generated[0].record;
    assert!(meal.field("foodItems").is_some());
    assert!(meal.field("foodItemsToDelete").is_some());
    for name in ["getFoodItems", "addFood", "deleteFood", "cleanupOrphans"] {
        assert!(meal.method(name).is_some(), "missing {name}");
    }
    assert!(meal.imports.contains("com.example.food.*"));
    let cleanup = meal.method("cleanupOrphans").expect("cleanup");
    assert!(cleanup.body.contains("catch (RuntimeException e)"));
    assert!(cleanup.body.ends_with("foodItemsToDelete.clear();"));

    let food = &generated[1].record;
    let back_ref = food.field("meal").expect("back reference");
    assert!(back_ref.requires_wiring);
    assert!(food.constant("C_MEAL_ID").is_none());
    assert!(food.method("cleanupOrphans").is_none());
}

#[test]
fn explicit_var_name_drives_the_back_reference_setter() {
    let db = Database::new("main", "com.example")
        .with_table(meal())
        .with_table(food([meal_key("MEAL_ID", ForeignKeyType::OneToMany).var_name("dinner")]));

    let generated = generate(&db, &GenConfig::default()).expect("generate");

    let add = generated[0].record.method("addFood").expect("addFood");
    assert!(
        add.body.starts_with("food.setDinner((Meal) this);"),
        "got: {}",
        add.body
    );

    let food = &generated[1].record;
    let dinner = food.field("dinner").expect("dinner");
    assert!(dinner.requires_wiring && dinner.accessors);
    assert_eq!(dinner.setter_name(), "setDinner");
    assert!(food.field("meal").is_none());
}

#[test]
fn repeated_one_to_many_keys_keep_members_apart() {
    let db = Database::new("main", "com.example")
        .with_table(meal())
        .with_table(food([
            meal_key("LUNCH_ID", ForeignKeyType::OneToMany),
            meal_key("SUPPER_ID", ForeignKeyType::OneToMany),
        ]));

    let generated = generate(&db, &GenConfig::default()).expect("generate");

    let meal = &generated[0].record;
    let fields = names(meal.fields.iter().map(|f| f.name.as_str()));
    assert_eq!(
        fields,
        vec![
            "foodItemsAsLunch",
            "foodItemsAsLunchToDelete",
            "foodItemsAsSupper",
            "foodItemsAsSupperToDelete",
            "id",
        ]
    );
    let methods = names(
        meal.methods
            .iter()
            .map(|m| m.name.as_str())
            .filter(|name| name.contains("Food")),
    );
    assert_eq!(
        methods,
        vec![
            "addFoodAsLunch",
            "addFoodAsSupper",
            "deleteFoodAsLunch",
            "deleteFoodAsSupper",
            "getFoodItemsAsLunch",
            "getFoodItemsAsSupper",
        ]
    );
    let add = meal.method("addFoodAsSupper").expect("addFoodAsSupper");
    assert!(add.body.starts_with("food.setSupper((Meal) this);"));

    let food = &generated[1].record;
    assert!(food.field("lunch").is_some());
    assert!(food.field("supper").is_some());
}

#[test]
fn repeated_many_to_one_keys_keep_fields_apart() {
    let db = Database::new("main", "com.example")
        .with_table(meal())
        .with_table(food([
            meal_key("FIRST_MEAL_ID", ForeignKeyType::ManyToOne),
            meal_key("LAST_MEAL_ID", ForeignKeyType::ManyToOne),
        ]));

    let generated = generate(&db, &GenConfig::default()).expect("generate");

    let food = &generated[1].record;
    let fields = names(food.fields.iter().map(|f| f.name.as_str()));
    assert_eq!(fields, vec!["firstMeal", "id", "lastMeal"]);
    let accessors = food
        .fields
        .iter()
        .filter(|f| f.requires_wiring)
        .map(|f| (f.getter_name(), f.setter_name()))
        .collect::<Vec<_>>();
    assert_eq!(
        accessors,
        vec![
            ("getFirstMeal".to_string(), "setFirstMeal".to_string()),
            ("getLastMeal".to_string(), "setLastMeal".to_string()),
        ]
    );
}

#[test]
fn clashing_relationship_names_are_reported() {
    let db = Database::new("main", "com.example")
        .with_table(meal())
        .with_table(food([
            meal_key("LUNCH_ID", ForeignKeyType::ManyToOne).var_name("meal"),
            meal_key("SUPPER_ID", ForeignKeyType::ManyToOne).var_name("meal"),
        ]));

    let err = generate(&db, &GenConfig::default()).expect_err("clash");

    let BuildError::Validation(tree) = &err else {
        panic!("expected validation error, got {err}");
    };
    assert_eq!(
        tree.flatten(),
        vec![(
            "FOOD".to_string(),
            "field 'SUPPER_ID' generates variable 'meal', already used by 'LUNCH_ID'; set var_name"
                .to_string(),
        )]
    );
}

#[test]
fn ignored_fields_stay_in_the_table_only() {
    let db = Database::new("main", "com.example").with_table(
        person().with_field(
            Field::new("LEGACY_CODE", SemanticType::Text).foreign_key(ForeignKeyType::Ignore, ""),
        ),
    );

    let generated = generate(&db, &GenConfig::default()).expect("generate");
    let record = &generated[0].record;

    assert!(record.field("legacyCode").is_none());
    assert!(record.constant("C_LEGACY_CODE").is_none());
    assert!(record.constant("FULL_C_LEGACY_CODE").is_none());
    assert!(generated[0].test.as_ref().is_some_and(|t| t.method("testLegacyCode").is_none()));

    let create = record
        .constant("CREATE_TABLE")
        .and_then(|c| c.as_text())
        .expect("create");
    assert!(create.contains("\tLEGACY_CODE TEXT"), "got: {create}");
}

#[test]
fn strict_orphan_cleanup_propagates_failures() {
    let mut config = GenConfig::default();
    config.strictness.orphan_cleanup = Strictness::Strict;

    let generated = generate(&meals(), &config).expect("generate");
    let cleanup = generated[0].record.method("cleanupOrphans").expect("cleanup");

    assert!(!cleanup.body.contains("catch"));
}

#[test]
fn strict_unmapped_types_stop_generation() {
    let db = Database::new("main", "p").with_table(
        Table::new("FILE")
            .with_field(Field::new("ID", SemanticType::Long).primary_key())
            .with_field(Field::new("DATA", SemanticType::Blob)),
    );
    let mut config = GenConfig::default();
    config.strictness.unmapped_types = Strictness::Strict;

    let lenient = generate(&db, &GenConfig::default()).expect("lenient");
    let test = lenient[0].test.as_ref().expect("test class");
    assert!(test.method("testData").is_some_and(|m| m.body.is_empty()));

    let err = generate(&db, &config).expect_err("strict");
    assert_eq!(err.to_string(), "table 'FILE' field 'DATA': no marshalling for type Blob");
}

#[test]
fn field_codecs_round_trip_through_bag_and_cursor() {
    let db = Database::new("main", "com.example").with_table(
        person()
            .with_field(Field::new("ACTIVE", SemanticType::Boolean))
            .with_field(
                Field::new("COLOR", SemanticType::Integer).enumeration(["RED", "GREEN", "BLUE"]),
            )
            .with_field(Field::new("SEEN_AT", SemanticType::Timestamp).nullable()),
    );
    let generated = generate(&db, &GenConfig::default()).expect("generate");
    let record = &generated[0].record;

    let color = record.nested_enum("Color").expect("nested enum");
    assert_eq!(color.literals, vec!["RED", "GREEN", "BLUE"]);

    let cases = [
        ("firstName", "FIRST_NAME", FieldValue::Text("Ada".to_string())),
        (
            "birthDate",
            "BIRTH_DATE",
            FieldValue::DateTime(datetime!(1980-03-01 12:30:05)),
        ),
        ("active", "ACTIVE", FieldValue::Bool(true)),
        ("color", "COLOR", FieldValue::Ordinal(2)),
        (
            "seenAt",
            "SEEN_AT",
            FieldValue::DateTime(datetime!(2024-01-02 03:04:05.250)),
        ),
        ("seenAt", "SEEN_AT", FieldValue::Null),
    ];

    for (var, column, value) in cases {
        let codec = record.field(var).and_then(|f| f.codec).expect("codec");

        let mut bag = PropertyBag::default();
        bag.put(column, codec.encode(&value).expect("encode"));
        assert_eq!(codec.decode_bag(&bag, column).expect("bag"), value, "{var} via bag");

        let cursor = MemoryCursor::from_bag(&bag);
        assert_eq!(
            codec.decode_cursor(&cursor, column).expect("cursor"),
            value,
            "{var} via cursor"
        );
    }
}

#[test]
fn schema_loaded_from_toml_generates() {
    let source = r#"
name = "main"
package = "com.example"

[[table]]
name = "PERSON"

[[table.fields]]
name = "ID"
type = "integer"
primary_key = true
auto_increment = true

[[table.fields]]
name = "FIRST_NAME"
type = "text"
"#;

    let db = Database::from_toml_str(source).expect("parse");
    let generated = generate(&db, &GenConfig::default()).expect("generate");

    assert_eq!(generated[0].record.name, "PersonBaseRecord");
}
