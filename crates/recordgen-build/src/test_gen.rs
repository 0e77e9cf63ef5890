//! Accessor round-trip tests for generated records.

use crate::model::{ClassKind, ClassModel, FieldVar, Method, Param};
use recordgen_config::DateMode;
use recordgen_schema::types::SemanticType;

///
/// TestValue
///
/// The literal a generated test pushes through a setter and reads back.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TestValue {
    Text,
    Bool,
    Int,
    Long,
    Float,
    Double,
    Date(DateMode),
    Enum { type_name: String, literal: String },

    /// Binary columns have no literal; their test method is left empty.
    Empty,
}

impl TestValue {
    /// Test value for a column.
    #[must_use]
    pub fn for_column(
        ty: SemanticType,
        enum_literal: Option<(&str, &str)>,
        mode: DateMode,
    ) -> Self {
        if let Some((type_name, literal)) = enum_literal {
            return Self::Enum {
                type_name: type_name.to_string(),
                literal: literal.to_string(),
            };
        }

        match ty {
            SemanticType::Text | SemanticType::Clob => Self::Text,
            SemanticType::Boolean => Self::Bool,
            SemanticType::Integer => Self::Int,
            SemanticType::Long => Self::Long,
            SemanticType::Float => Self::Float,
            SemanticType::Double => Self::Double,
            SemanticType::Date | SemanticType::Timestamp | SemanticType::Time => Self::Date(mode),
            SemanticType::Blob => Self::Empty,
        }
    }
}

///
/// AccessorTest
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessorTest {
    pub method: Method,
    pub imports: Vec<&'static str>,
}

/// One setter-then-getter round trip for `var`.
#[must_use]
pub fn accessor_test(var: &FieldVar, value: &TestValue, legacy: bool) -> AccessorTest {
    let setter = var.setter_name();
    let getter = var.getter_name();
    let mut imports = Vec::new();

    let simple = |ty: &str, literal: &str, assertion: &str| {
        [
            format!("{ty} testData = {literal};"),
            format!("testRecord.{setter}(testData);"),
            format!("{ty} recordData = testRecord.{getter}();"),
            assertion.to_string(),
        ]
        .join("\n")
    };

    let body = match value {
        TestValue::Text => simple("String", "\"abc\"", "assertEquals(testData, recordData);"),
        TestValue::Bool => simple("boolean", "false", "assertEquals(testData, recordData);"),
        TestValue::Int => simple("int", "123", "assertEquals(testData, recordData);"),
        TestValue::Long => simple("long", "123L", "assertEquals(testData, recordData);"),
        TestValue::Float => simple("float", "123.56f", "assertEquals(testData, recordData, 0);"),
        TestValue::Double => simple("double", "123.56", "assertEquals(testData, recordData, 0);"),
        TestValue::Enum { type_name, literal } => simple(
            type_name.as_str(),
            &format!("{type_name}.{literal}"),
            "assertEquals(testData, recordData);",
        ),
        TestValue::Date(DateMode::Legacy) => {
            imports.extend(["java.util.Calendar", "java.util.Date"]);
            [
                "Calendar testData = Calendar.getInstance();".to_string(),
                "int testYear = 1980;".to_string(),
                "int testMonth = 2;".to_string(),
                "int testDay = 1;".to_string(),
                "testData.set(1980, 2, 1);".to_string(),
                format!("testRecord.{setter}(testData.getTime());"),
                format!("Date recordDataDate = testRecord.{getter}();"),
                "Calendar recordData = Calendar.getInstance();".to_string(),
                "recordData.setTime(recordDataDate);".to_string(),
                "int year = recordData.get(Calendar.YEAR);".to_string(),
                "int month = recordData.get(Calendar.MONTH);".to_string(),
                "int day = recordData.get(Calendar.DATE);".to_string(),
                "assertEquals(testYear, year);".to_string(),
                "assertEquals(testMonth, month);".to_string(),
                "assertEquals(testDay, day);".to_string(),
            ]
            .join("\n")
        }
        TestValue::Date(DateMode::DateTime) => [
            "org.joda.time.DateTime testData = new org.joda.time.DateTime(1980, 3, 1, 0, 0);"
                .to_string(),
            format!("testRecord.{setter}(testData);"),
            format!("org.joda.time.DateTime recordData = testRecord.{getter}();"),
            "assertEquals(1980, recordData.getYear());".to_string(),
            "assertEquals(3, recordData.getMonthOfYear());".to_string(),
            "assertEquals(1, recordData.getDayOfMonth());".to_string(),
        ]
        .join("\n"),
        TestValue::Empty => String::new(),
    };

    let name = format!("test{}", crate::naming::capitalize(&var.name));
    let mut method = Method::new(name, "void", body);
    if !legacy {
        method = method.with_annotation("Test");
    }

    AccessorTest { method, imports }
}

/// The `<Record>Test` class wrapping every accessor test.
#[must_use]
pub fn test_class(record: &ClassModel, tests: Vec<AccessorTest>, legacy: bool) -> ClassModel {
    let name = format!("{}Test", record.name);
    let mut class =
        ClassModel::new(&name, &record.package, ClassKind::Test).with_generated_header();
    class.imports.insert("org.junit.*".to_string());
    class.imports.insert("static org.junit.Assert.*".to_string());

    if legacy {
        class.imports.insert("junit.framework.TestCase".to_string());
        class.extends = Some("TestCase".to_string());
        class.methods.push(Method::constructor(
            &name,
            vec![Param::new("String", "testName")],
            "super(testName);",
        ));
    }

    class.fields.push(FieldVar::new("testRecord", &record.name));

    let annotate = |method: Method, annotation: &str| {
        if legacy {
            method
        } else {
            method.with_annotation(annotation)
        }
    };

    class.methods.push(annotate(
        Method::new(
            "setUp",
            "void",
            format!("testRecord = new {}();\nassertNotNull(testRecord);", record.name),
        ),
        "Before",
    ));
    class.methods.push(annotate(Method::new("tearDown", "void", ""), "After"));

    for test in tests {
        class.imports.extend(test.imports.iter().map(|i| (*i).to_string()));
        class.methods.push(test.method);
    }

    class.methods.push(annotate(
        Method::new("testToString", "void", "assertNotNull(testRecord.toString());"),
        "Test",
    ));

    class
}

///
/// TESTS
///
