use formbuilder_model::{DerivedFieldConfig, Field, FieldId, FieldType, FieldValue, FormSchema};
use pretty_assertions::assert_eq;

const SAVED_FORM: &str = r#"{
  "id": "form-1",
  "name": "Signup",
  "createdAt": "2024-05-01T10:00:00Z",
  "fields": [
    { "id": "dob", "type": "date", "label": "Date of birth", "defaultValue": "1990-06-15",
      "validations": { "required": true } },
    { "id": "age", "type": "number", "label": "Age",
      "derived": { "parents": ["dob"], "formula": "calculateAge()" } },
    { "id": "langs", "type": "checkbox", "label": "Languages",
      "options": ["Rust", "Go"], "defaultValue": ["Rust"] },
    { "id": "email", "type": "text", "label": "Email",
      "validations": { "email": true, "minLength": 3 } }
  ]
}"#;

#[test]
fn saved_form_json_deserializes_into_model() {
    let form: FormSchema = serde_json::from_str(SAVED_FORM).unwrap();

    assert_eq!(form.name, "Signup");
    assert_eq!(form.fields.len(), 4);

    let dob = &form.fields[0];
    assert_eq!(dob.field_type, FieldType::Date);
    assert_eq!(dob.default_value, Some(FieldValue::from("1990-06-15")));
    assert!(dob.validations.is_required());

    let age = &form.fields[1];
    assert_eq!(
        age.derived,
        Some(DerivedFieldConfig::new(
            vec![FieldId::from("dob")],
            "calculateAge()"
        ))
    );
    assert_eq!(age.default_value, None);

    let langs = &form.fields[2];
    assert_eq!(
        langs.default_value,
        Some(FieldValue::List(vec!["Rust".to_string()]))
    );

    assert_eq!(form.fields[3].validations.min_length, Some(3));
}

#[test]
fn serialization_omits_absent_members() {
    let form: FormSchema = serde_json::from_str(SAVED_FORM).unwrap();
    let json = serde_json::to_value(&form.fields[3]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "email",
            "type": "text",
            "label": "Email",
            "validations": { "email": true, "minLength": 3 }
        })
    );

    let again: FormSchema =
        serde_json::from_str(&serde_json::to_string(&form).unwrap()).unwrap();
    assert_eq!(again, form);
}

#[test]
fn new_schemas_get_distinct_ids() {
    let fields = vec![Field::with_id("name", FieldType::Text, "Name")];
    let first = FormSchema::new("Signup", fields.clone());
    let second = FormSchema::new("Signup", fields);
    assert_eq!(first.name, "Signup");
    assert_eq!(first.fields.len(), 1);
    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);
}
