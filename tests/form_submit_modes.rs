mod test_support;

use serde_json::json;
use test_support::{request_err, request_ok, sample_student, spawn_sidecar};

#[test]
fn successful_create_clears_the_form_back_to_defaults() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "backend.select",
        json!({ "mode": "memory" }),
    );

    let submitted = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "form.submit",
        json!({ "fields": sample_student() }),
    );
    assert_eq!(submitted.get("created").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(
        submitted.pointer("/form/mode").and_then(|v| v.as_str()),
        Some("create")
    );
    assert_eq!(
        submitted.pointer("/form/fields/firstName").and_then(|v| v.as_str()),
        Some("")
    );

    // The roster was re-fetched as part of the save.
    let view = request_ok(&mut stdin, &mut reader, "3", "roster.view", json!({}));
    assert_eq!(view.pointer("/view/totalMatches").and_then(|v| v.as_u64()), Some(1));
}

#[test]
fn invalid_submit_keeps_the_entered_values_and_writes_nothing() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "backend.select",
        json!({ "mode": "memory" }),
    );

    let mut bad = sample_student();
    bad["phone"] = json!("12345");
    let error = request_err(
        &mut stdin,
        &mut reader,
        "2",
        "form.submit",
        json!({ "fields": bad }),
    );
    assert_eq!(
        error.get("code").and_then(|v| v.as_str()),
        Some("validation_failed")
    );
    assert_eq!(
        error.pointer("/details/phone").and_then(|v| v.as_str()),
        Some("Phone number must be exactly 10 digits")
    );

    // The bad phone number is still sitting in the form for correction.
    let form = request_ok(&mut stdin, &mut reader, "3", "form.state", json!({}));
    assert_eq!(
        form.pointer("/fields/phone").and_then(|v| v.as_str()),
        Some("12345")
    );

    let listed = request_ok(&mut stdin, &mut reader, "4", "students.list", json!({}));
    assert!(listed
        .get("students")
        .and_then(|v| v.as_array())
        .expect("students")
        .is_empty());
}

#[test]
fn edit_mode_updates_in_place_and_stays_populated() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "backend.select",
        json!({ "mode": "memory" }),
    );
    let created = request_ok(&mut stdin, &mut reader, "2", "students.create", sample_student());
    let student = created.get("student").expect("student").clone();
    let id = student.get("id").and_then(|v| v.as_str()).expect("id").to_string();

    let opened = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "form.open",
        json!({ "student": student }),
    );
    assert_eq!(opened.get("mode").and_then(|v| v.as_str()), Some("edit"));
    assert_eq!(
        opened.get("editingId").and_then(|v| v.as_str()),
        Some(id.as_str())
    );
    assert_eq!(
        opened.pointer("/fields/firstName").and_then(|v| v.as_str()),
        Some("John")
    );

    let mut changed = sample_student();
    changed["city"] = json!("Boston");
    let submitted = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "form.submit",
        json!({ "fields": changed }),
    );
    assert_eq!(submitted.get("created").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        submitted.pointer("/student/id").and_then(|v| v.as_str()),
        Some(id.as_str())
    );
    // Edit success leaves the form populated, still bound to the same id.
    assert_eq!(
        submitted.pointer("/form/fields/city").and_then(|v| v.as_str()),
        Some("Boston")
    );
    assert_eq!(
        submitted.pointer("/form/editingId").and_then(|v| v.as_str()),
        Some(id.as_str())
    );

    // No second record appeared.
    let listed = request_ok(&mut stdin, &mut reader, "5", "students.list", json!({}));
    let students = listed.get("students").and_then(|v| v.as_array()).expect("students");
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].get("city").and_then(|v| v.as_str()), Some("Boston"));
}

#[test]
fn a_store_failure_during_edit_preserves_the_form() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "backend.select",
        json!({ "mode": "memory" }),
    );

    let mut ghost = sample_student();
    ghost["id"] = json!("ghost-id");
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "form.open",
        json!({ "student": ghost }),
    );

    let error = request_err(
        &mut stdin,
        &mut reader,
        "3",
        "form.submit",
        json!({ "fields": sample_student() }),
    );
    assert_eq!(error.get("code").and_then(|v| v.as_str()), Some("not_found"));

    let form = request_ok(&mut stdin, &mut reader, "4", "form.state", json!({}));
    assert_eq!(form.get("mode").and_then(|v| v.as_str()), Some("edit"));
    assert_eq!(
        form.pointer("/fields/firstName").and_then(|v| v.as_str()),
        Some("John")
    );
}

#[test]
fn clear_resets_edit_mode_to_a_blank_create_form() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "backend.select",
        json!({ "mode": "memory" }),
    );
    let created = request_ok(&mut stdin, &mut reader, "2", "students.create", sample_student());
    let student = created.get("student").expect("student").clone();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "form.open",
        json!({ "student": student }),
    );

    let cleared = request_ok(&mut stdin, &mut reader, "4", "form.clear", json!({}));
    assert_eq!(cleared.get("mode").and_then(|v| v.as_str()), Some("create"));
    assert!(cleared.get("editingId").map(|v| v.is_null()).unwrap_or(false));
    assert_eq!(
        cleared.pointer("/fields/yearsOfStudy").and_then(|v| v.as_i64()),
        Some(1)
    );
}
