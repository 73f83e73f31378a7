use fieldmask::{Error, FieldMask, MaskMode};
use serde_json::json;

// ── from_markers ──────────────────────────────────────────────────

#[test]
fn uniform_ones_give_include_mask() {
    let mask = FieldMask::from_markers([("foo", 1), ("bar", 1)]).unwrap();
    assert_eq!(mask, FieldMask::include(["foo", "bar"]));
}

#[test]
fn uniform_zeros_give_exclude_mask() {
    let mask = FieldMask::from_markers([("foo", 0), ("bar", 0)]).unwrap();
    assert_eq!(mask, FieldMask::exclude(["foo", "bar"]));
}

#[test]
fn empty_markers_give_empty_include_mask() {
    // An empty marker map carries no mode; include is the documented default.
    let mask = FieldMask::from_markers(Vec::<(String, u8)>::new()).unwrap();
    assert_eq!(mask, FieldMask::new());
}

#[test]
fn mixed_markers_are_rejected() {
    let err = FieldMask::from_markers([("foo", 1), ("bar", 0)]).unwrap_err();
    assert_eq!(err, Error::MixedMarkers);
}

#[test]
fn non_binary_marker_is_rejected() {
    let err = FieldMask::from_markers([("foo", 2)]).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidMarker {
            field: "foo".to_owned(),
            value: "2".to_owned(),
        }
    );
}

#[test]
fn non_binary_marker_is_rejected_even_when_first() {
    assert!(FieldMask::from_markers([("foo", 7), ("bar", 1)]).is_err());
}

#[test]
fn markers_round_trip() {
    for mask in [
        FieldMask::include(["foo", "bar", "baz"]),
        FieldMask::exclude(["foo"]),
        FieldMask::new(),
    ] {
        assert_eq!(FieldMask::from_markers(mask.markers()).unwrap(), mask);
    }
}

#[test]
fn empty_exclude_mask_does_not_round_trip() {
    // Known asymmetry: the wire form of an empty exclude mask is the empty
    // map, which reads back as an empty include mask.
    let mask = FieldMask::with_mode(MaskMode::Exclude);
    let back = FieldMask::from_markers(mask.markers()).unwrap();
    assert_eq!(back.mode(), MaskMode::Include);
}

// ── FromIterator ──────────────────────────────────────────────────

#[test]
fn collecting_names_gives_include_mask() {
    let mask: FieldMask = ["foo", "bar", "baz"].into_iter().collect();
    assert_eq!(mask, FieldMask::include(["foo", "bar", "baz"]));
}

// ── TryFrom<serde_json::Value> ────────────────────────────────────

#[test]
fn json_array_gives_include_mask() {
    let mask = FieldMask::try_from(json!(["foo", "bar", "baz"])).unwrap();
    assert_eq!(mask.mode(), MaskMode::Include);
    assert!(mask.includes("foo"));
    assert!(mask.includes("bar"));
    assert!(mask.includes("baz"));
}

#[test]
fn empty_json_array_gives_empty_include_mask() {
    let mask = FieldMask::try_from(json!([])).unwrap();
    assert_eq!(mask, FieldMask::new());
}

#[test]
fn json_object_of_ones_gives_include_mask() {
    let mask = FieldMask::try_from(json!({"foo": 1})).unwrap();
    assert_eq!(mask.mode(), MaskMode::Include);
}

#[test]
fn json_object_of_zeros_gives_exclude_mask() {
    let mask = FieldMask::try_from(json!({"foo": 0})).unwrap();
    assert_eq!(mask.mode(), MaskMode::Exclude);
}

#[test]
fn json_booleans_work_as_markers() {
    let mask = FieldMask::try_from(json!({"foo": true, "bar": true})).unwrap();
    assert_eq!(mask, FieldMask::include(["foo", "bar"]));

    let mask = FieldMask::try_from(json!({"foo": false})).unwrap();
    assert_eq!(mask, FieldMask::exclude(["foo"]));
}

#[test]
fn empty_json_object_gives_empty_include_mask() {
    let mask = FieldMask::try_from(json!({})).unwrap();
    assert_eq!(mask, FieldMask::new());
}

#[test]
fn json_object_with_mixed_markers_is_rejected() {
    let err = FieldMask::try_from(json!({"foo": 1, "bar": 0})).unwrap_err();
    assert_eq!(err, Error::MixedMarkers);
}

#[test]
fn json_object_with_non_binary_marker_is_rejected() {
    let err = FieldMask::try_from(json!({"foo": 5})).unwrap_err();
    assert!(matches!(err, Error::InvalidMarker { .. }));
}

#[test]
fn json_object_with_string_marker_is_rejected() {
    let err = FieldMask::try_from(json!({"foo": "yes"})).unwrap_err();
    assert!(matches!(err, Error::InvalidMarker { .. }));
}

#[test]
fn json_array_of_non_strings_is_rejected() {
    let err = FieldMask::try_from(json!(["foo", 1])).unwrap_err();
    assert!(matches!(err, Error::UnsupportedValue { .. }));
}

#[test]
fn json_scalars_are_rejected() {
    for value in [json!(null), json!(true), json!(3), json!("foo")] {
        assert!(matches!(
            FieldMask::try_from(value),
            Err(Error::UnsupportedValue { .. })
        ));
    }
}

#[test]
fn try_from_borrows_too() {
    let value = json!({"foo": 1});
    let mask = FieldMask::try_from(&value).unwrap();
    assert!(mask.includes("foo"));
}

// ── serde ─────────────────────────────────────────────────────────

#[test]
fn serializes_as_marker_map() {
    let json = serde_json::to_value(FieldMask::include(["foo", "bar"])).unwrap();
    assert_eq!(json, json!({"bar": 1, "foo": 1}));

    let json = serde_json::to_value(FieldMask::exclude(["foo"])).unwrap();
    assert_eq!(json, json!({"foo": 0}));
}

#[test]
fn deserializes_from_name_sequence() {
    let mask: FieldMask = serde_json::from_str(r#"["foo", "bar"]"#).unwrap();
    assert_eq!(mask, FieldMask::include(["foo", "bar"]));
}

#[test]
fn deserializes_from_marker_map() {
    let mask: FieldMask = serde_json::from_str(r#"{"foo": 0, "bar": 0}"#).unwrap();
    assert_eq!(mask, FieldMask::exclude(["foo", "bar"]));
}

#[test]
fn deserializing_mixed_markers_fails() {
    let result: Result<FieldMask, _> = serde_json::from_str(r#"{"foo": 1, "bar": 0}"#);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("invalid field mask input"));
}

#[test]
fn serde_round_trip() {
    for mask in [
        FieldMask::include(["foo", "bar"]),
        FieldMask::exclude(["baz"]),
        FieldMask::new(),
    ] {
        let encoded = serde_json::to_string(&mask).unwrap();
        let decoded: FieldMask = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, mask);
    }
}

#[test]
fn mask_embeds_in_larger_types() {
    #[derive(serde::Deserialize)]
    struct Query {
        fields: FieldMask,
    }

    let query: Query = serde_json::from_str(r#"{"fields": {"secret": 0}}"#).unwrap();
    assert!(query.fields.excludes("secret"));
    assert!(query.fields.includes("public"));
}

// ── Error display ─────────────────────────────────────────────────

#[test]
fn error_messages_name_the_invalid_input() {
    assert_eq!(
        Error::MixedMarkers.to_string(),
        "invalid field mask input: mixed include and exclude markers"
    );

    let err = FieldMask::from_markers([("foo", 9)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid field mask input: marker for field `foo` must be 0 or 1, got 9"
    );

    let err = FieldMask::try_from(json!(null)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid field mask input: expected a sequence of field names or a marker object, got null"
    );
}
