// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
#[cfg(test)]
use indexmap::IndexMap;
#[cfg(test)]
use pretty_assertions::assert_eq;
#[cfg(test)]
use tempfile::TempDir;

const UNITS: &str = r#"
"DOTAUnits"
{
    "Version"   "1"
    "npc_dota_creep"
    {
        "Model"             "models/creeps/lane_creeps/creep_radiant_melee.vmdl"
        "StatusHealth"      "550"
        "MovementSpeed"     "325"
        "AttackRate"        "1.0"
        "IsAncient"         "0"
        "HasInventory"      "true"
        "AttackCapabilities" "DOTA_UNIT_CAP_MELEE_ATTACK"
        "Ability"           "creep_siege"
        "Ability"           "creep_piercing"
    }
}
"#;

#[test]
fn test_keyvalues_from_string() {
    let kv = KeyValues::from_str(UNITS).expect("Failed to parse units");

    let model: String = kv.get("DOTAUnits.npc_dota_creep.Model").expect("Failed to get model");
    assert_eq!(model, "models/creeps/lane_creeps/creep_radiant_melee.vmdl");

    let health: u32 = kv.get("DOTAUnits.npc_dota_creep.StatusHealth").unwrap();
    assert_eq!(health, 550);

    let rate: f32 = kv.get("DOTAUnits.npc_dota_creep.AttackRate").unwrap();
    assert_eq!(rate, 1.0);

    let ancient: bool = kv.get("DOTAUnits.npc_dota_creep.IsAncient").unwrap();
    assert!(!ancient);

    let inventory: bool = kv.get("DOTAUnits.npc_dota_creep.HasInventory").unwrap();
    assert!(inventory);

    assert!(kv.source_path().is_none());
}

#[test]
fn test_case_insensitive_lookup() {
    let kv = KeyValues::from_str(UNITS).unwrap();

    let speed: u16 = kv.get("dotaunits.NPC_DOTA_CREEP.movementspeed").unwrap();
    assert_eq!(speed, 325);
}

#[test]
fn test_exact_match_preferred() {
    let kv = KeyValues::from_str(r#""root" { "key" "lower" "KEY" "upper" }"#).unwrap();

    assert_eq!(kv.get::<String>("root.KEY").unwrap(), "upper");
    assert_eq!(kv.get::<String>("root.key").unwrap(), "lower");
    assert_eq!(kv.get::<String>("root.Key").unwrap(), "lower");
}

#[test]
fn test_duplicate_keys_as_vec() {
    let kv = KeyValues::from_str(UNITS).unwrap();

    let abilities: Vec<String> = kv.get("DOTAUnits.npc_dota_creep.Ability").unwrap();
    assert_eq!(abilities, vec!["creep_siege", "creep_piercing"]);

    let second: String = kv.get("DOTAUnits.npc_dota_creep.Ability.1").unwrap();
    assert_eq!(second, "creep_piercing");

    let single: Vec<String> = kv.get("DOTAUnits.Version").unwrap();
    assert_eq!(single, vec!["1"]);

    assert!(!kv.has("DOTAUnits.npc_dota_creep.Ability.2"));
}

#[test]
fn test_merged_options() {
    let input = r#""root" { "block" { "a" "1" } "block" { "b" "2" } }"#;

    let collected = KeyValues::from_str(input).unwrap();
    assert!(!collected.has("root.block.a"));
    assert!(collected.has("root.block.0.a"));

    let merged = KeyValues::from_str_with_options(input, ParseOptions::new().merge_duplicates(true)).unwrap();
    assert_eq!(merged.get_keys("root.block").unwrap(), vec!["a", "b"]);
}

#[test]
fn test_get_keys_preserves_order() {
    let kv = KeyValues::from_str(r#""first" { "zeta" "1" "alpha" "2" "mid" "3" } "second" "x""#).unwrap();

    assert_eq!(kv.get_keys("first").unwrap(), vec!["zeta", "alpha", "mid"]);
    assert_eq!(kv.get_keys("").unwrap(), vec!["first", "second"]);

    let err = kv.get_keys("second").unwrap_err();
    assert!(matches!(err, KvError::TypeError { code: Some(408), .. }));
}

#[test]
fn test_path_not_found() {
    let kv = KeyValues::from_str(UNITS).unwrap();

    let err = kv.get_value("DOTAUnits.npc_dota_hero").unwrap_err();
    assert_eq!(
        err,
        KvError::PathNotFound {
            path: "DOTAUnits.npc_dota_hero".into(),
            hint: Some("'DOTAUnits' has no child named 'npc_dota_hero'".into()),
            code: Some(401),
        }
    );

    let err = kv.get_value("Missing").unwrap_err();
    assert!(matches!(err, KvError::PathNotFound { .. }));

    // Strings have no children.
    assert!(!kv.has("DOTAUnits.Version.inner"));
}

#[test]
fn test_get_optional_and_default() {
    let kv = KeyValues::from_str(UNITS).unwrap();

    assert_eq!(kv.get_optional::<u32>("DOTAUnits.npc_dota_creep.StatusHealth").unwrap(), Some(550));
    assert_eq!(kv.get_optional::<u32>("DOTAUnits.npc_dota_creep.StatusMana").unwrap(), None);
    assert!(kv.get_optional::<u32>("DOTAUnits.npc_dota_creep.Model").is_err());

    assert_eq!(kv.get_or("DOTAUnits.npc_dota_creep.ArmorPhysical", 2i32), 2);
    assert_eq!(kv.get_or("DOTAUnits.npc_dota_creep.MovementSpeed", 0u64), 325);
}

#[test]
fn test_type_error_names_path() {
    let kv = KeyValues::from_str(UNITS).unwrap();

    let err = kv.get::<u8>("DOTAUnits.npc_dota_creep.StatusHealth").unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::Access);
    match err {
        KvError::TypeError { message, code, .. } => {
            assert!(message.contains("u8"));
            assert!(message.contains("DOTAUnits.npc_dota_creep.StatusHealth"));
            assert_eq!(code, Some(404));
        }
        other => panic!("Expected TypeError, got {:?}", other),
    }
}

#[test]
fn test_string_enum_validation() {
    let kv = KeyValues::from_str(UNITS).unwrap();

    let caps = kv.get_string_enum(
        "DOTAUnits.npc_dota_creep.AttackCapabilities",
        &["dota_unit_cap_melee_attack", "DOTA_UNIT_CAP_RANGED_ATTACK"],
    );
    assert_eq!(caps.unwrap(), "DOTA_UNIT_CAP_MELEE_ATTACK");

    let invalid = kv.get_string_enum("DOTAUnits.npc_dota_creep.AttackCapabilities", &["none"]);
    assert!(matches!(invalid, Err(KvError::ValidationError { code: Some(451), .. })));
}

#[test]
fn test_get_validated() {
    let kv = KeyValues::from_str(UNITS).unwrap();

    let speed: u32 = kv
        .get_validated("DOTAUnits.npc_dota_creep.MovementSpeed", |s: &u32| *s <= 550, "0-550")
        .unwrap();
    assert_eq!(speed, 325);

    let err = kv
        .get_validated("DOTAUnits.npc_dota_creep.StatusHealth", |h: &u32| *h < 100, "below 100")
        .unwrap_err();
    assert!(matches!(err, KvError::ValidationError { code: Some(450), .. }));
}

#[test]
fn test_keyvalues_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("units.txt");
    std::fs::write(&path, UNITS).unwrap();

    let kv = KeyValues::from_file(&path).expect("Failed to load file");
    assert_eq!(kv.source_path(), Some(path.as_path()));
    assert_eq!(kv.get::<String>("DOTAUnits.Version").unwrap(), "1");

    let doc = kv.into_document();
    assert_eq!(doc.len(), 1);
}

#[test]
fn test_keyvalues_from_bytes() {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in r#""lang" { "Tokens" { "hi" "hello" } }"#.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }

    let kv = KeyValues::from_bytes(&bytes, ParseOptions::default()).unwrap();
    assert_eq!(kv.get::<String>("lang.Tokens.hi").unwrap(), "hello");
}

#[test]
fn test_keyvalues_from_document() {
    let doc = crate::parse_str(r#""A" { "B" "C" }"#).unwrap();
    let kv = KeyValues::from(doc.clone());
    assert_eq!(kv.document(), &doc);
}

// ===== Conversion Tests =====

#[test]
fn test_string_conversion() {
    let result: Result<String, KvError> = Value::from("hello").try_into();
    assert_eq!(result.unwrap(), "hello");
}

#[test]
fn test_string_conversion_error() {
    let result: Result<String, KvError> = Value::Object(IndexMap::new()).try_into();
    assert!(matches!(result, Err(KvError::TypeError { code: Some(402), .. })));
}

#[test]
fn test_bool_conversion() {
    for (text, expected) in [("1", true), ("0", false), ("true", true), ("FALSE", false), (" True ", true)] {
        let result: bool = Value::from(text).try_into().unwrap();
        assert_eq!(result, expected, "parsing {:?}", text);
    }

    let result: Result<bool, KvError> = Value::from("yes").try_into();
    assert!(matches!(result, Err(KvError::TypeError { code: Some(403), .. })));
}

#[test]
fn test_number_conversions() {
    let f: f64 = Value::from("3.25").try_into().unwrap();
    assert_eq!(f, 3.25);

    let i: i32 = Value::from("-17").try_into().unwrap();
    assert_eq!(i, -17);

    let big: i64 = Value::from("9000000000").try_into().unwrap();
    assert_eq!(big, 9_000_000_000);

    let byte: u8 = Value::from("255").try_into().unwrap();
    assert_eq!(byte, 255);

    let size: usize = Value::from("42").try_into().unwrap();
    assert_eq!(size, 42);
}

#[test]
fn test_number_conversion_errors() {
    let overflow: Result<u8, KvError> = Value::from("256").try_into();
    assert!(overflow.is_err());

    let negative: Result<u32, KvError> = Value::from("-1").try_into();
    assert!(negative.is_err());

    let text: Result<f32, KvError> = Value::from("fast").try_into();
    assert!(text.is_err());

    let object: Result<u16, KvError> = Value::Object(IndexMap::new()).try_into();
    assert!(matches!(object, Err(KvError::TypeError { code: Some(402), .. })));
}

#[test]
fn test_vec_conversion() {
    let list = Value::List(vec![Value::from("1"), Value::from("2"), Value::from("3")]);
    let numbers: Vec<u32> = list.try_into().unwrap();
    assert_eq!(numbers, vec![1, 2, 3]);

    let mixed = Value::List(vec![Value::from("1"), Value::Object(IndexMap::new())]);
    let result: Result<Vec<u32>, KvError> = mixed.try_into();
    assert!(result.is_err());
}

#[test]
fn test_object_conversion() {
    let kv = KeyValues::from_str(UNITS).unwrap();

    let creep: IndexMap<String, Value> = kv.get("DOTAUnits.npc_dota_creep").unwrap();
    assert_eq!(creep.get_index(0).map(|(k, _)| k.as_str()), Some("Model"));
    assert_eq!(creep.len(), 8);

    let result: Result<IndexMap<String, Value>, KvError> = Value::from("flat").try_into();
    assert!(matches!(result, Err(KvError::TypeError { code: Some(407), .. })));
}
