//! Pure merge of the fixed bundle settings into a Tauri config document

use serde_json::{Map, Value};

const DEFAULT_TARGETS: [&str; 3] = ["app", "dmg", "nsis"];
const DEFAULT_SIGN_COMMAND: &str =
    "trusted-signing-cli -e https://eus.codesigning.azure.net -a phuctm97 -c phuctm97 %1";

/// Bundle settings forced onto every build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSettings {
    pub active: bool,
    pub targets: Vec<String>,
    pub windows_sign_command: String,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            active: true,
            targets: DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect(),
            windows_sign_command: DEFAULT_SIGN_COMMAND.to_string(),
        }
    }
}

fn object_or_empty(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns the new `bundle` object for `config`.
///
/// Existing `bundle` keys are kept in place and same-named keys are overwritten;
/// `bundle.windows` gets the same treatment one level down. `createUpdaterArtifacts`
/// follows whether `plugins.updater` is configured.
pub fn merge_bundle(config: &Map<String, Value>, settings: &BundleSettings) -> Value {
    let existing = config.get("bundle");
    let mut bundle = object_or_empty(existing);

    let mut windows = object_or_empty(existing.and_then(|b| b.get("windows")));
    windows.insert(
        "signCommand".to_string(),
        Value::String(settings.windows_sign_command.clone()),
    );

    let updater_enabled = config
        .get("plugins")
        .and_then(|plugins| plugins.get("updater"))
        .is_some_and(is_truthy);

    // New keys land in the order active, targets, windows, createUpdaterArtifacts;
    // keys already present keep their position.
    bundle.insert("active".to_string(), Value::Bool(settings.active));
    bundle.insert(
        "targets".to_string(),
        Value::Array(settings.targets.iter().cloned().map(Value::String).collect()),
    );
    bundle.insert("windows".to_string(), Value::Object(windows));
    bundle.insert(
        "createUpdaterArtifacts".to_string(),
        Value::Bool(updater_enabled),
    );

    Value::Object(bundle)
}

/// Applies [`merge_bundle`] to a whole document, leaving every other key untouched
pub fn apply_bundle(config: &mut Map<String, Value>, settings: &BundleSettings) {
    let bundle = merge_bundle(config, settings);
    config.insert("bundle".to_string(), bundle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_merge_into_empty_config() {
        let bundle = merge_bundle(&Map::new(), &BundleSettings::default());

        assert_eq!(
            bundle,
            json!({
                "active": true,
                "targets": ["app", "dmg", "nsis"],
                "createUpdaterArtifacts": false,
                "windows": {"signCommand": DEFAULT_SIGN_COMMAND}
            })
        );
    }

    #[test]
    fn test_existing_bundle_fields_preserved() {
        let config = object(json!({
            "bundle": {
                "icon": ["icons/icon.png"],
                "active": false,
                "targets": "all",
                "windows": {"certificateThumbprint": "abc", "signCommand": "old"}
            }
        }));

        let bundle = merge_bundle(&config, &BundleSettings::default());
        assert_eq!(bundle["icon"], json!(["icons/icon.png"]));
        assert_eq!(bundle["active"], json!(true));
        assert_eq!(bundle["targets"], json!(["app", "dmg", "nsis"]));
        assert_eq!(bundle["windows"]["certificateThumbprint"], json!("abc"));
        assert_eq!(bundle["windows"]["signCommand"], json!(DEFAULT_SIGN_COMMAND));
    }

    #[test]
    fn test_existing_key_order_kept() {
        let config = object(json!({
            "bundle": {"windows": {"wix": {}}, "targets": "all", "icon": []}
        }));

        let bundle = merge_bundle(&config, &BundleSettings::default());
        let keys: Vec<&String> = bundle.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["windows", "targets", "icon", "active", "createUpdaterArtifacts"]
        );
    }

    #[test]
    fn test_new_key_order_without_windows() {
        let config = object(json!({"bundle": {"icon": []}}));

        let bundle = merge_bundle(&config, &BundleSettings::default());
        let keys: Vec<&String> = bundle.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["icon", "active", "targets", "windows", "createUpdaterArtifacts"]
        );
    }

    #[test]
    fn test_new_key_order_empty_config() {
        let bundle = merge_bundle(&Map::new(), &BundleSettings::default());
        let keys: Vec<&String> = bundle.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["active", "targets", "windows", "createUpdaterArtifacts"]
        );
    }

    #[test]
    fn test_updater_plugin_enables_artifacts() {
        let config = object(json!({
            "plugins": {"updater": {"pubkey": "key", "endpoints": []}}
        }));

        let bundle = merge_bundle(&config, &BundleSettings::default());
        assert_eq!(bundle["createUpdaterArtifacts"], json!(true));
    }

    #[test]
    fn test_updater_flag_ignores_existing_value() {
        let config = object(json!({
            "bundle": {"createUpdaterArtifacts": "v1Compatible"},
            "plugins": {"shell": {}}
        }));

        let bundle = merge_bundle(&config, &BundleSettings::default());
        assert_eq!(bundle["createUpdaterArtifacts"], json!(false));
    }

    #[test]
    fn test_falsy_updater_values() {
        for updater in [json!(null), json!(false), json!(0), json!("")] {
            let config = object(json!({"plugins": {"updater": updater}}));
            let bundle = merge_bundle(&config, &BundleSettings::default());
            assert_eq!(bundle["createUpdaterArtifacts"], json!(false));
        }
    }

    #[test]
    fn test_non_object_bundle_replaced() {
        let config = object(json!({"bundle": null}));
        let bundle = merge_bundle(&config, &BundleSettings::default());
        assert_eq!(bundle["active"], json!(true));

        let config = object(json!({"bundle": {"windows": "nope"}}));
        let bundle = merge_bundle(&config, &BundleSettings::default());
        assert_eq!(
            bundle["windows"],
            json!({"signCommand": DEFAULT_SIGN_COMMAND})
        );
    }

    #[test]
    fn test_apply_bundle_preserves_siblings() {
        let mut config = object(json!({
            "productName": "Notes",
            "bundle": {"icon": []},
            "app": {"windows": [{"title": "Notes"}]}
        }));

        apply_bundle(&mut config, &BundleSettings::default());
        assert_eq!(config["productName"], json!("Notes"));
        assert_eq!(config["app"], json!({"windows": [{"title": "Notes"}]}));
        let keys: Vec<&String> = config.keys().collect();
        assert_eq!(keys, vec!["productName", "bundle", "app"]);
    }

    #[test]
    fn test_apply_bundle_is_idempotent() {
        let mut once = object(json!({
            "bundle": {"icon": [], "windows": {"wix": null}},
            "plugins": {"updater": {}}
        }));
        apply_bundle(&mut once, &BundleSettings::default());

        let mut twice = once.clone();
        apply_bundle(&mut twice, &BundleSettings::default());

        assert_eq!(once, twice);
        assert_eq!(
            serde_json::to_string(&once).unwrap(),
            serde_json::to_string(&twice).unwrap()
        );
    }

    #[test]
    fn test_custom_settings() {
        let settings = BundleSettings {
            active: false,
            targets: vec!["deb".to_string()],
            windows_sign_command: "signtool sign %1".to_string(),
        };

        let bundle = merge_bundle(&Map::new(), &settings);
        assert_eq!(bundle["active"], json!(false));
        assert_eq!(bundle["targets"], json!(["deb"]));
        assert_eq!(bundle["windows"]["signCommand"], json!("signtool sign %1"));
    }
}
