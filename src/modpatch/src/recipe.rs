//! Shaped crafting recipe edits.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::error::{PatchError, Result};
use crate::tree::ExtractedTree;

/// Changes to apply to a shaped recipe's `key` and `pattern`
#[derive(Debug, Clone, Default)]
pub struct RecipeEdit<'a> {
    /// Key character -> ingredient (`namespace:item` or `#namespace:tag`)
    pub update: &'a [(char, &'a str)],
    /// Key characters to drop
    pub remove: &'a [char],
    /// Replacement pattern rows
    pub pattern: Option<&'a [&'a str]>,
}

impl<'a> RecipeEdit<'a> {
    pub fn update(update: &'a [(char, &'a str)]) -> Self {
        RecipeEdit {
            update,
            ..Default::default()
        }
    }
}

/// Convert an ingredient string into its single-element ingredient list
pub fn ingredient(name: &str) -> Value {
    let name = name.trim();
    match name.strip_prefix('#') {
        Some(tag) => json!([{ "tag": tag }]),
        None => json!([{ "item": name }]),
    }
}

/// Apply `edit` to the recipe at `rel`
///
/// The recipe is only written back if every pattern character has a key and
/// every key is used by the pattern.
pub fn modify_recipe(tree: &ExtractedTree, rel: impl AsRef<Path>, edit: &RecipeEdit<'_>) -> Result<()> {
    let rel = rel.as_ref();

    if let Some(&key) = edit
        .remove
        .iter()
        .find(|k| edit.update.iter().any(|(u, _)| u == *k))
    {
        return Err(PatchError::RecipeKeyConflict {
            path: rel.to_path_buf(),
            key,
        });
    }

    let mut recipe = tree.read_json(rel)?;
    let root = recipe
        .as_object_mut()
        .ok_or_else(|| PatchError::structure(rel, "recipe is not a JSON object"))?;

    {
        let keys = key_map(root, rel)?;
        for k in edit.remove {
            if keys.shift_remove(&k.to_string()).is_none() {
                tracing::warn!("Cannot remove key {} from {}: not present", k, rel.display());
            }
        }
        for (k, item) in edit.update {
            keys.insert(k.to_string(), ingredient(item));
        }
    }

    if let Some(rows) = edit.pattern {
        let rows: Vec<Value> = rows.iter().map(|r| Value::String(r.to_string())).collect();
        root.insert("pattern".to_string(), Value::Array(rows));
    }

    check_pattern(root, rel)?;

    tree.write_json(rel, &recipe)?;
    tracing::debug!("Modified recipe {}", rel.display());
    Ok(())
}

fn key_map<'v>(root: &'v mut Map<String, Value>, rel: &Path) -> Result<&'v mut Map<String, Value>> {
    root.get_mut("key")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| PatchError::structure(rel, "recipe has no \"key\" object"))
}

/// Pattern characters (ignoring spaces) must be exactly the set of keys
fn check_pattern(root: &Map<String, Value>, rel: &Path) -> Result<()> {
    let rows = root
        .get("pattern")
        .and_then(Value::as_array)
        .ok_or_else(|| PatchError::structure(rel, "recipe has no \"pattern\" array"))?;

    let used: BTreeSet<String> = rows
        .iter()
        .filter_map(Value::as_str)
        .flat_map(str::chars)
        .filter(|c| *c != ' ')
        .map(String::from)
        .collect();

    let defined: BTreeSet<String> = root
        .get("key")
        .and_then(Value::as_object)
        .map(|keys| keys.keys().cloned().collect())
        .unwrap_or_default();

    if used != defined {
        return Err(PatchError::RecipePatternMismatch {
            path: rel.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tests::tree_with;

    const ECO_ENGINE: &str = r#"{
        "type": "minecraft:crafting_shaped",
        "pattern": ["CRC", "NEN", "CRC"],
        "key": {
            "C": {"item": "immersive_aircraft:copper_plate"},
            "R": {"item": "minecraft:redstone"},
            "N": {"item": "immersive_aircraft:nail"},
            "E": {"item": "immersive_aircraft:engine"}
        },
        "result": {"item": "immersive_aircraft:eco_engine"}
    }"#;

    #[test]
    fn test_ingredient_item_and_tag() {
        assert_eq!(
            ingredient(" minecraft:diamond "),
            json!([{"item": "minecraft:diamond"}])
        );
        assert_eq!(
            ingredient("#minecraft:wool_carpets"),
            json!([{"tag": "minecraft:wool_carpets"}])
        );
    }

    #[test]
    fn test_update_single_key() {
        let tree = tree_with(&[("r.json", ECO_ENGINE)]);
        modify_recipe(&tree, "r.json", &RecipeEdit::update(&[('R', "minecraft:repeater")]))
            .unwrap();

        let recipe = tree.read_json("r.json").unwrap();
        assert_eq!(recipe["key"]["R"], json!([{"item": "minecraft:repeater"}]));
        assert_eq!(recipe["key"]["C"], json!({"item": "immersive_aircraft:copper_plate"}));
        assert_eq!(recipe["result"]["item"], "immersive_aircraft:eco_engine");
    }

    #[test]
    fn test_remove_update_and_new_pattern() {
        let tree = tree_with(&[("r.json", ECO_ENGINE)]);
        let edit = RecipeEdit {
            update: &[
                ('G', "minecraft:gold_block"),
                ('P', "minecraft:sticky_piston"),
                ('B', "minecraft:bricks"),
            ],
            remove: &['C', 'R', 'N'],
            pattern: Some(&["BGB", "PEP", "GBG"]),
        };
        modify_recipe(&tree, "r.json", &edit).unwrap();

        let recipe = tree.read_json("r.json").unwrap();
        let keys: BTreeSet<_> = recipe["key"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            ["B", "E", "G", "P"].iter().map(|s| s.to_string()).collect()
        );
        assert_eq!(recipe["pattern"], json!(["BGB", "PEP", "GBG"]));
    }

    #[test]
    fn test_removal_keeps_key_order() {
        let tree = tree_with(&[("r.json", ECO_ENGINE)]);
        let edit = RecipeEdit {
            remove: &['R'],
            pattern: Some(&["C C", "NEN", "C C"]),
            ..Default::default()
        };
        modify_recipe(&tree, "r.json", &edit).unwrap();

        let recipe = tree.read_json("r.json").unwrap();
        let keys: Vec<&str> = recipe["key"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["C", "N", "E"]);
    }

    #[test]
    fn test_conflicting_keys_rejected() {
        let tree = tree_with(&[("r.json", ECO_ENGINE)]);
        let edit = RecipeEdit {
            update: &[('C', "minecraft:iron_block")],
            remove: &['C'],
            pattern: None,
        };
        assert!(matches!(
            modify_recipe(&tree, "r.json", &edit),
            Err(PatchError::RecipeKeyConflict { key: 'C', .. })
        ));
    }

    #[test]
    fn test_pattern_mismatch_leaves_file_untouched() {
        let tree = tree_with(&[("r.json", ECO_ENGINE)]);
        let edit = RecipeEdit {
            update: &[('X', "minecraft:stone")],
            ..Default::default()
        };
        assert!(matches!(
            modify_recipe(&tree, "r.json", &edit),
            Err(PatchError::RecipePatternMismatch { .. })
        ));
        assert_eq!(tree.read_string("r.json").unwrap(), ECO_ENGINE);
    }

    #[test]
    fn test_removing_absent_key_is_not_fatal() {
        let tree = tree_with(&[(
            "r.json",
            r#"{"pattern": ["AA"], "key": {"A": {"item": "minecraft:stone"}}}"#,
        )]);
        let edit = RecipeEdit {
            remove: &['Z'],
            ..Default::default()
        };
        modify_recipe(&tree, "r.json", &edit).unwrap();
    }

    #[test]
    fn test_missing_recipe() {
        let tree = tree_with(&[]);
        assert!(matches!(
            modify_recipe(&tree, "absent.json", &RecipeEdit::default()),
            Err(PatchError::MissingFile { .. })
        ));
    }
}
