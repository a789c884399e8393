//! EMC value tables and the three on-disk layouts of ProjectE's default
//! custom conversions.

use serde_json::{json, Map, Value};

use crate::error::{PatchError, Result};
use crate::tree::ExtractedTree;

pub const EMERALD_EMC: u64 = 160;

/// Vanilla items whose value is raised or newly assigned
pub const VANILLA: &[(&str, u64)] = &[
    ("minecraft:gilded_blackstone", 48),
    ("minecraft:wither_skeleton_skull", 10240),
    ("minecraft:dragon_head", 32768),
    ("minecraft:elytra", 65536),
    ("minecraft:totem_of_undying", 8192),
    ("minecraft:experience_bottle", 512),
];

/// Farmer's Delight items (raw produce, cutting board outputs, cooked meals)
pub const FARMERS_DELIGHT: &[(&str, u64)] = &[
    ("farmersdelight:canvas", 48),
    ("farmersdelight:cabbage", 64),
    ("farmersdelight:tomato", 64),
    ("farmersdelight:onion", 64),
    ("farmersdelight:rice_panicle", 28),
    ("farmersdelight:rice", 16),
    ("farmersdelight:straw", 12),
    ("farmersdelight:tree_bark", 1),
    ("farmersdelight:sandy_shrub", 1),
    ("farmersdelight:brown_mushroom_colony", 96),
    ("farmersdelight:red_mushroom_colony", 96),
    ("farmersdelight:wild_cabbages", 64),
    ("farmersdelight:cabbage_leaf", 64),
    ("farmersdelight:ham", 272),
    // cutting board
    ("farmersdelight:cabbage_seeds", 32),
    ("farmersdelight:raw_pasta", 34),
    ("farmersdelight:pumpkin_slice", 36),
    ("farmersdelight:minced_beef", 32),
    ("farmersdelight:chicken_cuts", 8),
    ("farmersdelight:bacon", 32),
    ("farmersdelight:cod_slice", 8),
    ("farmersdelight:salmon_slice", 8),
    ("farmersdelight:mutton_chops", 32),
    ("farmersdelight:cake_slice", 21),
    ("farmersdelight:apple_pie_slice", 140),
    ("farmersdelight:sweet_berry_cheesecake_slice", 45),
    ("farmersdelight:chocolate_pie_slice", 78),
    ("farmersdelight:kelp_roll_slice", 29),
    // cooking pot and feasts
    ("farmersdelight:hot_cocoa", 148),
    ("farmersdelight:apple_cider", 271),
    ("farmersdelight:tomato_sauce", 128),
    ("farmersdelight:glow_berry_custard", 68),
    ("farmersdelight:dumplings", 97),
    ("farmersdelight:cabbage_rolls", 128),
    ("farmersdelight:cooked_rice", 16),
    ("farmersdelight:bone_broth", 148),
    ("farmersdelight:beef_stew", 192),
    ("farmersdelight:chicken_soup", 256),
    ("farmersdelight:vegetable_soup", 256),
    ("farmersdelight:fish_stew", 256),
    ("farmersdelight:fried_rice", 176),
    ("farmersdelight:pumpkin_soup", 169),
    ("farmersdelight:baked_cod_stew", 224),
    ("farmersdelight:noodle_soup", 131),
    ("farmersdelight:pasta_with_meatballs", 194),
    ("farmersdelight:pasta_with_mutton_chop", 226),
    ("farmersdelight:mushroom_rice", 144),
    ("farmersdelight:vegetable_noodles", 258),
    ("farmersdelight:ratatouille", 256),
    ("farmersdelight:squid_ink_pasta", 178),
    ("farmersdelight:roast_chicken", 106),
    ("farmersdelight:stuffed_pumpkin_block", 256),
    ("farmersdelight:stuffed_pumpkin", 70),
    ("farmersdelight:shepherds_pie", 119),
    ("farmersdelight:dog_food", 104),
    ("farmersdelight:honey_glazed_ham", 71),
];

/// Every added value, vanilla first
pub fn added_values() -> impl Iterator<Item = (&'static str, u64)> {
    VANILLA.iter().chain(FARMERS_DELIGHT).copied()
}

/// `values.before` of a conversions file, as an object (1.12.2 – 1.20.1)
fn before_object<'v>(data: &'v mut Value, rel: &str) -> Result<&'v mut Map<String, Value>> {
    data.pointer_mut("/values/before")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| PatchError::structure(rel, "values.before is not an object"))
}

/// 1.16.5 – 1.20.1: `values.before` maps item ids and `#tags` to values
pub fn rewrite_object_layout(tree: &ExtractedTree, rel: &str, emerald_tag: &str) -> Result<()> {
    let mut data = tree.read_json(rel)?;
    let before = before_object(&mut data, rel)?;

    before.insert(emerald_tag.to_string(), json!(EMERALD_EMC));
    for (item, emc) in added_values() {
        before.insert(item.to_string(), json!(emc));
    }

    tree.write_json(rel, &data)
}

/// 1.12.2: keys are `item|meta`; every emerald entry is replaced by the plain item
pub fn rewrite_legacy_layout(tree: &ExtractedTree, rel: &str) -> Result<()> {
    let mut data = tree.read_json(rel)?;
    let before = before_object(&mut data, rel)?;

    let emerald_keys: Vec<String> = before
        .keys()
        .filter(|k| k.to_lowercase().contains("emerald"))
        .cloned()
        .collect();
    for key in &emerald_keys {
        before.shift_remove(key);
    }
    tracing::debug!("Dropped {} emerald conversions", emerald_keys.len());

    before.insert(legacy_key("minecraft:emerald"), json!(EMERALD_EMC));
    for (item, emc) in added_values() {
        before.insert(legacy_key(item), json!(emc));
    }

    tree.write_json(rel, &data)
}

/// `item` -> `item|0`; keys that already carry metadata are kept
pub fn legacy_key(item: &str) -> String {
    if item.contains('|') {
        item.to_string()
    } else {
        format!("{}|0", item)
    }
}

/// 1.21.1: `values.before` is a list of `{type, emc_value, id|tag}` entries
///
/// Entries carrying `data` or `description` are kept verbatim. The others are
/// folded into an ordered map keyed by id or `#tag`, updated, and re-emitted.
pub fn rewrite_list_layout(tree: &ExtractedTree, rel: &str, emerald_tag: &str) -> Result<()> {
    let mut data = tree.read_json(rel)?;
    let entries = data
        .pointer_mut("/values/before")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| PatchError::structure(rel, "values.before is not a list"))?;

    let mut kept = Vec::new();
    let mut values = Map::new();
    for entry in entries.drain(..) {
        if entry.get("data").is_some() || entry.get("description").is_some() {
            kept.push(entry);
            continue;
        }

        let emc = entry
            .get("emc_value")
            .cloned()
            .ok_or_else(|| PatchError::structure(rel, "conversion entry without emc_value"))?;

        let key = match (entry.get("id").and_then(Value::as_str), entry.get("tag").and_then(Value::as_str)) {
            (Some(id), _) => id.to_string(),
            (None, Some(tag)) => format!("#{}", tag),
            (None, None) => {
                return Err(PatchError::structure(rel, "conversion entry without id or tag"))
            }
        };
        values.insert(key, emc);
    }

    values.insert(format!("#{}", emerald_tag), json!(EMERALD_EMC));
    for (item, emc) in added_values() {
        values.insert(item.to_string(), json!(emc));
    }

    kept.extend(values.into_iter().map(|(key, emc)| match key.strip_prefix('#') {
        Some(tag) => json!({"type": "projecte:item", "emc_value": emc, "tag": tag}),
        None => json!({"type": "projecte:item", "emc_value": emc, "id": key}),
    }));
    *entries = kept;

    tree.write_json(rel, &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tests::tree_with;

    const REL: &str = "defaults.json";

    #[test]
    fn test_object_layout() {
        let tree = tree_with(&[(
            REL,
            r##"{"comment": "x", "values": {"before": {"#forge:gems/emerald": 16384, "minecraft:cobblestone": 1}}}"##,
        )]);

        rewrite_object_layout(&tree, REL, "#forge:gems/emerald").unwrap();

        let data = tree.read_json(REL).unwrap();
        let before = &data["values"]["before"];
        assert_eq!(before["#forge:gems/emerald"], 160);
        assert_eq!(before["minecraft:cobblestone"], 1);
        assert_eq!(before["minecraft:elytra"], 65536);
        assert_eq!(before["farmersdelight:honey_glazed_ham"], 71);
        assert_eq!(data["comment"], "x");
    }

    #[test]
    fn test_object_layout_rejects_wrong_shape() {
        let tree = tree_with(&[(REL, r#"{"values": {"before": []}}"#)]);
        assert!(matches!(
            rewrite_object_layout(&tree, REL, "#forge:gems/emerald"),
            Err(PatchError::Structure { .. })
        ));
    }

    #[test]
    fn test_legacy_layout() {
        let tree = tree_with(&[(
            REL,
            r#"{"values": {"before": {"gemEmerald": 16384, "minecraft:emerald_block|0": 147456, "minecraft:stone|0": 1, "minecraft:elytra|0": 1}}}"#,
        )]);

        rewrite_legacy_layout(&tree, REL).unwrap();

        let data = tree.read_json(REL).unwrap();
        let before = data["values"]["before"].as_object().unwrap();
        assert!(!before.contains_key("gemEmerald"));
        assert!(!before.contains_key("minecraft:emerald_block|0"));
        assert_eq!(before["minecraft:emerald|0"], 160);
        assert_eq!(before["minecraft:stone|0"], 1);
        assert_eq!(before["minecraft:elytra|0"], 65536);
        assert_eq!(before["farmersdelight:rice|0"], 16);
    }

    #[test]
    fn test_legacy_layout_keeps_key_order() {
        let tree = tree_with(&[(
            REL,
            r#"{"values": {"before": {"a|0": 1, "gemEmerald": 2, "b|0": 3, "c|0": 4, "z|0": 5}}}"#,
        )]);

        rewrite_legacy_layout(&tree, REL).unwrap();

        let data = tree.read_json(REL).unwrap();
        let keys: Vec<&str> = data["values"]["before"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys[..5], ["a|0", "b|0", "c|0", "z|0", "minecraft:emerald|0"]);
    }

    #[test]
    fn test_legacy_key() {
        assert_eq!(legacy_key("minecraft:elytra"), "minecraft:elytra|0");
        assert_eq!(legacy_key("minecraft:dye|4"), "minecraft:dye|4");
    }

    #[test]
    fn test_list_layout() {
        let tree = tree_with(&[(
            REL,
            r#"{"values": {"before": [
                {"type": "projecte:item", "description": "header", "emc_value": 0},
                {"type": "projecte:item", "tag": "c:gems/emerald", "emc_value": 16384},
                {"type": "projecte:item", "id": "minecraft:stone", "emc_value": 1},
                {"type": "projecte:item", "id": "minecraft:potion", "data": {"p": 1}, "emc_value": 5},
                {"type": "projecte:item", "id": "minecraft:elytra", "emc_value": 1}
            ]}}"#,
        )]);

        rewrite_list_layout(&tree, REL, "c:gems/emerald").unwrap();

        let data = tree.read_json(REL).unwrap();
        let entries = data["values"]["before"].as_array().unwrap();

        assert_eq!(entries[0]["description"], "header");
        assert_eq!(entries[1]["data"]["p"], 1);

        let find = |field: &str, name: &str| {
            entries
                .iter()
                .filter(|e| e[field] == name)
                .map(|e| e["emc_value"].clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(find("tag", "c:gems/emerald"), vec![json!(160)]);
        assert_eq!(find("id", "minecraft:stone"), vec![json!(1)]);
        assert_eq!(find("id", "minecraft:elytra"), vec![json!(65536)]);
        assert_eq!(find("id", "farmersdelight:dog_food"), vec![json!(104)]);
        assert_eq!(find("id", "minecraft:potion"), vec![json!(5)]);

        assert!(entries.iter().all(|e| e["type"] == "projecte:item"));
    }

    #[test]
    fn test_list_layout_rejects_entry_without_id() {
        let tree = tree_with(&[(
            REL,
            r#"{"values": {"before": [{"type": "projecte:item", "emc_value": 1}]}}"#,
        )]);
        assert!(matches!(
            rewrite_list_layout(&tree, REL, "c:gems/emerald"),
            Err(PatchError::Structure { .. })
        ));
    }
}
