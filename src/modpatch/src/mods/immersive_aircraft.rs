//! Immersive Aircraft "advanced edition": aircraft parts cost vanilla
//! storage blocks instead of crafted plates and nails.

use serde_json::Value;

use crate::error::{PatchError, Result};
use crate::mods::{ModPatch, PatchOptions};
use crate::recipe::{modify_recipe, RecipeEdit};
use crate::tree::ExtractedTree;

const RECIPES: &str = "data/immersive_aircraft/recipes";
const LANG: &str = "assets/immersive_aircraft/lang/zh_cn.json";
const TAB_KEY: &str = "itemGroup.immersive_aircraft.immersive_aircraft_tab";
const TAB_NAME: &str = "沉浸式飞机（进阶版）";

const fn update(update: &'static [(char, &'static str)]) -> RecipeEdit<'static> {
    RecipeEdit {
        update,
        remove: &[],
        pattern: None,
    }
}

const RECIPE_EDITS: &[(&str, RecipeEdit<'static>)] = &[
    ("hull.json", update(&[('I', "minecraft:iron_block")])),
    ("engine.json", update(&[('C', "minecraft:iron_block")])),
    (
        "sail.json",
        update(&[('S', "minecraft:lead"), ('C', "#minecraft:wool_carpets")]),
    ),
    ("propeller.json", update(&[('I', "minecraft:iron_block")])),
    (
        "boiler.json",
        RecipeEdit {
            update: &[('C', "minecraft:copper_block"), ('W', "minecraft:water_bucket")],
            remove: &[],
            pattern: Some(&["CCC", "CWC", "CFC"]),
        },
    ),
    ("enhanced_propeller.json", update(&[('C', "minecraft:copper_block")])),
    (
        "eco_engine.json",
        RecipeEdit {
            update: &[
                ('G', "minecraft:gold_block"),
                ('P', "minecraft:sticky_piston"),
                ('B', "minecraft:bricks"),
            ],
            remove: &['C', 'R', 'N'],
            pattern: Some(&["BGB", "PEP", "GBG"]),
        },
    ),
    (
        "nether_engine.json",
        RecipeEdit {
            update: &[
                ('M', "minecraft:magma_block"),
                ('K', "minecraft:netherite_block"),
                ('L', "minecraft:ghast_tear"),
            ],
            remove: &['C', 'R', 'N'],
            pattern: Some(&["MKM", "BEB", "KLK"]),
        },
    ),
    ("steel_boiler.json", update(&[('C', "minecraft:iron_block")])),
    (
        "industrial_gears.json",
        update(&[('I', "minecraft:iron_block"), ('C', "minecraft:copper_block")]),
    ),
    (
        "sturdy_pipes.json",
        update(&[('I', "minecraft:iron_block"), ('C', "minecraft:copper_block")]),
    ),
    ("hull_reinforcement.json", update(&[('I', "minecraft:iron_block")])),
    ("improved_landing_gear.json", update(&[('I', "minecraft:iron_block")])),
];

/// Immersive Aircraft 1.4.0 for Minecraft 1.20.1 (Forge)
#[derive(Debug, Clone, Copy)]
pub struct ImmersiveAircraft1201;

impl ModPatch for ImmersiveAircraft1201 {
    fn name(&self) -> &'static str {
        "immersive_aircraft-1.20"
    }

    fn run(&self, tree: &ExtractedTree, _options: &PatchOptions) -> Result<()> {
        for (file, edit) in RECIPE_EDITS {
            modify_recipe(tree, format!("{}/{}", RECIPES, file), edit)?;
        }
        tracing::info!("Rewrote {} part recipes", RECIPE_EDITS.len());

        let mut lang = tree.read_json(LANG)?;
        let entries = lang
            .as_object_mut()
            .ok_or_else(|| PatchError::structure(LANG, "lang file is not a JSON object"))?;
        entries.insert(TAB_KEY.to_string(), Value::String(TAB_NAME.to_string()));
        tree.write_json(LANG, &lang)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Shaped recipe JSON using exactly the given keys
    fn recipe(pattern: &[&str], keys: &[char]) -> String {
        let key: serde_json::Map<String, Value> = keys
            .iter()
            .map(|k| (k.to_string(), json!({"item": format!("immersive_aircraft:part_{}", k)})))
            .collect();
        json!({
            "type": "minecraft:crafting_shaped",
            "pattern": pattern,
            "key": key,
            "result": {"item": "immersive_aircraft:part"}
        })
        .to_string()
    }

    /// The recipe and lang files of the 1.20.1 release, as (path, contents)
    pub(crate) fn release_files() -> Vec<(String, String)> {
        let originals: &[(&str, &[&str], &[char])] = &[
            ("hull.json", &["WWW", "III"], &['W', 'I']),
            ("engine.json", &["CRC", "PBP"], &['C', 'R', 'P', 'B']),
            ("sail.json", &["SCC", "SCC"], &['S', 'C']),
            ("propeller.json", &[" I ", "ISI", " I "], &['I', 'S']),
            ("boiler.json", &["CCC", "C C", "CFC"], &['C', 'F']),
            ("enhanced_propeller.json", &[" C ", "CPC", " C "], &['C', 'P']),
            ("eco_engine.json", &["CRC", "NEN", "CRC"], &['C', 'R', 'N', 'E']),
            ("nether_engine.json", &["CRC", "BEB", "CNC"], &['C', 'R', 'N', 'E', 'B']),
            ("steel_boiler.json", &["CCC", "CBC"], &['C', 'B']),
            ("industrial_gears.json", &["IC", "CI"], &['I', 'C']),
            ("sturdy_pipes.json", &["ICI"], &['I', 'C']),
            ("hull_reinforcement.json", &["III", "IHI"], &['I', 'H']),
            ("improved_landing_gear.json", &["I I", "W W"], &['I', 'W']),
        ];

        let mut files: Vec<(String, String)> = originals
            .iter()
            .map(|(file, pattern, keys)| (format!("{}/{}", RECIPES, file), recipe(pattern, keys)))
            .collect();
        files.push((
            LANG.to_string(),
            json!({"itemGroup.immersive_aircraft.immersive_aircraft_tab": "沉浸式飞机"}).to_string(),
        ));
        files
    }

    fn release_tree() -> ExtractedTree {
        let files = release_files();
        let borrowed: Vec<(&str, &str)> = files
            .iter()
            .map(|(path, contents)| (path.as_str(), contents.as_str()))
            .collect();
        crate::tree::tests::tree_with(&borrowed)
    }

    #[test]
    fn test_all_recipes_rewritten() {
        let tree = release_tree();
        ImmersiveAircraft1201
            .run(&tree, &PatchOptions::default())
            .unwrap();

        let hull = tree.read_json(format!("{}/hull.json", RECIPES)).unwrap();
        assert_eq!(hull["key"]["I"], json!([{"item": "minecraft:iron_block"}]));
        assert_eq!(hull["key"]["W"]["item"], "immersive_aircraft:part_W");

        let sail = tree.read_json(format!("{}/sail.json", RECIPES)).unwrap();
        assert_eq!(sail["key"]["C"], json!([{"tag": "minecraft:wool_carpets"}]));

        let boiler = tree.read_json(format!("{}/boiler.json", RECIPES)).unwrap();
        assert_eq!(boiler["pattern"], json!(["CCC", "CWC", "CFC"]));
        assert_eq!(boiler["key"]["W"], json!([{"item": "minecraft:water_bucket"}]));

        let nether = tree
            .read_json(format!("{}/nether_engine.json", RECIPES))
            .unwrap();
        let keys: Vec<&String> = nether["key"].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 5);
        assert!(nether["key"].get("R").is_none());
        assert_eq!(nether["pattern"], json!(["MKM", "BEB", "KLK"]));
    }

    #[test]
    fn test_lang_tab_renamed() {
        let tree = release_tree();
        ImmersiveAircraft1201
            .run(&tree, &PatchOptions::default())
            .unwrap();

        let lang = tree.read_json(LANG).unwrap();
        assert_eq!(lang[TAB_KEY], TAB_NAME);
    }

    #[test]
    fn test_missing_recipe_fails() {
        let tree = crate::tree::tests::tree_with(&[(LANG, "{}")]);
        assert!(matches!(
            ImmersiveAircraft1201.run(&tree, &PatchOptions::default()),
            Err(PatchError::MissingFile { .. })
        ));
    }
}
