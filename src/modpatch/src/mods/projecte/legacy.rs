//! ProjectE 1.12.2.
//!
//! Pre-flattening layout: recipes and advancements live under `assets/`,
//! translations are `.lang` files, metadata is `mcmod.info`, and conversion
//! keys carry item metadata (`item|meta`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{json, Value};

use super::{emc, translations};
use super::{DESCRIPTION, DISPLAY_NAME, TRANSMUTATION_FILES};
use crate::error::{PatchError, Result};
use crate::mods::{ModPatch, PatchOptions};
use crate::recipe::{modify_recipe, RecipeEdit};
use crate::tree::{ExtractedTree, Retain};

const RECIPES: &str = "assets/projecte/recipes";
const ADVANCEMENTS: &str = "assets/projecte/advancements";
const TABLET_RECIPE: &str = "assets/projecte/recipes/item.pe_transmutation_tablet.json";
const TABLE_RECIPE: &str = "assets/projecte/recipes/transmutation_table.json";
const CONVERSIONS: &str = "defaultCustomConversions/defaults.json";
const LANG: &str = "assets/projecte/lang/zh_cn.lang";
const MCMOD_INFO: &str = "mcmod.info";
const TABLET_TEXTURE: &str = "assets/projecte/textures/items/transmute_tablet.png";
const TABLE_TOP_TEXTURE: &str = "assets/projecte/textures/blocks/transmutation_stone/top.png";

// _constants.json resolves the `#GEMDIAMOND` style references of the kept recipes
const KEPT_RECIPES: &[&str] = &[
    "transmutation_table.json",
    "item.pe_transmutation_tablet.json",
    "_constants.json",
    "_factories.json",
];

const AUTHOR_LIST: &[&str] = &["sinkillerj", "Moze_Intel", "dongwen"];

/// ProjectE 1.12.2 (Forge)
#[derive(Debug, Clone, Copy)]
pub struct ProjectE1122;

impl ModPatch for ProjectE1122 {
    fn name(&self) -> &'static str {
        "projecte-1.12"
    }

    fn run(&self, tree: &ExtractedTree, options: &PatchOptions) -> Result<()> {
        let recipes = tree.remove_files(RECIPES, Retain::Keep(KEPT_RECIPES))?;
        let advancements = tree.remove_files(ADVANCEMENTS, Retain::Keep(TRANSMUTATION_FILES))?;
        tracing::info!("Removed {} recipes, {} advancements", recipes, advancements);

        // No netherite before 1.16
        modify_recipe(
            tree,
            TABLET_RECIPE,
            &RecipeEdit::update(&[('D', "minecraft:diamond_block")]),
        )?;
        modify_recipe(tree, TABLE_RECIPE, &RecipeEdit::update(&[('P', "minecraft:diamond")]))?;
        tree.remove_dir(format!("{}/conversions", RECIPES))?;

        emc::rewrite_legacy_layout(tree, CONVERSIONS)?;
        modify_lang(tree, options)?;
        modify_mcmod_info(tree)?;

        super::replace_textures(tree, options, TABLET_TEXTURE, TABLE_TOP_TEXTURE)
    }
}

fn modify_lang(tree: &ExtractedTree, options: &PatchOptions) -> Result<()> {
    let mut lang = tree.read_lang(LANG)?;

    let overlay = translations::load_overlay(options)?;
    lang.extend(
        overlay
            .into_iter()
            .map(|(key, value)| (translations::legacy_lang_key(&key), value)),
    );
    lang.extend(translations::legacy_currency_keys(&options.currency_name));
    lang.extend(translations::legacy_other_keys());

    tree.write_lang(LANG, &lang)
}

/// The `credits` string up to the quote that closes it
static CREDITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)("credits":\s*")(.*?)("\s*[,}])"#).unwrap());

/// Escape raw newlines, quotes and backslashes inside the `credits` string
///
/// Released `mcmod.info` files break the string across lines, which no JSON
/// parser accepts.
pub fn repair_credits(text: &str) -> String {
    CREDITS
        .replace_all(text, |caps: &Captures<'_>| {
            let content = caps[2]
                .replace('\\', "\\\\")
                .replace('\n', "\\n")
                .replace('"', "\\\"");
            format!("{}{}{}", &caps[1], content, &caps[3])
        })
        .into_owned()
}

fn modify_mcmod_info(tree: &ExtractedTree) -> Result<()> {
    let text = repair_credits(&tree.read_string(MCMOD_INFO)?);
    let mut info: Value = serde_json::from_str(&text).map_err(|source| PatchError::Json {
        path: tree.path(MCMOD_INFO),
        source,
    })?;

    let Some(entry) = info
        .as_array_mut()
        .and_then(|mods| mods.first_mut())
        .and_then(Value::as_object_mut)
    else {
        tracing::warn!("{} has no mod entry, leaving it unchanged", MCMOD_INFO);
        return Ok(());
    };

    entry.insert("name".to_string(), json!(DISPLAY_NAME));
    entry.insert("authorList".to_string(), json!(AUTHOR_LIST));
    entry.insert("description".to_string(), json!(DESCRIPTION));

    tree.write_json(MCMOD_INFO, &info)
}
