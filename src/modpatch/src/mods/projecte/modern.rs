//! Data-pack era releases (1.16.5 through 1.21.1).
//!
//! 1.21 renamed the data directories to their singular form, moved the mod
//! metadata to `neoforge.mods.toml`, and turned the default conversions into a
//! list. Everything else is shared.

use super::{emc, translations};
use super::{AUTHORS, DESCRIPTION, DISPLAY_NAME, TRANSMUTATION_FILES};
use crate::error::{PatchError, Result};
use crate::lang::merge_json;
use crate::mods::{ModPatch, PatchOptions};
use crate::recipe::{modify_recipe, RecipeEdit};
use crate::tree::{ExtractedTree, Retain};

const CONVERSIONS: &str = "data/projecte/pe_custom_conversions/defaults.json";
const LANG: &str = "assets/projecte/lang/zh_cn.json";
const TABLET_TEXTURE: &str = "assets/projecte/textures/item/transmutation_tablet.png";
const TABLE_TOP_TEXTURE: &str = "assets/projecte/textures/block/transmutation_stone/top.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConversionLayout {
    Object,
    List,
}

/// Where one release family keeps its files
#[derive(Debug)]
struct Layout {
    name: &'static str,
    recipes: &'static str,
    loot_tables: &'static str,
    advancements: &'static str,
    mods_toml: &'static str,
    conversions: ConversionLayout,
    emerald_tag: &'static str,
    mod_menu_keys: bool,
}

const LAYOUT_1_20: Layout = Layout {
    name: "projecte-1.20",
    recipes: "data/projecte/recipes",
    loot_tables: "data/projecte/loot_tables/blocks",
    advancements: "data/projecte/advancements",
    mods_toml: "META-INF/mods.toml",
    conversions: ConversionLayout::Object,
    emerald_tag: "#forge:gems/emerald",
    mod_menu_keys: false,
};

const LAYOUT_1_21: Layout = Layout {
    name: "projecte-1.21",
    recipes: "data/projecte/recipe",
    loot_tables: "data/projecte/loot_table/blocks",
    advancements: "data/projecte/advancement",
    mods_toml: "META-INF/neoforge.mods.toml",
    conversions: ConversionLayout::List,
    emerald_tag: "c:gems/emerald",
    mod_menu_keys: true,
};

/// ProjectE 1.16.5, 1.18.2, 1.19.2 and 1.20.1 (Forge)
#[derive(Debug, Clone, Copy)]
pub struct ProjectE1201;

/// ProjectE 1.21.1 (NeoForge)
#[derive(Debug, Clone, Copy)]
pub struct ProjectE1211;

impl ModPatch for ProjectE1201 {
    fn name(&self) -> &'static str {
        LAYOUT_1_20.name
    }

    fn run(&self, tree: &ExtractedTree, options: &PatchOptions) -> Result<()> {
        LAYOUT_1_20.apply(tree, options)
    }
}

impl ModPatch for ProjectE1211 {
    fn name(&self) -> &'static str {
        LAYOUT_1_21.name
    }

    fn run(&self, tree: &ExtractedTree, options: &PatchOptions) -> Result<()> {
        LAYOUT_1_21.apply(tree, options)
    }
}

impl Layout {
    fn apply(&self, tree: &ExtractedTree, options: &PatchOptions) -> Result<()> {
        self.delete_content(tree)?;
        self.modify_recipes(tree)?;
        self.modify_emc(tree)?;
        self.modify_lang(tree, options)?;
        self.modify_metadata(tree)?;
        super::replace_textures(tree, options, TABLET_TEXTURE, TABLE_TOP_TEXTURE)
    }

    fn delete_content(&self, tree: &ExtractedTree) -> Result<()> {
        let recipes = tree.remove_files(self.recipes, Retain::Keep(TRANSMUTATION_FILES))?;
        let loot = tree.remove_files(self.loot_tables, Retain::Keep(&["transmutation_table.json"]))?;
        let advancements = tree.remove_files(self.advancements, Retain::Keep(TRANSMUTATION_FILES))?;
        tree.remove_dir(format!("{}/recipes", self.advancements))?;

        tracing::info!(
            "Removed {} recipes, {} loot tables, {} advancements",
            recipes,
            loot,
            advancements
        );
        Ok(())
    }

    fn modify_recipes(&self, tree: &ExtractedTree) -> Result<()> {
        modify_recipe(
            tree,
            format!("{}/transmutation_tablet.json", self.recipes),
            &RecipeEdit::update(&[('D', "minecraft:netherite_block")]),
        )?;
        modify_recipe(
            tree,
            format!("{}/transmutation_table.json", self.recipes),
            &RecipeEdit::update(&[('P', "minecraft:diamond")]),
        )?;
        tree.remove_dir(format!("{}/conversions", self.recipes))?;
        Ok(())
    }

    fn modify_emc(&self, tree: &ExtractedTree) -> Result<()> {
        match self.conversions {
            ConversionLayout::Object => emc::rewrite_object_layout(tree, CONVERSIONS, self.emerald_tag),
            ConversionLayout::List => emc::rewrite_list_layout(tree, CONVERSIONS, self.emerald_tag),
        }
    }

    fn modify_lang(&self, tree: &ExtractedTree, options: &PatchOptions) -> Result<()> {
        let mut lang = tree.read_json(LANG)?;
        let entries = lang
            .as_object_mut()
            .ok_or_else(|| PatchError::structure(LANG, "lang file is not a JSON object"))?;

        let overlay = translations::load_overlay(options)?;
        let currency = translations::currency_keys(&options.currency_name);
        let mut other = translations::other_keys();
        if self.mod_menu_keys {
            other.extend(translations::mod_menu_keys());
        }
        merge_json(entries, &[overlay.as_slice(), currency.as_slice(), other.as_slice()]);

        tree.write_json(LANG, &lang)
    }

    fn modify_metadata(&self, tree: &ExtractedTree) -> Result<()> {
        let mut toml = tree.read_toml(self.mods_toml)?;
        let info = toml
            .get_mut("mods")
            .and_then(toml::Value::as_array_mut)
            .and_then(|mods| mods.first_mut())
            .and_then(toml::Value::as_table_mut)
            .ok_or_else(|| PatchError::structure(self.mods_toml, "no [[mods]] table"))?;

        info.insert("displayName".into(), toml::Value::String(DISPLAY_NAME.into()));
        info.insert("authors".into(), toml::Value::String(AUTHORS.into()));
        info.insert("description".into(), toml::Value::String(DESCRIPTION.into()));

        tree.write_toml(self.mods_toml, &toml)
    }
}
