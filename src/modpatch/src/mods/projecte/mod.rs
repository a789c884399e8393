//! ProjectE "transaction edition".
//!
//! Every rule set follows the same plan: strip recipes, loot tables and
//! advancements down to the transmutation table and tablet, make those two
//! craftable from vanilla materials, rewrite EMC values, rename EMC to the
//! configured currency, relabel the mod, and recolour the tablet textures.
//! The releases differ in where those files live and how they are encoded.

pub mod emc;
mod legacy;
mod modern;
pub mod translations;

pub use legacy::ProjectE1122;
pub use modern::{ProjectE1201, ProjectE1211};

use crate::error::Result;
use crate::mods::PatchOptions;
use crate::paint;
use crate::tree::ExtractedTree;

const MOD_NAME: &str = "projecte";

const DISPLAY_NAME: &str = "等价交换 (交易版)";
const AUTHORS: &str = "SinKillerJ, MaPePeR, williewillus, Lilylicious, pupnewfster, dongwen";
const DESCRIPTION: &str = "Transaction Edition of ProjectE, modified by dongwen.";

/// Replacement transmutation GUI, looked up under `<assets_dir>/projecte/`
pub const GUI_ASSET: &str = "transmute.png";
const GUI_TEXTURE: &str = "assets/projecte/textures/gui/transmute.png";

const TRANSMUTATION_FILES: &[&str] = &["transmutation_table.json", "transmutation_tablet.json"];

/// Recolour the tablet, reuse it as the table top, and install the GUI texture
fn replace_textures(
    tree: &ExtractedTree,
    options: &PatchOptions,
    tablet: &str,
    table_top: &str,
) -> Result<()> {
    let palette = paint::palette(&options.palette)?;

    let tablet_path = tree.path(tablet);
    palette.paint(&tablet_path, &tablet_path)?;
    palette.paint(&tablet_path, &tree.path(table_top))?;

    match options.asset(MOD_NAME, GUI_ASSET) {
        Some(src) => {
            tree.copy_in(&src, GUI_TEXTURE)?;
            tracing::debug!("Installed {}", GUI_TEXTURE);
        }
        None => tracing::warn!(
            "No {}/{} in the assets directory, keeping the original GUI texture",
            MOD_NAME,
            GUI_ASSET
        ),
    }
    Ok(())
}
