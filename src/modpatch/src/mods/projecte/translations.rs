//! zh_cn translation overrides: "EMC" becomes the configured currency name and
//! the transmutation blocks are renamed as a trading terminal.

use std::fs;

use serde_json::Value;

use crate::error::{PatchError, Result};
use crate::mods::PatchOptions;

type Pairs = Vec<(String, String)>;

/// File name of the optional translation overlay under `<assets_dir>/projecte/`
pub const OVERLAY_FILE: &str = "remain_i18n.json";

fn pairs<const N: usize>(entries: [(&str, String); N]) -> Pairs {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Currency keys of the JSON lang files (1.16.5 and later)
pub fn currency_keys(n: &str) -> Pairs {
    pairs([
        ("command.projecte.dump_missing_emc.multiple_missing", format!("%s 物品缺少{n}值，打印到服务器日志。")),
        ("command.projecte.dump_missing_emc.none_missing", format!("所有物品都有一个{n}值。")),
        ("command.projecte.dump_missing_emc.one_missing", format!("一个物品缺少{n}值，打印到服务器日志。")),
        ("command.projecte.emc.add.success", format!("已为 %s 增加 %s {n}。")),
        ("command.projecte.emc.get.success", format!("%s 拥有 %s {n}。")),
        ("command.projecte.emc.negative", format!("无法从 %s 移除 %s {n}，否则其 {n} 将为负数。")),
        ("command.projecte.emc.remove.success", format!("已从 %s 移除 %s {n}。")),
        ("command.projecte.emc.set.success", format!("已将 %s 的 {n} 设为 %s。")),
        ("command.projecte.emc.test.fail", format!("%s 的 {n} 不足，无法移除 %s。")),
        ("command.projecte.emc.test.success", format!("%s 的 {n} 足以移除 %s。")),
        ("command.projecte.knowledge.invalid", format!("物品 %s 没有 {n} 值，无法售出。")),
        ("config.jade.plugin_projecte.emc_provider", format!("{n} 提供者")),
        ("emc.projecte.emc", format!("%s {n}")),
        ("emc.projecte.tooltip", format!("{n}: %s")),
        ("emc.projecte.tooltip.stack.with_sell", format!("堆叠 {n}: %s (%s)")),
        ("emc.projecte.tooltip.with_sell", format!("{n}: %s (%s)")),
        ("command.projecte.remove.success", format!("成功移除 %s 的{n}值.")),
        ("command.projecte.reset.success", format!("成功修改\"%s\"的{n}值。")),
        ("command.projecte.set.success", format!("已将 %s 的{n}值设为 %s.")),
        ("divining_rod.projecte.avg_emc", format!("平均{n}值为%s，共%s个方块")),
        ("divining_rod.projecte.max_emc", format!("最高{n}：%s")),
        ("divining_rod.projecte.second_max", format!("第二高{n}：%s")),
        ("divining_rod.projecte.third_max", format!("第三高{n}：%s")),
        ("emc.projecte.max_gen_rate", format!("最高收集效率： %s {n}/s")),
        ("emc.projecte.max_output_rate", format!("最高输出效率： %s {n}/s")),
        ("emc.projecte.max_storage", format!("{n}上限： %s {n}")),
        ("emc.projecte.tooltip.stack", format!("{n}总和： %s")),
        ("emc.projecte.stored", format!("{n}存储： %s")),
        ("emc.projecte.too_much", format!("{n}已达到上限！")),
        ("tooltip.projecte.evertide.4", format!("使用无需消耗{n}！")),
        ("tooltip.projecte.volcanite.4", format!("使用需消耗32 {n}")),
        ("advancements.projecte.klein_star", format!("{n} 电池!")),
        ("advancements.projecte.klein_star.description", format!("储存{n}以备不时之需!")),
        ("advancements.projecte.klein_star_big", format!("大容量的{n}电池")),
    ])
}

/// Block, item and advancement renames of the JSON lang files
pub fn other_keys() -> Pairs {
    pairs([
        ("block.projecte.transmutation_table", "交易台".to_string()),
        ("item.projecte.transmutation_tablet", "交易终端".to_string()),
        ("tooltip.projecte.tome", "放入交易台可售出全部物品（创造专属）".to_string()),
        ("transmutation.projecte.transmute", "交易台".to_string()),
        ("advancements.projecte.transmutation_table", "交易物品！".to_string()),
        ("advancements.projecte.transmutation_tablet", "更先进的交易！".to_string()),
    ])
}

/// NeoForge mod list entries (1.21)
pub fn mod_menu_keys() -> Pairs {
    pairs([
        ("fml.menu.mods.info.description.projecte", super::DESCRIPTION.to_string()),
        ("fml.menu.mods.info.displayname.projecte", "等价交换（交易版）".to_string()),
    ])
}

/// Currency keys of the 1.12.2 `.lang` file
pub fn legacy_currency_keys(n: &str) -> Pairs {
    pairs([
        ("pe.command.remove.success", format!("成功移除 %s 的{n}值.")),
        ("pe.command.reset.success", format!("成功修改\"%s\"的{n}值。")),
        ("pe.command.set.success", format!("已将 %s 的{n}值设为 %s.")),
        ("pe.divining.avgemc", format!("平均{n}值为%s，共%s个方块")),
        ("pe.divining.maxemc", format!("最高{n}：%s")),
        ("pe.divining.secondmax", format!("第二高{n}：%s")),
        ("pe.divining.thirdmax", format!("第三高{n}：%s")),
        ("pe.emc.emc_tooltip_prefix", format!("{n}：")),
        ("pe.emc.maxgenrate_tooltip", "最高充能效率：".to_string()),
        ("pe.emc.maxoutrate_tooltip", "最高输出效率：".to_string()),
        ("pe.emc.maxstorage_tooltip", "能量上限：".to_string()),
        ("pe.emc.name", n.to_string()),
        ("pe.emc.rate", format!("{n}/s")),
        ("pe.emc.stackemc_tooltip_prefix", format!("{n}总和：")),
        ("pe.emc.storedemc_tooltip", format!("{n}存储：")),
        ("pe.emc.too_much", format!("{n}能量已达到上限！")),
        ("pe.evertide.tooltip4", format!("使用无需消耗{n}！")),
        ("pe.volcanite.tooltip4", format!("使用需消耗32{n}")),
        ("advancements.pe_klein", format!("{n}能量电池!")),
        ("advancements.pe_klein.desc", format!("储存{n}以备不时之需!")),
        ("advancements.pe_klein_big", format!("大容量的{n}能量电池")),
    ])
}

pub fn legacy_other_keys() -> Pairs {
    pairs([
        ("tile.pe_transmutation_stone.name", "交易台".to_string()),
        ("item.pe_transmutation_tablet.name", "交易终端".to_string()),
        ("advancements.pe_transmutation", "交易物品！".to_string()),
        ("advancements.pe_transmutation.desc", "开始亦是结束".to_string()),
        ("advancements.pe_portable_transmutation", "更先进的交易！".to_string()),
        ("advancements.pe_portable_transmutation.desc", "这太美妙了!".to_string()),
        ("pe.transmutation.transmute", "交易台".to_string()),
    ])
}

const LEGACY_PREFIXES: &[(&str, &str)] = &[
    ("command.projecte.", "pe.command."),
    ("emc.projecte.", "pe.emc."),
    ("advancements.projecte.", "advancements.pe_"),
    ("block.projecte.", "tile.pe_"),
    ("item.projecte.", "item.pe_"),
    ("transmutation.projecte.", "pe.transmutation."),
];

/// Map a modern translation key onto its 1.12.2 spelling
pub fn legacy_lang_key(key: &str) -> String {
    LEGACY_PREFIXES
        .iter()
        .find_map(|(modern, legacy)| {
            key.strip_prefix(modern)
                .map(|rest| format!("{}{}", legacy, rest))
        })
        .unwrap_or_else(|| key.to_string())
}

/// Translations from the optional overlay file, in file order
///
/// Returns an empty list (and logs a warning) when no overlay is configured.
pub fn load_overlay(options: &PatchOptions) -> Result<Pairs> {
    let Some(path) = options.asset("projecte", OVERLAY_FILE) else {
        tracing::warn!(
            "No projecte/{} in the assets directory, skipping translation overlay",
            OVERLAY_FILE
        );
        return Ok(Vec::new());
    };

    let text = fs::read_to_string(&path).map_err(|e| PatchError::io(&path, e))?;
    let value: Value = serde_json::from_str(&text).map_err(|source| PatchError::Json {
        path: path.clone(),
        source,
    })?;
    let object = value
        .as_object()
        .ok_or_else(|| PatchError::structure(&path, "overlay is not a JSON object"))?;

    Ok(object
        .iter()
        .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string())))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_name_substituted() {
        let keys = currency_keys("Credits");
        assert_eq!(keys.len(), 34);
        let tooltip = keys
            .iter()
            .find(|(k, _)| k == "emc.projecte.tooltip")
            .map(|(_, v)| v.as_str());
        assert_eq!(tooltip, Some("Credits: %s"));
        assert!(keys.iter().all(|(_, v)| !v.contains("EMC")));
    }

    #[test]
    fn test_legacy_currency_keys() {
        let keys = legacy_currency_keys("Coins");
        assert!(keys.contains(&("pe.emc.name".to_string(), "Coins".to_string())));
        assert!(keys.contains(&("pe.emc.rate".to_string(), "Coins/s".to_string())));
    }

    #[test]
    fn test_legacy_lang_key() {
        assert_eq!(legacy_lang_key("command.projecte.set.success"), "pe.command.set.success");
        assert_eq!(legacy_lang_key("block.projecte.condenser"), "tile.pe_condenser");
        assert_eq!(legacy_lang_key("advancements.projecte.klein_star"), "advancements.pe_klein_star");
        assert_eq!(legacy_lang_key("gui.projecte.title"), "gui.projecte.title");
    }

    #[test]
    fn test_overlay_absent() {
        assert!(load_overlay(&PatchOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_overlay_loaded_in_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("projecte")).unwrap();
        std::fs::write(
            temp_dir.path().join("projecte").join(OVERLAY_FILE),
            r#"{"z.key": "Z", "a.key": "A", "n.key": 3}"#,
        )
        .unwrap();

        let options = PatchOptions {
            assets_dir: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let overlay = load_overlay(&options).unwrap();
        assert_eq!(
            overlay,
            vec![
                ("z.key".to_string(), "Z".to_string()),
                ("a.key".to_string(), "A".to_string()),
            ]
        );
    }
}
