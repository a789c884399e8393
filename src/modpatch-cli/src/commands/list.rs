//! List supported mods and known releases

use modpatch::ModId;

/// Handle the list command
pub fn handle() {
    for line in lines() {
        println!("{}", line);
    }
}

fn lines() -> Vec<String> {
    let mut lines = Vec::new();
    for mod_id in ModId::ALL {
        lines.push(format!("{}:", mod_id));
        for jar in mod_id.known_jars() {
            lines.push(format!(
                "  {:<45} {}  [{}]",
                jar.file_name,
                jar.md5,
                jar.patch.name()
            ));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_release() {
        let lines = lines();
        assert_eq!(lines[0], "projecte:");
        assert!(lines.iter().any(|l| l == "immersive_aircraft:"));
        assert!(lines
            .iter()
            .any(|l| l.contains("ProjectE-1.12.2-PE1.4.1.jar") && l.contains("[projecte-1.12]")));
        assert_eq!(lines.len(), 2 + 7);
    }
}
