//! Build script: reads /cards/templates.json and generates Rust source code
//! that statically constructs every card template.
//! The core crate embeds template data without any runtime JSON parsing.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;

// ── JSON schema types (build-time only) ──────────────────────────────────────

#[derive(Deserialize)]
struct JsonTemplate {
    id: u16,
    name: String,
    faction: String,
    rarity: String,
    weight: u32,
    stats: JsonStats,
}

#[derive(Deserialize)]
struct JsonStats {
    compute: u32,
    memory: u32,
    logic: u32,
    creativity: u32,
    speed: u32,
    resilience: u32,
}

const FACTIONS: &[&str] = &["Sentinel", "Oracle", "Forge", "Swarm", "Cipher"];
const RARITIES: &[&str] = &["Common", "Rare", "Epic", "Legendary"];

// ── Code generation helpers ──────────────────────────────────────────────────

fn gen_template(template: &JsonTemplate) -> String {
    let id = template.id;
    let name = template.name.replace('"', "\\\"");
    let faction = &template.faction;
    let rarity = &template.rarity;
    let weight = template.weight;
    let s = &template.stats;

    format!(
        r#"    CardTemplate {{
        id: TemplateId({id}),
        name: "{name}",
        faction: Faction::{faction},
        rarity: Rarity::{rarity},
        weight: {weight},
        base: CardStats {{
            compute: {},
            memory: {},
            logic: {},
            creativity: {},
            speed: {},
            resilience: {},
        }},
    }}"#,
        s.compute, s.memory, s.logic, s.creativity, s.speed, s.resilience
    )
}

fn validate(templates: &[JsonTemplate]) {
    let mut seen = BTreeSet::new();
    for t in templates {
        if !seen.insert(t.id) {
            panic!("Duplicate template id {}", t.id);
        }
        if !FACTIONS.contains(&t.faction.as_str()) {
            panic!("Unknown faction '{}' on template {}", t.faction, t.id);
        }
        if !RARITIES.contains(&t.rarity.as_str()) {
            panic!("Unknown rarity '{}' on template {}", t.rarity, t.id);
        }
    }
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let templates_path = Path::new(&manifest_dir).join("../cards/templates.json");

    println!("cargo:rerun-if-changed={}", templates_path.display());

    let templates_json = fs::read_to_string(&templates_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", templates_path.display()));
    let templates: Vec<JsonTemplate> =
        serde_json::from_str(&templates_json).expect("Failed to parse templates.json");
    validate(&templates);

    let entries: Vec<String> = templates.iter().map(gen_template).collect();

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest = Path::new(&out_dir).join("templates_generated.rs");

    let generated = format!(
        r#"// Auto-generated from templates.json, DO NOT EDIT

/// Every card template defined in templates.json.
pub static TEMPLATES: &[CardTemplate] = &[
{}
];
"#,
        entries.join(",\n"),
    );

    fs::write(&dest, generated).expect("Failed to write generated templates file");
}
