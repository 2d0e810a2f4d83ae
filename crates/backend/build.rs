use std::env;
use std::fs;
use std::path::Path;

/// Places config.toml and the sample data/ directory next to the binary,
/// where `load_config` looks when no path is given.
fn main() {
    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root");

    let source_config = workspace_root.join("config.toml");
    let source_data = workspace_root.join("data");
    println!("cargo:rerun-if-changed={}", source_config.display());
    println!("cargo:rerun-if-changed={}", source_data.display());

    // OUT_DIR is target/<profile>/build/backend-xxx/out
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let profile = env::var("PROFILE").expect("PROFILE not set");
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .expect("Could not find target profile directory");

    if !source_config.exists() {
        println!(
            "cargo:warning=config.toml not found at {:?}, using default config",
            source_config
        );
        return;
    }

    fs::copy(&source_config, target_dir.join("config.toml"))
        .unwrap_or_else(|e| panic!("Failed to copy config.toml: {}", e));

    let Ok(entries) = fs::read_dir(&source_data) else {
        return;
    };
    let dest_data = target_dir.join("data");
    fs::create_dir_all(&dest_data).unwrap_or_else(|e| panic!("Failed to create {:?}: {}", dest_data, e));
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            fs::copy(&path, dest_data.join(entry.file_name()))
                .unwrap_or_else(|e| panic!("Failed to copy {:?}: {}", path, e));
        }
    }
}
