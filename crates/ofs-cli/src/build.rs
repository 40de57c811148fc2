//! # Build Subcommand
//!
//! Turns the `scripts/` sources into deployable artifacts: each script is
//! copied into the output directory under its digest-derived name, and a
//! deterministic `manifest.json` records every name, digest, and size.
//! The manifest digests are what callers pin when they request remote
//! execution.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::{Deserialize, Serialize};

use ofs_core::{ScriptDigest, ScriptSource};

/// Arguments for the `ofs build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory holding the deployable script sources.
    #[arg(long, default_value = "crates/ofs-cli/scripts")]
    pub scripts: PathBuf,

    /// Output directory for artifacts and the manifest.
    #[arg(long, default_value = "dist")]
    pub out: PathBuf,
}

/// One built script artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Script file stem.
    pub name: String,
    /// Digest of the exact source bytes.
    pub digest: ScriptDigest,
    /// Source size in bytes.
    pub size_bytes: u64,
}

/// The build output index, keyed by script name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptManifest {
    /// When this manifest was produced.
    pub built_at: DateTime<Utc>,
    /// Entries in name order.
    pub scripts: BTreeMap<String, ManifestEntry>,
}

/// Execute the build subcommand.
pub fn run_build(args: &BuildArgs) -> Result<u8> {
    let manifest = build_scripts(&args.scripts, &args.out)?;
    for entry in manifest.scripts.values() {
        println!("{}  {}  {} bytes", entry.digest, entry.name, entry.size_bytes);
    }
    println!(
        "OK: built {} scripts -> {}",
        manifest.scripts.len(),
        args.out.display()
    );
    Ok(0)
}

/// Read every `.js` source under `scripts_dir`, write digest-named
/// artifact copies and the manifest under `out_dir`.
pub fn build_scripts(scripts_dir: &Path, out_dir: &Path) -> Result<ScriptManifest> {
    if !scripts_dir.is_dir() {
        bail!("scripts directory not found: {}", scripts_dir.display());
    }
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut scripts = BTreeMap::new();
    let mut paths: Vec<PathBuf> = std::fs::read_dir(scripts_dir)
        .with_context(|| format!("failed to read {}", scripts_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "js"))
        .collect();
    paths.sort();

    for path in paths {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let source = ScriptSource::read_from(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let digest = ScriptDigest::of_source(&source);

        let artifact = out_dir.join(format!("{}.js", digest.to_hex()));
        std::fs::write(&artifact, source.as_bytes())
            .with_context(|| format!("failed to write {}", artifact.display()))?;

        tracing::info!(name = %name, digest = %digest, "built script artifact");
        scripts.insert(
            name.clone(),
            ManifestEntry {
                name,
                digest,
                size_bytes: source.len() as u64,
            },
        );
    }

    let manifest = ScriptManifest {
        built_at: Utc::now(),
        scripts,
    };
    let manifest_path = out_dir.join("manifest.json");
    let rendered = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(&manifest_path, rendered)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_script(dir: &Path, name: &str, text: &str) {
        std::fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn build_produces_manifest_and_digest_named_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let scripts = tmp.path().join("scripts");
        let out = tmp.path().join("dist");
        std::fs::create_dir_all(&scripts).unwrap();
        write_script(&scripts, "a.js", "return 1+1;");
        write_script(&scripts, "b.js", "return 2+2;");
        write_script(&scripts, "notes.txt", "not a script");

        let manifest = build_scripts(&scripts, &out).unwrap();
        assert_eq!(manifest.scripts.len(), 2);

        let a = &manifest.scripts["a"];
        assert_eq!(
            a.digest.to_string(),
            "0xaae1dac37219f0d261f7461a68aa5af02e7e1a1b44961a8637e630ca13654b8d"
        );
        assert_eq!(a.size_bytes, 11);
        assert!(out.join(format!("{}.js", a.digest.to_hex())).is_file());
        assert!(out.join("manifest.json").is_file());
    }

    #[test]
    fn rebuild_is_deterministic_in_digests_and_order() {
        let tmp = tempfile::tempdir().unwrap();
        let scripts = tmp.path().join("scripts");
        std::fs::create_dir_all(&scripts).unwrap();
        write_script(&scripts, "z.js", "const z = 1;");
        write_script(&scripts, "a.js", "const a = 1;");

        let first = build_scripts(&scripts, &tmp.path().join("out1")).unwrap();
        let second = build_scripts(&scripts, &tmp.path().join("out2")).unwrap();

        let names: Vec<&String> = first.scripts.keys().collect();
        assert_eq!(names, vec!["a", "z"]);
        assert_eq!(
            first.scripts.values().collect::<Vec<_>>(),
            second.scripts.values().collect::<Vec<_>>()
        );
    }

    #[test]
    fn missing_scripts_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let result = build_scripts(&tmp.path().join("nope"), &tmp.path().join("dist"));
        assert!(result.is_err());
    }

    #[test]
    fn repo_scripts_match_the_pinned_modules() {
        // The shipped scripts directory must stay in sync with the
        // digests the native modules register under.
        let engine = crate::scripts::default_engine();
        let pinned: Vec<ScriptDigest> = engine.modules().iter().map(|(_, d)| *d).collect();

        for file in ["get_balances.js", "relay_transaction.js"] {
            let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scripts").join(file);
            let digest = ScriptDigest::of_source(&ScriptSource::read_from(path).unwrap());
            assert!(pinned.contains(&digest), "{file} is not pinned");
        }
    }
}
