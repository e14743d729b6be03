use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tierlist_core::{EditorConfig, EditorSession, load_config, load_default_config, raw_collection};
use tierlist_model::{OperatorCatalog, OperatorInfo, SyncPayload};
use tierlist_sync::{FileStore, TierListBackend, save_session};
use tracing::{info, info_span};

use tierlist_cli::script::{ScriptRunner, parse_script};

use crate::cli::{CandidatesArgs, EditArgs, PlanArgs, ShowArgs, SlugArgs};
use crate::summary::{
    print_candidates, print_dirty_report, print_plan, print_saved, print_slugs, print_tier_list,
};

/// Explicit config paths must load; the default path falls back to defaults.
pub fn editor_config(path: Option<&Path>) -> Result<EditorConfig> {
    match path {
        Some(path) => load_config(path).with_context(|| format!("load config {}", path.display())),
        None => Ok(load_default_config()),
    }
}

pub fn run_show(args: &ShowArgs, config: EditorConfig) -> Result<()> {
    let store = FileStore::new(&args.store.store);
    let Some(slug) = &args.slug else {
        let slugs = store.slugs().context("list tier lists")?;
        print_slugs(&slugs);
        return Ok(());
    };
    let catalog = args.operators.as_deref().map(read_catalog).transpose()?;
    let session = open_session(&store, slug, config)?;
    print_tier_list(session.meta(), session.tiers(), catalog.as_ref());
    Ok(())
}

/// Returns false when the stored tier list breaks an ordering invariant.
pub fn run_check(args: &SlugArgs) -> Result<bool> {
    let _span = info_span!("check", slug = %args.slug).entered();
    let store = FileStore::new(&args.store.store);
    let snapshot = store
        .fetch(&args.slug)
        .with_context(|| format!("load tier list {}", args.slug))?;

    let mut ok = true;
    match raw_collection(&snapshot) {
        Ok(collection) => {
            if let Err(violation) = collection.check_invariants() {
                println!("✗ {violation}");
                ok = false;
            }
            for (operator, count) in collection.duplicate_operators() {
                println!("✗ operator {operator} is placed {count} times");
                ok = false;
            }
        }
        Err(error) => {
            println!("✗ {error}");
            ok = false;
        }
    }
    if ok {
        println!(
            "✓ {}: {} tiers, {} placements",
            args.slug,
            snapshot.tiers.len(),
            snapshot.placement_count()
        );
    }
    Ok(ok)
}

pub fn run_edit(args: &EditArgs, config: EditorConfig) -> Result<()> {
    let _span = info_span!("edit", slug = %args.slug).entered();
    let mut store = FileStore::new(&args.store.store);
    let catalog = args.operators.as_deref().map(read_catalog).transpose()?;
    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("read {}", args.script.display()))?;
    let steps = parse_script(&text)?;

    let mut session = open_session(&store, &args.slug, config)?;
    let report = ScriptRunner::new(catalog.as_ref()).run(&mut session, &steps)?;
    info!(
        steps = report.steps,
        drops = report.drops.len(),
        refused = report.refused.len(),
        "script applied"
    );
    for reason in &report.refused {
        println!("refused: {reason}");
    }
    print_dirty_report(&session.dirty_report(), session.tiers());

    if args.dry_run {
        let request = session.begin_save();
        println!("{}", serde_json::to_string_pretty(&request).context("serialize payload")?);
        return Ok(());
    }
    if !session.has_changes() {
        return Ok(());
    }
    save_session(&mut session, &mut store).context("save tier list")?;
    print_saved(session.slug(), session.tiers());
    Ok(())
}

pub fn run_plan(args: &PlanArgs) -> Result<()> {
    let store = FileStore::new(&args.store.store);
    let payload: SyncPayload = read_json(&args.payload)?;
    let plan = store
        .plan(&args.slug, &payload)
        .with_context(|| format!("plan sync of {}", args.slug))?;
    print_plan(&plan);
    Ok(())
}

pub fn run_candidates(args: &CandidatesArgs, config: EditorConfig) -> Result<()> {
    let store = FileStore::new(&args.store.store);
    let catalog = read_catalog(&args.operators)?;
    let session = open_session(&store, &args.slug, config)?;
    print_candidates(&session.candidates(&catalog, &args.search));
    Ok(())
}

fn open_session(store: &FileStore, slug: &str, config: EditorConfig) -> Result<EditorSession> {
    let snapshot = store
        .fetch(slug)
        .with_context(|| format!("load tier list {slug}"))?;
    EditorSession::load(&snapshot, config).with_context(|| format!("open tier list {slug}"))
}

fn read_catalog(path: &Path) -> Result<OperatorCatalog> {
    let operators: Vec<OperatorInfo> = read_json(path)?;
    Ok(OperatorCatalog::new(operators))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}
