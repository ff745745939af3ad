//! Level-Up Wizard - Feat Picker CLI
//!
//! Loads a feat catalog, opens a selector for one slot, applies the filter
//! flags and prints the resulting view. `--select` picks a feat and prints the
//! selection event.

use std::path::PathBuf;

use clap::Parser;
use levelup_wizard::core::config::DEFAULT_LOG_FILTER;
use levelup_wizard::core::error::Result;
use levelup_wizard::core::types::{FeatCategory, FeatId, Level};
use levelup_wizard::core::WizardSettings;
use levelup_wizard::feats::{CriteriaChange, FeatCatalog, Skill, SortMethod};
use levelup_wizard::host::{CharacterSheet, MemoryHost};
use levelup_wizard::selector::FeatSelector;
use tokio::sync::mpsc::unbounded_channel;
use tracing_subscriber::EnvFilter;

/// Feat picker - filter, sort and select feats from a catalog
#[derive(Parser, Debug)]
#[command(name = "levelup-wizard")]
#[command(about = "Filter, sort and select feats for a level-up slot")]
struct Args {
    /// JSON feat catalog
    #[arg(long)]
    catalog: PathBuf,

    /// TOML settings file (feat-sort-method, show-feat-prerequisites)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Slot category: class, dual-class, archetype, skill, general, ancestry, ancestry-paragon
    #[arg(long, default_value = "class")]
    category: FeatCategory,

    /// Level the character is advancing to
    #[arg(long, default_value_t = 1)]
    level: Level,

    /// Character name shown in the title
    #[arg(long, default_value = "Adventurer")]
    actor: String,

    /// Minimum feat level (non-numeric means unbounded)
    #[arg(long)]
    min_level: Option<String>,

    /// Maximum feat level (non-numeric means unbounded)
    #[arg(long)]
    max_level: Option<String>,

    /// Case-insensitive name search
    #[arg(long)]
    search: Option<String>,

    /// Only feats whose prerequisites name one of these skills
    #[arg(long = "skill")]
    skills: Vec<Skill>,

    /// Override the sort, e.g. ALPHA_ASC or LEVEL_DESC
    #[arg(long)]
    sort: Option<SortMethod>,

    /// Include archetype feats
    #[arg(long)]
    archetypes: bool,

    /// Only feats requiring a matching dedication
    #[arg(long)]
    dedication: Option<String>,

    /// Select a feat by id and print the selection event
    #[arg(long)]
    select: Option<String>,

    /// Post a feat to chat by id
    #[arg(long)]
    chat: Option<String>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

impl Args {
    fn criteria_changes(&self) -> Vec<CriteriaChange> {
        let mut changes = Vec::new();
        if let Some(raw) = &self.min_level {
            changes.push(CriteriaChange::MinLevelInput(raw.clone()));
        }
        if let Some(raw) = &self.max_level {
            changes.push(CriteriaChange::MaxLevelInput(raw.clone()));
        }
        if let Some(text) = &self.search {
            changes.push(CriteriaChange::Search(text.clone()));
        }
        for skill in &self.skills {
            changes.push(CriteriaChange::Skill {
                skill: *skill,
                checked: true,
            });
        }
        if let Some(sort) = self.sort {
            changes.push(CriteriaChange::SortKey(sort.key));
            changes.push(CriteriaChange::SortDirection(sort.direction));
        }
        if self.archetypes {
            changes.push(CriteriaChange::IncludeArchetypeFeats(true));
        }
        if let Some(text) = &self.dedication {
            changes.push(CriteriaChange::DedicationSearch(text.clone()));
        }
        changes
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => WizardSettings::load(path)?,
        None => WizardSettings::default(),
    };
    let catalog = FeatCatalog::load(&args.catalog)?;
    tracing::info!("Loaded {} feats from {}", catalog.len(), args.catalog.display());

    let mut host = MemoryHost::new(catalog)
        .with_preference(
            levelup_wizard::core::config::FEAT_SORT_METHOD_KEY,
            &settings.feat_sort_method,
        )
        .with_preference(
            levelup_wizard::core::config::SHOW_FEAT_PREREQUISITES_KEY,
            &settings.show_feat_prerequisites.to_string(),
        )
        .with_character(&args.actor, CharacterSheet::new(args.level.saturating_sub(1)));

    let (events, mut selections) = unbounded_channel();
    let mut selector = FeatSelector::open(&host, &args.actor, args.category, args.level, events)?;
    selector.apply_all(args.criteria_changes())?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&selector.context())?),
        _ => print!("{}", selector.render(&host)?),
    }

    if let Some(id) = &args.chat {
        selector.send_to_chat(&mut host, &FeatId::new(id.as_str()))?;
    }

    if let Some(id) = &args.select {
        selector.select(&FeatId::new(id.as_str()))?;
        while let Ok(event) = selections.try_recv() {
            match args.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&event)?),
                _ => println!(
                    "Selected {} ({}) for the {} slot",
                    event.feat.name,
                    event.feat_id(),
                    event.category
                ),
            }
        }
    }

    Ok(())
}
