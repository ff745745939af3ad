//! Recompute cost for a realistic candidate list

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use levelup_wizard::core::types::FeatCategory;
use levelup_wizard::feats::{compute_view, FeatRecord, FilterCriteria, Skill};

const PREREQUISITES: [&str; 5] = [
    "trained in Athletics",
    "expert in Stealth",
    "Fighter Dedication",
    "Wis 14",
    "master in Medicine",
];

fn catalog(size: usize) -> Vec<FeatRecord> {
    (0..size)
        .map(|i| {
            let mut feat = FeatRecord::new(format!("feat-{}", i), format!("Feat Number {}", i), (i % 20) as u32)
                .with_prerequisite(PREREQUISITES[i % PREREQUISITES.len()]);
            if i % 4 == 0 {
                feat = feat.with_trait("archetype");
            }
            feat
        })
        .collect()
}

fn bench_compute_view(c: &mut Criterion) {
    let feats = catalog(300);

    let criteria = FilterCriteria::default();
    c.bench_function("compute_view_unfiltered_300", |b| {
        b.iter(|| compute_view(black_box(&feats), black_box(&criteria), FeatCategory::Class).len())
    });

    let mut criteria = FilterCriteria::with_sort("ALPHA_ASC".parse().expect("valid sort"));
    criteria.set_include_archetype_feats(true);
    criteria.set_search("1");
    criteria.set_skill(Skill::Athletics, true);
    criteria.set_skill(Skill::Stealth, true);
    criteria.set_dedication_search("fighter");
    c.bench_function("compute_view_all_filters_300", |b| {
        b.iter(|| compute_view(black_box(&feats), black_box(&criteria), FeatCategory::Class).len())
    });
}

criterion_group!(benches, bench_compute_view);
criterion_main!(benches);
