use arena_core::equipment::BUNDLED_EQUIPMENT;
use arena_core::{build_unit, Arena, ArenaConfig, Catalog, ClassTable, Side};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_full_battle(c: &mut Criterion) {
    let catalog = Catalog::bundled().expect("bundled equipment loads");
    let classes = ClassTable::standard();
    let player = build_unit(
        &catalog,
        &classes,
        "Ayla",
        "rogue",
        Some("sword"),
        Some("leather"),
        Side::Player,
    )
    .expect("player builds");
    let enemy = build_unit(
        &catalog,
        &classes,
        "Grub",
        "warrior",
        Some("axe"),
        Some("chainmail"),
        Side::Enemy,
    )
    .expect("enemy builds");

    // No regeneration keeps every battle finite
    let config = ArenaConfig {
        stamina_per_round: 0.0,
        ..ArenaConfig::seeded(7)
    };

    c.bench_function("full_battle", |b| {
        b.iter(|| {
            let mut arena = Arena::new(config.clone());
            arena.start(player.clone(), enemy.clone());
            while arena.is_running() {
                black_box(arena.hit());
            }
            black_box(arena.current_result().outcome)
        })
    });
}

fn bench_catalog_load(c: &mut Criterion) {
    c.bench_function("catalog_load", |b| {
        b.iter(|| Catalog::load(black_box(BUNDLED_EQUIPMENT)))
    });
}

criterion_group!(benches, bench_full_battle, bench_catalog_load);
criterion_main!(benches);
