use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use mines_core::*;
use std::hint::black_box;

fn generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for preset in [Preset::Beginner, Preset::Intermediate, Preset::Expert] {
        let config = preset.config();
        group.bench_function(format!("{preset:?}"), |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                Minefield::generate(black_box(config), RandomLayoutGenerator::new(seed)).unwrap()
            })
        });
    }
    group.finish();
}

fn cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");
    for (height, width, mines) in [(16, 30, 0), (255, 255, 0), (255, 255, 2000)] {
        let field = Minefield::random(height, width, mines, 7).unwrap();
        let start = field
            .iter()
            .find(|(_, cell)| !cell.is_mined() && cell.mines_around() == 0)
            .map(|(coords, _)| coords)
            .unwrap_or((0, 0));
        group.bench_function(format!("{width}x{height}/{mines}"), |b| {
            b.iter_batched(
                || field.clone(),
                |mut field| field.open(black_box(start)),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, generate, cascade);
criterion_main!(benches);
