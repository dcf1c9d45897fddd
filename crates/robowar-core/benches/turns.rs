use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use robowar_core::protocol::{Position, RobotKind};
use robowar_core::{Board, GameRng, Simulation};

fn make_sim(side: u32) -> Simulation {
    let mut sim = Simulation::new(Board::new(side, side), GameRng::seed_from_u64(42));
    let count = (side / 2) as usize;
    for i in 0..count {
        let kind = RobotKind::ALL[i % RobotKind::ALL.len()];
        let pos = Position::new((i * 2) as i32 % side as i32, (i * 7) as i32 % side as i32);
        if sim.occupant_at(pos).is_none() {
            let _ = sim.spawn(format!("R{i}"), kind, pos);
        }
    }
    sim
}

fn bench_turns(c: &mut Criterion) {
    let mut group = c.benchmark_group("robowar/advance_turn");

    for &side in &[20u32, 80u32] {
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, &side| {
            b.iter_batched(
                || make_sim(side),
                |mut sim| {
                    for _ in 0..10 {
                        black_box(sim.advance_turn().unwrap());
                    }
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_turns);
criterion_main!(benches);
