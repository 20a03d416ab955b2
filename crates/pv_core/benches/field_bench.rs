//! Grid generation and per-instant analysis at playback/static resolutions.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pv_core::analysis::PossessionAnalyzer;
use pv_core::config::EngineConfig;
use pv_core::control::ControlModel;
use pv_core::snapshot::{Ball, Mover, PossessionSnapshot, Role};
use pv_core::value::ValueModel;

fn eleven_v_eleven() -> PossessionSnapshot {
    const ROLES: [Role; 11] = [
        Role::Goalkeeper,
        Role::FullBack,
        Role::CentreBack,
        Role::CentreBack,
        Role::FullBack,
        Role::DefensiveMidfielder,
        Role::CentralMidfielder,
        Role::AttackingMidfielder,
        Role::Winger,
        Role::Winger,
        Role::Striker,
    ];
    const SHAPE: [(f32, f32); 11] = [
        (-48.0, 0.0),
        (-25.0, -25.0),
        (-30.0, -8.0),
        (-30.0, 8.0),
        (-25.0, 25.0),
        (-15.0, 0.0),
        (-5.0, -10.0),
        (5.0, 8.0),
        (12.0, -28.0),
        (12.0, 28.0),
        (20.0, 0.0),
    ];

    let team = ROLES
        .iter()
        .zip(SHAPE)
        .enumerate()
        .map(|(i, (&role, (x, y)))| Mover::new(i as u32 + 1, role, x, y).with_velocity(2.0, 0.5))
        .collect();
    let opponent = ROLES
        .iter()
        .zip(SHAPE)
        .enumerate()
        .map(|(i, (&role, (x, y)))| Mover::new(i as u32 + 101, role, -x * 0.8, -y).with_velocity(-1.0, 0.0))
        .collect();
    PossessionSnapshot::new(team, opponent, Ball::at(-5.0, -10.0), true)
}

fn bench_control_field(c: &mut Criterion) {
    let config = EngineConfig::default();
    let model = ControlModel::new(&config);
    let snapshot = eleven_v_eleven();

    let mut group = c.benchmark_group("control_field");
    for resolution in [4.0_f32, 2.0, 1.0] {
        group.bench_with_input(BenchmarkId::from_parameter(resolution), &resolution, |b, &res| {
            b.iter(|| model.generate_for(black_box(&snapshot), res))
        });
    }
    group.finish();
}

fn bench_value_field(c: &mut Criterion) {
    let config = EngineConfig::default();
    let model = ValueModel::new(&config);
    let snapshot = eleven_v_eleven();
    c.bench_function("value_field_2m", |b| {
        b.iter(|| model.generate_value_field(black_box(&snapshot), 2.0))
    });
}

fn bench_analysis(c: &mut Criterion) {
    let config = EngineConfig::default();
    let analyzer = PossessionAnalyzer::new(&config);
    let snapshot = eleven_v_eleven();
    c.bench_function("analyze_2m", |b| {
        b.iter(|| analyzer.analyze(black_box(&snapshot), None, 2.0))
    });
}

criterion_group!(benches, bench_control_field, bench_value_field, bench_analysis);
criterion_main!(benches);
