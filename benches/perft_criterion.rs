use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use drawback_chess::game_state::chess_types::GameState;
use drawback_chess::game_state::drawbacks::lookup_drawback;
use drawback_chess::move_generation::perft::{perft, perft_parallel};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    /// Known leaf counts per depth, checked before timing. Empty means unchecked.
    expected_nodes: &'static [u64],
    depth: u8,
}

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: STARTPOS_FEN,
        expected_nodes: &[20, 400, 8902],
        depth: 3,
    },
    BenchCase {
        name: "castling_middlegame",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[],
        depth: 3,
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[],
        depth: 4,
    },
];

fn bench_depth() -> Option<u8> {
    std::env::var("DRAWBACK_BENCH_DEPTH")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");

        // Correctness guard before benchmarking.
        for (depth_idx, expected) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;
            assert_eq!(
                perft(&game, depth),
                *expected,
                "node mismatch for {} depth {}",
                case.name,
                depth
            );
        }

        let depth = bench_depth().unwrap_or(case.depth);
        let nodes = perft(&game, depth);
        group.throughput(Throughput::Elements(nodes));

        group.bench_with_input(
            BenchmarkId::new(case.name, format!("d{depth}")),
            &depth,
            |b, &depth| b.iter(|| black_box(perft(black_box(&game), depth))),
        );
        group.bench_with_input(
            BenchmarkId::new(format!("{}_parallel", case.name), format!("d{depth}")),
            &depth,
            |b, &depth| b.iter(|| black_box(perft_parallel(black_box(&game), depth).nodes)),
        );
    }

    group.finish();
}

fn bench_drawback_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_drawbacks");
    group.sample_size(20);

    for key in ["no_knights", "no_queen_moves", "no_king_captures"] {
        let drawback = lookup_drawback(key).expect("registered drawback");
        let game = GameState::with_drawbacks(Some(drawback), Some(drawback));
        group.bench_function(BenchmarkId::from_parameter(key), |b| {
            b.iter(|| black_box(perft(black_box(&game), 3)))
        });
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft, bench_drawback_filtering);
criterion_main!(perft_benches);
