//! Two engines, same bank, same seed, same request.
//! They must select identical questions in identical order.

use examgen_core::{
    engine::ExamEngine,
    question::{NewQuestion, TopicKind},
    request::{CustomRequest, SelectionRequest, SimulatorRequest},
    rng::{RngBank, SamplerRng},
};

fn build_engine() -> ExamEngine {
    let engine = ExamEngine::build_test().expect("build test engine");
    let batch: Vec<NewQuestion> = (1..=30u8)
        .flat_map(|juz| {
            (0..8).map(move |i| {
                let kind = if i % 3 == 0 { TopicKind::Memorization } else { TopicKind::Concepts };
                NewQuestion::classified(juz, kind, Some(1385 + (i as i32 % 20)))
            })
        })
        .collect();
    engine.store().insert_questions(&batch).expect("seed bank");
    engine
}

#[test]
fn same_seed_produces_identical_custom_exams() {
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;
    let req = SelectionRequest::Custom(CustomRequest::new("det", 1, 30, 120).with_split(40, 60));

    let engine_a = build_engine();
    let engine_b = build_engine();

    let a = engine_a.compose("u", &req, &mut SamplerRng::seeded(SEED)).unwrap();
    let b = engine_b.compose("u", &req, &mut SamplerRng::seeded(SEED)).unwrap();

    assert_eq!(a.entries, b.entries, "Selections diverged for the same seed");
}

#[test]
fn request_streams_are_independent_of_each_other() {
    let bank = RngBank::new(42);
    let req = SelectionRequest::Custom(CustomRequest::new("det", 1, 30, 50));

    let engine_a = build_engine();
    let first_a = engine_a.compose("u", &req, &mut bank.for_request(0)).unwrap();
    let second_a = engine_a.compose("u", &req, &mut bank.for_request(1)).unwrap();

    // Engine B skips request 0; request 1 must still match.
    let engine_b = build_engine();
    let second_b = engine_b.compose("u", &req, &mut bank.for_request(1)).unwrap();

    assert_eq!(second_a.entries, second_b.entries);
    assert_ne!(first_a.entries, second_a.entries);
}

#[test]
fn simulator_exams_are_identical_regardless_of_seed() {
    let req = SelectionRequest::Simulator(SimulatorRequest::new(3));

    let a = build_engine().compose("u", &req, &mut SamplerRng::seeded(1)).unwrap();
    let b = build_engine().compose("u", &req, &mut SamplerRng::seeded(2)).unwrap();

    assert_eq!(a.entries, b.entries);
}
