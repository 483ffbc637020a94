//! exam-runner: headless runner for the exam composition engine.
//!
//! Usage:
//!   exam-runner --db bank.db --import questions.json
//!   exam-runner --db bank.db --user u1 --request request.json --seed 42
//!   exam-runner --db bank.db --ipc-mode --allow-simulator u1,u2

use anyhow::{Context, Result};
use examgen_core::{
    config::ComposerConfig,
    engine::{AllowList, ExamEngine},
    error::ExamError,
    question::NewQuestion,
    request::SelectionRequest,
    rng::{RngBank, SamplerRng},
    store::ExamStore,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Compose {
        user:    String,
        request: serde_json::Value,
    },
    GetExam {
        exam_id: String,
    },
    Quit,
}

/// Source of per-request RNGs: a seeded bank, or fresh entropy each time.
struct RngSource {
    bank:     Option<RngBank>,
    requests: u64,
}

impl RngSource {
    fn next_rng(&mut self) -> SamplerRng {
        let index = self.requests;
        self.requests += 1;
        match &self.bank {
            Some(bank) => bank.for_request(index),
            None => SamplerRng::from_entropy(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg::<u64>(&args, "--seed");
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = arg_value(&args, "--db").unwrap_or(":memory:");

    let config = match arg_value(&args, "--config") {
        Some(path) => ComposerConfig::load(path)?,
        None => ComposerConfig::default(),
    };

    let store = ExamStore::open(db)?;
    store.migrate()?;

    if let Some(path) = arg_value(&args, "--import") {
        let imported = import_bank(&store, path)?;
        log::info!("Imported {imported} questions from {path}");
        if !ipc_mode {
            println!("imported {imported} questions into {db}");
        }
    }

    let mut engine = ExamEngine::new(store, config);
    if let Some(users) = arg_value(&args, "--allow-simulator") {
        let users = users.split(',').map(str::trim).filter(|u| !u.is_empty());
        engine = engine.with_gate(Box::new(AllowList::new(users)));
    }

    let mut rngs = RngSource {
        bank:     seed.map(RngBank::new),
        requests: 0,
    };

    if ipc_mode {
        return run_ipc_loop(&engine, &mut rngs);
    }

    if let Some(path) = arg_value(&args, "--request") {
        let user = arg_value(&args, "--user").unwrap_or("cli");
        let content = std::fs::read_to_string(path).with_context(|| format!("Cannot read {path}"))?;
        let body: serde_json::Value =
            serde_json::from_str(&content).with_context(|| format!("Cannot parse {path}"))?;
        let reply = compose_reply(&engine, user, body, &mut rngs)?;
        println!("{}", serde_json::to_string_pretty(&reply)?);
    }

    Ok(())
}

fn import_bank(store: &ExamStore, path: &str) -> Result<usize> {
    let content = std::fs::read_to_string(path).with_context(|| format!("Cannot read {path}"))?;
    let questions: Vec<NewQuestion> =
        serde_json::from_str(&content).with_context(|| format!("Cannot parse {path}"))?;
    let ids = store.insert_questions(&questions)?;
    Ok(ids.len())
}

fn run_ipc_loop(engine: &ExamEngine, rngs: &mut RngSource) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string(), "code": "invalid_command" });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let reply = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Compose { user, request } => compose_reply(engine, &user, request, rngs)?,
            IpcCommand::GetExam { exam_id } => match engine.store().exam_view(&exam_id) {
                Ok(Some(view)) => serde_json::to_value(&view)?,
                Ok(None) => serde_json::json!({ "error": format!("exam {exam_id} not found"), "code": "not_found" }),
                Err(e) => error_reply(&e),
            },
        };
        writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
        stdout.flush()?;
    }
    Ok(())
}

/// Compose one exam and render either its view or the error.
fn compose_reply(
    engine: &ExamEngine,
    user:   &str,
    body:   serde_json::Value,
    rngs:   &mut RngSource,
) -> Result<serde_json::Value> {
    let outcome = SelectionRequest::from_json(body)
        .and_then(|request| engine.compose(user, &request, &mut rngs.next_rng()))
        .and_then(|exam| engine.store().exam_view(&exam.exam_id));

    Ok(match outcome {
        Ok(Some(view)) => serde_json::to_value(&view)?,
        Ok(None) => serde_json::json!({ "error": "composed exam not found", "code": "not_found" }),
        Err(e) => {
            log::warn!("Request from {user} failed: {e}");
            error_reply(&e)
        }
    })
}

fn error_reply(e: &ExamError) -> serde_json::Value {
    serde_json::json!({
        "error": e.to_string(),
        "code": e.code(),
        "transient": e.is_transient(),
    })
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    arg_value(args, flag).and_then(|v| v.parse().ok())
}
