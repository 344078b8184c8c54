use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "2"])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert!(v["winner"].is_string());
    assert_eq!(v["player1"]["heuristic"], "smart");
    assert_eq!(v["player2"]["heuristic"], "markov");
    assert!(v["winner_moves"].as_u64().unwrap() <= 100);
}

#[test]
fn sim_binary_is_deterministic() {
    let run = || {
        Command::new(env!("CARGO_BIN_EXE_sim"))
            .args(["9", "4", "uniform", "markov"])
            .output()
            .expect("failed to run sim binary")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn sim_binary_rejects_missing_seeds() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .arg("1")
        .output()
        .expect("failed to run sim binary");
    assert!(!output.status.success());
}
