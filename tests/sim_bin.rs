use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["--games", "3", "--seed", "12345", "--difficulty", "medium", "--airstrike"])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["games"], 3);
    assert_eq!(v["seed"], 12345);
    assert_eq!(v["difficulty"], "Medium");
    let moves = v["moves"].as_array().unwrap();
    assert_eq!(moves.len(), 3);
    for m in moves {
        let m = m.as_u64().unwrap();
        assert!((5..=100).contains(&m));
    }
    assert!(v["min_moves"].as_u64() <= v["max_moves"].as_u64());
}

#[test]
fn sim_binary_is_reproducible() {
    let run = || {
        Command::new(env!("CARGO_BIN_EXE_sim"))
            .args(["--games", "2", "--seed", "7", "--no-touch", "--bombardment"])
            .output()
            .expect("failed to run sim binary")
            .stdout
    };
    assert_eq!(run(), run());
}
