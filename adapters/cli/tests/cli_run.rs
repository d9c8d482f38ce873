use std::{fs, process::Command};

fn lane_defence() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lane-defence"));
    let _ = command.env_remove("RUST_LOG");
    command
}

#[test]
fn undefended_session_reports_a_loss() {
    let output = lane_defence()
        .args(["--seed", "9", "--json"])
        .output()
        .expect("binary runs");

    assert_eq!(output.status.code(), Some(2));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout holds the JSON report");
    assert_eq!(report["verdict"], "lost");
    assert_eq!(report["seed"], 9);
}

#[test]
fn exhausted_tick_budget_exits_with_three() {
    let output = lane_defence()
        .args(["--max-ticks", "45", "--render-every", "15"])
        .output()
        .expect("binary runs");

    assert_eq!(output.status.code(), Some(3));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(stdout.matches("Lane Defence tick").count(), 3);
    assert!(stdout.contains("result: tick budget exhausted after 45 ticks"));
}

#[test]
fn config_file_layout_defends_a_single_lane() {
    let path = std::env::temp_dir().join(format!("lane-defence-cli-{}.toml", std::process::id()));
    fs::write(
        &path,
        r#"
        seed = 5

        [playfield]
        lanes = 1

        [[waves]]
        weak = 2

        [[layout]]
        lane = 0
        column = 0
        kind = "rapid"

        [[layout]]
        lane = 0
        column = 1
        kind = "basic"
        "#,
    )
    .expect("temp config written");

    let output = lane_defence()
        .arg("--config")
        .arg(&path)
        .arg("--json")
        .output()
        .expect("binary runs");
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout holds the JSON report");
    assert_eq!(report["verdict"], "won");
    assert_eq!(report["tally"]["defenders_placed"], 2);
    assert_eq!(report["tally"]["attackers_defeated"], 2);
}

#[test]
fn invalid_config_fails_before_running() {
    let path =
        std::env::temp_dir().join(format!("lane-defence-cli-bad-{}.toml", std::process::id()));
    fs::write(&path, "waves = []\n").expect("temp config written");

    let output = lane_defence()
        .arg("--config")
        .arg(&path)
        .output()
        .expect("binary runs");
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn ammo_sessions_fire_their_scripted_shots() {
    let path =
        std::env::temp_dir().join(format!("lane-defence-cli-ammo-{}.toml", std::process::id()));
    fs::write(
        &path,
        r#"
        [[layout]]
        lane = 3
        column = 0
        kind = "basic"

        [[shots]]
        tick = 1
        lane = 3
        column = 0

        [[shots]]
        tick = 2
        lane = 3
        column = 0
        "#,
    )
    .expect("temp config written");

    let output = lane_defence()
        .arg("--config")
        .arg(&path)
        .args(["--firing-model", "ammo", "--max-ticks", "10", "--json"])
        .output()
        .expect("binary runs");
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(3));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout holds the JSON report");
    assert_eq!(report["tally"]["defenders_placed"], 1);
    assert_eq!(report["tally"]["projectiles_fired"], 2);
}
