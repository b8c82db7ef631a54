//! Integration tests for the fd-cli binary.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

const CLASSIC: [&str; 3] = ["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"];

fn fairdice() -> Command {
    let mut cmd = Command::cargo_bin("fairdice").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("FAIRDICE_LOG");
    cmd
}

// ---------------------------------------------------------------------------
// dice arguments
// ---------------------------------------------------------------------------

#[test]
fn no_dice_fails() {
    fairdice()
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 3 dice"))
        .stderr(predicate::str::contains("Example: fairdice"));
}

#[test]
fn one_die_fails_before_any_draw() {
    fairdice()
        .arg("1,2,3,4,5,6")
        .write_stdin("0\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 3 dice, got 1"))
        .stdout(predicate::str::contains("HMAC").not());
}

#[test]
fn wrong_face_count_fails() {
    fairdice()
        .args(["1,2,3", "1,2,3,4,5,6", "1,2,3,4,5,6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("die #0 must have exactly 6 values"));
}

#[test]
fn non_integer_face_fails() {
    fairdice()
        .args(["1,2,3,4,5,6", "1,2,3,4,5,a", "1,2,3,4,5,6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("die #1 contains a non-integer value"));
}

// ---------------------------------------------------------------------------
// --table
// ---------------------------------------------------------------------------

#[test]
fn table_prints_probabilities() {
    fairdice()
        .arg("--table")
        .args(CLASSIC)
        .assert()
        .success()
        .stdout(predicate::str::contains("Probability of the win for the user"))
        .stdout(predicate::str::contains("0.5556"))
        .stdout(predicate::str::contains("HMAC").not());
}

#[test]
fn table_accepts_negative_faces() {
    fairdice()
        .args(["--table", "--"])
        .args(["-1,2,3,4,5,6", "1,-2,3,4,5,6", "1,2,-3,4,5,6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-1,2,3,4,5,6"));
}

#[test]
fn table_flag_after_dice() {
    fairdice()
        .args(CLASSIC)
        .arg("--table")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.5556"));
}

#[test]
fn leading_hyphen_die_needs_separator() {
    fairdice()
        .arg("--table")
        .args(["-1,2,3,4,5,6", "1,2,3,4,5,6", "1,2,3,4,5,6"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("0.").not());
}

// ---------------------------------------------------------------------------
// interactive game
// ---------------------------------------------------------------------------

#[test]
fn exit_at_first_prompt() {
    fairdice()
        .args(CLASSIC)
        .write_stdin("x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Guess my number (0 or 1)"))
        .stdout(predicate::str::contains("Exiting game."))
        .stdout(predicate::str::contains("KEY=").not());
}

#[test]
fn end_of_input_exits_cleanly() {
    fairdice()
        .args(CLASSIC)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exiting game."));
}

#[test]
fn help_shows_table_then_asks_again() {
    let output = fairdice()
        .args(CLASSIC)
        .write_stdin("?\nX\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(output).unwrap();
    assert!(out.contains("0.5556"));
    assert_eq!(out.matches("Guess my number (0 or 1)").count(), 2);
    assert_eq!(out.matches("HMAC=").count(), 2);
}

#[test]
fn invalid_input_is_retried() {
    fairdice()
        .args(CLASSIC)
        .write_stdin("5\nabc\nx\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid input.").count(2));
}

#[test]
fn digest_comes_before_guess_prompt() {
    let output = fairdice()
        .args(CLASSIC)
        .write_stdin("0\nx\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(output).unwrap();
    let digest = out.find("HMAC=").unwrap();
    let prompt = out.find("Guess my number").unwrap();
    let key = out.find("KEY=").unwrap();
    assert!(digest < prompt);
    assert!(prompt < key);
}

// ---------------------------------------------------------------------------
// --seed
// ---------------------------------------------------------------------------

#[test]
fn seed_is_announced() {
    fairdice()
        .args(["--seed", "7"])
        .args(CLASSIC)
        .write_stdin("x\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("predictable"));
}

#[test]
fn seeded_games_replay_identically() {
    let run = || {
        fairdice()
            .args(["--seed", "7"])
            .args(CLASSIC)
            .write_stdin("0\n1\n2\n3\n")
            .output()
            .unwrap()
    };
    let (a, b) = (run(), run());
    assert_eq!(a.status.code(), b.status.code());
    assert_eq!(a.stdout, b.stdout);
    assert!(String::from_utf8_lossy(&a.stdout).contains("HMAC="));
}

#[test]
fn seed_flag_after_dice() {
    fairdice()
        .args(CLASSIC)
        .args(["--seed", "3"])
        .write_stdin("x\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("predictable"));
}

// ---------------------------------------------------------------------------
// seeded transcripts
// ---------------------------------------------------------------------------

fn seeded_transcript(seed: &str, input: &str) -> String {
    let output = fairdice()
        .args(["--seed", seed])
        .args(CLASSIC)
        .write_stdin(input.to_string())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

fn assert_roll_disclosed_in_order(section: &str) {
    let digest = section.find("HMAC=").unwrap();
    let prompt = section.find("Add your number modulo 6").unwrap();
    let key = section.find("KEY=").unwrap();
    assert!(digest < prompt, "digest after prompt:\n{section}");
    assert!(prompt < key, "key before prompt:\n{section}");
}

#[test]
fn taking_the_computers_die_exits_nonzero() {
    fairdice()
        .args(["--seed", "2"])
        .args(CLASSIC)
        .write_stdin("0\n0\n")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("I chose the [2,2,4,4,9,9] die."))
        .stderr(predicate::str::contains("die 0 is not available"));
}

#[test]
fn seeded_game_plays_to_a_score() {
    let out = seeded_transcript("3", "0\n0\n0\n0\n");

    let user = out.find("--- Your roll ---").unwrap();
    let computer = out.find("--- My roll ---").unwrap();
    assert!(user < computer);
    assert_roll_disclosed_in_order(&out[user..computer]);
    assert_roll_disclosed_in_order(&out[computer..]);

    assert!(out.contains("Your roll result is"));
    assert!(out.contains("My roll result is"));
    assert!(out.contains("You win") || out.contains("I win") || out.contains("It's a draw"));
    assert!(!out.contains("Exiting game."));
}

#[test]
fn help_during_selection_keeps_earlier_draws() {
    let plain = seeded_transcript("3", "0\n0\n0\n0\n");
    let helped = seeded_transcript("3", "0\n?\n0\n0\n0\n");

    assert!(helped.contains("Probability of the win for the user"));
    assert_eq!(helped.matches("Choose your die").count(), 2);
    assert_eq!(helped.matches("Guess my number").count(), 1);

    let last_line = |s: &str| s.lines().rev().find(|l| !l.trim().is_empty()).map(str::to_string);
    assert_eq!(last_line(&helped), last_line(&plain));
}
