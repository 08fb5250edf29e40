use assert_cmd::Command;
use predicates::prelude::*;

fn yt() -> Command {
    Command::cargo_bin("yt").unwrap()
}

#[test]
fn no_subcommand_fails_with_hint() {
    yt().assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no Arguments"))
        .stderr(predicate::str::contains("yt help"));
}

#[test]
fn download_without_ids_fails_before_any_work() {
    for sub in ["video", "audio"] {
        yt().arg(sub)
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("yt [command] --help"));
    }
}

#[test]
fn version_prints_the_program_name() {
    yt().arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("yt "));
}

#[test]
fn completion_scripts_are_generated() {
    for shell in ["bash", "zsh", "fish", "ps", "elvish"] {
        yt().args(["completion", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("yt"));
    }
}

#[test]
fn completion_rejects_unknown_shells() {
    yt().args(["comp", "nushell"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shell type"));
    yt().arg("completion")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no shell type given"));
}

#[test]
fn info_is_hidden_from_help() {
    yt().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("video"))
        .stdout(predicate::str::contains("audio"))
        .stdout(predicate::str::contains("Get extra information").not());
}
