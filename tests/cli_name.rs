use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn command_name_help() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("name").arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Print the BEDPE file name"));
    Ok(())
}

#[test]
fn command_name_full() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("name").arg("data/sample.mcool");
    cmd.assert().success().stdout(
        "sample.binsize_50000.penalty_0.1.minsz_3.maxsz_200.ldiff_1.96.lsize_5.bedpe\n",
    );
    Ok(())
}

#[test]
fn command_name_short() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("name").arg("sample.mcool").arg("--short-name");
    cmd.assert().success().stdout("sample.bedpe\n");

    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("name")
        .arg("sample.mcool")
        .arg("--short-name")
        .arg("--binsize")
        .arg("10000")
        .arg("--maxsz")
        .arg("100")
        .arg("--penalty")
        .arg("1");
    cmd.assert()
        .success()
        .stdout("sample.binsize_10000.penalty_1.0.maxsz_100.bedpe\n");
    Ok(())
}

#[test]
fn command_name_outfile() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("name")
        .arg("sample.mcool")
        .arg("--penalty")
        .arg("0.3")
        .arg("-o")
        .arg("out/my.bedpe");
    cmd.assert().success().stdout("out/my.bedpe\n");
    Ok(())
}

#[test]
fn command_name_bad_binsize() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("name").arg("sample.mcool").arg("--binsize").arg("0");
    cmd.assert().failure();
    Ok(())
}
