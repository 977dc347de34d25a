use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EXPECTED: &str = "\
chr1\t150000\t350000\tchr1\t150000\t350000\t1\t3.25\t1.5
chr1\t450000\t850000\tchr1\t450000\t850000\t1\t2.5\t0.75
chr2\t50000\t250000\tchr2\t50000\t250000\t1\t4.0\t2.0
";

#[test]
fn command_convert_help() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("convert").arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Convert OnTAD call files"));
    Ok(())
}

#[test]
fn command_convert_chrom_sizes() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    let output = cmd
        .arg("convert")
        .arg("tests/tad/sample")
        .arg("--chrom-sizes")
        .arg("tests/tad/genome.sizes")
        .arg("--binsize")
        .arg("100000")
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout, EXPECTED);

    // chrX holds only the level 0 domain
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("no TADs for chrX"));

    Ok(())
}

#[test]
fn command_convert_bins_file() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("convert")
        .arg("tests/tad/sample")
        .arg("--bins")
        .arg("tests/tad/genome.bins")
        .arg("-b")
        .arg("100000");
    cmd.assert().success().stdout(EXPECTED);

    Ok(())
}

#[test]
fn command_convert_order_and_sort() -> anyhow::Result<()> {
    // given order
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    let output = cmd
        .arg("convert")
        .arg("tests/tad/sample/sample.chr2.tad")
        .arg("tests/tad/sample/sample.chr1.tad")
        .arg("--chrom-sizes")
        .arg("tests/tad/genome.sizes")
        .arg("-b")
        .arg("100000")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.lines().next().unwrap().starts_with("chr2\t50000"));

    // sorted
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("convert")
        .arg("tests/tad/sample/sample.chr2.tad")
        .arg("tests/tad/sample/sample.chr1.tad")
        .arg("--chrom-sizes")
        .arg("tests/tad/genome.sizes")
        .arg("-b")
        .arg("100000")
        .arg("--sort");
    cmd.assert().success().stdout(EXPECTED);

    Ok(())
}

#[test]
fn command_convert_outfile() -> anyhow::Result<()> {
    let tempdir = TempDir::new()?;
    let outfile = tempdir.path().join("tads.bedpe");

    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("convert")
        .arg("tests/tad/sample")
        .arg("--chrom-sizes")
        .arg("tests/tad/genome.sizes")
        .arg("-b")
        .arg("100000")
        .arg("-o")
        .arg(&outfile);
    cmd.assert().success().stdout("");

    assert_eq!(std::fs::read_to_string(&outfile)?, EXPECTED);

    Ok(())
}

#[test]
fn command_convert_no_tads() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("convert")
        .arg("tests/tad/empty")
        .arg("tests/tad/sample/sample.chrX.tad")
        .arg("--chrom-sizes")
        .arg("tests/tad/genome.sizes")
        .arg("-b")
        .arg("100000");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no TADs were called"));

    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("convert")
        .arg("tests/tad/empty")
        .arg("--chrom-sizes")
        .arg("tests/tad/genome.sizes")
        .arg("-b")
        .arg("100000")
        .arg("--allow-empty");
    cmd.assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("no TADs for chr2"));

    Ok(())
}

#[test]
fn command_convert_malformed() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("convert")
        .arg("tests/tad/bad")
        .arg("tests/tad/sample/sample.chr2.tad")
        .arg("--chrom-sizes")
        .arg("tests/tad/genome.sizes")
        .arg("-b")
        .arg("100000");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("sample.chr1.tad:2"))
        .stderr(predicate::str::contains("after its end bin"));

    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("convert")
        .arg("tests/tad/bad")
        .arg("tests/tad/sample/sample.chr2.tad")
        .arg("--chrom-sizes")
        .arg("tests/tad/genome.sizes")
        .arg("-b")
        .arg("100000")
        .arg("--skip-malformed");
    cmd.assert()
        .success()
        .stdout("chr2\t50000\t250000\tchr2\t50000\t250000\t1\t4.0\t2.0\n")
        .stderr(predicate::str::contains("Skipping"));

    Ok(())
}

#[test]
fn command_convert_bad_names() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("convert")
        .arg("tests/tad/unnamed")
        .arg("--chrom-sizes")
        .arg("tests/tad/genome.sizes");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("can't find a chromosome name"));

    // a reference without chr1
    let tempdir = TempDir::new()?;
    let sizes = tempdir.path().join("other.sizes");
    std::fs::write(&sizes, "chr5\t1000000\n")?;

    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("convert")
        .arg("tests/tad/sample/sample.chr1.tad")
        .arg("--chrom-sizes")
        .arg(&sizes);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("chromosome chr1 is absent"));

    Ok(())
}

#[test]
fn command_convert_missing_source() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("convert").arg("tests/tad/sample");
    cmd.assert().failure();

    let mut cmd = Command::cargo_bin("tad2bedpe")?;
    cmd.arg("convert")
        .arg("tests/tad/sample")
        .arg("--cooler")
        .arg("tests/tad/absent.mcool");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("resource not found"));

    Ok(())
}

#[test]
fn command_convert_reread_output() -> anyhow::Result<()> {
    // converting emitted BEDPE rows again would shift them, so they are only
    // read back verbatim
    let rows: Vec<tad2bedpe::libs::bedpe::BedpeRow> = EXPECTED
        .lines()
        .map(|l| l.parse().unwrap())
        .collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].start1, 150000);
    assert_eq!(rows[2].to_string(), EXPECTED.lines().nth(2).unwrap());

    Ok(())
}
